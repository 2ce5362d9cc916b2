//! The growable bit vector.

use core::ops::{Index, Range, RangeBounds};

use crate::{
    algo,
    bits::{Bits, BitsMut, resolve_range},
    error::{Error, Result, or_panic},
    ptr::BitPtr,
    storage::{SboStorage, Storage, Words},
    word::Word,
};

/// A growable sequence of bits over a pluggable [`Storage`].
///
/// The default storage, [`SboStorage`], keeps up to
/// [`INLINE_BITS`](crate::storage::INLINE_BITS) bits inside the value itself
/// and moves to the heap beyond that. All read and write operations that do
/// not change the length come from [`Bits`] and [`BitsMut`].
///
/// Every operation that can grow the vector has a `try_` form returning
/// [`Error`]; the plain form panics with the same message. A failed
/// operation leaves the vector unchanged.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits, BitsMut};
///
/// let mut bits: BitVec = BitVec::new();
/// bits.push(true);
/// bits.push(false);
/// bits.extend([true, true]);
/// assert_eq!(bits.len(), 4);
/// assert_eq!(bits.to_string(), "1101");
///
/// bits.flip(1);
/// bits.insert(0, false);
/// assert_eq!(bits.to_string(), "11110");
/// assert_eq!(bits.pop(), Some(true));
/// ```
pub struct BitVec<S: Storage = SboStorage> {
    storage: S,
}

/// `len + n`, failing when it does not fit the backend.
#[inline]
fn grown_len(len: usize, n: usize, max: usize) -> Result<usize> {
    len.checked_add(n).ok_or(Error::CapacityExceeded {
        requested: usize::MAX,
        max,
    })
}

/// Resolves `range` against `len` without panicking.
fn checked_range(range: impl RangeBounds<usize>, len: usize) -> Result<Range<usize>> {
    use core::ops::Bound;

    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    if end > len {
        return Err(Error::OutOfRange { index: end, len });
    }
    if start > end {
        return Err(Error::OutOfRange { index: start, len });
    }
    Ok(start..end)
}

impl<S: Storage + Default> BitVec<S> {
    /// Creates an empty vector.
    ///
    /// No memory is allocated until bits are added.
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(S::default())
    }

    /// Creates an empty vector with room for at least `bits` bits.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold `bits` bits.
    #[track_caller]
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        let mut out = Self::new();
        out.reserve(bits);
        out
    }

    /// Creates a vector of `len` bits, all equal to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold `len` bits.
    #[track_caller]
    #[must_use]
    pub fn with_len(len: usize, value: bool) -> Self {
        or_panic(Self::try_with_len(len, value))
    }

    /// Fallible form of [`with_len`](Self::with_len).
    pub fn try_with_len(len: usize, value: bool) -> Result<Self> {
        let mut out = Self::new();
        out.try_resize(len, value)?;
        Ok(out)
    }

    /// Creates a vector from the first `len` bits of `words`, least
    /// significant bit of the first word first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `words` holds fewer than `len`
    /// bits, or a storage error if the bits do not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits, storage::PlainStorage};
    ///
    /// let bits = BitVec::<PlainStorage<u8>>::from_words(&[0b1010_1111, 0xFF], 10).unwrap();
    /// assert_eq!(bits.to_string(), "1110101111");
    /// assert!(BitVec::<PlainStorage<u8>>::from_words(&[0], 9).is_err());
    /// ```
    pub fn from_words(words: &[S::Word], len: usize) -> Result<Self> {
        let available = words.len().saturating_mul(<S::Word as Word>::BITS as usize);
        if len > available {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: available,
            });
        }
        let mut out = Self::try_with_len(len, false)?;
        let src = BitPtr::from_slice(words);
        // SAFETY: `words` holds at least `len` bits and `out` was sized to
        // `len`
        unsafe { algo::copy(src, src + len, out.begin_mut()) };
        Ok(out)
    }

    /// Parses text written highest position first, where `on` marks a set
    /// bit and `off` a clear one. This is the inverse of
    /// [`Bits::to_string_with`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChar`] for any other character.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let bits: BitVec = BitVec::from_bit_str_with("#..#.", '#', '.').unwrap();
    /// assert_eq!(bits.ones().collect::<Vec<_>>(), [1, 4]);
    /// assert_eq!(bits.to_string_with('#', '.'), "#..#.");
    /// ```
    pub fn from_bit_str_with(s: &str, on: char, off: char) -> Result<Self> {
        let len = s.chars().count();
        let mut out = Self::try_with_len(len, false)?;
        for (pos, ch) in s.chars().enumerate() {
            if ch == on {
                out.set(len - 1 - pos, true);
            } else if ch != off {
                return Err(Error::InvalidChar { ch, pos });
            }
        }
        Ok(out)
    }

    /// Copies the bits in `range` into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or the copy cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let bits: BitVec = "1100_1010".parse().unwrap();
    /// assert_eq!(bits.bitslice(1..5).to_string(), "0101");
    /// ```
    #[track_caller]
    #[must_use]
    pub fn bitslice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let r = resolve_range(range, self.len());
        let mut out = Self::with_len(r.end - r.start, false);
        let first = self.begin();
        // SAFETY: the range was checked and `out` holds its length
        unsafe { algo::copy(first + r.start, first + r.end, out.begin_mut()) };
        out
    }

    /// Splits the vector in two at `at`, returning the bits `[at, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    #[track_caller]
    #[must_use = "use `truncate` to drop the tail"]
    pub fn split_off(&mut self, at: usize) -> Self {
        let tail = self.bitslice(at..);
        self.truncate(at);
        tail
    }
}

impl<S: Storage + Default> Default for BitVec<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> BitVec<S> {
    /// Wraps an existing storage.
    #[must_use]
    pub const fn from_storage(storage: S) -> Self {
        Self { storage }
    }

    /// Unwraps the storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The underlying storage.
    #[inline]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Deep copy, reporting allocation failure instead of panicking.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self::from_storage(self.storage.try_clone()?))
    }

    /// Number of bits the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Whether the bits live in a heap buffer.
    #[inline]
    pub fn is_heap(&self) -> bool {
        self.storage.is_heap()
    }

    /// The occupied words, with every bit past the length zero.
    pub fn words(&self) -> Words<'_, S::Word> {
        self.storage.words()
    }

    /// Makes room for at least `additional` more bits.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold that many bits.
    #[track_caller]
    pub fn reserve(&mut self, additional: usize) {
        or_panic(self.try_reserve(additional));
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let total = grown_len(self.len(), additional, S::MAX_BITS)?;
        self.storage.try_reserve(total)
    }

    /// Changes the length to `len`, filling new bits with `value`.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold `len` bits.
    #[track_caller]
    pub fn resize(&mut self, len: usize, value: bool) {
        or_panic(self.try_resize(len, value));
    }

    /// Fallible form of [`resize`](Self::resize).
    pub fn try_resize(&mut self, len: usize, value: bool) -> Result<()> {
        self.storage.try_resize(len, value)
    }

    /// Shortens the vector to `len` bits. Does nothing if it is already
    /// shorter.
    pub fn truncate(&mut self, len: usize) {
        let cur = self.len();
        if len < cur {
            let first = self.begin_mut();
            // SAFETY: [len, cur) is inside the buffer and is zero afterwards
            unsafe {
                algo::fill(first + len, first + cur, false);
                self.storage.set_len(len);
            }
        }
    }

    /// Drops every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Releases unused capacity. Short SBO and tagged vectors move back
    /// inline.
    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit();
    }

    /// Appends a bit.
    ///
    /// # Panics
    ///
    /// Panics if the storage is full.
    #[track_caller]
    #[inline]
    pub fn push(&mut self, value: bool) {
        or_panic(self.try_push(value));
    }

    /// Fallible form of [`push`](Self::push).
    #[inline]
    pub fn try_push(&mut self, value: bool) -> Result<()> {
        let len = self.len();
        self.storage.try_resize(len + 1, value)
    }

    /// Removes and returns the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        let len = self.len().checked_sub(1)?;
        // SAFETY: len < self.len()
        let v = unsafe { self.test_unchecked(len) };
        self.truncate(len);
        Some(v)
    }

    /// Inserts `value` at `index`, moving the bits above it up by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or the storage is full.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: bool) {
        or_panic(self.try_insert(index, value));
    }

    /// Fallible form of [`insert`](Self::insert).
    pub fn try_insert(&mut self, index: usize, value: bool) -> Result<()> {
        self.try_insert_n(index, 1, value)
    }

    /// Inserts `n` copies of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or the storage cannot hold the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVec;
    ///
    /// let mut bits: BitVec = "1001".parse().unwrap();
    /// bits.insert_n(2, 3, true);
    /// assert_eq!(bits.to_string(), "1011101");
    /// ```
    #[track_caller]
    pub fn insert_n(&mut self, index: usize, n: usize, value: bool) {
        or_panic(self.try_insert_n(index, n, value));
    }

    /// Fallible form of [`insert_n`](Self::insert_n).
    pub fn try_insert_n(&mut self, index: usize, n: usize, value: bool) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        let new_len = grown_len(len, n, S::MAX_BITS)?;
        self.storage.try_resize(new_len, false)?;
        let first = self.begin_mut();
        // SAFETY: the buffer now holds `new_len` bits
        unsafe {
            algo::copy_backward(first + index, first + len, first + new_len);
            algo::fill(first + index, first + index + n, value);
        }
        Ok(())
    }

    /// Removes the bit at `index` and returns it, moving the bits above it
    /// down by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= len`.
    pub fn erase(&mut self, index: usize) -> Result<bool> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        // SAFETY: index < len
        let v = unsafe { self.test_unchecked(index) };
        self.erase_range(index..=index)?;
        Ok(v)
    }

    /// Removes the bits in `range`, moving the bits above it down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the range does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVec;
    ///
    /// let mut bits: BitVec = "1010_0001".parse().unwrap();
    /// bits.erase_range(1..5).unwrap();
    /// assert_eq!(bits.to_string(), "1011");
    /// assert!(bits.erase_range(3..9).is_err());
    /// ```
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<()> {
        let len = self.len();
        let r = checked_range(range, len)?;
        let n = r.end - r.start;
        if n == 0 {
            return Ok(());
        }
        let first = self.begin_mut();
        // SAFETY: the range was checked against `len`
        unsafe { algo::copy(first + r.end, first + len, first + r.start) };
        self.truncate(len - n);
        Ok(())
    }

    /// Appends every bit of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold the result.
    #[track_caller]
    pub fn extend_from_bits<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) {
        or_panic(self.try_extend_from_bits(other));
    }

    /// Fallible form of [`extend_from_bits`](Self::extend_from_bits).
    pub fn try_extend_from_bits<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) -> Result<()> {
        let len = self.len();
        let n = other.len();
        self.storage.try_resize(grown_len(len, n, S::MAX_BITS)?, false)?;
        let src = other.begin();
        // SAFETY: `self` now has room for `n` bits after `len`, and `other`
        // is borrowed separately
        unsafe { algo::copy(src, src + n, self.begin_mut() + len) };
        Ok(())
    }
}

impl<S: Storage> Bits for BitVec<S> {
    type Word = S::Word;

    #[inline]
    fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn begin(&self) -> BitPtr<S::Word> {
        BitPtr::new(self.storage.as_ptr().cast_mut(), 0)
    }
}

impl<S: Storage> BitsMut for BitVec<S> {
    #[inline]
    fn begin_mut(&mut self) -> BitPtr<S::Word> {
        BitPtr::new(self.storage.as_mut_ptr(), 0)
    }
}

impl<S: Storage> Index<usize> for BitVec<S> {
    type Output = bool;

    #[track_caller]
    fn index(&self, index: usize) -> &bool {
        if self.test(index) { &true } else { &false }
    }
}
