//! A random-access cursor over the bits of a word buffer.

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::{reference::BitRef, word::Word};

/// A pointer to one bit: a word pointer plus the bit offset inside that word.
///
/// `BitPtr` is the iterator type of the bulk algorithms in
/// [`algo`](crate::algo). Moving it is plain arithmetic and always safe:
/// advancing past the last bit of a word moves to bit 0 of the next word, and
/// stepping back from bit 0 moves to the last bit of the previous word. Only
/// dereferencing ([`read`](Self::read), [`write`](Self::write),
/// [`as_bit_ref`](Self::as_bit_ref)) requires the pointer to be in bounds.
///
/// Pointers are ordered by address, then bit offset. The difference of two
/// pointers into the same buffer is their distance in bits.
///
/// # Examples
///
/// ```
/// use smol_bitvec::BitPtr;
///
/// let words = [0u8; 4];
/// let first = BitPtr::from_slice(&words);
/// let p = first + 13;
/// assert_eq!(p.bit(), 5);
/// assert_eq!(p - first, 13);
/// assert!(first < p);
/// ```
pub struct BitPtr<W: Word> {
    ptr: *mut W,
    bit: u32,
}

impl<W: Word> BitPtr<W> {
    /// Creates a pointer to bit `bit` of the word at `ptr`.
    ///
    /// `bit` must be below `W::BITS`.
    #[must_use]
    #[inline(always)]
    pub const fn new(ptr: *mut W, bit: u32) -> Self {
        debug_assert!(bit < W::BITS, "bit offset out of word");
        Self { ptr, bit }
    }

    /// Pointer to bit 0 of the first word of `words`.
    ///
    /// The result may only be used for reading.
    #[must_use]
    #[inline(always)]
    pub const fn from_slice(words: &[W]) -> Self {
        Self::new(words.as_ptr().cast_mut(), 0)
    }

    /// Pointer to bit 0 of the first word of `words`.
    #[must_use]
    #[inline(always)]
    pub const fn from_mut_slice(words: &mut [W]) -> Self {
        Self::new(words.as_mut_ptr(), 0)
    }

    /// The word this pointer addresses.
    #[must_use]
    #[inline(always)]
    pub const fn word_ptr(self) -> *mut W {
        self.ptr
    }

    /// Offset of the addressed bit inside its word.
    #[must_use]
    #[inline(always)]
    pub const fn bit(self) -> u32 {
        self.bit
    }

    /// Single-bit mask of the addressed bit.
    #[must_use]
    #[inline(always)]
    pub fn mask(self) -> W {
        W::ONE << self.bit
    }

    /// Moves the pointer by `n` bits in either direction.
    #[must_use]
    #[inline]
    pub fn offset(self, n: isize) -> Self {
        let bits = W::BITS as isize;
        let total = self.bit as isize + n;
        Self {
            ptr: self.ptr.wrapping_offset(total.div_euclid(bits)),
            bit: total.rem_euclid(bits) as u32,
        }
    }

    /// Moves the pointer `n` bits forward.
    #[must_use]
    #[inline]
    pub fn add(self, n: usize) -> Self {
        let bits = W::BITS as usize;
        let total = self.bit as usize + n;
        Self {
            ptr: self.ptr.wrapping_add(total / bits),
            bit: (total % bits) as u32,
        }
    }

    /// Moves the pointer `n` bits backward.
    #[must_use]
    #[inline]
    pub fn sub(self, n: usize) -> Self {
        let bits = W::BITS as usize;
        let back = n + (W::BITS - 1 - self.bit) as usize;
        Self {
            ptr: self.ptr.wrapping_sub(back / bits),
            bit: W::BITS - 1 - (back % bits) as u32,
        }
    }

    /// Advances to the next bit.
    #[inline(always)]
    pub fn inc(&mut self) {
        if self.bit == W::BITS - 1 {
            self.ptr = self.ptr.wrapping_add(1);
            self.bit = 0;
        } else {
            self.bit += 1;
        }
    }

    /// Steps back to the previous bit.
    #[inline(always)]
    pub fn dec(&mut self) {
        if self.bit == 0 {
            self.ptr = self.ptr.wrapping_sub(1);
            self.bit = W::BITS - 1;
        } else {
            self.bit -= 1;
        }
    }

    /// Signed distance in bits from `origin` to `self`.
    #[must_use]
    #[inline]
    pub fn distance_from(self, origin: Self) -> isize {
        let bytes = (self.ptr as usize).wrapping_sub(origin.ptr as usize) as isize;
        let words = bytes / mem::size_of::<W>() as isize;
        words * W::BITS as isize + self.bit as isize - origin.bit as isize
    }

    /// Reads the addressed bit.
    ///
    /// # Safety
    ///
    /// The addressed word must be valid for reads.
    #[must_use]
    #[inline(always)]
    pub unsafe fn read(self) -> bool {
        unsafe { self.ptr.read() & self.mask() != W::ZERO }
    }

    /// Writes the addressed bit, leaving the rest of the word untouched.
    ///
    /// # Safety
    ///
    /// The addressed word must be valid for reads and writes.
    #[inline(always)]
    pub unsafe fn write(self, value: bool) {
        unsafe {
            let w = self.ptr.read();
            let m = self.mask();
            self.ptr.write(if value { w | m } else { w & !m });
        }
    }

    /// Reads the whole addressed word.
    ///
    /// # Safety
    ///
    /// The addressed word must be valid for reads.
    #[must_use]
    #[inline(always)]
    pub unsafe fn read_word(self) -> W {
        unsafe { self.ptr.read() }
    }

    /// Dereferences the pointer into a [`BitRef`].
    ///
    /// # Safety
    ///
    /// The addressed word must be valid for reads and writes for `'a`, and no
    /// reference to it may be alive while the `BitRef` is used.
    #[must_use]
    #[inline(always)]
    pub unsafe fn as_bit_ref<'a>(self) -> BitRef<'a, W> {
        unsafe { BitRef::from_raw(self.ptr, self.mask()) }
    }
}

impl<W: Word> Clone for BitPtr<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: Word> Copy for BitPtr<W> {}

impl<W: Word> PartialEq for BitPtr<W> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.bit == other.bit
    }
}

impl<W: Word> Eq for BitPtr<W> {}

impl<W: Word> PartialOrd for BitPtr<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Word> Ord for BitPtr<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.ptr as usize)
            .cmp(&(other.ptr as usize))
            .then(self.bit.cmp(&other.bit))
    }
}

impl<W: Word> Hash for BitPtr<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.ptr as usize).hash(state);
        self.bit.hash(state);
    }
}

impl<W: Word> fmt::Debug for BitPtr<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}+{}", self.ptr, self.bit)
    }
}

impl<W: Word> Add<usize> for BitPtr<W> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: usize) -> Self {
        BitPtr::add(self, rhs)
    }
}

impl<W: Word> AddAssign<usize> for BitPtr<W> {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        *self = BitPtr::add(*self, rhs);
    }
}

impl<W: Word> Sub<usize> for BitPtr<W> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: usize) -> Self {
        BitPtr::sub(self, rhs)
    }
}

impl<W: Word> SubAssign<usize> for BitPtr<W> {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        *self = BitPtr::sub(*self, rhs);
    }
}

impl<W: Word> Sub for BitPtr<W> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.distance_from(rhs)
    }
}

/// Length in bits of the range `[first, last)`.
#[inline(always)]
pub(crate) fn distance<W: Word>(first: BitPtr<W>, last: BitPtr<W>) -> usize {
    let d = last - first;
    debug_assert!(d >= 0, "range end precedes range start");
    d as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_wraps_across_words() {
        let mut words = [0u8; 3];
        let first = BitPtr::from_mut_slice(&mut words);
        let mut p = first;
        for i in 0..24 {
            assert_eq!(p - first, i);
            assert_eq!(p.bit(), (i % 8) as u32);
            p.inc();
        }
        for i in (0..24).rev() {
            p.dec();
            assert_eq!(p - first, i);
        }
        assert_eq!(p, first);
    }

    #[test]
    fn test_random_access_matches_stepping() {
        let words = [0u32; 8];
        let first = BitPtr::from_slice(&words);
        for a in 0..256usize {
            let p = first + a;
            for b in 0..=a {
                assert_eq!(p - b, first + (a - b));
                assert_eq!((p - b) - first, (a - b) as isize);
            }
            assert_eq!(first.offset(a as isize), p);
            assert_eq!(p.offset(-(a as isize)), first);
        }
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let words = [0u16; 2];
        let first = BitPtr::from_slice(&words);
        let a = first + 15;
        let b = first + 16;
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert!(a >= a);
        assert_ne!(a, b);
        assert_eq!(a.word_ptr(), first.word_ptr());
        assert_eq!(b.bit(), 0);
        assert_eq!(a - b, -1);
    }

    #[test]
    fn test_read_write() {
        let mut words = [0u64; 2];
        let first = BitPtr::from_mut_slice(&mut words);
        unsafe {
            (first + 70).write(true);
            assert!((first + 70).read());
            assert!(!(first + 69).read());
            let mut r = (first + 3).as_bit_ref();
            r.set(true);
        }
        assert_eq!(words, [1 << 3, 1 << 6]);
    }
}
