//! Operations shared by every bit container.
//!
//! A container only has to say where its bits start and how many there are;
//! [`Bits`] and [`BitsMut`] then provide the whole read and write surface on
//! top of the [`algo`](crate::algo) functions. [`BitVec`](crate::BitVec),
//! [`BitSet`](crate::BitSet) and [`BitView`](crate::BitView) all implement
//! both.
//!
//! Operations taking a second container treat the shorter operand as if it
//! were padded with zeros.

use alloc::{string::String, vec::Vec};
use core::ops::{Bound, Range, RangeBounds};

use crate::{
    algo::{self, BinaryOp},
    error::{Error, Result},
    iter::{Iter, IterMut, Ones, Select},
    ptr::{BitPtr, distance},
    reference::BitRef,
    word::{Word, bit_space},
};

/// Resolves `range` against a container of `len` bits, panicking like slice
/// indexing when it does not fit.
#[track_caller]
pub(crate) fn resolve_range(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).unwrap_or_else(|| panic!("range start overflows usize")),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).unwrap_or_else(|| panic!("range end overflows usize")),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    assert!(start <= end, "range starts at {start} but ends at {end}");
    assert!(end <= len, "range end {end} out of range for length {len}");
    start..end
}

#[track_caller]
#[inline]
fn check_index(index: usize, len: usize) {
    assert!(index < len, "bit position {index} out of range for length {len}");
}

/// Read access to a sequence of bits.
pub trait Bits {
    /// The storage word.
    type Word: Word;

    /// Number of bits.
    fn len(&self) -> usize;

    /// Pointer to the first bit.
    ///
    /// The `len` bits from here on are readable while `self` is borrowed.
    fn begin(&self) -> BitPtr<Self::Word>;

    /// Whether there are no bits.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer one past the last bit.
    #[inline]
    fn end(&self) -> BitPtr<Self::Word> {
        self.begin() + self.len()
    }

    /// Value of bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    fn test(&self, index: usize) -> bool {
        check_index(index, self.len());
        // SAFETY: checked above
        unsafe { self.test_unchecked(index) }
    }

    /// Value of bit `index`, or [`Error::OutOfRange`].
    #[inline]
    fn at(&self, index: usize) -> Result<bool> {
        if index >= self.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.len(),
            });
        }
        // SAFETY: checked above
        Ok(unsafe { self.test_unchecked(index) })
    }

    /// Value of bit `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be below `len`.
    #[inline]
    unsafe fn test_unchecked(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        unsafe { (self.begin() + index).read() }
    }

    /// Iterator over the bits.
    #[inline]
    fn iter(&self) -> Iter<'_, Self::Word> {
        // SAFETY: the range is borrowed from `self`
        unsafe { Iter::new(self.begin(), self.end()) }
    }

    /// Iterator over the positions of set bits.
    #[inline]
    fn ones(&self) -> Ones<'_, Self::Word> {
        // SAFETY: the range is borrowed from `self`
        unsafe { Ones::new(self.begin(), self.len()) }
    }

    /// The elements of `it` found at the positions of set bits.
    fn select<I: IntoIterator>(&self, it: I) -> Select<'_, Self::Word, I::IntoIter> {
        Select::new(self.ones(), it.into_iter())
    }

    /// Number of set bits.
    #[inline]
    fn count_ones(&self) -> usize {
        // SAFETY: the range is borrowed from `self`
        unsafe { algo::count(self.begin(), self.end(), true) }
    }

    /// Number of clear bits.
    #[inline]
    fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Number of set bits inside `range`.
    #[track_caller]
    fn count_ones_in<R: RangeBounds<usize>>(&self, range: R) -> usize {
        let r = resolve_range(range, self.len());
        let first = self.begin();
        // SAFETY: the range was checked against `len`
        unsafe { algo::count(first + r.start, first + r.end, true) }
    }

    /// Number of set bits below position `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let bits: BitVec = "1011_0110".parse().unwrap();
    /// assert_eq!(bits.rank(0), 0);
    /// assert_eq!(bits.rank(3), 2);
    /// assert_eq!(bits.rank(8), 5);
    /// ```
    #[track_caller]
    fn rank(&self, index: usize) -> usize {
        self.count_ones_in(..index)
    }

    /// Fraction of bits that are set, `0.0` when empty.
    fn density(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.count_ones() as f64 / self.len() as f64
    }

    /// Whether every bit is set. True when empty.
    #[inline]
    fn all(&self) -> bool {
        self.find_first(false).is_none()
    }

    /// Whether any bit is set.
    #[inline]
    fn any(&self) -> bool {
        self.find_first(true).is_some()
    }

    /// Whether no bit is set.
    #[inline]
    fn none(&self) -> bool {
        !self.any()
    }

    /// Position of the first bit equal to `value`.
    #[inline]
    fn find_first(&self, value: bool) -> Option<usize> {
        self.find_next(value, 0)
    }

    /// Position of the first clear bit.
    #[inline]
    fn find_first_zero(&self) -> Option<usize> {
        self.find_first(false)
    }

    /// Position of the first bit at or after `from` equal to `value`.
    fn find_next(&self, value: bool, from: usize) -> Option<usize> {
        if from >= self.len() {
            return None;
        }
        let (first, last) = (self.begin(), self.end());
        // SAFETY: [from, len) is borrowed from `self`
        let p = unsafe { algo::find(first + from, last, value) };
        (p != last).then(|| distance(first, p))
    }

    /// Position of the last bit equal to `value`.
    fn find_last(&self, value: bool) -> Option<usize> {
        let (first, last) = (self.begin(), self.end());
        // SAFETY: the range is borrowed from `self`
        let p = unsafe { algo::find_last(first, last, value) };
        (p != last).then(|| distance(first, p))
    }

    /// Position of the first occurrence of `pattern`.
    ///
    /// An empty pattern is never found.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let hay: BitVec = "0011_0100".parse().unwrap();
    /// let needle: BitVec = "101".parse().unwrap();
    /// assert_eq!(hay.search(&needle), Some(2));
    /// assert_eq!(hay.search_from(&needle, 3), None);
    /// ```
    fn search<P: Bits<Word = Self::Word> + ?Sized>(&self, pattern: &P) -> Option<usize> {
        self.search_from(pattern, 0)
    }

    /// Position of the first occurrence of `pattern` at or after `from`.
    fn search_from<P: Bits<Word = Self::Word> + ?Sized>(&self, pattern: &P, from: usize) -> Option<usize> {
        if from > self.len() {
            return None;
        }
        let (first, last) = (self.begin(), self.end());
        // SAFETY: both ranges are borrowed
        let p = unsafe { algo::search(first + from, last, pattern.begin(), pattern.end()) };
        (p != last).then(|| distance(first, p))
    }

    /// Whether both containers hold the same bits.
    fn bits_eq<O: Bits<Word = Self::Word> + ?Sized>(&self, other: &O) -> bool {
        // SAFETY: both ranges are borrowed
        self.len() == other.len() && unsafe { algo::equal(self.begin(), self.end(), other.begin()) }
    }

    /// Whether every set bit of `self` is also set in `other`.
    fn is_subset<O: Bits<Word = Self::Word> + ?Sized>(&self, other: &O) -> bool {
        let common = self.len().min(other.len());
        let first = self.begin();
        // SAFETY: both ranges are borrowed
        unsafe {
            !algo::any_of(first, first + common, other.begin(), BinaryOp::AndNot)
                && algo::find(first + common, self.end(), true) == self.end()
        }
    }

    /// Whether every set bit of `other` is also set in `self`.
    fn is_superset<O: Bits<Word = Self::Word> + ?Sized>(&self, other: &O) -> bool {
        other.is_subset(self)
    }

    /// Whether some bit is set in both.
    fn intersects<O: Bits<Word = Self::Word> + ?Sized>(&self, other: &O) -> bool {
        let common = self.len().min(other.len());
        let first = self.begin();
        // SAFETY: both ranges are borrowed
        unsafe { algo::any_of(first, first + common, other.begin(), BinaryOp::And) }
    }

    /// Whether no bit is set in both.
    fn is_disjoint<O: Bits<Word = Self::Word> + ?Sized>(&self, other: &O) -> bool {
        !self.intersects(other)
    }

    /// Renders the bits highest position first, using `on` and `off` for set
    /// and clear bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let bits: BitVec = "0110".parse().unwrap();
    /// assert_eq!(bits.to_string_with('#', '.'), ".##.");
    /// ```
    fn to_string_with(&self, on: char, off: char) -> String {
        self.iter().rev().map(|b| if b { on } else { off }).collect()
    }

    /// The bits packed into fresh words, starting at bit 0 of the first word
    /// with unused high bits zero.
    fn to_words(&self) -> Vec<Self::Word> {
        let mut out = alloc::vec![Self::Word::ZERO; bit_space::<Self::Word>(self.len())];
        // SAFETY: `out` has room for `len` bits
        unsafe { algo::copy(self.begin(), self.end(), BitPtr::from_mut_slice(&mut out)) };
        out
    }
}

/// Write access to a sequence of bits.
///
/// Nothing here changes the length.
pub trait BitsMut: Bits {
    /// Mutable pointer to the first bit.
    ///
    /// The `len` bits from here on are writable while `self` is mutably
    /// borrowed.
    fn begin_mut(&mut self) -> BitPtr<Self::Word>;

    /// Writes bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    fn set(&mut self, index: usize, value: bool) {
        check_index(index, self.len());
        // SAFETY: checked above
        unsafe { (self.begin_mut() + index).write(value) }
    }

    /// Clears bit `index`.
    #[inline]
    #[track_caller]
    fn reset(&mut self, index: usize) {
        self.set(index, false);
    }

    /// Inverts bit `index`.
    #[inline]
    #[track_caller]
    fn flip(&mut self, index: usize) {
        self.bit_mut(index).flip();
    }

    /// Writes bit `index` and returns its previous value.
    #[inline]
    #[track_caller]
    fn replace(&mut self, index: usize, value: bool) -> bool {
        self.bit_mut(index).replace(value)
    }

    /// Exchanges bits `a` and `b`.
    #[track_caller]
    fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        check_index(a, len);
        check_index(b, len);
        let first = self.begin_mut();
        // SAFETY: both positions are in range
        unsafe { (first + a).as_bit_ref().swap(&mut (first + b).as_bit_ref()) };
    }

    /// A reference to bit `index`.
    #[inline]
    #[track_caller]
    fn bit_mut(&mut self, index: usize) -> BitRef<'_, Self::Word> {
        check_index(index, self.len());
        // SAFETY: in range, and `self` stays mutably borrowed
        unsafe { (self.begin_mut() + index).as_bit_ref() }
    }

    /// Iterator handing out a reference to every bit.
    #[inline]
    fn iter_mut(&mut self) -> IterMut<'_, Self::Word> {
        let first = self.begin_mut();
        let last = first + self.len();
        // SAFETY: the range is mutably borrowed from `self`
        unsafe { IterMut::new(first, last) }
    }

    /// Sets every bit.
    #[inline]
    fn set_all(&mut self) {
        self.fill_range(.., true);
    }

    /// Clears every bit.
    #[inline]
    fn reset_all(&mut self) {
        self.fill_range(.., false);
    }

    /// Inverts every bit.
    #[inline]
    fn flip_all(&mut self) {
        self.flip_range(..);
    }

    /// Writes `value` to every bit of `range`.
    #[track_caller]
    fn fill_range<R: RangeBounds<usize>>(&mut self, range: R, value: bool) {
        let r = resolve_range(range, self.len());
        let first = self.begin_mut();
        // SAFETY: the range was checked against `len`
        unsafe { algo::fill(first + r.start, first + r.end, value) };
    }

    /// Inverts every bit of `range`.
    #[track_caller]
    fn flip_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let r = resolve_range(range, self.len());
        let first = self.begin_mut();
        // SAFETY: the range was checked against `len`
        unsafe { algo::flip(first + r.start, first + r.end) };
    }

    /// `self &= other`, clearing bits past the end of `other`.
    fn and_assign<O: Bits<Word = Self::Word> + ?Sized>(&mut self, other: &O) {
        let common = self.combine(other, BinaryOp::And);
        self.fill_range(common.., false);
    }

    /// `self |= other`, ignoring bits of `other` past the end of `self`.
    fn or_assign<O: Bits<Word = Self::Word> + ?Sized>(&mut self, other: &O) {
        self.combine(other, BinaryOp::Or);
    }

    /// `self ^= other`, ignoring bits of `other` past the end of `self`.
    fn xor_assign<O: Bits<Word = Self::Word> + ?Sized>(&mut self, other: &O) {
        self.combine(other, BinaryOp::Xor);
    }

    /// `self &= !other`.
    fn and_not_assign<O: Bits<Word = Self::Word> + ?Sized>(&mut self, other: &O) {
        self.combine(other, BinaryOp::AndNot);
    }

    #[doc(hidden)]
    fn combine<O: Bits<Word = Self::Word> + ?Sized>(&mut self, other: &O, op: BinaryOp) -> usize {
        let common = self.len().min(other.len());
        let first = self.begin_mut();
        // SAFETY: `other` is borrowed separately from `self`
        unsafe { algo::transform(first, first + common, other.begin(), first, op) };
        common
    }

    /// Moves every bit `n` positions up, towards the end. The lowest `n`
    /// bits become clear and the highest `n` are dropped.
    fn shift_left(&mut self, n: usize) {
        let len = self.len();
        if n >= len {
            self.reset_all();
            return;
        }
        let first = self.begin_mut();
        let last = first + len;
        // SAFETY: all pointers stay inside [first, last)
        unsafe {
            algo::copy_backward(first, last - n, last);
            algo::fill(first, first + n, false);
        }
    }

    /// Moves every bit `n` positions down, towards the start. The highest
    /// `n` bits become clear and the lowest `n` are dropped.
    fn shift_right(&mut self, n: usize) {
        let len = self.len();
        if n >= len {
            self.reset_all();
            return;
        }
        let first = self.begin_mut();
        let last = first + len;
        // SAFETY: all pointers stay inside [first, last)
        unsafe {
            algo::copy(first + n, last, first);
            algo::fill(last - n, last, false);
        }
    }

    /// Reverses the order of the bits.
    fn reverse(&mut self) {
        let first = self.begin_mut();
        let last = first + self.len();
        // SAFETY: the range is mutably borrowed
        unsafe { algo::reverse(first, last) };
    }

    /// Rotates so that bit `mid` becomes bit 0, and returns the new position
    /// of the old bit 0.
    ///
    /// # Panics
    ///
    /// Panics if `mid > len`.
    #[track_caller]
    fn rotate(&mut self, mid: usize) -> usize {
        let len = self.len();
        assert!(mid <= len, "rotation point {mid} out of range for length {len}");
        let first = self.begin_mut();
        // SAFETY: mid is inside the range
        let p = unsafe { algo::rotate(first, first + mid, first + len) };
        distance(first, p)
    }

    /// Rotates `n` positions towards the start, like
    /// [`slice::rotate_left`].
    fn rotate_left(&mut self, n: usize) {
        let len = self.len();
        if len != 0 {
            self.rotate(n % len);
        }
    }

    /// Rotates `n` positions towards the end, like [`slice::rotate_right`].
    fn rotate_right(&mut self, n: usize) {
        let len = self.len();
        if len != 0 {
            self.rotate(len - n % len);
        }
    }

    /// Steps to the next arrangement in lexicographic order, bit 0 most
    /// significant. Returns `false` and resets to the smallest arrangement
    /// after the largest.
    fn next_permutation(&mut self) -> bool {
        let first = self.begin_mut();
        let last = first + self.len();
        // SAFETY: the range is mutably borrowed
        unsafe { algo::next_permutation(first, last) }
    }

    /// Steps to the previous arrangement in lexicographic order. Returns
    /// `false` and resets to the largest arrangement after the smallest.
    fn prev_permutation(&mut self) -> bool {
        let first = self.begin_mut();
        let last = first + self.len();
        // SAFETY: the range is mutably borrowed
        unsafe { algo::prev_permutation(first, last) }
    }

    /// Copies the bits of `src` to the position `dest`, like
    /// [`slice::copy_within`].
    #[track_caller]
    fn copy_within<R: RangeBounds<usize>>(&mut self, src: R, dest: usize) {
        let len = self.len();
        let r = resolve_range(src, len);
        let n = r.end - r.start;
        assert!(dest <= len - n, "destination {dest} out of range for length {len}");
        let first = self.begin_mut();
        // SAFETY: both ranges were checked against `len`
        unsafe {
            if dest <= r.start {
                algo::copy(first + r.start, first + r.end, first + dest);
            } else {
                algo::copy_backward(first + r.start, first + r.end, first + dest + n);
            }
        }
    }

    /// Clears every set bit whose position fails `keep`.
    fn retain<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        let mut from = 0;
        while let Some(i) = self.find_next(true, from) {
            if !keep(i) {
                // SAFETY: `find_next` only reports positions below `len`
                unsafe { (self.begin_mut() + i).write(false) };
            }
            from = i + 1;
        }
    }

    /// Exchanges the contents with `other`, which must be equally long.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[track_caller]
    fn swap_bits_with<O: BitsMut<Word = Self::Word> + ?Sized>(&mut self, other: &mut O) {
        let len = self.len();
        assert_eq!(len, other.len(), "swapped containers differ in length");
        let first = self.begin_mut();
        // SAFETY: the two containers are borrowed separately
        unsafe { algo::swap_ranges(first, first + len, other.begin_mut()) };
    }
}
