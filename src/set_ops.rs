//! Set operations for [`BitVec`], treating it as the set of positions of its
//! set bits.
//!
//! The in-place forms grow `self` when `other` is longer and the result can
//! hold bits there; the shorter operand is padded with zeros.

use crate::{
    bits::{Bits, BitsMut},
    bitvec::BitVec,
    storage::Storage,
};

impl<S: Storage> BitVec<S> {
    /// `self |= other`, growing `self` to the longer of the two lengths.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold `other.len()` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let mut a: BitVec = "0001".parse().unwrap();
    /// let b: BitVec = "1000_0000".parse().unwrap();
    /// a.union_with(&b);
    /// assert_eq!(a.ones().collect::<Vec<_>>(), [0, 7]);
    /// ```
    #[track_caller]
    pub fn union_with<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) {
        self.grow_to(other.len());
        self.or_assign(other);
    }

    /// `self &= other`. The length of `self` is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVec, Bits};
    ///
    /// let mut a: BitVec = "1111_0110".parse().unwrap();
    /// let b: BitVec = "0011".parse().unwrap();
    /// a.intersection_with(&b);
    /// assert_eq!(a.len(), 8);
    /// assert_eq!(a.ones().collect::<Vec<_>>(), [1]);
    /// ```
    pub fn intersection_with<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) {
        self.and_assign(other);
    }

    /// `self &= !other`. The length of `self` is kept.
    pub fn difference_with<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) {
        self.and_not_assign(other);
    }

    /// `self ^= other`, growing `self` to the longer of the two lengths.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot hold `other.len()` bits.
    #[track_caller]
    pub fn symmetric_difference_with<O: Bits<Word = S::Word> + ?Sized>(&mut self, other: &O) {
        self.grow_to(other.len());
        self.xor_assign(other);
    }

    /// A new vector holding the union of `self` and `other`.
    #[track_caller]
    #[must_use]
    pub fn union<O: Bits<Word = S::Word> + ?Sized>(&self, other: &O) -> Self {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    /// A new vector holding the intersection of `self` and `other`.
    #[track_caller]
    #[must_use]
    pub fn intersection<O: Bits<Word = S::Word> + ?Sized>(&self, other: &O) -> Self {
        let mut out = self.clone();
        out.intersection_with(other);
        out
    }

    /// A new vector holding the bits of `self` not set in `other`.
    #[track_caller]
    #[must_use]
    pub fn difference<O: Bits<Word = S::Word> + ?Sized>(&self, other: &O) -> Self {
        let mut out = self.clone();
        out.difference_with(other);
        out
    }

    /// A new vector holding the bits set in exactly one of `self` and
    /// `other`.
    #[track_caller]
    #[must_use]
    pub fn symmetric_difference<O: Bits<Word = S::Word> + ?Sized>(&self, other: &O) -> Self {
        let mut out = self.clone();
        out.symmetric_difference_with(other);
        out
    }

    #[track_caller]
    fn grow_to(&mut self, len: usize) {
        if len > self.len() {
            self.resize(len, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::{BitVec, Bits, BitsMut, storage::PlainStorage};

    fn from_ones(len: usize, ones: &[usize]) -> BitVec<PlainStorage<u32>> {
        let mut v: BitVec<PlainStorage<u32>> = BitVec::with_len(len, false);
        for &i in ones {
            v.set(i, true);
        }
        v
    }

    #[test]
    fn test_union_grows() {
        let a = from_ones(10, &[1, 9]);
        let b = from_ones(100, &[2, 99]);
        let u = a.union(&b);
        assert_eq!(u.len(), 100);
        assert_eq!(u.ones().collect::<Vec<_>>(), [1, 2, 9, 99]);
        let u = b.union(&a);
        assert_eq!(u.len(), 100);
        assert_eq!(u.ones().collect::<Vec<_>>(), [1, 2, 9, 99]);
    }

    #[test]
    fn test_intersection_clears_past_other() {
        let a = from_ones(70, &[3, 40, 69]);
        let b = from_ones(41, &[3, 40]);
        let i = a.intersection(&b);
        assert_eq!(i.len(), 70);
        assert_eq!(i.ones().collect::<Vec<_>>(), [3, 40]);
    }

    #[test]
    fn test_difference_and_xor() {
        let a = from_ones(50, &[0, 10, 20, 49]);
        let b = from_ones(60, &[10, 49, 55]);
        assert_eq!(a.difference(&b).ones().collect::<Vec<_>>(), [0, 20]);
        let x = a.symmetric_difference(&b);
        assert_eq!(x.len(), 60);
        assert_eq!(x.ones().collect::<Vec<_>>(), [0, 20, 55]);
    }
}
