//! Iterators over bit containers.

use core::{
    cell::Cell,
    iter::{FromIterator, FusedIterator},
    marker::PhantomData,
};

use crate::{
    algo,
    bits::{Bits, BitsMut},
    bitvec::BitVec,
    ptr::{BitPtr, distance},
    reference::BitRef,
    storage::Storage,
    word::Word,
};

/// An iterator over the bits of a container, as `bool`s.
///
/// Created by [`Bits::iter`].
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits};
///
/// let bits: BitVec = "0110".parse().unwrap();
/// let v: Vec<bool> = bits.iter().collect();
/// assert_eq!(v, [false, true, true, false]);
/// assert_eq!(bits.iter().rev().next(), Some(false));
/// ```
pub struct Iter<'a, W: Word> {
    front: BitPtr<W>,
    back: BitPtr<W>,
    _life: PhantomData<&'a [W]>,
}

impl<W: Word> Iter<'_, W> {
    /// Iterator over `[first, last)`.
    ///
    /// # Safety
    ///
    /// The range must stay readable and unmodified for the iterator's
    /// lifetime.
    #[inline]
    pub unsafe fn new(first: BitPtr<W>, last: BitPtr<W>) -> Self {
        debug_assert!(first <= last);
        Self {
            front: first,
            back: last,
            _life: PhantomData,
        }
    }
}

impl<W: Word> Clone for Iter<'_, W> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<W: Word> Iterator for Iter<'_, W> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back, inside the borrowed range
        let v = unsafe { self.front.read() };
        self.front.inc();
        Some(v)
    }

    fn nth(&mut self, n: usize) -> Option<bool> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<W: Word> DoubleEndedIterator for Iter<'_, W> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back.dec();
        // SAFETY: back >= front after the decrement
        Some(unsafe { self.back.read() })
    }
}

impl<W: Word> ExactSizeIterator for Iter<'_, W> {
    fn len(&self) -> usize {
        distance(self.front, self.back)
    }
}

impl<W: Word> FusedIterator for Iter<'_, W> {}

/// An iterator handing out a [`BitRef`] for every bit of a container.
///
/// Created by [`BitsMut::iter_mut`].
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits, BitsMut};
///
/// let mut bits: BitVec = BitVec::with_len(6, false);
/// for (i, mut b) in bits.iter_mut().enumerate() {
///     b.set(i % 3 == 0);
/// }
/// assert_eq!(bits.to_string(), "001001");
/// ```
pub struct IterMut<'a, W: Word> {
    front: BitPtr<W>,
    back: BitPtr<W>,
    _life: PhantomData<&'a mut [W]>,
}

impl<W: Word> IterMut<'_, W> {
    /// Iterator over `[first, last)`.
    ///
    /// # Safety
    ///
    /// The range must stay writable and otherwise unaccessed for the
    /// iterator's lifetime.
    #[inline]
    pub unsafe fn new(first: BitPtr<W>, last: BitPtr<W>) -> Self {
        debug_assert!(first <= last);
        Self {
            front: first,
            back: last,
            _life: PhantomData,
        }
    }
}

impl<'a, W: Word> Iterator for IterMut<'a, W> {
    type Item = BitRef<'a, W>;

    #[inline]
    fn next(&mut self) -> Option<BitRef<'a, W>> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: every position is handed out once
        let r = unsafe { self.front.as_bit_ref() };
        self.front.inc();
        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<'a, W: Word> DoubleEndedIterator for IterMut<'a, W> {
    #[inline]
    fn next_back(&mut self) -> Option<BitRef<'a, W>> {
        if self.front == self.back {
            return None;
        }
        self.back.dec();
        // SAFETY: every position is handed out once
        Some(unsafe { self.back.as_bit_ref() })
    }
}

impl<W: Word> ExactSizeIterator for IterMut<'_, W> {
    fn len(&self) -> usize {
        distance(self.front, self.back)
    }
}

impl<W: Word> FusedIterator for IterMut<'_, W> {}

/// An iterator over the positions of set bits, in ascending order.
///
/// Created by [`Bits::ones`]. Runs of clear bits are skipped a word at a
/// time, from either end.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits};
///
/// let bits: BitVec = "1000_0000_0010_0100".parse().unwrap();
/// let ones: Vec<usize> = bits.ones().collect();
/// assert_eq!(ones, [2, 5, 15]);
/// assert_eq!(bits.ones().rev().next(), Some(15));
/// assert_eq!(bits.ones().len(), 3);
/// ```
pub struct Ones<'a, W: Word> {
    origin: BitPtr<W>,
    pos: usize,
    rpos: usize,
    // set bits left in [pos, rpos), counted on first demand
    left: Cell<Option<usize>>,
    _life: PhantomData<&'a [W]>,
}

impl<W: Word> Ones<'_, W> {
    /// Iterator over the set bits of the `len` bits starting at `origin`.
    ///
    /// # Safety
    ///
    /// The range must stay readable and unmodified for the iterator's
    /// lifetime.
    #[inline]
    pub unsafe fn new(origin: BitPtr<W>, len: usize) -> Self {
        Self {
            origin,
            pos: 0,
            rpos: len,
            left: Cell::new(None),
            _life: PhantomData,
        }
    }

    fn exhaust(&mut self) {
        self.pos = self.rpos;
        self.left.set(Some(0));
    }

    fn took_one(&self) {
        if let Some(n) = self.left.get() {
            self.left.set(Some(n - 1));
        }
    }
}

impl<W: Word> Clone for Ones<'_, W> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin,
            pos: self.pos,
            rpos: self.rpos,
            left: self.left.clone(),
            _life: PhantomData,
        }
    }
}

impl<W: Word> Iterator for Ones<'_, W> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pos >= self.rpos {
            return None;
        }
        let end = self.origin + self.rpos;
        // SAFETY: [pos, rpos) lies inside the borrowed range
        let p = unsafe { algo::find(self.origin + self.pos, end, true) };
        if p == end {
            self.exhaust();
            return None;
        }
        let i = distance(self.origin, p);
        self.pos = i + 1;
        self.took_one();
        Some(i)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<W: Word> DoubleEndedIterator for Ones<'_, W> {
    fn next_back(&mut self) -> Option<usize> {
        if self.pos >= self.rpos {
            return None;
        }
        let end = self.origin + self.rpos;
        // SAFETY: [pos, rpos) lies inside the borrowed range
        let p = unsafe { algo::find_last(self.origin + self.pos, end, true) };
        if p == end {
            self.rpos = self.pos;
            self.left.set(Some(0));
            return None;
        }
        let i = distance(self.origin, p);
        self.rpos = i;
        self.took_one();
        Some(i)
    }
}

impl<W: Word> ExactSizeIterator for Ones<'_, W> {
    fn len(&self) -> usize {
        if self.pos >= self.rpos {
            return 0;
        }
        if let Some(n) = self.left.get() {
            return n;
        }
        // SAFETY: [pos, rpos) lies inside the borrowed range
        let n = unsafe { algo::count(self.origin + self.pos, self.origin + self.rpos, true) };
        self.left.set(Some(n));
        n
    }
}

impl<W: Word> FusedIterator for Ones<'_, W> {}

/// An iterator that yields the elements of another iterator found at the
/// positions of set bits.
///
/// Created by [`Bits::select`].
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits};
///
/// let mut mask: BitVec = BitVec::with_len(5, false);
/// mask.push(true);
/// let picked: Vec<_> = mask.select(10..20).collect();
/// assert_eq!(picked, [15]);
/// ```
pub struct Select<'a, W: Word, I> {
    ones: Ones<'a, W>,
    next: usize,
    it: I,
}

impl<'a, W: Word, I: Iterator> Select<'a, W, I> {
    pub(crate) fn new(ones: Ones<'a, W>, it: I) -> Self {
        Self { ones, next: 0, it }
    }
}

impl<W: Word, I: Iterator> Iterator for Select<'_, W, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(pos) = self.ones.next()
            && let Some(item) = self.it.nth(pos - self.next)
        {
            self.next = pos + 1;
            return Some(item);
        }
        self.ones.exhaust();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.it.size_hint();
        let limit = self.ones.len();
        (lo.min(limit), hi.map(|hi| hi.min(limit)))
    }
}

impl<W: Word, I: FusedIterator> FusedIterator for Select<'_, W, I> {}

/// An owning iterator over the bits of a [`BitVec`].
///
/// Created by the [`IntoIterator`] implementation of [`BitVec`].
pub struct IntoIter<S: Storage> {
    bits: BitVec<S>,
    pos: usize,
    rpos: usize,
}

impl<S: Storage> Iterator for IntoIter<S> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos == self.rpos {
            return None;
        }
        // SAFETY: pos < rpos <= len
        let v = unsafe { self.bits.test_unchecked(self.pos) };
        self.pos += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rpos - self.pos;
        (n, Some(n))
    }
}

impl<S: Storage> DoubleEndedIterator for IntoIter<S> {
    fn next_back(&mut self) -> Option<bool> {
        if self.pos == self.rpos {
            return None;
        }
        self.rpos -= 1;
        // SAFETY: rpos < len
        Some(unsafe { self.bits.test_unchecked(self.rpos) })
    }
}

impl<S: Storage> ExactSizeIterator for IntoIter<S> {}

impl<S: Storage> FusedIterator for IntoIter<S> {}

impl<S: Storage> IntoIterator for BitVec<S> {
    type IntoIter = IntoIter<S>;
    type Item = bool;

    fn into_iter(self) -> IntoIter<S> {
        let rpos = self.len();
        IntoIter {
            bits: self,
            pos: 0,
            rpos,
        }
    }
}

impl<'a, S: Storage> IntoIterator for &'a BitVec<S> {
    type IntoIter = Iter<'a, S::Word>;
    type Item = bool;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: Storage> IntoIterator for &'a mut BitVec<S> {
    type IntoIter = IterMut<'a, S::Word>;
    type Item = BitRef<'a, S::Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<S: Storage + Default> FromIterator<bool> for BitVec<S> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl<S: Storage> Extend<bool> for BitVec<S> {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for bit in iter {
            self.push(bit);
        }
    }
}

impl<'a, S: Storage> Extend<&'a bool> for BitVec<S> {
    fn extend<I: IntoIterator<Item = &'a bool>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_iter_both_ends() {
        let words = [0b1011_0001u8, 0b0000_0001];
        let first = BitPtr::from_slice(&words);
        let mut it = unsafe { Iter::new(first + 4, first + 9) };
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(true));
        assert_eq!(it.next_back(), Some(true));
        assert_eq!(it.next_back(), Some(true));
        assert_eq!(it.len(), 2);
        assert_eq!(it.clone().collect::<Vec<_>>(), [true, false]);
        assert_eq!(it.nth(1), Some(false));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_ones_skips_words() {
        let mut words = [0u32; 8];
        words[0] = 1 << 7;
        words[5] = 1 << 31;
        words[7] = 1;
        let first = BitPtr::from_slice(&words);
        let ones = unsafe { Ones::new(first, 256) };
        assert_eq!(ones.len(), 3);
        assert_eq!(ones.clone().collect::<Vec<_>>(), [7, 191, 224]);
        assert_eq!(ones.rev().collect::<Vec<_>>(), [224, 191, 7]);

        let mut ones = unsafe { Ones::new(first, 224) };
        assert_eq!(ones.next_back(), Some(191));
        assert_eq!(ones.next(), Some(7));
        assert_eq!(ones.next(), None);
        assert_eq!(ones.next_back(), None);
    }

    #[test]
    fn test_ones_len_tracks_consumption() {
        let words = [0b1010_0110u8, 0b1000_0001];
        let first = BitPtr::from_slice(&words);
        let mut ones = unsafe { Ones::new(first, 16) };
        assert_eq!(ones.size_hint(), (6, Some(6)));
        assert_eq!(ones.next(), Some(1));
        assert_eq!(ones.next_back(), Some(15));
        assert_eq!(ones.len(), 4);
        // a clone keeps the cached count and consumes independently
        let mut other = ones.clone();
        assert_eq!(other.nth(2), Some(7));
        assert_eq!(other.len(), 1);
        assert_eq!(ones.len(), 4);
        assert_eq!(ones.by_ref().count(), 4);
        assert_eq!(ones.len(), 0);

        // counted before any consumption, then updated in place
        let mut ones = unsafe { Ones::new(first, 16) };
        assert_eq!(ones.next(), Some(1));
        assert_eq!(ones.len(), 5);
        assert_eq!(ones.next_back(), Some(15));
        assert_eq!(ones.next_back(), Some(8));
        assert_eq!(ones.len(), 3);
        assert_eq!(ones.collect::<Vec<_>>(), [2, 5, 7]);
    }

    #[test]
    fn test_iter_mut_writes_each_bit() {
        let mut words = [0u16; 2];
        let first = BitPtr::from_mut_slice(&mut words);
        let it = unsafe { IterMut::new(first + 3, first + 20) };
        for (i, mut r) in it.enumerate() {
            r.set(i % 2 == 0);
        }
        let set: Vec<usize> = (0..32).filter(|&i| words[i / 16] >> (i % 16) & 1 == 1).collect();
        assert_eq!(set, (3..20).step_by(2).collect::<Vec<_>>());
    }
}
