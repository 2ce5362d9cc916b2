//! A proxy reference to a single bit.

use core::{
    fmt,
    marker::PhantomData,
    ops::{BitAndAssign, BitOrAssign, BitXorAssign},
};

use crate::word::Word;

/// A mutable reference to one bit inside a word.
///
/// Rust references cannot address a single bit, so `BitRef` stands in for
/// `&mut bool`: it remembers the word and a single-bit mask, and every write
/// is a masked read-modify-write of that word. Writing through a `BitRef`
/// never touches the other bits of the word and never reallocates.
///
/// Two `BitRef`s may point into the same word at the same time (this is how
/// [`IterMut`](crate::IterMut) hands out references), which is why the word
/// is held by pointer rather than by `&mut`.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits, BitsMut};
///
/// let mut bits: BitVec = BitVec::with_len(8, false);
/// let mut r = bits.bit_mut(3);
/// r.set(true);
/// r ^= true;
/// r |= true;
/// assert!(r.get());
/// assert!(bits.test(3));
/// ```
pub struct BitRef<'a, W: Word> {
    word: *mut W,
    mask: W,
    _life: PhantomData<&'a mut W>,
}

impl<'a, W: Word> BitRef<'a, W> {
    /// Creates a reference to the bit selected by `mask` in `*word`.
    ///
    /// # Safety
    ///
    /// - `word` must be valid for reads and writes for `'a`, and no `&` or
    ///   `&mut` to the word may be alive while the reference is used.
    /// - `mask` must have exactly one bit set.
    #[inline(always)]
    pub unsafe fn from_raw(word: *mut W, mask: W) -> Self {
        debug_assert!(!word.is_null());
        debug_assert_eq!(mask.count_ones(), 1, "bit mask must select one bit");
        Self {
            word,
            mask,
            _life: PhantomData,
        }
    }

    /// Pointer to the referenced word.
    #[must_use]
    #[inline(always)]
    pub const fn word_ptr(&self) -> *mut W {
        self.word
    }

    /// The single-bit mask selecting the referenced bit.
    #[must_use]
    #[inline(always)]
    pub const fn mask(&self) -> W {
        self.mask
    }

    /// Reads the bit.
    #[must_use]
    #[inline(always)]
    pub fn get(&self) -> bool {
        // SAFETY: validity of the word is the constructor's contract.
        unsafe { self.word.read() & self.mask != W::ZERO }
    }

    /// Writes the bit.
    #[inline(always)]
    pub fn set(&mut self, value: bool) {
        // SAFETY: validity of the word is the constructor's contract.
        unsafe {
            let w = self.word.read();
            self.word
                .write(if value { w | self.mask } else { w & !self.mask });
        }
    }

    /// Clears the bit.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.set(false);
    }

    /// Inverts the bit.
    #[inline(always)]
    pub fn flip(&mut self) {
        // SAFETY: validity of the word is the constructor's contract.
        unsafe { self.word.write(self.word.read() ^ self.mask) };
    }

    /// Writes `value` and returns the previous value of the bit.
    #[inline]
    pub fn replace(&mut self, value: bool) -> bool {
        let prev = self.get();
        self.set(value);
        prev
    }

    /// Exchanges the values of two referenced bits.
    ///
    /// Both references may point into the same word.
    #[inline]
    pub fn swap(&mut self, other: &mut BitRef<'_, W>) {
        let a = self.get();
        let b = other.get();
        if a != b {
            self.set(b);
            other.set(a);
        }
    }
}

impl<W: Word> BitAndAssign<bool> for BitRef<'_, W> {
    #[inline]
    fn bitand_assign(&mut self, rhs: bool) {
        if !rhs {
            self.reset();
        }
    }
}

impl<W: Word> BitOrAssign<bool> for BitRef<'_, W> {
    #[inline]
    fn bitor_assign(&mut self, rhs: bool) {
        if rhs {
            self.set(true);
        }
    }
}

impl<W: Word> BitXorAssign<bool> for BitRef<'_, W> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: bool) {
        if rhs {
            self.flip();
        }
    }
}

impl<W: Word> PartialEq<bool> for BitRef<'_, W> {
    fn eq(&self, other: &bool) -> bool {
        self.get() == *other
    }
}

impl<W: Word> From<BitRef<'_, W>> for bool {
    fn from(r: BitRef<'_, W>) -> Self {
        r.get()
    }
}

impl<W: Word> fmt::Debug for BitRef<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitRef")
            .field("word", &self.word)
            .field("mask", &format_args!("{:#b}", self.mask))
            .field("value", &self.get())
            .finish()
    }
}

impl<W: Word> fmt::Display for BitRef<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}
