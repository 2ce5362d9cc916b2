//! A bit container over borrowed words.

use core::{fmt, ops::Index};

use crate::{
    bits::{Bits, BitsMut},
    error::{Error, Result},
    ptr::BitPtr,
    traits::write_bits,
    word::Word,
};

/// The first `len` bits of a borrowed word slice.
///
/// A view never changes its length and never touches the bits of `words`
/// past `len`, so it can work on part of a larger buffer.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitView, Bits, BitsMut};
///
/// let mut words = [0u16, 0xFFFF];
/// {
///     let mut view = BitView::new(&mut words, 20).unwrap();
///     view.set(3, true);
///     view.flip_all();
///     assert_eq!(view.count_ones(), 15);
/// }
/// assert_eq!(words, [0xFFF7, 0xFFF0]);
///
/// assert!(BitView::new(&mut words, 33).is_err());
/// ```
pub struct BitView<'a, W: Word> {
    words: &'a mut [W],
    len: usize,
}

impl<'a, W: Word> BitView<'a, W> {
    /// Views the first `len` bits of `words`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if `words` holds fewer than `len`
    /// bits.
    pub fn new(words: &'a mut [W], len: usize) -> Result<Self> {
        let max = words.len().saturating_mul(W::BITS as usize);
        if len > max {
            return Err(Error::CapacityExceeded {
                requested: len,
                max,
            });
        }
        Ok(Self { words, len })
    }

    /// Views every bit of `words`.
    pub fn from_words(words: &'a mut [W]) -> Self {
        let len = words.len() * W::BITS as usize;
        Self { words, len }
    }

    /// The viewed words, including any bits past the length.
    #[inline]
    pub fn as_words(&self) -> &[W] {
        self.words
    }

    /// Releases the borrow.
    pub fn into_words(self) -> &'a mut [W] {
        self.words
    }
}

impl<W: Word> Bits for BitView<'_, W> {
    type Word = W;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn begin(&self) -> BitPtr<W> {
        BitPtr::from_slice(&*self.words)
    }
}

impl<W: Word> BitsMut for BitView<'_, W> {
    #[inline]
    fn begin_mut(&mut self) -> BitPtr<W> {
        BitPtr::from_mut_slice(&mut *self.words)
    }
}

impl<W: Word> Index<usize> for BitView<'_, W> {
    type Output = bool;

    #[track_caller]
    fn index(&self, index: usize) -> &bool {
        if self.test(index) { &true } else { &false }
    }
}

impl<W: Word> fmt::Display for BitView<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(self, f)
    }
}

impl<W: Word> fmt::Debug for BitView<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitView")
            .field("len", &self.len)
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}
