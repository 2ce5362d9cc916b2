//! Word buffers backing the dynamic containers.
//!
//! A [`Storage`] owns a buffer of words plus a length in bits and keeps the
//! trim invariant: bits at positions `>= len` inside the last occupied word
//! are always zero. Three backends are provided:
//!
//! - [`PlainStorage`]: a heap buffer of any [`Word`] type, empty until first
//!   use.
//! - [`SboStorage`]: two machine words that hold short bit strings inline
//!   and switch to a heap buffer when they grow.
//! - [`TaggedStorage`] (64-bit targets): like [`SboStorage`], but packs the
//!   heap pointer, length and capacity into the same two words.

mod plain;
mod provider;
mod sbo;
#[cfg(target_pointer_width = "64")]
mod tagged;

use core::{fmt, ops::Deref};

pub use self::{
    plain::PlainStorage,
    provider::{Global, WordAllocator},
    sbo::{INLINE_BITS, SboStorage},
};
#[cfg(target_pointer_width = "64")]
pub use self::tagged::TaggedStorage;
use crate::{
    algo,
    error::{Error, Result},
    ptr::BitPtr,
    word::{Word, bit_space},
};

/// Smallest heap buffer, in words, a storage allocates.
pub const MIN_HEAP_WORDS: usize = 4;

/// An owned, growable word buffer with a length in bits.
///
/// Implementations provide the buffer management primitives; resizing and
/// clearing are built on top of them and maintain the trim invariant.
pub trait Storage: Sized {
    /// The storage word.
    type Word: Word;

    /// Largest length in bits the storage can represent.
    const MAX_BITS: usize;

    /// Length in bits.
    fn len(&self) -> usize;

    /// Number of bits the storage can hold without reallocating.
    fn capacity(&self) -> usize;

    /// Pointer to the first word of the buffer.
    fn as_ptr(&self) -> *const Self::Word;

    /// Mutable pointer to the first word of the buffer.
    fn as_mut_ptr(&mut self) -> *mut Self::Word;

    /// Whether the bits live in a heap buffer.
    fn is_heap(&self) -> bool;

    /// Makes room for at least `bits` bits in total.
    ///
    /// On error the storage is unchanged.
    fn try_reserve(&mut self, bits: usize) -> Result<()>;

    /// Sets the length without touching any bit.
    ///
    /// # Safety
    ///
    /// `bits` must not exceed the capacity, and the bits in `[bits, len)` of
    /// the last occupied word must already be zero when shrinking.
    unsafe fn set_len(&mut self, bits: usize);

    /// Releases unused capacity, moving back inline when the backend can.
    fn shrink_to_fit(&mut self);

    /// A trimmed view of the occupied words.
    fn words(&self) -> Words<'_, Self::Word>;

    /// Deep copy of the storage.
    fn try_clone(&self) -> Result<Self>;

    /// Number of occupied words.
    #[inline]
    fn word_len(&self) -> usize {
        bit_space::<Self::Word>(self.len())
    }

    /// Whether the storage holds no bits.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes the length to `bits`, setting new bits to `value` and
    /// clearing the bits dropped on shrink.
    ///
    /// On error the storage is unchanged.
    fn try_resize(&mut self, bits: usize, value: bool) -> Result<()> {
        let len = self.len();
        if bits > len {
            self.try_reserve(bits)?;
            // SAFETY: capacity was just reserved; the new bits are zero
            unsafe { self.set_len(bits) };
            if value {
                let first = BitPtr::new(self.as_mut_ptr(), 0);
                // SAFETY: [len, bits) is inside the buffer
                unsafe { algo::fill(first + len, first + bits, true) };
            }
        } else if bits < len {
            let first = BitPtr::new(self.as_mut_ptr(), 0);
            // SAFETY: [bits, len) is inside the buffer
            unsafe {
                algo::fill(first + bits, first + len, false);
                self.set_len(bits);
            }
        }
        Ok(())
    }

    /// Drops every bit, keeping the allocation.
    fn clear(&mut self) {
        let len = self.len();
        let first = BitPtr::new(self.as_mut_ptr(), 0);
        // SAFETY: [0, len) is inside the buffer and is zero afterwards
        unsafe {
            algo::fill(first, first + len, false);
            self.set_len(0);
        }
    }
}

/// Checks a requested length against a backend's limit.
#[inline]
pub(crate) fn check_bits(bits: usize, max: usize) -> Result<()> {
    if bits > max {
        return Err(Error::CapacityExceeded {
            requested: bits,
            max,
        });
    }
    Ok(())
}

/// Heap capacity in words for a buffer that must hold `needed` words and
/// currently holds `current`.
#[inline]
pub(crate) fn grown_capacity(needed: usize, current: usize) -> usize {
    needed
        .max(current.saturating_mul(2))
        .max(MIN_HEAP_WORDS)
}

/// The occupied words of a storage, trimmed.
///
/// Inline storages keep their length counter inside the control words, so
/// they hand out a cleaned copy instead of a borrow.
///
/// # Examples
///
/// ```
/// use smol_bitvec::BitVec;
///
/// let bits: BitVec = "1_0000_0001".parse().unwrap();
/// assert_eq!(&*bits.words(), &[0b1_0000_0001]);
/// ```
#[derive(Clone)]
pub enum Words<'a, W: Word> {
    /// Words copied out of an inline buffer, with the count in use.
    Inline([W; 2], usize),
    /// Words borrowed from a heap buffer.
    External(&'a [W]),
}

impl<W: Word> Deref for Words<'_, W> {
    type Target = [W];

    fn deref(&self) -> &[W] {
        match self {
            Self::Inline(a, n) => &a[..*n],
            Self::External(s) => s,
        }
    }
}

impl<W: Word> AsRef<[W]> for Words<'_, W> {
    fn as_ref(&self) -> &[W] {
        self
    }
}

impl<W: Word> fmt::Debug for Words<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
