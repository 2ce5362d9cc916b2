use core::{fmt, ptr, ptr::NonNull, slice};

use super::{Global, Storage, WordAllocator, Words, check_bits, grown_capacity};
use crate::{
    error::Result,
    word::{Word, bit_space},
};

/// A heap buffer of `W` words and a length in bits.
///
/// Nothing is allocated until the first bit is stored. Growth doubles the
/// capacity.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits, storage::PlainStorage};
///
/// let mut bits: BitVec<PlainStorage<u8>> = BitVec::new();
/// assert!(!bits.is_heap());
/// bits.resize(20, true);
/// assert!(bits.is_heap());
/// assert_eq!(&*bits.words(), &[0xFF, 0xFF, 0x0F]);
/// ```
pub struct PlainStorage<W: Word = u64, A: WordAllocator = Global> {
    ptr: NonNull<W>,
    cap: usize,
    len: usize,
    alloc: A,
}

// SAFETY: the buffer is owned exclusively
unsafe impl<W: Word, A: WordAllocator + Send> Send for PlainStorage<W, A> {}
// SAFETY: shared access only reads
unsafe impl<W: Word, A: WordAllocator + Sync> Sync for PlainStorage<W, A> {}

impl<W: Word, A: WordAllocator> PlainStorage<W, A> {
    /// Empty storage drawing buffers from `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            alloc,
        }
    }

    /// The memory provider.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Moves the bits into a fresh zeroed buffer of `cap` words.
    fn realloc(&mut self, cap: usize) -> Result<()> {
        debug_assert!(cap >= self.word_len());
        let new = self.alloc.allocate::<W>(cap)?;
        // SAFETY: `new` holds `cap` words and the live words fit in it
        unsafe {
            ptr::write_bytes(new.as_ptr(), 0, cap);
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new.as_ptr(), self.word_len());
        }
        let old = core::mem::replace(&mut self.ptr, new);
        let old_cap = core::mem::replace(&mut self.cap, cap);
        if old_cap != 0 {
            // SAFETY: `old` was allocated with `old_cap` words
            unsafe { self.alloc.deallocate(old, old_cap) };
        }
        Ok(())
    }
}

impl<W: Word, A: WordAllocator + Default> Default for PlainStorage<W, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<W: Word, A: WordAllocator> Storage for PlainStorage<W, A> {
    type Word = W;

    const MAX_BITS: usize = isize::MAX as usize;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.cap * W::BITS as usize
    }

    #[inline]
    fn as_ptr(&self) -> *const W {
        self.ptr.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut W {
        self.ptr.as_ptr()
    }

    #[inline]
    fn is_heap(&self) -> bool {
        self.cap != 0
    }

    fn try_reserve(&mut self, bits: usize) -> Result<()> {
        check_bits(bits, Self::MAX_BITS)?;
        if bits <= self.capacity() {
            return Ok(());
        }
        self.realloc(grown_capacity(bit_space::<W>(bits), self.cap))
    }

    #[inline]
    unsafe fn set_len(&mut self, bits: usize) {
        debug_assert!(bits <= self.capacity());
        self.len = bits;
    }

    fn shrink_to_fit(&mut self) {
        let need = self.word_len();
        if need == self.cap {
            return;
        }
        if need == 0 {
            // SAFETY: the buffer holds `cap` words and no live bits
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return;
        }
        // keeping the larger buffer is fine when the provider refuses
        let _ = self.realloc(need);
    }

    fn words(&self) -> Words<'_, W> {
        // SAFETY: the first `word_len` words are initialized; an empty
        // storage yields an empty slice from a dangling pointer
        Words::External(unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.word_len()) })
    }

    fn try_clone(&self) -> Result<Self> {
        let mut out = Self::new_in(self.alloc.clone());
        out.try_reserve(self.len)?;
        // SAFETY: `out` holds at least `word_len` zeroed words
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), out.ptr.as_ptr(), self.word_len());
            out.set_len(self.len);
        }
        Ok(out)
    }
}

impl<W: Word, A: WordAllocator> Drop for PlainStorage<W, A> {
    fn drop(&mut self) {
        if self.cap != 0 {
            // SAFETY: the buffer was allocated with `cap` words
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
        }
    }
}

impl<W: Word, A: WordAllocator> fmt::Debug for PlainStorage<W, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainStorage")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("words", &self.words())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MIN_HEAP_WORDS;

    #[test]
    fn test_grows_by_doubling() {
        let mut s = PlainStorage::<u16>::default();
        assert_eq!(s.capacity(), 0);
        s.try_resize(1, true).unwrap();
        assert_eq!(s.capacity(), MIN_HEAP_WORDS * 16);
        s.try_resize(65, false).unwrap();
        assert_eq!(s.capacity(), 2 * MIN_HEAP_WORDS * 16);
        s.try_resize(1000, true).unwrap();
        assert_eq!(s.capacity(), bit_space::<u16>(1000) * 16);
        assert_eq!(s.words()[0], 1);
        assert_eq!(s.words()[4], 0xFFFE);
    }

    #[test]
    fn test_shrink_releases_everything_when_empty() {
        let mut s = PlainStorage::<u64>::default();
        s.try_resize(300, true).unwrap();
        s.try_resize(70, true).unwrap();
        s.shrink_to_fit();
        assert_eq!(s.capacity(), 128);
        assert_eq!(&*s.words(), &[u64::MAX, 0x3F]);
        s.clear();
        s.shrink_to_fit();
        assert!(!s.is_heap());
        assert!(s.words().is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut s = PlainStorage::<u32>::default();
        s.try_resize(40, true).unwrap();
        let c = s.try_clone().unwrap();
        s.clear();
        assert_eq!(c.len(), 40);
        assert_eq!(&*c.words(), &[u32::MAX, 0xFF]);
        assert_ne!(c.as_ptr(), s.as_ptr());
    }
}
