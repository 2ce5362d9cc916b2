use core::{fmt, mem, ptr, ptr::NonNull, slice};

use super::{Global, INLINE_BITS, Storage, WordAllocator, Words, check_bits, grown_capacity};
use crate::{
    error::{Error, Result},
    word::bit_space,
};

const WORD_BITS: usize = usize::BITS as usize;

const LEN_SHIFT: u32 = usize::BITS - 8;
const LEN_MASK: usize = 0xFF << LEN_SHIFT;
const HEAP_FLAG: usize = 1 << 63;

/// Low bits of control word 1 holding the heap address.
const ADDR_MASK: usize = (1 << 48) - 1;
/// Width of the heap length field in control word 0.
const LEN_FIELD_BITS: u32 = 29;
const LEN_FIELD_MASK: usize = (1 << LEN_FIELD_BITS) - 1;
/// Position of the heap capacity field (in words) in control word 0.
const CAP_SHIFT: u32 = 32;

/// Two-word storage that packs the heap pointer, length and capacity into
/// its control words.
///
/// Local mode is identical to [`SboStorage`](super::SboStorage). In heap
/// mode the block carries no header:
///
/// ```text
/// heap: [ cap:32 | unused:3 | len:29 ][ 1 | unused:15 | address:48 ]
/// ```
///
/// Lengths are limited to `2^29 - 1` bits, and the heap address must fit in
/// 48 bits; an allocator returning a higher address makes the grow fail with
/// [`Error::AllocFailed`].
pub struct TaggedStorage<A: WordAllocator = Global> {
    ctrl: [usize; 2],
    alloc: A,
}

const _: () = assert!(mem::size_of::<TaggedStorage>() == 2 * mem::size_of::<usize>());
const _: () = assert!(bit_space::<usize>((1 << LEN_FIELD_BITS) - 1) < 1 << 32);

// SAFETY: the heap block is owned exclusively
unsafe impl<A: WordAllocator + Send> Send for TaggedStorage<A> {}
// SAFETY: shared access only reads
unsafe impl<A: WordAllocator + Sync> Sync for TaggedStorage<A> {}

impl<A: WordAllocator> TaggedStorage<A> {
    /// Empty local-mode storage drawing heap blocks from `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            ctrl: [0; 2],
            alloc,
        }
    }

    /// The memory provider.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    const fn heap(&self) -> bool {
        self.ctrl[1] & HEAP_FLAG != 0
    }

    #[inline(always)]
    fn heap_ptr(&self) -> *mut usize {
        ptr::with_exposed_provenance_mut(self.ctrl[1] & ADDR_MASK)
    }

    #[inline(always)]
    const fn heap_cap(&self) -> usize {
        self.ctrl[0] >> CAP_SHIFT
    }

    #[inline(always)]
    const fn local_words(&self) -> [usize; 2] {
        [self.ctrl[0], self.ctrl[1] & !LEN_MASK]
    }

    #[inline(always)]
    const fn pack(len: usize, cap: usize, addr: usize) -> [usize; 2] {
        [(cap << CAP_SHIFT) | len, addr | HEAP_FLAG]
    }

    /// Moves the bits into a fresh zeroed heap block of `cap` words.
    fn move_to_heap(&mut self, cap: usize) -> Result<()> {
        let data = self.alloc.allocate::<usize>(cap)?;
        let addr = data.as_ptr().expose_provenance();
        if addr & !ADDR_MASK != 0 {
            // SAFETY: the block was just allocated and is unused
            unsafe { self.alloc.deallocate(data, cap) };
            return Err(Error::AllocFailed { words: cap });
        }
        let data = data.as_ptr();
        let len = self.len();
        let live = self.word_len();
        let old = self.heap().then(|| (self.heap_ptr(), self.heap_cap()));
        // SAFETY: `data` holds `cap >= live` words
        unsafe {
            ptr::write_bytes(data, 0, cap);
            match old {
                Some((src, _)) => ptr::copy_nonoverlapping(src, data, live),
                None => ptr::copy_nonoverlapping(self.local_words().as_ptr(), data, live),
            }
        }
        self.ctrl = Self::pack(len, cap, addr);
        if let Some((src, old_cap)) = old {
            // SAFETY: the old block is no longer referenced
            unsafe { self.alloc.deallocate(NonNull::new_unchecked(src), old_cap) };
        }
        Ok(())
    }

    fn move_to_local(&mut self) {
        let len = self.len();
        debug_assert!(self.heap() && len <= INLINE_BITS);
        let (src, cap) = (self.heap_ptr(), self.heap_cap());
        let mut local = [0usize; 2];
        // SAFETY: the block holds at least `word_len <= 2` words
        unsafe { ptr::copy_nonoverlapping(src, local.as_mut_ptr(), self.word_len()) };
        local[1] |= len << LEN_SHIFT;
        self.ctrl = local;
        // SAFETY: the block is no longer referenced
        unsafe { self.alloc.deallocate(NonNull::new_unchecked(src), cap) };
    }
}

impl<A: WordAllocator + Default> Default for TaggedStorage<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: WordAllocator> Storage for TaggedStorage<A> {
    type Word = usize;

    const MAX_BITS: usize = LEN_FIELD_MASK;

    #[inline]
    fn len(&self) -> usize {
        if self.heap() {
            self.ctrl[0] & LEN_FIELD_MASK
        } else {
            self.ctrl[1] >> LEN_SHIFT
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        if self.heap() {
            self.heap_cap() * WORD_BITS
        } else {
            INLINE_BITS
        }
    }

    #[inline]
    fn as_ptr(&self) -> *const usize {
        if self.heap() {
            self.heap_ptr()
        } else {
            self.ctrl.as_ptr()
        }
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut usize {
        if self.heap() {
            self.heap_ptr()
        } else {
            self.ctrl.as_mut_ptr()
        }
    }

    #[inline]
    fn is_heap(&self) -> bool {
        self.heap()
    }

    fn try_reserve(&mut self, bits: usize) -> Result<()> {
        check_bits(bits, Self::MAX_BITS)?;
        if bits <= self.capacity() {
            return Ok(());
        }
        let current = if self.heap() { self.heap_cap() } else { 0 };
        let max_words = bit_space::<usize>(Self::MAX_BITS);
        let cap = grown_capacity(bit_space::<usize>(bits), current).min(max_words);
        self.move_to_heap(cap)
    }

    #[inline]
    unsafe fn set_len(&mut self, bits: usize) {
        debug_assert!(bits <= self.capacity());
        if self.heap() {
            self.ctrl[0] = (self.ctrl[0] & !LEN_FIELD_MASK) | bits;
        } else {
            self.ctrl[1] = (self.ctrl[1] & !LEN_MASK) | (bits << LEN_SHIFT);
        }
    }

    fn shrink_to_fit(&mut self) {
        if !self.heap() {
            return;
        }
        if self.len() <= INLINE_BITS {
            self.move_to_local();
            return;
        }
        let need = self.word_len();
        if need < self.heap_cap() {
            let _ = self.move_to_heap(need);
        }
    }

    fn words(&self) -> Words<'_, usize> {
        if self.heap() {
            // SAFETY: the block holds `word_len` live words
            Words::External(unsafe { slice::from_raw_parts(self.heap_ptr(), self.word_len()) })
        } else {
            Words::Inline(self.local_words(), self.word_len())
        }
    }

    fn try_clone(&self) -> Result<Self> {
        let mut out = Self::new_in(self.alloc.clone());
        if self.heap() {
            out.move_to_heap(self.word_len().max(super::MIN_HEAP_WORDS))?;
            // SAFETY: both blocks hold `word_len` words
            unsafe {
                ptr::copy_nonoverlapping(self.heap_ptr(), out.heap_ptr(), self.word_len());
                out.set_len(self.len());
            }
        } else {
            out.ctrl = self.ctrl;
        }
        Ok(out)
    }
}

impl<A: WordAllocator> Drop for TaggedStorage<A> {
    fn drop(&mut self) {
        if self.heap() {
            // SAFETY: the block is owned by this storage
            unsafe {
                self.alloc
                    .deallocate(NonNull::new_unchecked(self.heap_ptr()), self.heap_cap());
            }
        }
    }
}

impl<A: WordAllocator> fmt::Debug for TaggedStorage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedStorage")
            .field("heap", &self.heap())
            .field("len", &self.len())
            .field("words", &self.words())
            .finish()
    }
}
