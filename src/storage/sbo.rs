use core::{fmt, mem, ptr, ptr::NonNull, slice};

use super::{Global, Storage, WordAllocator, Words, check_bits, grown_capacity};
use crate::{error::Result, word::bit_space};

const WORD_BITS: usize = usize::BITS as usize;

/// Bits held inline, in the two control words minus the length byte.
pub const INLINE_BITS: usize = 2 * WORD_BITS - 8;

/// Position of the inline length byte in control word 1.
const LEN_SHIFT: u32 = usize::BITS - 8;
const LEN_MASK: usize = 0xFF << LEN_SHIFT;

/// Heap mode marker in control word 1.
const HEAP_FLAG: usize = 1 << (usize::BITS - 1);

/// Words in front of a heap block holding its capacity.
const HEADER_WORDS: usize = 1;

/// Small-buffer-optimized storage in two machine words.
///
/// Up to [`INLINE_BITS`] bits live directly in the control words, with the
/// length in the top byte of the second word. Longer contents move to a heap
/// block whose capacity is kept in a header word in front of the data:
///
/// ```text
/// local: [ bits 0..W          | bits W..2W-8 | len:8 ]
/// heap:  [ data pointer       | 1 | len:W-1          ]
/// ```
///
/// Lengths below 128 never reach the top bit of the length byte, so the
/// heap flag distinguishes the modes unambiguously.
///
/// # Examples
///
/// ```
/// use smol_bitvec::{BitVec, Bits, storage::INLINE_BITS};
///
/// let mut bits: BitVec = BitVec::with_len(INLINE_BITS, true);
/// assert!(!bits.is_heap());
/// bits.push(true);
/// assert!(bits.is_heap());
/// bits.truncate(3);
/// bits.shrink_to_fit();
/// assert!(!bits.is_heap());
/// assert_eq!(bits.count_ones(), 3);
/// ```
pub struct SboStorage<A: WordAllocator = Global> {
    ctrl: [usize; 2],
    alloc: A,
}

const _: () = assert!(mem::size_of::<SboStorage>() == 2 * mem::size_of::<usize>());
const _: () = assert!(INLINE_BITS < 1 << 7);

// SAFETY: the heap block is owned exclusively
unsafe impl<A: WordAllocator + Send> Send for SboStorage<A> {}
// SAFETY: shared access only reads
unsafe impl<A: WordAllocator + Sync> Sync for SboStorage<A> {}

impl<A: WordAllocator> SboStorage<A> {
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
        ptr::with_exposed_provenance_mut(self.ctrl[0])
    }

    #[inline(always)]
    fn heap_cap(&self) -> usize {
        // SAFETY: heap blocks always carry their header
        unsafe { self.heap_ptr().sub(HEADER_WORDS).read() }
    }

    /// The inline words with the length byte cleared.
    #[inline(always)]
    const fn local_words(&self) -> [usize; 2] {
        [self.ctrl[0], self.ctrl[1] & !LEN_MASK]
    }

    /// Allocates a zeroed block of `cap` data words behind a header.
    fn alloc_block(&self, cap: usize) -> Result<*mut usize> {
        let block = self.alloc.allocate::<usize>(cap + HEADER_WORDS)?.as_ptr();
        // SAFETY: the block holds `cap + HEADER_WORDS` words
        unsafe {
            block.write(cap);
            let data = block.add(HEADER_WORDS);
            ptr::write_bytes(data, 0, cap);
            Ok(data)
        }
    }

    /// Releases a block obtained from [`alloc_block`](Self::alloc_block).
    unsafe fn free_block(&self, data: *mut usize) {
        // SAFETY: `data` sits right after its header
        unsafe {
            let block = data.sub(HEADER_WORDS);
            let cap = block.read();
            self.alloc
                .deallocate(NonNull::new_unchecked(block), cap + HEADER_WORDS);
        }
    }

    /// Moves the bits into a fresh heap block of `cap` words.
    fn move_to_heap(&mut self, cap: usize) -> Result<()> {
        let data = self.alloc_block(cap)?;
        let len = self.len();
        let live = self.word_len();
        debug_assert!(live <= cap);
        let old = self.heap().then(|| self.heap_ptr());
        // SAFETY: both buffers hold at least `live` words
        unsafe {
            match old {
                Some(src) => ptr::copy_nonoverlapping(src, data, live),
                None => ptr::copy_nonoverlapping(self.local_words().as_ptr(), data, live),
            }
        }
        self.ctrl = [data.expose_provenance(), len | HEAP_FLAG];
        if let Some(src) = old {
            // SAFETY: the old block is no longer referenced
            unsafe { self.free_block(src) };
        }
        Ok(())
    }

    /// Moves the bits back into the control words. They must fit.
    fn move_to_local(&mut self) {
        debug_assert!(self.heap());
        let len = self.len();
        debug_assert!(len <= INLINE_BITS);
        let src = self.heap_ptr();
        let mut local = [0usize; 2];
        // SAFETY: the block holds at least `word_len <= 2` words
        unsafe { ptr::copy_nonoverlapping(src, local.as_mut_ptr(), self.word_len()) };
        local[1] |= len << LEN_SHIFT;
        self.ctrl = local;
        // SAFETY: the block is no longer referenced
        unsafe { self.free_block(src) };
    }
}

impl<A: WordAllocator + Default> Default for SboStorage<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: WordAllocator> Storage for SboStorage<A> {
    type Word = usize;

    const MAX_BITS: usize = (isize::MAX as usize) >> 1;

    #[inline]
    fn len(&self) -> usize {
        if self.heap() {
            self.ctrl[1] & !HEAP_FLAG
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
        self.move_to_heap(grown_capacity(bit_space::<usize>(bits), current))
    }

    #[inline]
    unsafe fn set_len(&mut self, bits: usize) {
        debug_assert!(bits <= self.capacity());
        if self.heap() {
            self.ctrl[1] = bits | HEAP_FLAG;
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
            // keeping the larger block is fine when the provider refuses
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
            }
            out.ctrl[1] = self.ctrl[1];
        } else {
            out.ctrl = self.ctrl;
        }
        Ok(out)
    }
}

impl<A: WordAllocator> Drop for SboStorage<A> {
    fn drop(&mut self) {
        if self.heap() {
            // SAFETY: the block is owned by this storage
            unsafe { self.free_block(self.heap_ptr()) };
        }
    }
}

impl<A: WordAllocator> fmt::Debug for SboStorage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SboStorage")
            .field("heap", &self.heap())
            .field("len", &self.len())
            .field("words", &self.words())
            .finish()
    }
}
