//! The raw memory provider used by the storages.

use alloc::alloc::{Layout, alloc, dealloc};
use core::ptr::NonNull;

use crate::{
    error::{Error, Result},
    word::Word,
};

/// A source of word buffers.
///
/// Storages ask for whole words and zero fresh buffers themselves.
///
/// # Safety
///
/// A pointer returned by [`allocate`](Self::allocate) must be valid for
/// reads and writes of `n` words of type `W`, suitably aligned, and must stay
/// valid until passed to [`deallocate`](Self::deallocate) with the same `n`
/// on this allocator or a clone of it.
pub unsafe trait WordAllocator: Clone {
    /// Allocates an uninitialized buffer of `n > 0` words.
    fn allocate<W: Word>(&self, n: usize) -> Result<NonNull<W>>;

    /// Releases a buffer obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate::<W>(n)` on this allocator and must not
    /// be used afterwards.
    unsafe fn deallocate<W: Word>(&self, ptr: NonNull<W>, n: usize);
}

/// The global heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

#[inline]
fn layout<W: Word>(n: usize) -> Result<Layout> {
    Layout::array::<W>(n).map_err(|_| Error::CapacityExceeded {
        requested: n.saturating_mul(W::BITS as usize),
        max: isize::MAX as usize,
    })
}

// SAFETY: buffers come straight from the global allocator with the layout
// of `n` words
unsafe impl WordAllocator for Global {
    fn allocate<W: Word>(&self, n: usize) -> Result<NonNull<W>> {
        debug_assert!(n > 0);
        let layout = layout::<W>(n)?;
        // SAFETY: the layout has a non-zero size
        let ptr = unsafe { alloc(layout) };
        NonNull::new(ptr.cast::<W>()).ok_or(Error::AllocFailed { words: n })
    }

    unsafe fn deallocate<W: Word>(&self, ptr: NonNull<W>, n: usize) {
        if let Ok(layout) = layout::<W>(n) {
            // SAFETY: the caller returns a block allocated with this layout
            unsafe { dealloc(ptr.as_ptr().cast(), layout) };
        }
    }
}
