//! Word-level bulk algorithms over bit ranges.
//!
//! Every algorithm takes its ranges as [`BitPtr`] pairs and works a whole
//! word at a time wherever it can. The shape is the same throughout: the
//! leading partial word is handled with a mask from the start offset to the
//! word boundary, whole interior words are processed without masking, and the
//! trailing partial word is handled with a mask up to the end offset.
//!
//! Algorithms over two or three ranges compare the start offsets of their
//! operands. When they are equal the words line up and are combined
//! directly; otherwise every destination word is assembled from two source
//! words with a pair of shifts. Partially covered destination words are
//! always written with a masked blend, so bits outside the range are never
//! disturbed.
//!
//! # Safety
//!
//! The algorithms are `unsafe`: callers guarantee that every range lies
//! inside a live word buffer, that `first <= last`, and that ranges which are
//! written are not read concurrently through a shared reference. Overlap
//! rules are listed per function.

mod copy;
mod equal;
mod fill;
mod find;
mod permutation;
mod reverse;
mod rotate;
mod search;
mod swap;
mod transform;

pub use copy::{copy, copy_backward};
pub use equal::equal;
pub use fill::{fill, flip};
pub use find::{count, find, find_last};
pub use permutation::{next_permutation, prev_permutation};
pub use reverse::reverse;
pub use rotate::{AUX_WORDS, rotate};
pub use search::search;
pub use swap::swap_ranges;
pub use transform::{BinaryOp, any_of, transform};

use crate::{
    ptr::BitPtr,
    word::{Word, mask_from, mask_range, mask_to},
};

/// Number of whole words between two word pointers.
#[inline(always)]
pub(crate) unsafe fn word_span<W: Word>(first: *mut W, last: *mut W) -> usize {
    let n = unsafe { last.offset_from(first) };
    debug_assert!(n >= 0);
    n as usize
}

/// Replaces the bits of `*wp` selected by `mask` with those of `value`.
#[inline(always)]
pub(crate) unsafe fn blend<W: Word>(wp: *mut W, value: W, mask: W) {
    unsafe {
        let old = wp.read();
        wp.write((value & mask) | (old & !mask));
    }
}

/// Reads `n` bits (`1..=BITS`) starting at `p` into the low bits of a word.
///
/// Touches the word after `p`'s word only when the bits actually cross the
/// boundary.
#[inline(always)]
pub(crate) unsafe fn read_bits<W: Word>(p: BitPtr<W>, n: u32) -> W {
    debug_assert!(n >= 1 && n <= W::BITS);
    let bit = p.bit();
    let wp = p.word_ptr();
    let avail = W::BITS - bit;
    let lo = unsafe { wp.read() } >> bit;
    let v = if n > avail {
        lo | (unsafe { wp.add(1).read() } << avail)
    } else {
        lo
    };
    v & mask_to::<W>(n)
}

/// Writes the low `n` bits (`1..=BITS`) of `value` to the bits starting at
/// `p`.
#[inline(always)]
pub(crate) unsafe fn write_bits<W: Word>(p: BitPtr<W>, n: u32, value: W) {
    debug_assert!(n >= 1 && n <= W::BITS);
    let bit = p.bit();
    let wp = p.word_ptr();
    let avail = W::BITS - bit;
    unsafe {
        if n <= avail {
            blend(wp, value << bit, mask_range::<W>(bit, bit + n));
        } else {
            blend(wp, value << bit, mask_from::<W>(bit));
            blend(wp.add(1), value >> avail, mask_to::<W>(n - avail));
        }
    }
}

/// Whether `[first, first + len)` lies inside a single word.
#[inline(always)]
pub(crate) fn in_one_word<W: Word>(first: BitPtr<W>, len: usize) -> bool {
    first.bit() as usize + len <= W::BITS as usize
}
