use core::ptr;

use super::{blend, in_one_word, word_span};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// Sets every bit of `[first, last)` to `value`.
///
/// # Safety
///
/// `[first, last)` must be a writable range.
pub unsafe fn fill<W: Word>(first: BitPtr<W>, last: BitPtr<W>, value: bool) {
    let len = distance(first, last);
    if len == 0 {
        return;
    }
    let pattern = W::splat(value);
    let bit = first.bit();
    let mut wp = first.word_ptr();

    unsafe {
        if in_one_word(first, len) {
            blend(wp, pattern, mask_range::<W>(bit, bit + len as u32));
            return;
        }

        if bit != 0 {
            blend(wp, pattern, mask_from::<W>(bit));
            wp = wp.add(1);
        }

        let lw = last.word_ptr();
        // the pattern is all-zero or all-one bytes
        ptr::write_bytes(wp, if value { 0xFF } else { 0 }, word_span(wp, lw));

        if last.bit() != 0 {
            blend(lw, pattern, mask_to::<W>(last.bit()));
        }
    }
}

/// Inverts every bit of `[first, last)`.
///
/// # Safety
///
/// `[first, last)` must be a writable range.
pub unsafe fn flip<W: Word>(first: BitPtr<W>, last: BitPtr<W>) {
    let len = distance(first, last);
    if len == 0 {
        return;
    }
    let bit = first.bit();
    let mut wp = first.word_ptr();

    unsafe {
        if in_one_word(first, len) {
            wp.write(wp.read() ^ mask_range::<W>(bit, bit + len as u32));
            return;
        }

        if bit != 0 {
            wp.write(wp.read() ^ mask_from::<W>(bit));
            wp = wp.add(1);
        }

        let lw = last.word_ptr();
        for i in 0..word_span(wp, lw) {
            let w = wp.add(i);
            w.write(!w.read());
        }

        if last.bit() != 0 {
            lw.write(lw.read() ^ mask_to::<W>(last.bit()));
        }
    }
}
