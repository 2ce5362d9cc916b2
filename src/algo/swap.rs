use core::ptr;

use super::{in_one_word, read_bits, word_span, write_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// Exchanges the contents of `[first1, last1)` and the range of the same
/// length starting at `first2`, returning the end of the second range.
///
/// # Safety
///
/// Both ranges must be writable and must not overlap, although they may
/// share a word.
pub unsafe fn swap_ranges<W: Word>(
    first1: BitPtr<W>,
    last1: BitPtr<W>,
    first2: BitPtr<W>,
) -> BitPtr<W> {
    let len = distance(first1, last1);
    if len == 0 {
        return first2;
    }
    unsafe {
        if first1.bit() == first2.bit() {
            swap_aligned(first1, last1, first2, len);
        } else {
            swap_unaligned(first1, first2, len);
        }
    }
    first2 + len
}

unsafe fn swap_aligned<W: Word>(first1: BitPtr<W>, last1: BitPtr<W>, first2: BitPtr<W>, len: usize) {
    let bit = first1.bit();
    let mut a = first1.word_ptr();
    let mut b = first2.word_ptr();
    unsafe {
        if in_one_word(first1, len) {
            swap_masked(a, b, mask_range::<W>(bit, bit + len as u32));
            return;
        }
        if bit != 0 {
            swap_masked(a, b, mask_from::<W>(bit));
            a = a.add(1);
            b = b.add(1);
        }
        let n = word_span(a, last1.word_ptr());
        ptr::swap_nonoverlapping(a, b, n);
        if last1.bit() != 0 {
            swap_masked(a.add(n), b.add(n), mask_to::<W>(last1.bit()));
        }
    }
}

unsafe fn swap_unaligned<W: Word>(mut a: BitPtr<W>, mut b: BitPtr<W>, mut rem: usize) {
    unsafe {
        if a.bit() != 0 {
            let n = rem.min((W::BITS - a.bit()) as usize) as u32;
            swap_chunk(a, b, n);
            a += n as usize;
            b += n as usize;
            rem -= n as usize;
        }
        while rem >= W::BITS as usize {
            swap_chunk(a, b, W::BITS);
            a += W::BITS as usize;
            b += W::BITS as usize;
            rem -= W::BITS as usize;
        }
        if rem != 0 {
            swap_chunk(a, b, rem as u32);
        }
    }
}

#[inline(always)]
unsafe fn swap_chunk<W: Word>(a: BitPtr<W>, b: BitPtr<W>, n: u32) {
    unsafe {
        let x = read_bits(a, n);
        let y = read_bits(b, n);
        write_bits(a, n, y);
        write_bits(b, n, x);
    }
}

#[inline(always)]
unsafe fn swap_masked<W: Word>(a: *mut W, b: *mut W, mask: W) {
    unsafe {
        let x = a.read();
        let y = b.read();
        a.write((x & !mask) | (y & mask));
        b.write((y & !mask) | (x & mask));
    }
}
