use super::{in_one_word, read_bits, word_span};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// Whether `[first1, last1)` holds the same bits as the range of the same
/// length starting at `first2`.
///
/// # Safety
///
/// Both ranges must be readable.
pub unsafe fn equal<W: Word>(first1: BitPtr<W>, last1: BitPtr<W>, first2: BitPtr<W>) -> bool {
    let len = distance(first1, last1);
    if len == 0 {
        return true;
    }
    unsafe {
        if first1.bit() == first2.bit() {
            equal_aligned(first1, last1, first2, len)
        } else {
            equal_unaligned(first1, first2, len)
        }
    }
}

unsafe fn equal_aligned<W: Word>(first1: BitPtr<W>, last1: BitPtr<W>, first2: BitPtr<W>, len: usize) -> bool {
    let bit = first1.bit();
    let mut a = first1.word_ptr();
    let mut b = first2.word_ptr();
    unsafe {
        if in_one_word(first1, len) {
            let m = mask_range::<W>(bit, bit + len as u32);
            return (a.read() ^ b.read()) & m == W::ZERO;
        }
        if bit != 0 {
            if (a.read() ^ b.read()) & mask_from::<W>(bit) != W::ZERO {
                return false;
            }
            a = a.add(1);
            b = b.add(1);
        }
        let n = word_span(a, last1.word_ptr());
        for i in 0..n {
            if a.add(i).read() != b.add(i).read() {
                return false;
            }
        }
        last1.bit() == 0 || (a.add(n).read() ^ b.add(n).read()) & mask_to::<W>(last1.bit()) == W::ZERO
    }
}

unsafe fn equal_unaligned<W: Word>(mut a: BitPtr<W>, mut b: BitPtr<W>, mut rem: usize) -> bool {
    unsafe {
        if a.bit() != 0 {
            let n = rem.min((W::BITS - a.bit()) as usize) as u32;
            if read_bits(a, n) != read_bits(b, n) {
                return false;
            }
            a += n as usize;
            b += n as usize;
            rem -= n as usize;
        }
        while rem >= W::BITS as usize {
            if a.read_word() != read_bits(b, W::BITS) {
                return false;
            }
            a += W::BITS as usize;
            b += W::BITS as usize;
            rem -= W::BITS as usize;
        }
        rem == 0 || read_bits(a, rem as u32) == read_bits(b, rem as u32)
    }
}
