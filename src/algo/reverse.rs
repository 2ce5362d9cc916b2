use super::{read_bits, write_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, reverse_low},
};

/// Reverses the order of the bits in `[first, last)`.
///
/// Works from both ends at once: each step takes up to a word of bits from
/// the front and the same number from the back, mirrors both chunks and
/// writes them to the opposite ends.
///
/// # Safety
///
/// `[first, last)` must be a writable range.
pub unsafe fn reverse<W: Word>(first: BitPtr<W>, last: BitPtr<W>) {
    let mut rem = distance(first, last);
    let mut lo = first;
    let mut hi = last;
    while rem >= 2 {
        let k = (rem / 2).min(W::BITS as usize);
        let n = k as u32;
        let hk = hi - k;
        unsafe {
            let a = read_bits(lo, n);
            let b = read_bits(hk, n);
            write_bits(lo, n, reverse_low(b, n));
            write_bits(hk, n, reverse_low(a, n));
        }
        lo += k;
        hi = hk;
        rem -= 2 * k;
    }
}
