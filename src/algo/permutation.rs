use super::{in_one_word, read_bits, reverse, write_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_to, reverse_low},
};

/// Rearranges `[first, last)` into the next lexicographically greater
/// sequence, with `false < true` and the bit at `first` most significant.
///
/// Returns `true` if such a sequence exists. Otherwise the range is reset to
/// its smallest arrangement (all `false` bits first) and `false` is returned.
///
/// # Safety
///
/// `[first, last)` must be a writable range.
pub unsafe fn next_permutation<W: Word>(first: BitPtr<W>, last: BitPtr<W>) -> bool {
    let len = distance(first, last);
    if len < 2 {
        return false;
    }
    unsafe {
        if in_one_word(first, len) {
            let n = len as u32;
            let v = reverse_low(read_bits(first, n), n);
            let (next, found) = match next_same_weight(v, n) {
                Some(next) => (next, true),
                None => (lowest_with_weight::<W>(v.count_ones()), false),
            };
            write_bits(first, n, reverse_low(next, n));
            return found;
        }
        step(first, last, false)
    }
}

/// Rearranges `[first, last)` into the previous lexicographically smaller
/// sequence, ordering as in [`next_permutation`].
///
/// Returns `true` if such a sequence exists. Otherwise the range is reset to
/// its largest arrangement (all `true` bits first) and `false` is returned.
///
/// # Safety
///
/// `[first, last)` must be a writable range.
pub unsafe fn prev_permutation<W: Word>(first: BitPtr<W>, last: BitPtr<W>) -> bool {
    let len = distance(first, last);
    if len < 2 {
        return false;
    }
    unsafe {
        if in_one_word(first, len) {
            let n = len as u32;
            let all = mask_to::<W>(n);
            let c = !reverse_low(read_bits(first, n), n) & all;
            // stepping the complement forward steps the original backward
            let (next, found) = match next_same_weight(c, n) {
                Some(next) => (next, true),
                None => (lowest_with_weight::<W>(c.count_ones()), false),
            };
            write_bits(first, n, reverse_low(!next & all, n));
            return found;
        }
        step(first, last, true)
    }
}

/// Next integer above `v` with the same number of set bits, if it fits in
/// `n` bits.
fn next_same_weight<W: Word>(v: W, n: u32) -> Option<W> {
    let ones = v.count_ones();
    if ones == 0 || v == lowest_with_weight::<W>(ones) << (n - ones) {
        return None;
    }
    let t = v | v.wrapping_sub(W::ONE);
    let t1 = t.wrapping_add(W::ONE);
    let low = (!t & t1)
        .wrapping_sub(W::ONE)
        .checked_shr(v.trailing_zeros() + 1)
        .unwrap_or(W::ZERO);
    Some(t1 | low)
}

#[inline]
fn lowest_with_weight<W: Word>(ones: u32) -> W {
    mask_to::<W>(ones)
}

/// The classical successor step over bit references, for ranges spanning
/// more than one word. With `backward` set the roles of the two bit values
/// are exchanged, giving the predecessor.
unsafe fn step<W: Word>(first: BitPtr<W>, last: BitPtr<W>, backward: bool) -> bool {
    // the pivot is the rightmost position whose bit is followed by a greater
    // one: `false` then `true` going forward, `true` then `false` backward
    let small = backward;
    unsafe {
        let mut i = last - 1;
        let pivot = loop {
            if i == first {
                reverse(first, last);
                return false;
            }
            let j = i - 1;
            if j.read() == small && i.read() != small {
                break j;
            }
            i = j;
        };
        let mut j = last - 1;
        while j.read() == small {
            j.dec();
        }
        pivot.as_bit_ref().swap(&mut j.as_bit_ref());
        reverse(pivot + 1, last);
    }
    true
}
