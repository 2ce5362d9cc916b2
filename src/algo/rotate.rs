use super::{copy, copy_backward, swap_ranges};
use crate::{
    ptr::{BitPtr, distance},
    word::Word,
};

/// Words of stack scratch space used by [`rotate`] when the shorter side of
/// the rotation fits in it.
pub const AUX_WORDS: usize = 4;

/// Rotates `[first, last)` so that the bit at `middle` becomes the first bit,
/// and returns the new position of the bit that was at `first`.
///
/// When the shorter of the two sides fits in [`AUX_WORDS`] words it is
/// parked in a stack buffer while the longer side is moved over. Otherwise
/// the rotation is done in place by repeatedly swapping the shorter side with
/// an equally long block of the longer one.
///
/// # Safety
///
/// `[first, last)` must be a writable range and `middle` must lie inside it.
pub unsafe fn rotate<W: Word>(first: BitPtr<W>, middle: BitPtr<W>, last: BitPtr<W>) -> BitPtr<W> {
    debug_assert!(first <= middle && middle <= last);
    if first == middle {
        return last;
    }
    if middle == last {
        return first;
    }
    let result = first + distance(middle, last);
    let aux_bits = AUX_WORDS * W::BITS as usize;

    let mut f = first;
    let mut m = middle;
    loop {
        let left = distance(f, m);
        let right = distance(m, last);
        if left == 0 || right == 0 {
            break;
        }
        unsafe {
            if left.min(right) <= aux_bits {
                rotate_buffered(f, m, last, left, right);
                break;
            }
            if left <= right {
                swap_ranges(f, m, m);
                f = m;
                m += left;
            } else {
                swap_ranges(f, f + right, m);
                f += right;
            }
        }
    }
    result
}

unsafe fn rotate_buffered<W: Word>(
    first: BitPtr<W>,
    middle: BitPtr<W>,
    last: BitPtr<W>,
    left: usize,
    right: usize,
) {
    let mut buf = [W::ZERO; AUX_WORDS];
    let tmp = BitPtr::from_mut_slice(&mut buf);
    unsafe {
        if left <= right {
            copy(first, middle, tmp);
            copy(middle, last, first);
            copy(tmp, tmp + left, first + right);
        } else {
            copy(middle, last, tmp);
            copy_backward(first, middle, last);
            copy(tmp, tmp + right, first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};

    fn check<W: Word>(words: &mut [W], a: usize, m: usize, b: usize) {
        let n = words.len() * W::BITS as usize;
        let p = BitPtr::from_mut_slice(words);
        let model: Vec<bool> = (0..n).map(|i| unsafe { (p + i).read() }).collect();
        let r = unsafe { rotate(p + a, p + m, p + b) };
        assert_eq!(r - p, (a + b - m) as isize);
        let got: Vec<bool> = (0..n).map(|i| unsafe { (p + i).read() }).collect();
        let mut expect = model;
        expect[a..b].rotate_left(m - a);
        assert_eq!(got, expect, "rotate {a}..{m}..{b}");
    }

    #[test]
    fn test_rotate_small_sides() {
        for a in 0..10usize {
            for b in (a..70).step_by(3) {
                for m in a..=b {
                    let mut words = [0xC3u8, 0x5A, 0x96, 0x01, 0xFE, 0x33, 0x0F, 0x80, 0x7C];
                    check(&mut words, a, m, b);
                }
            }
        }
    }

    #[test]
    fn test_rotate_large_sides_uses_block_swaps() {
        let mut seed = 0x9E37_79B9u32;
        let mut words: Vec<u8> = vec![0; 400];
        for w in &mut words {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            *w = (seed >> 16) as u8;
        }
        for &(a, m, b) in &[(0, 1000, 3200), (5, 2000, 3195), (3, 1603, 3199), (1, 700, 1401), (0, 64, 3000)] {
            check(&mut words, a, m, b);
        }
    }

    #[test]
    fn test_rotate_degenerate() {
        let mut words = [0xA5u16; 2];
        let p = BitPtr::from_mut_slice(&mut words);
        unsafe {
            assert_eq!(rotate(p + 4, p + 4, p + 20), p + 20);
            assert_eq!(rotate(p + 4, p + 20, p + 20), p + 4);
        }
        assert_eq!(words, [0xA5; 2]);
    }
}
