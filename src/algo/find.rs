use super::{in_one_word, word_span};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// Interior words inspected together before testing for a hit.
const LANE: usize = 4;

/// Position of the first bit in `[first, last)` equal to `value`, or `last`
/// when there is none.
///
/// # Safety
///
/// `[first, last)` must be a readable range.
pub unsafe fn find<W: Word>(first: BitPtr<W>, last: BitPtr<W>, value: bool) -> BitPtr<W> {
    let len = distance(first, last);
    if len == 0 {
        return last;
    }
    // after the xor, a set bit marks a bit equal to `value`
    let flip = W::splat(!value);
    let bit = first.bit();
    let mut wp = first.word_ptr();

    unsafe {
        if in_one_word(first, len) {
            let w = (wp.read() ^ flip) & mask_range::<W>(bit, bit + len as u32);
            return hit(wp, w).unwrap_or(last);
        }

        if bit != 0 {
            let w = (wp.read() ^ flip) & mask_from::<W>(bit);
            if let Some(p) = hit(wp, w) {
                return p;
            }
            wp = wp.add(1);
        }

        let lw = last.word_ptr();
        let n = word_span(wp, lw);
        let mut i = 0;
        while i + LANE <= n {
            let a = wp.add(i).read() ^ flip;
            let b = wp.add(i + 1).read() ^ flip;
            let c = wp.add(i + 2).read() ^ flip;
            let d = wp.add(i + 3).read() ^ flip;
            if (a | b | c | d) != W::ZERO {
                break;
            }
            i += LANE;
        }
        while i < n {
            if let Some(p) = hit(wp.add(i), wp.add(i).read() ^ flip) {
                return p;
            }
            i += 1;
        }

        if last.bit() != 0 {
            let w = (lw.read() ^ flip) & mask_to::<W>(last.bit());
            if let Some(p) = hit(lw, w) {
                return p;
            }
        }
    }
    last
}

/// Position of the last bit in `[first, last)` equal to `value`, or `last`
/// when there is none.
///
/// # Safety
///
/// `[first, last)` must be a readable range.
pub unsafe fn find_last<W: Word>(first: BitPtr<W>, last: BitPtr<W>, value: bool) -> BitPtr<W> {
    let len = distance(first, last);
    if len == 0 {
        return last;
    }
    let flip = W::splat(!value);
    let bit = first.bit();
    let fw = first.word_ptr();

    unsafe {
        if in_one_word(first, len) {
            let w = (fw.read() ^ flip) & mask_range::<W>(bit, bit + len as u32);
            return hit_back(fw, w).unwrap_or(last);
        }

        let mut wp = last.word_ptr();
        if last.bit() != 0 {
            let w = (wp.read() ^ flip) & mask_to::<W>(last.bit());
            if let Some(p) = hit_back(wp, w) {
                return p;
            }
        }

        let lo = if bit != 0 { fw.add(1) } else { fw };
        while wp > lo {
            wp = wp.sub(1);
            if let Some(p) = hit_back(wp, wp.read() ^ flip) {
                return p;
            }
        }

        if bit != 0 {
            let w = (fw.read() ^ flip) & mask_from::<W>(bit);
            if let Some(p) = hit_back(fw, w) {
                return p;
            }
        }
    }
    last
}

/// Number of bits in `[first, last)` equal to `value`.
///
/// # Safety
///
/// `[first, last)` must be a readable range.
pub unsafe fn count<W: Word>(first: BitPtr<W>, last: BitPtr<W>, value: bool) -> usize {
    let len = distance(first, last);
    if len == 0 {
        return 0;
    }
    let ones = unsafe { count_ones(first, last, len) };
    if value { ones } else { len - ones }
}

unsafe fn count_ones<W: Word>(first: BitPtr<W>, last: BitPtr<W>, len: usize) -> usize {
    let bit = first.bit();
    let mut wp = first.word_ptr();

    unsafe {
        if in_one_word(first, len) {
            return (wp.read() & mask_range::<W>(bit, bit + len as u32)).count_ones() as usize;
        }

        let mut total = 0usize;
        if bit != 0 {
            total += (wp.read() & mask_from::<W>(bit)).count_ones() as usize;
            wp = wp.add(1);
        }

        let lw = last.word_ptr();
        let n = word_span(wp, lw);
        let mut i = 0;
        while i + LANE <= n {
            total += (wp.add(i).read().count_ones()
                + wp.add(i + 1).read().count_ones()
                + wp.add(i + 2).read().count_ones()
                + wp.add(i + 3).read().count_ones()) as usize;
            i += LANE;
        }
        while i < n {
            total += wp.add(i).read().count_ones() as usize;
            i += 1;
        }

        if last.bit() != 0 {
            total += (lw.read() & mask_to::<W>(last.bit())).count_ones() as usize;
        }
        total
    }
}

#[inline(always)]
fn hit<W: Word>(wp: *mut W, w: W) -> Option<BitPtr<W>> {
    (w != W::ZERO).then(|| BitPtr::new(wp, w.trailing_zeros()))
}

#[inline(always)]
fn hit_back<W: Word>(wp: *mut W, w: W) -> Option<BitPtr<W>> {
    (w != W::ZERO).then(|| BitPtr::new(wp, W::BITS - 1 - w.leading_zeros()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(words: &[u8]) -> alloc::vec::Vec<bool> {
        (0..words.len() * 8)
            .map(|i| words[i / 8] >> (i % 8) & 1 == 1)
            .collect()
    }

    #[test]
    fn test_find_matches_linear_scan() {
        let words = [0u8, 0, 0b0001_0000, 0, 0, 0, 0, 0, 0, 0x80, 0];
        let bits = model(&words);
        let first = BitPtr::from_slice(&words);
        for a in 0..bits.len() {
            for b in a..=bits.len() {
                for value in [false, true] {
                    let expect = (a..b).find(|&i| bits[i] == value).unwrap_or(b);
                    let got = unsafe { find(first + a, first + b, value) };
                    assert_eq!(got - first, expect as isize, "find {value} in {a}..{b}");
                    let expect = (a..b).rev().find(|&i| bits[i] == value).unwrap_or(b);
                    let got = unsafe { find_last(first + a, first + b, value) };
                    assert_eq!(got - first, expect as isize, "find_last {value} in {a}..{b}");
                }
            }
        }
    }

    #[test]
    fn test_count_matches_linear_scan() {
        let words = [0xA5u8, 0xFF, 0x01, 0x80, 0x3C, 0, 0xFF, 0x77];
        let bits = model(&words);
        let first = BitPtr::from_slice(&words);
        for a in 0..bits.len() {
            for b in a..=bits.len() {
                let ones = bits[a..b].iter().filter(|&&x| x).count();
                unsafe {
                    assert_eq!(count(first + a, first + b, true), ones);
                    assert_eq!(count(first + a, first + b, false), b - a - ones);
                }
            }
        }
    }

    #[test]
    fn test_lane_path_reports_first_hit() {
        let mut words = [u64::MAX; 12];
        words[6] = !(1 << 17);
        words[7] = 0;
        let first = BitPtr::from_slice(&words);
        let end = first + 12 * 64;
        unsafe {
            assert_eq!(find(first, end, false) - first, 6 * 64 + 17);
            assert_eq!(find(first + 1, end, false) - first, 6 * 64 + 17);
            assert_eq!(find_last(first, end, false) - first, 7 * 64 + 63);
            assert_eq!(count(first, end, false), 65);
        }
    }
}
