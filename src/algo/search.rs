use super::{count, equal, find, read_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_to},
};

/// Position of the first occurrence of the needle `[s_first, s_last)` inside
/// the haystack `[first, last)`, or `last` when it does not occur.
///
/// An empty needle matches nowhere and yields `last`, as does a needle longer
/// than the haystack.
///
/// Candidates are located with [`find`] on the needle's first bit and then
/// checked a word at a time against the needle's leading word. After a
/// candidate whose leading word matched but whose tail did not, the scan
/// skips ahead by the smallest period of that leading word, since no shorter
/// shift can line the leading word up with itself again. This period is the
/// whole skip table: one shift, computed once per search.
///
/// # Safety
///
/// Both ranges must be readable.
pub unsafe fn search<W: Word>(
    first: BitPtr<W>,
    last: BitPtr<W>,
    s_first: BitPtr<W>,
    s_last: BitPtr<W>,
) -> BitPtr<W> {
    let n = distance(first, last);
    let k = distance(s_first, s_last);
    if k == 0 || k > n {
        return last;
    }
    unsafe {
        let lead = s_first.read();
        if k == 1 {
            return find(first, last, lead);
        }
        if count(s_first, s_last, !lead) == 0 {
            return find_run(first, last, lead, k);
        }

        let head_len = k.min(W::BITS as usize) as u32;
        let head = read_bits(s_first, head_len);
        let skip = smallest_period(head, head_len) as usize;
        // one past the last position where the needle still fits
        let stop = last - (k - 1);

        let mut p = first;
        while p < stop {
            p = find(p, stop, lead);
            if p == stop {
                break;
            }
            if read_bits(p, head_len) != head {
                p.inc();
                continue;
            }
            let h = head_len as usize;
            if k == h || equal(s_first + h, s_last, p + h) {
                return p;
            }
            p += skip;
        }
    }
    last
}

/// First run of `k` consecutive bits equal to `value`.
unsafe fn find_run<W: Word>(first: BitPtr<W>, last: BitPtr<W>, value: bool, k: usize) -> BitPtr<W> {
    let mut p = first;
    loop {
        p = unsafe { find(p, last, value) };
        if distance(p, last) < k {
            return last;
        }
        let end = p + k;
        let breaker = unsafe { find(p, end, !value) };
        if breaker == end {
            return p;
        }
        p = breaker + 1;
    }
}

/// Smallest shift `s` in `1..n` such that the low `n` bits of `head` agree
/// with themselves shifted by `s`, or `n` when there is none.
fn smallest_period<W: Word>(head: W, n: u32) -> u32 {
    (1..n)
        .find(|&s| (head >> s) == head & mask_to::<W>(n - s))
        .unwrap_or(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn naive(hay: &[bool], needle: &[bool]) -> usize {
        if needle.is_empty() || needle.len() > hay.len() {
            return hay.len();
        }
        hay.windows(needle.len())
            .position(|w| w == needle)
            .unwrap_or(hay.len())
    }

    fn pack(bits: &[bool]) -> Vec<u8> {
        let mut words = alloc::vec![0u8; bits.len().div_ceil(8) + 1];
        for (i, &b) in bits.iter().enumerate() {
            words[i / 8] |= (b as u8) << (i % 8);
        }
        words
    }

    fn check(hay: &[bool], needle: &[bool]) {
        let hw = pack(hay);
        let nw = pack(needle);
        let h = BitPtr::from_slice(&hw);
        let s = BitPtr::from_slice(&nw);
        let got = unsafe { search(h, h + hay.len(), s, s + needle.len()) };
        assert_eq!(got - h, naive(hay, needle) as isize, "needle {needle:?}");
    }

    #[test]
    fn test_smallest_period() {
        assert_eq!(smallest_period::<u8>(0b1010_1010, 8), 2);
        assert_eq!(smallest_period::<u8>(0b0000_0001, 8), 8);
        assert_eq!(smallest_period::<u8>(0b1001_0010, 8), 3);
        assert_eq!(smallest_period::<u8>(0b0100_0001, 7), 6);
    }

    #[test]
    fn test_search_needle_lengths_around_word_size() {
        let mut seed = 12_345u32;
        let mut next = || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed >> 31 == 1
        };
        let hay: Vec<bool> = (0..300).map(|_| next()).collect();
        for k in [1usize, 7, 8, 9, 15, 16, 17] {
            for start in [0usize, 3, 100, 300 - k] {
                check(&hay, &hay[start..start + k]);
            }
            let mut absent = hay[50..50 + k].to_vec();
            absent.push(!absent[k - 1]);
            check(&hay, &absent);
        }
    }

    #[test]
    fn test_search_periodic_patterns() {
        let hay: Vec<bool> = (0..200).map(|i| i % 3 != 0 || i == 150).collect();
        let needle: Vec<bool> = (0..20).map(|i| i % 3 != 0 || i == 18).collect();
        check(&hay, &needle);
        let needle: Vec<bool> = (0..20).map(|i| i % 3 != 0).collect();
        check(&hay, &needle);
    }

    #[test]
    fn test_search_uniform_needles() {
        let mut hay = alloc::vec![false; 90];
        hay[10..14].fill(true);
        hay[40..49].fill(true);
        hay[60..90].fill(true);
        for k in [1usize, 4, 5, 9, 10, 30, 31] {
            check(&hay, &alloc::vec![true; k]);
            check(&hay, &alloc::vec![false; k]);
        }
    }

    #[test]
    fn test_search_degenerate() {
        let hay = [true, false, true];
        check(&hay, &[]);
        check(&hay, &[true, false, true, false]);
        check(&hay, &hay);
        check(&[], &[true]);
    }
}
