use core::ptr;

use super::{blend, in_one_word, read_bits, word_span, write_bits};
use crate::{
    ptr::{BitPtr, distance},
    word::{Word, mask_from, mask_range, mask_to},
};

/// Copies `[first, last)` to the range starting at `d_first` and returns the
/// end of the destination range.
///
/// The ranges may overlap as long as `d_first` does not fall inside
/// `(first, last)`; use [`copy_backward`] for that case.
///
/// # Safety
///
/// The source must be readable and the destination writable.
pub unsafe fn copy<W: Word>(first: BitPtr<W>, last: BitPtr<W>, d_first: BitPtr<W>) -> BitPtr<W> {
    let len = distance(first, last);
    if len == 0 {
        return d_first;
    }
    unsafe {
        if first.bit() == d_first.bit() {
            copy_aligned(first, last, d_first, len);
        } else {
            copy_unaligned(first, d_first, len);
        }
    }
    d_first + len
}

unsafe fn copy_aligned<W: Word>(first: BitPtr<W>, last: BitPtr<W>, d_first: BitPtr<W>, len: usize) {
    let bit = first.bit();
    let mut s = first.word_ptr();
    let mut d = d_first.word_ptr();
    unsafe {
        if in_one_word(first, len) {
            blend(d, s.read(), mask_range::<W>(bit, bit + len as u32));
            return;
        }
        if bit != 0 {
            blend(d, s.read(), mask_from::<W>(bit));
            s = s.add(1);
            d = d.add(1);
        }
        let n = word_span(s, last.word_ptr());
        ptr::copy(s, d, n);
        if last.bit() != 0 {
            blend(d.add(n), s.add(n).read(), mask_to::<W>(last.bit()));
        }
    }
}

unsafe fn copy_unaligned<W: Word>(mut s: BitPtr<W>, mut d: BitPtr<W>, mut rem: usize) {
    unsafe {
        // bring the destination to a word boundary
        if d.bit() != 0 {
            let n = rem.min((W::BITS - d.bit()) as usize) as u32;
            write_bits(d, n, read_bits(s, n));
            s += n as usize;
            d += n as usize;
            rem -= n as usize;
        }
        if rem == 0 {
            return;
        }

        // destination words are whole now; each is fed by two source words
        let sb = s.bit();
        debug_assert_ne!(sb, 0);
        let mut sp = s.word_ptr();
        let mut dp = d.word_ptr();
        while rem >= W::BITS as usize {
            let lo = sp.read() >> sb;
            let hi = sp.add(1).read() << (W::BITS - sb);
            dp.write(lo | hi);
            sp = sp.add(1);
            dp = dp.add(1);
            rem -= W::BITS as usize;
        }

        if rem != 0 {
            let n = rem as u32;
            write_bits(BitPtr::new(dp, 0), n, read_bits(BitPtr::new(sp, sb), n));
        }
    }
}

/// Copies `[first, last)` to the range ending at `d_last`, processing from
/// the back, and returns the start of the destination range.
///
/// The ranges may overlap as long as `d_last` does not fall inside
/// `(first, last)`; use [`copy`] for that case.
///
/// # Safety
///
/// The source must be readable and the destination writable.
pub unsafe fn copy_backward<W: Word>(
    first: BitPtr<W>,
    last: BitPtr<W>,
    d_last: BitPtr<W>,
) -> BitPtr<W> {
    let len = distance(first, last);
    if len == 0 {
        return d_last;
    }
    let d_first = d_last - len;
    unsafe {
        if first.bit() == d_first.bit() {
            copy_backward_aligned(first, last, d_first, d_last, len);
        } else {
            copy_backward_unaligned(last, d_last, len);
        }
    }
    d_first
}

unsafe fn copy_backward_aligned<W: Word>(
    first: BitPtr<W>,
    last: BitPtr<W>,
    d_first: BitPtr<W>,
    d_last: BitPtr<W>,
    len: usize,
) {
    let bit = first.bit();
    unsafe {
        if in_one_word(first, len) {
            blend(
                d_first.word_ptr(),
                first.word_ptr().read(),
                mask_range::<W>(bit, bit + len as u32),
            );
            return;
        }
        let s = last.word_ptr();
        let d = d_last.word_ptr();
        if last.bit() != 0 {
            blend(d, s.read(), mask_to::<W>(last.bit()));
        }
        let lo = if bit != 0 {
            first.word_ptr().add(1)
        } else {
            first.word_ptr()
        };
        let n = word_span(lo, s);
        let d_lo = d.sub(n);
        ptr::copy(lo, d_lo, n);
        if bit != 0 {
            blend(d_lo.sub(1), first.word_ptr().read(), mask_from::<W>(bit));
        }
    }
}

unsafe fn copy_backward_unaligned<W: Word>(mut s: BitPtr<W>, mut d: BitPtr<W>, mut rem: usize) {
    unsafe {
        // bring the destination end to a word boundary
        if d.bit() != 0 {
            let n = rem.min(d.bit() as usize) as u32;
            s -= n as usize;
            d -= n as usize;
            write_bits(d, n, read_bits(s, n));
            rem -= n as usize;
        }
        if rem == 0 {
            return;
        }

        let sb = s.bit();
        debug_assert_ne!(sb, 0);
        let mut sp = s.word_ptr();
        let mut dp = d.word_ptr();
        while rem >= W::BITS as usize {
            sp = sp.sub(1);
            dp = dp.sub(1);
            let lo = sp.read() >> sb;
            let hi = sp.add(1).read() << (W::BITS - sb);
            dp.write(lo | hi);
            rem -= W::BITS as usize;
        }

        if rem != 0 {
            let s = BitPtr::new(sp, sb) - rem;
            let d = BitPtr::new(dp, 0) - rem;
            write_bits(d, rem as u32, read_bits(s, rem as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const SRC: [u8; 6] = [0b1011_0010, 0x5A, 0xC3, 0x0F, 0x81, 0x7E];

    fn bits(words: &[u8]) -> Vec<bool> {
        (0..words.len() * 8)
            .map(|i| words[i / 8] >> (i % 8) & 1 == 1)
            .collect()
    }

    #[test]
    fn test_copy_disjoint_all_offsets() {
        let src_bits = bits(&SRC);
        for a in 0..20usize {
            for len in [0usize, 1, 5, 8, 9, 16, 23, 27] {
                for d in 0..12usize {
                    let mut dst = [0x55u8; 6];
                    let before = bits(&dst);
                    let s = BitPtr::from_slice(&SRC);
                    let t = BitPtr::from_mut_slice(&mut dst);
                    let end = unsafe { copy(s + a, s + a + len, t + d) };
                    assert_eq!(end - t, (d + len) as isize);
                    let after = bits(&dst);
                    for i in 0..48 {
                        let expect = if (d..d + len).contains(&i) {
                            src_bits[a + i - d]
                        } else {
                            before[i]
                        };
                        assert_eq!(after[i], expect, "copy {a}+{len} -> {d}, bit {i}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_overlapping_shifts() {
        let model = bits(&SRC);
        for a in 0..16usize {
            for d in 0..16usize {
                let len = 30;
                let mut words = SRC;
                let p = BitPtr::from_mut_slice(&mut words);
                unsafe {
                    if d <= a {
                        copy(p + a, p + a + len, p + d);
                    } else {
                        copy_backward(p + a, p + a + len, p + d + len);
                    }
                }
                let mut expect = model.clone();
                expect.copy_within(a..a + len, d);
                assert_eq!(bits(&words), expect, "move {a}..{} to {d}", a + len);
            }
        }
    }

    #[test]
    fn test_copy_backward_returns_start() {
        let mut dst = [0u64; 3];
        let words = [u64::MAX; 3];
        let s = BitPtr::from_slice(&words);
        let t = BitPtr::from_mut_slice(&mut dst);
        let start = unsafe { copy_backward(s + 3, s + 150, t + 180) };
        assert_eq!(start - t, 33);
        assert_eq!(dst[0], !0u64 << 33);
        assert_eq!(dst[1], u64::MAX);
        assert_eq!(dst[2], (1 << 52) - 1);
    }
}
