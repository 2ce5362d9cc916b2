//! The bulk algorithms against a `Vec<bool>` model, for every combination
//! of operand offsets inside a word.

use smol_bitvec::{
    BitPtr,
    algo::{self, BinaryOp},
};

const LENS: [usize; 8] = [0, 1, 5, 7, 8, 9, 17, 40];
const WORDS: usize = 8;

/// Deterministic bit pattern.
fn pattern(seed: u32, n: usize) -> Vec<bool> {
    let mut x = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x & 1 == 1
        })
        .collect()
}

fn pack(bits: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, &b) in bits.iter().enumerate() {
        if b {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

fn unpack(words: &[u8]) -> Vec<bool> {
    (0..words.len() * 8)
        .map(|i| words[i / 8] >> (i % 8) & 1 == 1)
        .collect()
}

#[test]
fn test_copy_all_offsets() {
    for s_off in 0..8 {
        for d_off in 0..8 {
            for &n in &LENS {
                let src_bits = pattern(s_off as u32 * 31 + n as u32, WORDS * 8);
                let dst_bits = pattern(d_off as u32 * 17 + 5, WORDS * 8);
                let src = pack(&src_bits);
                let mut dst = pack(&dst_bits);

                let s = BitPtr::from_slice(&src);
                let d = BitPtr::from_mut_slice(&mut dst);
                let end = unsafe { algo::copy(s + s_off, s + s_off + n, d + d_off) };
                assert_eq!(end - d, (d_off + n) as isize);

                let mut model = dst_bits.clone();
                model[d_off..d_off + n].copy_from_slice(&src_bits[s_off..s_off + n]);
                assert_eq!(unpack(&dst), model, "s_off={s_off} d_off={d_off} n={n}");

                assert!(unsafe { algo::equal(s + s_off, s + s_off + n, d + d_off) });
            }
        }
    }
}

#[test]
fn test_overlapping_moves_match_copy_within() {
    let bits = pattern(99, WORDS * 8);
    for from in 0..12 {
        for to in 0..12 {
            for &n in &LENS {
                let mut words = pack(&bits);
                let p = BitPtr::from_mut_slice(&mut words);
                unsafe {
                    if to <= from {
                        algo::copy(p + from, p + from + n, p + to);
                    } else {
                        algo::copy_backward(p + from, p + from + n, p + to + n);
                    }
                }
                let mut model = bits.clone();
                model.copy_within(from..from + n, to);
                assert_eq!(unpack(&words), model, "from={from} to={to} n={n}");
            }
        }
    }
}

#[test]
fn test_transform_all_offsets() {
    let ops = [BinaryOp::And, BinaryOp::Or, BinaryOp::Xor, BinaryOp::AndNot];
    for a_off in 0..8 {
        for b_off in 0..8 {
            for d_off in 0..8 {
                for &n in &LENS {
                    for op in ops {
                        let a_bits = pattern(a_off as u32 + 100 * n as u32, WORDS * 8);
                        let b_bits = pattern(b_off as u32 + 7, WORDS * 8);
                        let d_bits = pattern(d_off as u32 + 3, WORDS * 8);
                        let (a, b) = (pack(&a_bits), pack(&b_bits));
                        let mut d = pack(&d_bits);

                        let pa = BitPtr::from_slice(&a);
                        let pb = BitPtr::from_slice(&b);
                        let pd = BitPtr::from_mut_slice(&mut d);
                        unsafe { algo::transform(pa + a_off, pa + a_off + n, pb + b_off, pd + d_off, op) };

                        let mut model = d_bits.clone();
                        for i in 0..n {
                            let (x, y) = (a_bits[a_off + i], b_bits[b_off + i]);
                            model[d_off + i] = match op {
                                BinaryOp::And => x & y,
                                BinaryOp::Or => x | y,
                                BinaryOp::Xor => x ^ y,
                                BinaryOp::AndNot => x & !y,
                            };
                        }
                        assert_eq!(
                            unpack(&d),
                            model,
                            "{op:?} a_off={a_off} b_off={b_off} d_off={d_off} n={n}"
                        );

                        let any = unsafe { algo::any_of(pa + a_off, pa + a_off + n, pb + b_off, op) };
                        assert_eq!(any, model[d_off..d_off + n].iter().any(|&x| x));
                    }
                }
            }
        }
    }
}

#[test]
fn test_transform_in_place() {
    let a_bits = pattern(1, 200);
    let b_bits = pattern(2, 200);
    let b = pack(&b_bits);
    for off in 0..8 {
        let mut a = pack(&a_bits);
        let pa = BitPtr::from_mut_slice(&mut a);
        let pb = BitPtr::from_slice(&b);
        unsafe { algo::transform(pa + off, pa + off + 150, pb + off, pa + off, BinaryOp::Xor) };
        let mut model = a_bits.clone();
        for i in off..off + 150 {
            model[i] ^= b_bits[i];
        }
        assert_eq!(unpack(&a), model);
    }
}

#[test]
fn test_swap_ranges_all_offsets() {
    for a_off in 0..8 {
        for b_off in 0..8 {
            for &n in &LENS {
                let a_bits = pattern(a_off as u32 + 11, WORDS * 8);
                let b_bits = pattern(b_off as u32 + 13 + n as u32, WORDS * 8);
                let (mut a, mut b) = (pack(&a_bits), pack(&b_bits));
                let pa = BitPtr::from_mut_slice(&mut a);
                let pb = BitPtr::from_mut_slice(&mut b);
                unsafe { algo::swap_ranges(pa + a_off, pa + a_off + n, pb + b_off) };

                let (mut ma, mut mb) = (a_bits.clone(), b_bits.clone());
                ma[a_off..a_off + n].copy_from_slice(&b_bits[b_off..b_off + n]);
                mb[b_off..b_off + n].copy_from_slice(&a_bits[a_off..a_off + n]);
                assert_eq!(unpack(&a), ma, "a_off={a_off} b_off={b_off} n={n}");
                assert_eq!(unpack(&b), mb, "a_off={a_off} b_off={b_off} n={n}");
            }
        }
    }
}

#[test]
fn test_equal_detects_single_flip() {
    let bits = pattern(5, 128);
    let a = pack(&bits);
    for off in 0..8 {
        for flip in [0usize, 3, 8, 30, 63] {
            let mut shifted = vec![false; off];
            shifted.extend_from_slice(&bits[..100]);
            shifted[off + flip] ^= true;
            let b = pack(&shifted);
            let pa = BitPtr::from_slice(&a);
            let pb = BitPtr::from_slice(&b);
            assert!(unsafe { algo::equal(pa, pa + flip, pb + off) });
            assert!(!unsafe { algo::equal(pa, pa + 100, pb + off) });
        }
    }
}

#[test]
fn test_fill_flip_count_find() {
    for first in 0..16 {
        for &n in &LENS {
            let bits = pattern(first as u32 + 40, WORDS * 8);
            let mut w = pack(&bits);
            let p = BitPtr::from_mut_slice(&mut w);
            let (f, l) = (p + first, p + first + n);

            let ones = bits[first..first + n].iter().filter(|&&b| b).count();
            assert_eq!(unsafe { algo::count(f, l, true) }, ones);
            assert_eq!(unsafe { algo::count(f, l, false) }, n - ones);

            let hit = unsafe { algo::find(f, l, true) } - f;
            let model = bits[first..first + n].iter().position(|&b| b).unwrap_or(n);
            assert_eq!(hit, model as isize);

            let last = unsafe { algo::find_last(f, l, false) } - f;
            let model = bits[first..first + n].iter().rposition(|&b| !b).unwrap_or(n);
            assert_eq!(last, model as isize);

            unsafe { algo::flip(f, l) };
            let mut model = bits.clone();
            for b in &mut model[first..first + n] {
                *b = !*b;
            }
            assert_eq!(unpack(&w), model);

            let p = BitPtr::from_mut_slice(&mut w);
            unsafe { algo::fill(p + first, p + first + n, true) };
            for b in &mut model[first..first + n] {
                *b = true;
            }
            assert_eq!(unpack(&w), model);
        }
    }
}

#[test]
fn test_reverse_and_rotate_all_offsets() {
    for first in 0..8 {
        for &n in &[0usize, 1, 2, 9, 16, 33, 50] {
            let bits = pattern(first as u32 * 3 + n as u32, WORDS * 8);

            let mut w = pack(&bits);
            let p = BitPtr::from_mut_slice(&mut w);
            unsafe { algo::reverse(p + first, p + first + n) };
            let mut model = bits.clone();
            model[first..first + n].reverse();
            assert_eq!(unpack(&w), model, "reverse first={first} n={n}");

            for mid in 0..=n {
                let mut w = pack(&bits);
                let p = BitPtr::from_mut_slice(&mut w);
                let r = unsafe { algo::rotate(p + first, p + first + mid, p + first + n) };
                let mut model = bits.clone();
                model[first..first + n].rotate_left(mid);
                assert_eq!(unpack(&w), model, "rotate first={first} mid={mid} n={n}");
                assert_eq!(r - p, (first + n - mid) as isize);

                // rotating back by the returned point restores the input
                let back = r - p;
                let p = BitPtr::from_mut_slice(&mut w);
                unsafe { algo::rotate(p + first, p + back as usize, p + first + n) };
                assert_eq!(unpack(&w), bits);
            }
        }
    }
}

#[test]
fn test_rotate_long_ranges_use_block_swaps() {
    let bits = pattern(77, 2048);
    for (first, mid, last) in [(3, 900, 2001), (0, 1024, 2048), (5, 1500, 1600), (1, 700, 701)] {
        let mut w = pack(&bits);
        let p = BitPtr::from_mut_slice(&mut w);
        unsafe { algo::rotate(p + first, p + mid, p + last) };
        let mut model = bits.clone();
        model[first..last].rotate_left(mid - first);
        assert_eq!(unpack(&w), model, "first={first} mid={mid} last={last}");
    }
}

#[test]
fn test_search_against_model() {
    let hay_bits = pattern(123, 512);
    let hay = pack(&hay_bits);
    for k in [1usize, 2, 7, 8, 9, 15, 16, 17, 30] {
        for start in [0usize, 13, 100, 300] {
            let needle_bits = hay_bits[start..start + k].to_vec();
            for n_off in [0usize, 3] {
                let mut padded = vec![true; n_off];
                padded.extend_from_slice(&needle_bits);
                let needle = pack(&padded);
                for h_off in [0usize, 5] {
                    let h = BitPtr::from_slice(&hay);
                    let s = BitPtr::from_slice(&needle);
                    let found = unsafe { algo::search(h + h_off, h + 512, s + n_off, s + n_off + k) };
                    let model = hay_bits[h_off..]
                        .windows(k)
                        .position(|w| w == needle_bits.as_slice())
                        .unwrap_or(512 - h_off);
                    assert_eq!(found - (h + h_off), model as isize, "k={k} start={start}");
                }
            }
        }
    }
}

#[test]
fn test_permutations_enumerate_in_order() {
    // four ones in ten positions, bit 0 most significant
    let mut w = [0b11_1100_0000u16];
    let p = BitPtr::from_mut_slice(&mut w);
    let read = |w: &[u16; 1]| (0..10).map(|i| w[0] >> i & 1 == 1).collect::<Vec<_>>();
    let mut seen = vec![read(&w)];
    while unsafe { algo::next_permutation(p, p + 10) } {
        let cur = read(&w);
        assert!(seen.last().is_some_and(|prev| *prev < cur));
        seen.push(cur);
    }
    assert_eq!(seen.len(), 210);
    assert_eq!(read(&w), seen[0]);

    while unsafe { algo::prev_permutation(p, p + 10) } {}
    assert_eq!(read(&w), seen[seen.len() - 1]);
}
