use smol_bitvec::{
    BitPtr, BitSet, BitVec, BitView, Bits, BitsMut, Error,
    algo::{self, BinaryOp},
    storage::{INLINE_BITS, PlainStorage},
};

#[test]
fn test_alternating_fifteen_bits() {
    let bits: BitVec = "101010101010101".parse().unwrap();
    assert_eq!(bits.len(), 15);
    assert_eq!(bits.count_ones(), 8);
    assert_eq!(bits.find_first(true), Some(0));
    assert_eq!(bits.find_first_zero(), Some(1));
    assert_eq!(bits.find_last(true), Some(14));

    let needle: BitVec = "101".parse().unwrap();
    assert_eq!(bits.search(&needle), Some(0));
    assert_eq!(bits.search_from(&needle, 1), Some(2));
    assert_eq!(bits.search_from(&needle, 2), Some(2));
    assert_eq!(bits.search_from(&needle, 13), None);
}

#[test]
fn test_sbo_local_then_heap() {
    let mut bits: BitVec = BitVec::with_len(40, false);
    bits.set(39, true);
    assert!(!bits.is_heap());
    assert_eq!(bits.capacity(), INLINE_BITS);

    bits.resize(400, false);
    assert!(bits.is_heap());
    assert_eq!(bits.ones().collect::<Vec<_>>(), [39]);
    assert!(bits.capacity() >= 400);
}

#[test]
fn test_and_at_offsets_matches_normalized() {
    let mut a = [0u64; 3];
    let mut b = [0u64; 3];
    for i in 0..133 {
        if i % 3 != 0 {
            a[i / 64] |= 1 << (i % 64);
        }
        if i % 5 != 1 {
            b[i / 64] |= 1 << (i % 64);
        }
    }

    // a's range starts at bit 3, b's at bit 0
    let pa = BitPtr::from_slice(&a) + 3;
    let pb = BitPtr::from_slice(&b);
    let mut direct = [0u64; 3];
    let pd = BitPtr::from_mut_slice(&mut direct);
    unsafe { algo::transform(pa, pa + 130, pb, pd, BinaryOp::And) };

    let mut normalized = [0u64; 3];
    let pn = BitPtr::from_mut_slice(&mut normalized);
    unsafe {
        algo::copy(pa, pa + 130, pn);
        algo::transform(pn, pn + 130, pb, pn, BinaryOp::And);
    }
    assert_eq!(direct, normalized);
    assert_eq!(direct[2] >> 2, 0);
}

#[test]
fn test_search_needles_around_word_size() {
    let bits_per_word = usize::BITS as usize;
    let mut hay: BitVec = BitVec::with_len(1000, false);
    for i in (0..1000).filter(|i| i % 13 == 0 || i % 7 == 3) {
        hay.set(i, true);
    }
    for k in [1, bits_per_word - 1, bits_per_word, bits_per_word + 1] {
        for start in [0, 5, 317, 1000 - k] {
            let needle = hay.bitslice(start..start + k);
            let found = hay.search(&needle).unwrap_or(usize::MAX);
            assert!(found <= start, "k={k} start={start} found={found}");
            assert!(hay.bitslice(found..found + k) == needle);
        }
    }
}

#[test]
fn test_text_round_trip() {
    let mut bits: BitVec<PlainStorage<u16>> = BitVec::with_len(77, false);
    for i in [0, 1, 15, 16, 17, 40, 76] {
        bits.set(i, true);
    }
    let text = bits.to_string();
    assert_eq!(text.len(), 77);
    assert!(text.starts_with('1'));
    assert_eq!(text.parse::<BitVec<PlainStorage<u16>>>(), Ok(bits.clone()));

    let custom = bits.to_string_with('x', '-');
    let back = BitVec::<PlainStorage<u16>>::from_bit_str_with(&custom, 'x', '-').unwrap();
    assert!(back == bits);

    assert_eq!(
        BitVec::<PlainStorage<u16>>::from_bit_str_with("x-?", 'x', '-').err(),
        Some(Error::InvalidChar { ch: '?', pos: 2 })
    );
}

#[test]
fn test_rotate_is_invertible() {
    let mut bits: BitVec = BitVec::with_len(300, false);
    for i in (0..300).step_by(7) {
        bits.set(i, true);
    }
    let orig = bits.clone();
    for mid in [0, 1, 63, 64, 65, 150, 299, 300] {
        let back = bits.rotate(mid);
        assert_eq!(back, 300 - mid);
        if mid != 0 && mid != 300 {
            assert!(bits.test((300 - mid) % 300));
        }
        bits.rotate(back);
        assert!(bits == orig);
    }
}

#[test]
fn test_containers_interoperate() {
    let mut words = [0usize; 4];
    let mut view = BitView::new(&mut words, 200).unwrap();
    let vec: BitVec = "1111_0000_1111".parse().unwrap();
    view.or_assign(&vec);
    view.shift_left(100);
    assert_eq!(view.ones().collect::<Vec<_>>(), [100, 101, 102, 103, 108, 109, 110, 111]);
    assert!(view.is_disjoint(&vec));
    view.shift_right(100);
    assert!(view.is_superset(&vec));
    assert_eq!(view.count_ones(), vec.count_ones());

    let mut set = BitSet::<usize, 12, 1>::new();
    set.or_assign(&vec);
    assert!(set.bits_eq(&vec));
    assert!(set.is_subset(&vec));
    set.reset(0);
    assert!(set.is_subset(&vec));
    assert!(!vec.is_subset(&set));
    assert!(set.intersects(&vec));
}

#[test]
fn test_insert_erase_against_vec_model() {
    let mut bits: BitVec = BitVec::new();
    let mut model: Vec<bool> = Vec::new();
    let mut x = 0x2545_f491u32;
    for step in 0..2000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let pos = if model.is_empty() { 0 } else { x as usize % (model.len() + 1) };
        match step % 5 {
            0 | 1 => {
                bits.insert(pos, x & 8 != 0);
                model.insert(pos, x & 8 != 0);
            }
            2 => {
                let n = (x >> 8) as usize % 70;
                bits.insert_n(pos, n, true);
                model.splice(pos..pos, core::iter::repeat_n(true, n));
            }
            3 if pos < model.len() => {
                assert_eq!(bits.erase(pos), Ok(model.remove(pos)));
            }
            4 => {
                let end = (pos + (x >> 4) as usize % 90).min(model.len());
                bits.erase_range(pos..end).unwrap();
                model.drain(pos..end);
            }
            _ => {}
        }
        assert_eq!(bits.len(), model.len());
    }
    assert_eq!(bits.iter().collect::<Vec<_>>(), model);
    let rem = bits.len() % usize::BITS as usize;
    if rem != 0
        && let Some(&last) = bits.words().last()
    {
        assert_eq!(last >> rem, 0);
    }
}
