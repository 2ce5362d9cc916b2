//! `no_std` style usage: only `core` and `alloc` items
// #![no_std]

extern crate alloc;
use alloc::{vec, vec::Vec};
use smol_bitvec::{BitPtr, BitSet, BitVec, BitView, Bits, BitsMut, algo};

fn main() {
    // Fixed size, no allocation
    let mut set = BitSet::<u32, 48, 2>::new();
    set.set(5, true);
    set.set(47, true);
    core::hint::black_box(set.count_ones());

    // Borrowed words, no allocation
    let mut words = [0u8; 4];
    let mut view = BitView::new(&mut words, 30).unwrap_or_else(|_| unreachable!());
    view.fill_range(3..11, true);
    core::hint::black_box(view.as_words());

    // Dynamic storage uses alloc only once it outgrows the inline buffer
    let bools: Vec<bool> = vec![true, false, true, true];
    let mut bits: BitVec = bools.into_iter().collect();
    bits.resize(1000, false);
    core::hint::black_box(bits.is_heap());

    // The raw algorithms work on any word slice
    let src = [0xF0F0u16; 4];
    let mut dst = [0u16; 5];
    let s = BitPtr::from_slice(&src);
    let d = BitPtr::from_mut_slice(&mut dst);
    // SAFETY: dst holds 80 bits, the copy ends at bit 67
    unsafe { algo::copy(s, s + 64, d + 3) };
    core::hint::black_box(dst);
}
