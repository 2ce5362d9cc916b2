//! The word-level algorithms on raw buffers and through the containers

use smol_bitvec::{
    BitPtr, BitSet, BitVec, Bits, BitsMut,
    algo::{self, BinaryOp},
};

fn show(words: &[u16]) -> String {
    words.iter().rev().map(|w| format!("{w:016b}")).collect::<Vec<_>>().join("_")
}

fn main() {
    println!("=== Raw ranges ===\n");

    let src = [0b1011_0000_1111_0110u16, 0b0000_0000_1111_1111];
    let mut dst = [0u16; 3];
    let s = BitPtr::from_slice(&src);
    let d = BitPtr::from_mut_slice(&mut dst);
    // SAFETY: both ranges lie inside their buffers
    unsafe {
        algo::copy(s + 2, s + 26, d + 7);
        println!("copy 24 bits from offset 2 to 7: {}", show(&dst));
        println!("ranges equal: {}", algo::equal(s + 2, s + 26, d + 7));

        let d = BitPtr::from_mut_slice(&mut dst);
        algo::transform(s, s + 32, d, d, BinaryOp::Xor);
        println!("xor with the source:             {}", show(&dst));

        let d = BitPtr::from_mut_slice(&mut dst);
        println!("ones in the result: {}", algo::count(d, d + 48, true));
        println!("first one at: {}", algo::find(d, d + 48, true) - d);

        algo::reverse(d, d + 48);
        println!("reversed:                        {}", show(&dst));
    }

    println!("\n=== Containers ===\n");

    let mut bits: BitVec = "1100_1010_0011".parse().unwrap();
    println!("start:          {bits}");
    bits.shift_left(3);
    println!("shift_left(3):  {bits}");
    let back = bits.rotate(5);
    println!("rotate(5):      {bits} (old bit 0 now at {back})");
    bits.reverse();
    println!("reverse:        {bits}");
    bits.retain(|i| i % 3 != 0);
    println!("retain i%3!=0:  {bits}");

    let pattern: BitVec = "11".parse().unwrap();
    let hits: Vec<usize> = (0..bits.len())
        .filter(|&i| bits.search_from(&pattern, i) == Some(i))
        .collect();
    println!("\"11\" occurs at {hits:?}");

    println!("\n=== Permutations ===\n");

    // Every way to place two ones in five positions
    let mut set = BitSet::<u8, 5, 1>::new();
    set.fill_range(3.., true);
    loop {
        println!("  {set}");
        if !set.next_permutation() {
            break;
        }
    }
}
