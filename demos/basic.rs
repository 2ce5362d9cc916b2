//! Basic usage of `BitVec`

use smol_bitvec::{BitVec, Bits, BitsMut};

fn main() {
    println!("=== BitVec Basic Usage ===\n");

    let mut bits: BitVec = BitVec::with_len(40, false);
    println!("Created {} bits", bits.len());
    println!("Capacity: {} bits", bits.capacity());
    println!("Is using heap storage? {}\n", bits.is_heap());

    for i in [5, 10, 15, 39] {
        bits.set(i, true);
    }
    println!("Set bits at positions: 5, 10, 15, 39");
    println!("As text (highest first): {bits}");
    println!("Number of set bits: {}\n", bits.count_ones());

    println!("Checking individual bits:");
    for i in [0, 5, 10, 20, 39] {
        println!("  Bit {i}: {}", if bits[i] { "set" } else { "unset" });
    }
    println!("  Bit 400: {:?}", bits.at(400));

    print!("\nSet positions: ");
    for i in bits.ones() {
        print!("{i} ");
    }
    println!("\n");

    println!("Growing to 300 bits (moves to the heap)");
    bits.resize(300, false);
    bits.set(250, true);
    println!("Is using heap storage? {}", bits.is_heap());
    println!("New capacity: {} bits\n", bits.capacity());

    println!("Flipping bits 5 and 25");
    bits.flip(5);
    bits.flip(25);
    println!("Set positions: {:?}", bits.ones().collect::<Vec<_>>());
    println!("First set bit: {:?}", bits.find_first(true));
    println!("Last set bit: {:?}", bits.find_last(true));
    println!("First clear bit: {:?}\n", bits.find_first_zero());

    println!("Inserting a set bit at the front");
    bits.insert(0, true);
    println!("Set positions: {:?}", bits.ones().collect::<Vec<_>>());

    let needle: BitVec = "101".parse().unwrap();
    let mut hay: BitVec = "0110_1011".parse().unwrap();
    println!("\nSearching {needle} in {hay}: {:?}", hay.search(&needle));
    hay.rotate_left(3);
    println!("After rotating left by 3: {hay}");

    println!("\nTruncating to 50 bits and shrinking");
    bits.truncate(50);
    bits.shrink_to_fit();
    println!("Is using heap storage? {}", bits.is_heap());
    println!("{bits:?}");

    bits.clear();
    println!("Is empty? {}", bits.is_empty());
}
