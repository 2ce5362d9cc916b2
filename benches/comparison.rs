//! Benchmark comparison between `smol_bitvec` and bitvec

use bitvec::prelude::*;
use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use smol_bitvec::{Bits, BitsMut, BitVec as SmolBitVec};

// Sizes on both sides of the inline capacity
const SIZES: &[usize] = &[10, 100, 1000, 10000];

fn build(size: usize, every: usize) -> (SmolBitVec, BitVec<usize, Lsb0>) {
    let mut smol: SmolBitVec = SmolBitVec::with_len(size, false);
    let mut bv = BitVec::<usize, Lsb0>::repeat(false, size);
    for i in (0..size).step_by(every) {
        smol.set(i, true);
        bv.set(i, true);
    }
    (smol, bv)
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("smol_bitvec", size), &size, |b, &size| {
            b.iter(|| {
                let mut bits: SmolBitVec = SmolBitVec::new();
                for i in 0..size {
                    bits.push(i % 3 == 0);
                }
                black_box(bits);
            });
        });

        group.bench_with_input(BenchmarkId::new("bitvec", size), &size, |b, &size| {
            b.iter(|| {
                let mut bits = BitVec::<usize, Lsb0>::new();
                for i in 0..size {
                    bits.push(i % 3 == 0);
                }
                black_box(bits);
            });
        });
    }

    group.finish();
}

fn bench_test_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("test_bit");

    for &size in SIZES {
        group.throughput(Throughput::Elements(1000));
        let (smol, bv) = build(size, 3);
        let indices: Vec<usize> = (0..1000).map(|i| i * 7 % size).collect();

        group.bench_with_input(BenchmarkId::new("smol_bitvec", size), &indices, |b, indices| {
            b.iter(|| indices.iter().filter(|&&i| smol.test(i)).count());
        });

        group.bench_with_input(BenchmarkId::new("bitvec", size), &indices, |b, indices| {
            b.iter(|| indices.iter().filter(|&&i| bv[i]).count());
        });
    }

    group.finish();
}

fn bench_iter_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter_ones");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size.div_ceil(10) as u64));
        let (smol, bv) = build(size, 10);

        group.bench_with_input(BenchmarkId::new("smol_bitvec", size), &smol, |b, bits| {
            b.iter(|| black_box(bits.ones().sum::<usize>()));
        });

        group.bench_with_input(BenchmarkId::new("bitvec", size), &bv, |b, bits| {
            b.iter(|| black_box(bits.iter_ones().sum::<usize>()));
        });
    }

    group.finish();
}

fn bench_count_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_ones");

    for &size in SIZES {
        let (smol, bv) = build(size, 2);

        group.bench_with_input(BenchmarkId::new("smol_bitvec", size), &smol, |b, bits| {
            b.iter(|| black_box(bits.count_ones_in(1..)));
        });

        group.bench_with_input(BenchmarkId::new("bitvec", size), &bv, |b, bits| {
            b.iter(|| black_box(bits[1..].count_ones()));
        });
    }

    group.finish();
}

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_left");

    for &size in SIZES {
        let (mut smol, mut bv) = build(size, 5);
        let by = size / 3 + 1;

        group.bench_function(BenchmarkId::new("smol_bitvec", size), |b| {
            b.iter(|| {
                smol.rotate_left(by);
                black_box(&smol);
            });
        });

        group.bench_function(BenchmarkId::new("bitvec", size), |b| {
            b.iter(|| {
                bv.rotate_left(by % size);
                black_box(&bv);
            });
        });
    }

    group.finish();
}

fn bench_xor(c: &mut Criterion) {
    let mut group = c.benchmark_group("xor_assign");

    for &size in SIZES {
        let (mut smol_a, mut bv_a) = build(size, 2);
        let (smol_b, bv_b) = build(size, 3);

        group.bench_function(BenchmarkId::new("smol_bitvec", size), |b| {
            b.iter(|| {
                smol_a.xor_assign(&smol_b);
                black_box(&smol_a);
            });
        });

        group.bench_function(BenchmarkId::new("bitvec", size), |b| {
            b.iter(|| {
                bv_a ^= &bv_b;
                black_box(&bv_a);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push,
    bench_test_bit,
    bench_iter_ones,
    bench_count_ones,
    bench_rotate,
    bench_xor,
);
criterion_main!(benches);
