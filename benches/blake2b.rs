use argon2id_core::blake2b::{hash_64, hash_prime};

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_blake2b(c: &mut Criterion) {
    c.bench_function("blake2b 64 bytes", |b| {
        b.iter(|| hash_64(black_box(&[0u8; 64])))
    });

    c.bench_function("blake2b 1 KiB", |b| {
        b.iter(|| hash_64(black_box(&[0u8; 1024])))
    });

    c.bench_function("hash_prime 1024-byte output", |b| {
        b.iter(|| hash_prime(black_box(&[0u8; 72]), 1024))
    });
}

criterion_group!(benches, bench_blake2b);
criterion_main!(benches);
