use argon2id_core::{argon2id, ParamsBuilder};

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_argon2id(c: &mut Criterion) {
    let owasp = ParamsBuilder::new()
        .mem_kib(19 * 1024)
        .time_cost(2)
        .parallelism(1)
        .tag_len(32)
        .build();

    c.bench_function("argon2id OWASP baseline (19 MiB, t=2, p=1)", |b| {
        b.iter(|| {
            argon2id(
                black_box(b"correct horse battery staple"),
                black_box(b"a random salt!!!"),
                black_box(&owasp),
            )
        })
    });

    let four_lanes = ParamsBuilder::new()
        .mem_kib(64 * 1024)
        .time_cost(3)
        .parallelism(4)
        .tag_len(32)
        .build();

    c.bench_function("argon2id 64 MiB, t=3, p=4", |b| {
        b.iter(|| {
            argon2id(
                black_box(b"correct horse battery staple"),
                black_box(b"a random salt!!!"),
                black_box(&four_lanes),
            )
        })
    });
}

criterion_group!(benches, bench_argon2id);
criterion_main!(benches);
