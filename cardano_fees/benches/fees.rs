#[macro_use]
extern crate criterion;

use cardano_fees::{
    amount::sum_lovelace,
    fees,
    min_utxo::{self, OutputSize, BASE_ADDRESS_BYTES},
    params::MAIN_NETWORK,
    Lovelace,
};
use criterion::{black_box, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("min_fee", |b| {
        b.iter(|| fees::min_fee(black_box(&MAIN_NETWORK), black_box(350)))
    });

    c.bench_function("estimate_fee", |b| {
        b.iter(|| fees::estimate_fee(black_box(&MAIN_NETWORK), black_box(4), black_box(3), true))
    });

    let out = OutputSize::ada_only(BASE_ADDRESS_BYTES)
        .with_tokens(4, 20, 320)
        .with_datum_hash();
    c.bench_function("min_utxo", |b| {
        b.iter(|| min_utxo::min_utxo(black_box(&MAIN_NETWORK), black_box(&out)))
    });

    let amounts: Vec<Lovelace> = (0..1_000u64).map(Lovelace::from_u64).collect();
    c.bench_function("sum_lovelace", |b| {
        b.iter(|| sum_lovelace(black_box(amounts.iter().copied())))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
