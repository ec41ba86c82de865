// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Benchmark the operations the vector harness leans on.

use criterion::{criterion_group, criterion_main, Criterion};

use elligator_ref::cofactor::co_scalarmult;
use elligator_ref::constants::CURVE25519;
use elligator_ref::elligator2::{map_to_point, map_to_point_fast};

use num_bigint::RandBigInt;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_ladder(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(40);
    let scalar = rng.gen_biguint(256);

    c.bench_function("montgomery_ladder_25519", move |b| {
        b.iter(|| CURVE25519.mt_base.scalar_mul(&scalar, &CURVE25519))
    });
}

fn bench_co_scalarmult(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(41);
    let scalar = rng.gen_biguint(256);

    c.bench_function("co_scalarmult_25519", move |b| {
        b.iter(|| co_scalarmult(&scalar, 3, &CURVE25519).unwrap())
    });
}

fn bench_elligator_maps(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let r = CURVE25519
        .field
        .element(rng.gen_biguint_below(&CURVE25519.field.p))
        .abs();

    let r_ref = r.clone();
    c.bench_function("elligator_map_reference_25519", move |b| {
        b.iter(|| map_to_point(&r_ref, &CURVE25519))
    });
    c.bench_function("elligator_map_fast_25519", move |b| {
        b.iter(|| map_to_point_fast(&r, &CURVE25519))
    });
}

criterion_group! {
    name = arithmetic_benches;
    config = Criterion::default();
    targets =
        bench_ladder,
        bench_co_scalarmult,
        bench_elligator_maps,
}
criterion_main! {
    arithmetic_benches,
}
