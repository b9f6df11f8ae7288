//! Benchmarks for the SHMWW simulator: key generation, signing and verification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shmww_api::Signature;
use shmww_params::{PARA_1, PARA_2};
use shmww_sign::Shmww;

fn bench_keypair(c: &mut Criterion) {
    let mut group = c.benchmark_group("shmww_keypair");
    group.sample_size(10);
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    for params in [PARA_1, PARA_2] {
        let scheme = Shmww::new(params).unwrap();
        group.bench_function(params.name(), |b| {
            b.iter(|| black_box(scheme.keypair(&mut rng).unwrap()));
        });
    }

    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("shmww_sign_verify");
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    let scheme = Shmww::new(PARA_1).unwrap();
    let (pk, sk) = scheme.keypair(&mut rng).unwrap();

    group.bench_function("sign", |b| {
        b.iter(|| black_box(scheme.sign(&pk, &sk, &mut rng).unwrap()));
    });

    let sig = scheme.sign(&pk, &sk, &mut rng).unwrap();
    group.bench_function("verify", |b| {
        b.iter(|| scheme.verify(black_box(&sig), &pk).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_keypair, bench_sign_verify);
criterion_main!(benches);
