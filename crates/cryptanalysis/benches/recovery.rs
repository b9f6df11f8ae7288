//! Benchmarks for the key-recovery stages on a reduced instance.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shmww_api::{RngSampler, Signature};
use shmww_cryptanalysis::{
    guess_columns, ColumnGuess, CorpusSource, IsdRecovery, RecoveryConfig, WeightAccumulator,
};
use shmww_params::ParameterSet;
use shmww_sign::Shmww;

const SIGNATURES: u64 = 300;

fn bench_recovery(c: &mut Criterion) {
    let params = ParameterSet::new(192, 32, 96, 2, 96, 81, 3, 8, 16).unwrap();
    let scheme = Shmww::new(params).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let (pk, sk) = scheme.keypair(&mut rng).unwrap();

    let mut weights = WeightAccumulator::new(params.n);
    for _ in 0..SIGNATURES {
        weights
            .accumulate(scheme.sign(&pk, &sk, &mut rng).unwrap().z())
            .unwrap();
    }
    let guess = guess_columns(&weights, CorpusSource::Simulated.threshold(&params, SIGNATURES));
    let engine = IsdRecovery::new(&params, &pk, RecoveryConfig::default()).unwrap();

    let mut group = c.benchmark_group("isd_recovery");
    group.sample_size(10);

    group.bench_function("seeded", |b| {
        let mut sampler = RngSampler::new(ChaCha20Rng::seed_from_u64(1));
        b.iter(|| black_box(engine.recover(&guess, &mut sampler).unwrap()));
    });

    group.bench_function("pure_isd", |b| {
        let mut sampler = RngSampler::new(ChaCha20Rng::seed_from_u64(2));
        let empty = ColumnGuess::empty(params.n);
        b.iter(|| black_box(engine.recover(&empty, &mut sampler).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_recovery);
criterion_main!(benches);
