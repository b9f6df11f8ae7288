//! Shared fixtures for the SHMWW integration tests
//!
//! The published parameter sets are far too large for a test run, so the
//! tests use a reduced instance with the same block structure: two blocks
//! of 96 columns with an 81-dimensional identity part each. Its
//! information sets have 160 columns, large enough that a wrong row is
//! never accepted, and a full recovery takes a few thousand attempts at
//! most.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shmww_api::Signature;
use shmww_cryptanalysis::WeightAccumulator;
use shmww_params::ParameterSet;
use shmww_sign::{Shmww, ShmwwPublicKey, ShmwwSecretKey, ShmwwSignature};

/// Signatures needed for a clean guess on the toy instance
pub const TOY_SIGNATURES: u64 = 300;

/// Attempt budget that the toy instance never comes close to
pub const TOY_MAX_ATTEMPTS: u64 = 200_000;

/// The reduced instance used throughout the tests
pub fn toy_params() -> ParameterSet {
    ParameterSet::new(192, 32, 96, 2, 96, 81, 3, 8, 16).expect("toy parameters are valid")
}

/// Deterministic generator for reproducible tests
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// A toy key pair together with its scheme
pub struct Fixture {
    pub params: ParameterSet,
    pub scheme: Shmww,
    pub pk: ShmwwPublicKey,
    pub sk: ShmwwSecretKey,
}

impl Fixture {
    /// Fresh key pair drawn from `rng`
    pub fn new(rng: &mut ChaCha20Rng) -> Self {
        let params = toy_params();
        let scheme = Shmww::new(params).expect("valid toy scheme");
        let (pk, sk) = scheme.keypair(rng).expect("toy key generation");
        Self {
            params,
            scheme,
            pk,
            sk,
        }
    }

    /// `count` fresh signatures, each checked against the public key
    pub fn signatures(&self, count: u64, rng: &mut ChaCha20Rng) -> Vec<ShmwwSignature> {
        (0..count)
            .map(|_| {
                let sig = self.scheme.sign(&self.pk, &self.sk, rng).expect("signing");
                self.scheme.verify(&sig, &self.pk).expect("fresh signature verifies");
                sig
            })
            .collect()
    }

    /// Column counts of `count` fresh signatures
    pub fn accumulate(&self, count: u64, rng: &mut ChaCha20Rng) -> WeightAccumulator {
        let mut weights = WeightAccumulator::new(self.params.n);
        for sig in self.signatures(count, rng) {
            weights.accumulate(sig.z()).expect("response length");
        }
        weights
    }
}

/// Empty scratch directory private to one test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shmww-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch directory");
    dir
}
