//! SHMWW code-based signature scheme (simulator)
//!
//! SHMWW is a code-based signature whose secret key `E` is a `k' x n`
//! binary matrix built from `l` blocks, each carrying a `k' x k'` identity
//! part and `n' - k'` random columns, hidden behind a random row and column
//! permutation. The public key is a random parity-check matrix `H` together
//! with the syndromes `S = H * E^T`.
//!
//! A signature is `(z, c, commitment)` with `z = c * E + e` for a weight
//! `w1` challenge `c` and a weight `w2` masking word `e`. Because the
//! identity columns of `E` are sparse, they show up in `z` noticeably less
//! often than the random columns, which is what the cryptanalysis exploits.
//!
//! Submodules:
//! - `sampling.rs`: fixed-weight words and random permutations.
//! - `sign.rs`: `keypair_internal`, `sign_internal` and `verify_internal`.
//! - `encoding.rs`: the plain-text token files for keys and corpora.

use core::fmt;

use rand::{CryptoRng, RngCore};
use shmww_algorithms::{BinaryMatrix, BinaryVector};
use shmww_api::{Error as ApiError, Result as ApiResult, Signature as SignatureTrait};
use shmww_params::ParameterSet;
use zeroize::{Zeroize, ZeroizeOnDrop};

mod sampling;
mod sign;

pub mod encoding;

pub use encoding::SampleFiles;
pub use sampling::{fixed_weight_word, random_permutation};

/// SHMWW public key `(H, S)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShmwwPublicKey {
    h: BinaryMatrix,
    s: BinaryMatrix,
}

impl ShmwwPublicKey {
    /// Assemble a public key, checking the shapes against `params`.
    pub fn from_parts(params: &ParameterSet, h: BinaryMatrix, s: BinaryMatrix) -> ApiResult<Self> {
        let rows = params.syndrome_len();
        expect_shape("public key H", h.shape(), (rows, params.n))?;
        expect_shape("public key S", s.shape(), (rows, params.k_prime))?;
        Ok(Self { h, s })
    }

    /// Parity-check matrix, `(n - k) x n`
    pub fn h(&self) -> &BinaryMatrix {
        &self.h
    }

    /// Syndrome table, `(n - k) x k'`
    pub fn s(&self) -> &BinaryMatrix {
        &self.s
    }
}

/// SHMWW secret key `E`, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ShmwwSecretKey {
    e: BinaryMatrix,
}

impl ShmwwSecretKey {
    /// Wrap a `k' x n` matrix, checking its shape against `params`.
    pub fn from_matrix(params: &ParameterSet, e: BinaryMatrix) -> ApiResult<Self> {
        expect_shape("secret key E", e.shape(), (params.k_prime, params.n))?;
        Ok(Self { e })
    }

    /// The secret matrix `E`
    pub fn e(&self) -> &BinaryMatrix {
        &self.e
    }
}

impl fmt::Debug for ShmwwSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShmwwSecretKey({}x{}, redacted)", self.e.rows(), self.e.cols())
    }
}

/// SHMWW signature `(z, c, commitment)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShmwwSignature {
    z: BinaryVector,
    c: BinaryVector,
    commitment: BinaryVector,
}

impl ShmwwSignature {
    /// Response, length `n`
    pub fn z(&self) -> &BinaryVector {
        &self.z
    }

    /// Challenge, length `k'` and weight `w1`
    pub fn c(&self) -> &BinaryVector {
        &self.c
    }

    /// Commitment `H * e`, length `n - k`
    pub fn commitment(&self) -> &BinaryVector {
        &self.commitment
    }

    /// Drop everything but the response
    pub fn into_response(self) -> BinaryVector {
        self.z
    }
}

fn expect_shape(what: &'static str, got: (usize, usize), expected: (usize, usize)) -> ApiResult<()> {
    if got != expected {
        return Err(ApiError::DimensionMismatch {
            operation: what,
            left: got,
            right: expected,
        });
    }
    Ok(())
}

/// SHMWW instance bound to one parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shmww {
    params: ParameterSet,
}

impl Shmww {
    /// Scheme instance for a validated parameter set
    pub fn new(params: ParameterSet) -> ApiResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameter set of this instance
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }
}

impl SignatureTrait for Shmww {
    type PublicKey = ShmwwPublicKey;
    type SecretKey = ShmwwSecretKey;
    type SignatureData = ShmwwSignature;

    fn name(&self) -> &'static str {
        self.params.name()
    }

    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        let (h, s, e) = sign::keypair_internal(&self.params, rng).map_err(ApiError::from)?;
        Ok((ShmwwPublicKey { h, s }, ShmwwSecretKey { e }))
    }

    fn sign<R: CryptoRng + RngCore>(
        &self,
        public_key: &Self::PublicKey,
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> ApiResult<Self::SignatureData> {
        let (z, c, commitment) =
            sign::sign_internal(&self.params, &public_key.h, &secret_key.e, rng)
                .map_err(ApiError::from)?;
        Ok(ShmwwSignature { z, c, commitment })
    }

    fn verify(&self, signature: &Self::SignatureData, public_key: &Self::PublicKey) -> ApiResult<()> {
        sign::verify_internal(
            &self.params,
            &public_key.h,
            &public_key.s,
            &signature.z,
            &signature.c,
            &signature.commitment,
        )
        .map_err(ApiError::from)
    }
}
