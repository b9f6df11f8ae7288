//! Core key generation, signing and verification for SHMWW.

use log::debug;
use rand::{CryptoRng, Rng, RngCore};
use shmww_algorithms::{BinaryMatrix, BinaryVector};
use shmww_params::ParameterSet;
use subtle::ConstantTimeEq;

use super::sampling::{fixed_weight_word, random_permutation};
use crate::error::{Error as SignError, Result};

const ALGORITHM: &str = "SHMWW";

/// Key material produced by [`keypair_internal`]: `(H, S, E)`.
pub(crate) type RawKeyPair = (BinaryMatrix, BinaryMatrix, BinaryMatrix);

/// Generates `(H, S, E)`.
///
/// `E` starts as `l` blocks of `n'` columns, each holding a `k' x k'`
/// identity followed by `n' - k'` uniformly random columns; columns past
/// `l * n'` stay zero. Rows and columns are then shuffled and `S = H * E^T`.
pub(crate) fn keypair_internal<R: RngCore + CryptoRng + ?Sized>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<RawKeyPair> {
    params
        .validate()
        .map_err(|e| SignError::InvalidParameter(e.to_string()))?;
    let (n, kp, np) = (params.n, params.k_prime, params.n_prime);

    let h = BinaryMatrix::random(params.syndrome_len(), n, rng);

    let mut e = BinaryMatrix::zero(kp, n);
    for block in 0..params.l {
        let base = block * np;
        for row in 0..kp {
            e.set(row, base + row, true);
            for col in base + kp..base + np {
                if rng.gen::<bool>() {
                    e.set(row, col, true);
                }
            }
        }
    }

    let row_perm = random_permutation(rng, kp);
    let col_perm = random_permutation(rng, n);
    let e = e.permute_rows(&row_perm)?.permute_columns(&col_perm)?;

    let s = h.mul(&e.transpose())?;
    debug!(
        "{} key pair generated: H {}x{}, S {}x{}, E weight {}",
        params.name(),
        h.rows(),
        h.cols(),
        s.rows(),
        s.cols(),
        e.weight()
    );
    Ok((h, s, e))
}

/// Produces `(z, c, commitment)`.
///
/// The challenge `c` has weight `w1` over `k'`, the masking word `e` weight
/// `w2` over `n`; the commitment is `H * e` and the response `z = c * E + e`.
pub(crate) fn sign_internal<R: RngCore + CryptoRng + ?Sized>(
    params: &ParameterSet,
    h: &BinaryMatrix,
    e: &BinaryMatrix,
    rng: &mut R,
) -> Result<(BinaryVector, BinaryVector, BinaryVector)> {
    let c = fixed_weight_word(rng, params.k_prime, params.w1)?;
    let mask = fixed_weight_word(rng, params.n, params.w2)?;
    let commitment = h.mul_vec(&mask)?;
    let mut z = e.vec_mul(&c)?;
    z.xor_assign(&mask)?;
    Ok((z, c, commitment))
}

/// Accepts iff `wt(z) <= dGV` and `H * z + S * c == commitment`.
pub(crate) fn verify_internal(
    params: &ParameterSet,
    h: &BinaryMatrix,
    s: &BinaryMatrix,
    z: &BinaryVector,
    c: &BinaryVector,
    commitment: &BinaryVector,
) -> Result<()> {
    let weight = z.weight();
    if weight > params.d_gv {
        return Err(SignError::Verification {
            algorithm: ALGORITHM,
            details: format!("response weight {} exceeds {}", weight, params.d_gv),
        });
    }
    if commitment.len() != params.syndrome_len() {
        return Err(SignError::Verification {
            algorithm: ALGORITHM,
            details: format!(
                "commitment has {} bits, expected {}",
                commitment.len(),
                params.syndrome_len()
            ),
        });
    }

    let mut recomputed = h.mul_vec(z)?;
    recomputed.xor_assign(&s.mul_vec(c)?)?;
    if !bool::from(recomputed.ct_eq(commitment)) {
        return Err(SignError::Verification {
            algorithm: ALGORITHM,
            details: "inconsistent committed value".into(),
        });
    }
    Ok(())
}
