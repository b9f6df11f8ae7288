//! Sampling functions for SHMWW: fixed-weight words and permutations.

use rand::seq::{index, SliceRandom};
use rand::{CryptoRng, RngCore};
use shmww_algorithms::BinaryVector;

use crate::error::{Error as SignError, Result};

/// Samples a word of length `len` and Hamming weight exactly `weight`,
/// uniformly among all such words.
pub fn fixed_weight_word<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    len: usize,
    weight: usize,
) -> Result<BinaryVector> {
    if weight > len {
        return Err(SignError::Sampling(format!(
            "weight {} exceeds length {}",
            weight, len
        )));
    }
    let mut v = BinaryVector::zero(len);
    for i in index::sample(rng, len, weight).iter() {
        v.set(i, true);
    }
    Ok(v)
}

/// Samples a uniform permutation of `0..dim` as an index map.
pub fn random_permutation<R: RngCore + CryptoRng + ?Sized>(rng: &mut R, dim: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..dim).collect();
    perm.shuffle(rng);
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn fixed_weight_is_exact() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for (len, weight) in [(890, 31), (4096, 531), (8, 8), (5, 0)] {
            let v = fixed_weight_word(&mut rng, len, weight).unwrap();
            assert_eq!(v.len(), len);
            assert_eq!(v.weight(), weight);
        }
    }

    #[test]
    fn overweight_is_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(matches!(
            fixed_weight_word(&mut rng, 4, 5),
            Err(SignError::Sampling(_))
        ));
    }

    #[test]
    fn permutation_is_a_bijection() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let mut perm = random_permutation(&mut rng, 1000);
        assert_ne!(perm, (0..1000).collect::<Vec<_>>());
        perm.sort_unstable();
        assert_eq!(perm, (0..1000).collect::<Vec<_>>());
    }
}
