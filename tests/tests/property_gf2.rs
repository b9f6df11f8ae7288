//! Property-based tests for the GF(2) primitives and the distinguisher

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shmww_algorithms::{invert, solve, BinaryMatrix, BinaryVector, Error, GaussWorkspace};
use shmww_cryptanalysis::{guess_columns, WeightAccumulator};

fn random_matrix(rows: usize, cols: usize, seed: u64) -> BinaryMatrix {
    BinaryMatrix::random(rows, cols, &mut ChaCha20Rng::seed_from_u64(seed))
}

fn random_vector(len: usize, seed: u64) -> BinaryVector {
    random_matrix(1, len, seed).row(0)
}

proptest! {
    #[test]
    fn inverse_multiplies_to_identity(dim in 1usize..100, seed in any::<u64>()) {
        let m = random_matrix(dim, dim, seed);
        if let Ok(inv) = invert(&m) {
            prop_assert_eq!(m.mul(&inv).unwrap(), BinaryMatrix::identity(dim));
        }
    }

    #[test]
    fn solve_agrees_with_invert(dim in 1usize..100, seed in any::<u64>()) {
        let a = random_matrix(dim, dim, seed);
        let b = random_vector(dim, seed.wrapping_add(1));
        match (invert(&a), solve(&a, &b)) {
            (Ok(_), Ok(x)) => prop_assert_eq!(a.mul_vec(&x).unwrap(), b),
            (Err(Error::Singular), Err(Error::Singular)) => {}
            (l, r) => prop_assert!(false, "invert {:?} vs solve {:?}", l.is_ok(), r.is_ok()),
        }
    }

    #[test]
    fn singular_is_reported_every_time(dim in 2usize..80, seed in any::<u64>(), dup in any::<prop::sample::Index>()) {
        let mut m = random_matrix(dim, dim, seed);
        let src = dup.index(dim - 1);
        let copy = m.row(src);
        m.set_row(dim - 1, &copy).unwrap();

        let mut ws = GaussWorkspace::new(dim);
        for _ in 0..3 {
            prop_assert_eq!(invert(&m).unwrap_err(), Error::Singular);
            prop_assert_eq!(ws.invert(&m).unwrap_err(), Error::Singular);
        }
    }

    #[test]
    fn column_weight_matches_materialised_column(
        rows in 1usize..150,
        cols in 1usize..150,
        seed in any::<u64>(),
    ) {
        let m = random_matrix(rows, cols, seed);
        for j in 0..cols {
            prop_assert_eq!(m.column_weight(j), m.column(j).weight());
        }
    }

    #[test]
    fn transpose_reverses_products(n in 1usize..70, k in 1usize..70, p in 1usize..70, seed in any::<u64>()) {
        let a = random_matrix(n, k, seed);
        let b = random_matrix(k, p, seed ^ 0xff);
        let ab = a.mul(&b).unwrap();
        prop_assert_eq!(ab.transpose(), b.transpose().mul(&a.transpose()).unwrap());
    }

    #[test]
    fn no_signal_means_no_guess(n in 1usize..5000, threshold in 1u64..10_000) {
        let weights = WeightAccumulator::new(n);
        prop_assert_eq!(guess_columns(&weights, threshold).count(), 0);
    }
}
