//! Statistical column distinguisher
//!
//! In a response `z = c * E + e` a column of `E` that belongs to an identity
//! block is set only when the challenge hits its single one, while a random
//! column is set about half of the time. Counting how often every column is
//! set over many responses and cutting at a threshold therefore separates
//! the random columns from the identity ones.
//!
//! The guess is only a hint for the recovery search: columns that are
//! misclassified cost attempts, never correctness.

use core::fmt;

use shmww_algorithms::BinaryVector;
use shmww_api::{Error, Result};
use shmww_params::ParameterSet;

/// Per-column counts of ones over a corpus of responses
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightAccumulator {
    counts: Vec<u64>,
    signatures: u64,
}

impl WeightAccumulator {
    /// Zeroed accumulator for responses of length `n`
    pub fn new(n: usize) -> Self {
        Self {
            counts: vec![0; n],
            signatures: 0,
        }
    }

    /// Count the ones of one response
    pub fn accumulate(&mut self, z: &BinaryVector) -> Result<()> {
        if z.len() != self.counts.len() {
            return Err(Error::DimensionMismatch {
                operation: "accumulate",
                left: (1, z.len()),
                right: (1, self.counts.len()),
            });
        }
        for j in z.iter_ones() {
            self.counts[j] += 1;
        }
        self.signatures += 1;
        Ok(())
    }

    /// Forget every response seen so far
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.signatures = 0;
    }

    /// Count for every column
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of responses accumulated
    pub fn signatures(&self) -> u64 {
        self.signatures
    }

    /// Response length
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True for a zero-length accumulator
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Cut-off separating random columns from identity columns
pub trait ThresholdPolicy {
    /// Short name for reports
    fn name(&self) -> &'static str;

    /// Threshold for `nb_signatures` responses, truncated toward zero
    fn threshold(&self, params: &ParameterSet, nb_signatures: u64) -> u64;
}

/// Probability that an identity column is set: `w1/k' + (w2/n)(1 - 2 w1/k')`
fn identity_column_rate(params: &ParameterSet) -> f64 {
    let challenge = params.w1 as f64 / params.k_prime as f64;
    let noise = params.w2 as f64 / params.n as f64;
    challenge + noise * (1.0 - 2.0 * challenge)
}

/// Threshold for corpora read back from storage
///
/// `N * (w1/k' + (w2/n)(1 - 2 w1/k'))`, the expected count of an identity
/// column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoredCorpusThreshold;

impl ThresholdPolicy for StoredCorpusThreshold {
    fn name(&self) -> &'static str {
        "stored"
    }

    fn threshold(&self, params: &ParameterSet, nb_signatures: u64) -> u64 {
        (nb_signatures as f64 * identity_column_rate(params)) as u64
    }
}

/// Threshold for freshly simulated corpora
///
/// Weighs the identity-column rate by the share `k' l / n` of identity
/// columns and adds half the share `(n' - k') l / n` of random columns:
/// `N * ((k' l / n) p + ((n' - k') l / n) / 2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulatedCorpusThreshold;

impl ThresholdPolicy for SimulatedCorpusThreshold {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn threshold(&self, params: &ParameterSet, nb_signatures: u64) -> u64 {
        let n = params.n as f64;
        let l = params.l as f64;
        let identity_share = params.k_prime as f64 * l / n;
        let random_share = (params.n_prime - params.k_prime) as f64 * l / n;
        let rate = identity_share * identity_column_rate(params) + random_share / 2.0;
        (nb_signatures as f64 * rate) as u64
    }
}

/// Where a signature corpus comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorpusSource {
    /// Responses read from a corpus file
    Stored,
    /// Responses produced by the simulator in the same run
    Simulated,
}

impl CorpusSource {
    /// The threshold policy used for this kind of corpus
    pub fn threshold_policy(&self) -> &'static dyn ThresholdPolicy {
        match self {
            CorpusSource::Stored => &StoredCorpusThreshold,
            CorpusSource::Simulated => &SimulatedCorpusThreshold,
        }
    }

    /// Shorthand for `threshold_policy().threshold(..)`
    pub fn threshold(&self, params: &ParameterSet, nb_signatures: u64) -> u64 {
        self.threshold_policy().threshold(params, nb_signatures)
    }
}

/// Columns guessed to be random columns of the secret key
#[derive(Clone, PartialEq, Eq)]
pub struct ColumnGuess {
    columns: BinaryVector,
}

impl ColumnGuess {
    /// Guess marking no column
    pub fn empty(n: usize) -> Self {
        Self {
            columns: BinaryVector::zero(n),
        }
    }

    /// Guess marking exactly `indices`
    pub fn from_indices(n: usize, indices: &[usize]) -> Self {
        Self {
            columns: BinaryVector::from_indices(n, indices),
        }
    }

    /// Number of guessed columns
    pub fn count(&self) -> usize {
        self.columns.weight()
    }

    /// Guessed columns in increasing order
    pub fn indices(&self) -> Vec<usize> {
        self.columns.ones()
    }

    /// Whether column `j` is guessed
    pub fn contains(&self, j: usize) -> bool {
        self.columns.get(j)
    }

    /// Length of the underlying response space
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True for a zero-length guess
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Guess as a characteristic vector
    pub fn as_vector(&self) -> &BinaryVector {
        &self.columns
    }
}

impl fmt::Debug for ColumnGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnGuess({} of {})", self.count(), self.len())
    }
}

/// Mark every column whose count is strictly above `threshold`
pub fn guess_columns(weights: &WeightAccumulator, threshold: u64) -> ColumnGuess {
    let mut columns = BinaryVector::zero(weights.len());
    for (j, &count) in weights.counts().iter().enumerate() {
        if count > threshold {
            columns.set(j, true);
        }
    }
    ColumnGuess { columns }
}
