//! In-progress state of one recovery run

use shmww_algorithms::{BinaryMatrix, BinaryVector};
use shmww_api::{Error, IndexSampler, Result};
use shmww_params::ParameterSet;

use crate::distinguisher::ColumnGuess;

/// Partially recovered secret key and the current information set
///
/// The first `fixed_len()` slots of the index buffer hold the guessed
/// columns and never change; the remaining slots are redrawn by every
/// call to [`sample_suffix`](Self::sample_suffix). A row, once accepted,
/// is never written again.
#[derive(Clone, Debug)]
pub struct RecoveryState {
    guessed: BinaryMatrix,
    recovered: Vec<bool>,
    recovered_count: usize,
    first_pending: usize,
    indices: Vec<usize>,
    fixed: usize,
    taken: Vec<bool>,
}

impl RecoveryState {
    /// Fresh state seeded with the guessed columns
    pub fn new(params: &ParameterSet, guess: &ColumnGuess) -> Result<Self> {
        let capacity = params.syndrome_len();
        if guess.len() != params.n {
            return Err(Error::DimensionMismatch {
                operation: "column guess",
                left: (1, guess.len()),
                right: (1, params.n),
            });
        }
        let prefix = guess.indices();
        if prefix.len() > capacity {
            return Err(Error::SeedTooLarge {
                guessed: prefix.len(),
                capacity,
            });
        }

        let mut taken = vec![false; params.n];
        for &j in &prefix {
            taken[j] = true;
        }
        let fixed = prefix.len();
        let mut indices = prefix;
        indices.resize(capacity, 0);

        Ok(Self {
            guessed: BinaryMatrix::zero(params.k_prime, params.n),
            recovered: vec![false; params.k_prime],
            recovered_count: 0,
            first_pending: 0,
            indices,
            fixed,
            taken,
        })
    }

    /// Redraw the random suffix of the information set
    ///
    /// Indices are drawn uniformly from `[0, n)`; a draw already present in
    /// the buffer is rejected and redrawn. Returns the number of draws,
    /// rejected ones included.
    pub fn sample_suffix<S: IndexSampler + ?Sized>(&mut self, sampler: &mut S) -> u64 {
        for &j in &self.indices[self.fixed..] {
            self.taken[j] = false;
        }
        // unfilled suffix slots hold 0, which may be a guessed column
        for &j in &self.indices[..self.fixed] {
            self.taken[j] = true;
        }

        let n = self.taken.len();
        let mut draws = 0u64;
        let mut slot = self.fixed;
        while slot < self.indices.len() {
            let j = sampler.next_index_below(n);
            draws += 1;
            if !self.taken[j] {
                self.taken[j] = true;
                self.indices[slot] = j;
                slot += 1;
            }
        }
        draws
    }

    /// Try to accept `column` as row `row` of the secret key
    ///
    /// `column` is the solution of the current information set for that
    /// row: bit `i` set means the key has a one at `indices()[i]`. It is
    /// accepted when its weight is non-zero and at most `max_weight` and
    /// the row is still pending.
    pub fn accept(&mut self, row: usize, column: &BinaryVector, max_weight: usize) -> bool {
        if self.recovered[row] {
            return false;
        }
        let weight = column.weight();
        if weight == 0 || weight > max_weight {
            return false;
        }

        for i in column.iter_ones() {
            self.guessed.set(row, self.indices[i], true);
        }
        self.recovered[row] = true;
        self.recovered_count += 1;
        while self.first_pending < self.recovered.len() && self.recovered[self.first_pending] {
            self.first_pending += 1;
        }
        true
    }

    /// True once every row is recovered
    pub fn is_complete(&self) -> bool {
        self.recovered_count == self.recovered.len()
    }

    /// Number of recovered rows
    pub fn recovered_rows(&self) -> usize {
        self.recovered_count
    }

    /// Number of rows in total
    pub fn total_rows(&self) -> usize {
        self.recovered.len()
    }

    /// Whether row `row` has been recovered
    pub fn is_recovered(&self, row: usize) -> bool {
        self.recovered[row]
    }

    /// Rows still to recover, in increasing order
    pub fn pending_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (self.first_pending..self.recovered.len()).filter(move |&r| !self.recovered[r])
    }

    /// The current information set
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of fixed (guessed) slots
    pub fn fixed_len(&self) -> usize {
        self.fixed
    }

    /// Secret key recovered so far
    pub fn guessed_key(&self) -> &BinaryMatrix {
        &self.guessed
    }

    /// Consume the state, returning the recovered key
    pub fn into_secret_key(self) -> BinaryMatrix {
        self.guessed
    }
}
