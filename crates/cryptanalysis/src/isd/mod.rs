//! Information-set-decoding recovery of the secret key
//!
//! Every row `E_r` of the secret key satisfies `H * E_r^T = S_r`, where
//! `S_r` is column `r` of the syndrome table. If the support of `E_r` lies
//! inside a set `I` of `n - k` columns whose submatrix `H_I` is invertible,
//! then `H_I^-1 * S_r` is exactly `E_r` restricted to `I`, a word of small
//! weight. Otherwise the solution looks random and has weight about
//! `(n - k) / 2`. The search therefore draws information sets, keeps the
//! guessed columns fixed in each of them, and accepts every pending row
//! whose solution has weight at most `l (n' - k')`.
//!
//! The submatrix is held transposed: row `i` of the working matrix is
//! column `indices[i]` of `H`, so filling it is a word-wise row copy, and
//! row `r` of `(H_I^-1 * S)^T` is `S_r^T * (H_I^T)^-1`.

use std::time::{Duration, Instant};

use log::{debug, info, trace};
use shmww_algorithms::{BinaryMatrix, BinaryVector, Error as AlgoError, GaussWorkspace};
use shmww_api::{Error, IndexSampler, Result};
use shmww_params::ParameterSet;
use shmww_sign::ShmwwPublicKey;

use crate::distinguisher::ColumnGuess;

mod state;

pub use state::RecoveryState;

/// Default bound on the number of information sets tried
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Budget of a recovery run, checked between attempts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryConfig {
    /// Maximum number of information sets to try, `None` for no bound
    pub max_attempts: Option<u64>,
    /// Wall-clock budget, `None` for no bound
    pub deadline: Option<Duration>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            deadline: None,
        }
    }
}

impl RecoveryConfig {
    /// No bound at all: the run ends only once every row is recovered
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            deadline: None,
        }
    }

    /// Replace the attempt bound
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Add a wall-clock bound
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Counters of one recovery run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    /// Information sets tried
    pub attempts: u64,
    /// Attempts whose submatrix was singular
    pub singular: u64,
    /// Random indices drawn, rejected duplicates included
    pub random_draws: u64,
    /// Rows of the secret key recovered
    pub rows_recovered: usize,
    /// Size of the fixed prefix
    pub guessed_columns: usize,
    /// Time spent drawing indices
    pub sampling_time: Duration,
    /// Time spent inverting and extracting rows
    pub inversion_time: Duration,
}

/// Result of a successful recovery
#[derive(Clone, Debug)]
pub struct Recovery {
    /// The recovered `k' x n` secret key
    pub secret_key: BinaryMatrix,
    /// Counters of the run
    pub stats: RecoveryStats,
}

/// ISD recovery engine bound to one public key
#[derive(Clone, Debug)]
pub struct IsdRecovery {
    params: ParameterSet,
    h_columns: BinaryMatrix,
    s_columns: Vec<BinaryVector>,
    config: RecoveryConfig,
}

impl IsdRecovery {
    /// Prepare a recovery against `pk`
    pub fn new(params: &ParameterSet, pk: &ShmwwPublicKey, config: RecoveryConfig) -> Result<Self> {
        params.validate()?;
        let rows = params.syndrome_len();
        for (operation, shape, expected) in [
            ("recovery H", pk.h().shape(), (rows, params.n)),
            ("recovery S", pk.s().shape(), (rows, params.k_prime)),
        ] {
            if shape != expected {
                return Err(Error::DimensionMismatch {
                    operation,
                    left: shape,
                    right: expected,
                });
            }
        }

        let s_t = pk.s().transpose();
        Ok(Self {
            params: *params,
            h_columns: pk.h().transpose(),
            s_columns: (0..s_t.rows()).map(|r| s_t.row(r)).collect(),
            config,
        })
    }

    /// The budget of this engine
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Recover the secret key, keeping the guessed columns in every
    /// information set
    ///
    /// Fails with [`Error::SeedTooLarge`] when the guess has more than
    /// `n - k` columns and with [`Error::RecoveryExhausted`] once the budget
    /// is spent. When the guess fills the whole information set there is
    /// nothing to sample, so a single unproductive attempt exhausts the run.
    pub fn recover<S: IndexSampler + ?Sized>(
        &self,
        guess: &ColumnGuess,
        sampler: &mut S,
    ) -> Result<Recovery> {
        let (secret_key, stats) = self.search(guess, sampler);
        Ok(Recovery {
            secret_key: secret_key?,
            stats,
        })
    }

    /// Same as [`recover`](Self::recover), but the counters of the run are
    /// returned whether or not the key was found
    pub fn search<S: IndexSampler + ?Sized>(
        &self,
        guess: &ColumnGuess,
        sampler: &mut S,
    ) -> (Result<BinaryMatrix>, RecoveryStats) {
        let mut state = match RecoveryState::new(&self.params, guess) {
            Ok(state) => state,
            Err(e) => return (Err(e), RecoveryStats::default()),
        };
        let mut stats = RecoveryStats {
            guessed_columns: state.fixed_len(),
            ..RecoveryStats::default()
        };
        let outcome = self.run(&mut state, &mut stats, sampler);
        stats.rows_recovered = state.recovered_rows();
        (outcome.map(|()| state.into_secret_key()), stats)
    }

    fn run<S: IndexSampler + ?Sized>(
        &self,
        state: &mut RecoveryState,
        stats: &mut RecoveryStats,
        sampler: &mut S,
    ) -> Result<()> {
        let dim = self.params.syndrome_len();
        let fixed = state.fixed_len();
        let max_weight = self.params.max_row_weight();
        let total = state.total_rows();

        let mut sub = BinaryMatrix::zero(dim, dim);
        for (slot, &col) in state.indices()[..fixed].iter().enumerate() {
            sub.copy_row_from(slot, &self.h_columns, col)?;
        }
        let mut workspace = GaussWorkspace::new(dim);
        let mut solution = BinaryVector::zero(dim);
        let mut pending = Vec::with_capacity(total);

        info!(
            "{}: recovering {} rows with {} guessed columns out of {}, max row weight {}",
            self.params.name(),
            total,
            fixed,
            dim,
            max_weight
        );

        let start = Instant::now();
        while !state.is_complete() {
            self.check_budget(stats, state, start, fixed == dim)?;

            let t = Instant::now();
            stats.random_draws += state.sample_suffix(sampler);
            stats.sampling_time += t.elapsed();
            stats.attempts += 1;

            let t = Instant::now();
            for slot in fixed..dim {
                sub.copy_row_from(slot, &self.h_columns, state.indices()[slot])?;
            }
            match workspace.invert(&sub) {
                Ok(inverse) => {
                    pending.clear();
                    pending.extend(state.pending_rows());
                    for &row in &pending {
                        inverse.vec_mul_into(&self.s_columns[row], &mut solution)?;
                        if state.accept(row, &solution, max_weight) {
                            debug!(
                                "row {} recovered at attempt {}: {}/{}",
                                row,
                                stats.attempts,
                                state.recovered_rows(),
                                total
                            );
                        }
                    }
                }
                Err(AlgoError::Singular) => {
                    stats.singular += 1;
                    trace!("attempt {}: singular submatrix", stats.attempts);
                }
                Err(e) => return Err(e.into()),
            }
            stats.inversion_time += t.elapsed();
        }

        info!(
            "{}: secret key recovered after {} attempts ({} singular, {} draws)",
            self.params.name(),
            stats.attempts,
            stats.singular,
            stats.random_draws
        );
        Ok(())
    }

    fn check_budget(
        &self,
        stats: &RecoveryStats,
        state: &RecoveryState,
        start: Instant,
        deterministic: bool,
    ) -> Result<()> {
        let spent = (deterministic && stats.attempts > 0)
            || self.config.max_attempts.map_or(false, |max| stats.attempts >= max)
            || self.config.deadline.map_or(false, |d| start.elapsed() >= d);
        if spent {
            info!(
                "{}: recovery budget spent after {} attempts, {}/{} rows",
                self.params.name(),
                stats.attempts,
                state.recovered_rows(),
                state.total_rows()
            );
            return Err(Error::RecoveryExhausted {
                attempts: stats.attempts,
                recovered: state.recovered_rows(),
                total: state.total_rows(),
            });
        }
        Ok(())
    }
}
