//! Key-recovery cryptanalysis of SHMWW
//!
//! The attack runs in two stages:
//!
//! 1. [`distinguisher`]: count, over a corpus of signatures, how often each
//!    column of the response is set, and guess the random columns of the
//!    secret key as those counted more often than a threshold.
//! 2. [`isd`]: draw information sets that contain the guessed columns and
//!    read off every secret-key row whose support they cover.
//!
//! [`campaign`] wires both stages to stored or simulated corpora.

#![forbid(unsafe_code)]

pub mod campaign;
pub mod distinguisher;
pub mod isd;

pub use campaign::{AttackOutcome, CampaignReport, RunReport, SimulatedCampaign, StoredAttack};
pub use distinguisher::{
    guess_columns, ColumnGuess, CorpusSource, SimulatedCorpusThreshold, StoredCorpusThreshold,
    ThresholdPolicy, WeightAccumulator,
};
pub use isd::{IsdRecovery, Recovery, RecoveryConfig, RecoveryState, RecoveryStats};
