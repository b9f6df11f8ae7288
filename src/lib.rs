//! # shmww
//!
//! Key-recovery cryptanalysis of the SHMWW code-based signature scheme.
//!
//! Published responses of SHMWW are biased towards the random columns of
//! the secret key. Counting how often each column is set over a corpus of
//! signatures exposes most of them; an information-set-decoding search
//! over GF(2) that keeps those columns in every information set then
//! recovers the secret key row by row.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`api`]: shared error type and traits
//! - [`params`]: the PARA-1 and PARA-2 parameter sets
//! - [`algorithms`]: dense GF(2) vectors and matrices, Gauss–Jordan elimination
//! - [`sign`]: the SHMWW scheme simulator and its text encoding
//! - [`cryptanalysis`]: the column distinguisher, the ISD engine and attack drivers
//!
//! ## Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use shmww::prelude::*;
//!
//! # fn main() -> shmww::api::Result<()> {
//! let campaign = SimulatedCampaign::new(PARA_1, 1000, 1, RecoveryConfig::default())?;
//! let report = campaign.run(&mut ChaCha20Rng::seed_from_u64(0))?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use shmww_algorithms as algorithms;
pub use shmww_api as api;
pub use shmww_cryptanalysis as cryptanalysis;
pub use shmww_params as params;
pub use shmww_sign as sign;

/// Common imports for shmww users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{IndexSampler, RngSampler, Signature};

    pub use crate::algorithms::{BinaryMatrix, BinaryVector};
    pub use crate::params::{ParameterSet, PARA_1, PARA_2};
    pub use crate::sign::{Shmww, ShmwwPublicKey, ShmwwSecretKey, ShmwwSignature};

    pub use crate::cryptanalysis::{
        guess_columns, CorpusSource, IsdRecovery, RecoveryConfig, SimulatedCampaign, StoredAttack,
        WeightAccumulator,
    };
}
