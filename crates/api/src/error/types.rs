//! Error type definitions for the cryptanalysis workspace

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Primary error type shared by every crate of the workspace
#[derive(Debug, Error)]
pub enum Error {
    /// The requested parameter-set identifier does not name a known instance
    #[error("unknown parameter set {id}: expected 1 (PARA-1, 80-bit) or 2 (PARA-2, 128-bit)")]
    UnknownParameterSet {
        /// Identifier that was requested
        id: u32,
    },

    /// A parameter set is structurally invalid
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending field
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A file could not be opened, read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Serialized data is malformed or shorter than expected
    #[error("malformed {context}: {message}")]
    Format {
        /// What was being decoded
        context: &'static str,
        /// Details of the failure
        message: String,
    },

    /// Operand shapes are incompatible
    #[error("dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Operation that was attempted
        operation: &'static str,
        /// Shape (rows, cols) of the left operand
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand
        right: (usize, usize),
    },

    /// A square matrix has no inverse over GF(2)
    #[error("matrix is singular over GF(2)")]
    Singular,

    /// The recovery search ran out of budget before every row was found
    #[error("recovery exhausted after {attempts} attempts: {recovered}/{total} rows recovered")]
    RecoveryExhausted {
        /// Number of submatrices tried
        attempts: u64,
        /// Rows of the secret key recovered so far
        recovered: usize,
        /// Rows of the secret key in total
        total: usize,
    },

    /// The statistical guess selected more columns than fit in an information set
    #[error("{guessed} guessed columns exceed the information-set size {capacity}")]
    SeedTooLarge {
        /// Number of guessed columns
        guessed: usize,
        /// Size n - k of an information set
        capacity: usize,
    },

    /// A signature failed verification
    #[error("signature verification failed: {0}")]
    Verification(String),
}

/// Result type for every fallible operation of the workspace
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create a `Format` error
    pub fn format(context: &'static str, message: impl Into<String>) -> Self {
        Error::Format {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `InvalidParameter` error
    pub fn param(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Prefix the message of a `Format` error with the file it came from;
    /// other errors are returned unchanged
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            Error::Format { context, message } => Error::Format {
                context,
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        }
    }

    /// Returns true for the outcomes the randomized search treats as retryable
    pub fn is_singular(&self) -> bool {
        matches!(self, Error::Singular)
    }
}
