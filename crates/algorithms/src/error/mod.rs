//! Error handling for the GF(2) primitives

use std::fmt;

use shmww_api::Error as CoreError;

/// The error type for the GF(2) primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A square matrix has no inverse over GF(2)
    Singular,

    /// Operand shapes are incompatible
    Dimension {
        /// Operation that was attempted
        operation: &'static str,
        /// Shape (rows, cols) of the left operand
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand
        right: (usize, usize),
    },

    /// Serialized bits are malformed or truncated
    Format {
        /// What was being decoded
        context: &'static str,
        /// Details about the failure
        details: String,
    },
}

impl Error {
    /// Shorthand to create a Dimension error
    pub fn dimension(operation: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        Error::Dimension {
            operation,
            left,
            right,
        }
    }

    /// Shorthand to create a Format error
    pub fn format(context: &'static str, details: impl Into<String>) -> Self {
        Error::Format {
            context,
            details: details.into(),
        }
    }
}

/// Result type for GF(2) operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Singular => write!(f, "matrix is singular over GF(2)"),
            Error::Dimension {
                operation,
                left,
                right,
            } => write!(
                f,
                "dimension mismatch in {}: {}x{} vs {}x{}",
                operation, left.0, left.1, right.0, right.1
            ),
            Error::Format { context, details } => write!(f, "malformed {}: {}", context, details),
        }
    }
}

impl std::error::Error for Error {}

// Implement conversion to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Singular => CoreError::Singular,
            Error::Dimension {
                operation,
                left,
                right,
            } => CoreError::DimensionMismatch {
                operation,
                left,
                right,
            },
            Error::Format { context, details } => CoreError::Format {
                context,
                message: details,
            },
        }
    }
}

// Include the validation submodule
pub mod validate;

#[cfg(test)]
mod tests;
