//! Error types for the signature crate

use core::fmt;

/// Errors that can occur during signature operations
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid parameter
    InvalidParameter(String),

    /// Verification failed
    Verification {
        algorithm: &'static str,
        details: String,
    },

    /// Sampling error
    Sampling(String),

    /// Failure inside a GF(2) primitive
    Algorithm(shmww_algorithms::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::Verification { algorithm, details } => {
                write!(f, "{} verification failed: {}", algorithm, details)
            }
            Error::Sampling(msg) => write!(f, "Sampling error: {}", msg),
            Error::Algorithm(err) => write!(f, "Algorithm error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

// Convert from algorithms::error::Error
impl From<shmww_algorithms::Error> for Error {
    fn from(err: shmww_algorithms::Error) -> Self {
        Error::Algorithm(err)
    }
}

// Convert to api::Error
impl From<Error> for shmww_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidParameter(msg) => shmww_api::Error::param("shmww", msg),
            Error::Verification { algorithm, details } => {
                shmww_api::Error::Verification(format!("{}: {}", algorithm, details))
            }
            Error::Sampling(msg) => shmww_api::Error::param("sampling", msg),
            Error::Algorithm(err) => err.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
