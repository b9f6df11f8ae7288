//! Public API traits and types for the SHMWW cryptanalysis workspace
//!
//! This crate provides the surface shared by every member of the workspace:
//! the primary error type, the signature-scheme trait implemented by the
//! simulator, and the index-sampling capability injected into the recovery
//! engine.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};

// Re-export all traits from the traits module
pub use traits::{IndexSampler, RngSampler, Signature};

// Re-export trait modules for direct access
pub use traits::{sampler, signature};
