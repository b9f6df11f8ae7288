//! Signature Schemes
//!
//! This crate implements the SHMWW code-based signature scheme as a
//! simulator: key generation, signing and verification over GF(2), plus the
//! plain-text encodings of keys and signature corpora consumed by the
//! cryptanalysis.

#![forbid(unsafe_code)]

pub mod error;
pub mod pq;

// Re-exports from post-quantum schemes
pub use pq::shmww::{SampleFiles, Shmww, ShmwwPublicKey, ShmwwSecretKey, ShmwwSignature};
