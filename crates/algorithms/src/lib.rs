//! GF(2) primitives for the SHMWW cryptanalysis
//!
//! This crate provides the exact bit-field arithmetic the attack runs on:
//! packed binary vectors and matrices, products, Gauss–Jordan inversion
//! with deterministic pivoting, and a reusable elimination workspace for
//! hot loops that invert many matrices of the same size.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Binary linear algebra
pub mod code;
pub use code::{invert, solve, BinaryMatrix, BinaryVector, GaussWorkspace};
