//! Constant values and parameter sets for the SHMWW cryptanalysis workspace
//!
//! Only the post-quantum family is populated: the SHMWW code-based
//! signature scheme and its two published instances.

#![forbid(unsafe_code)]

pub mod pqc;

pub use pqc::shmww::{ParameterSet, PARA_1, PARA_2};
