//! Trait definitions shared across the workspace

pub mod sampler;
pub mod signature;

pub use sampler::{IndexSampler, RngSampler};
pub use signature::Signature;
