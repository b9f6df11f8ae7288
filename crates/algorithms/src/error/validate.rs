//! Validation utilities for the GF(2) primitives

use super::{Error, Result};

/// Validate that two shapes agree on the contracted dimension
#[inline(always)]
pub fn compatible(
    operation: &'static str,
    left: (usize, usize),
    right: (usize, usize),
    condition: bool,
) -> Result<()> {
    if !condition {
        return Err(Error::dimension(operation, left, right));
    }
    Ok(())
}

/// Validate that a matrix is square
#[inline(always)]
pub fn square(operation: &'static str, shape: (usize, usize)) -> Result<()> {
    compatible(operation, shape, shape, shape.0 == shape.1)
}

/// Validate a vector length
#[inline(always)]
pub fn length(operation: &'static str, actual: usize, expected: usize) -> Result<()> {
    compatible(operation, (actual, 1), (expected, 1), actual == expected)
}
