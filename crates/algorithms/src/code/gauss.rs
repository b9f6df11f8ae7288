//! Gauss–Jordan elimination over GF(2)
//!
//! The pivot for column `c` is the lowest-index row at or below `c` with a
//! one in that column, so results (and singularity) depend only on the input.

use zeroize::Zeroize;

use super::binary_matrix::BinaryMatrix;
use super::binary_vector::{BinaryVector, WORD_BITS};
use crate::error::{validate, Error, Result};

/// Right-hand side carried through the elimination
trait Companion {
    fn swap_rows(&mut self, a: usize, b: usize);
    fn xor_row(&mut self, dst: usize, src: usize);
}

impl Companion for BinaryMatrix {
    #[inline]
    fn swap_rows(&mut self, a: usize, b: usize) {
        BinaryMatrix::swap_rows(self, a, b);
    }

    #[inline]
    fn xor_row(&mut self, dst: usize, src: usize) {
        BinaryMatrix::xor_row(self, dst, src);
    }
}

impl Companion for BinaryVector {
    #[inline]
    fn swap_rows(&mut self, a: usize, b: usize) {
        let (x, y) = (self.get(a), self.get(b));
        self.set(a, y);
        self.set(b, x);
    }

    #[inline]
    fn xor_row(&mut self, dst: usize, src: usize) {
        if self.get(src) {
            self.toggle(dst);
        }
    }
}

/// Reduce `work` to the identity, mirroring every row operation on `rhs`
fn eliminate<C: Companion>(work: &mut BinaryMatrix, rhs: &mut C) -> Result<()> {
    let dim = work.rows();
    for col in 0..dim {
        let pivot = (col..dim).find(|&r| work.get(r, col)).ok_or(Error::Singular)?;
        work.swap_rows(col, pivot);
        rhs.swap_rows(col, pivot);

        // Columns left of `col` are already reduced in the pivot row.
        let from_word = col / WORD_BITS;
        for r in 0..dim {
            if r != col && work.get(r, col) {
                work.xor_row_from(r, col, from_word);
                rhs.xor_row(r, col);
            }
        }
    }
    Ok(())
}

/// Reusable buffers for repeated inversions of one dimension
///
/// The recovery loop inverts a fresh `(n-k) x (n-k)` matrix per attempt;
/// keeping the working copy and the inverse here avoids reallocating them.
#[derive(Clone, Debug)]
pub struct GaussWorkspace {
    work: BinaryMatrix,
    inverse: BinaryMatrix,
}

impl GaussWorkspace {
    /// Workspace for `dim x dim` matrices
    pub fn new(dim: usize) -> Self {
        Self {
            work: BinaryMatrix::zero(dim, dim),
            inverse: BinaryMatrix::identity(dim),
        }
    }

    /// Dimension this workspace was sized for
    pub fn dim(&self) -> usize {
        self.work.rows()
    }

    fn load(&mut self, operation: &'static str, m: &BinaryMatrix) -> Result<()> {
        validate::square(operation, m.shape())?;
        if m.rows() != self.dim() {
            *self = Self::new(m.rows());
        }
        self.work.copy_from(m)
    }

    /// Invert `m`, returning a view of the inverse held by the workspace
    ///
    /// Fails with [`Error::Singular`] when `m` has no inverse and with
    /// [`Error::Dimension`] when it is not square. After a failure the
    /// previous inverse is no longer available.
    pub fn invert(&mut self, m: &BinaryMatrix) -> Result<&BinaryMatrix> {
        self.load("invert", m)?;
        self.inverse.set_identity();
        eliminate(&mut self.work, &mut self.inverse)?;
        Ok(&self.inverse)
    }

    /// Solve `a * x = b` without materialising the inverse
    pub fn solve(&mut self, a: &BinaryMatrix, b: &BinaryVector) -> Result<BinaryVector> {
        validate::length("solve", b.len(), a.rows())?;
        self.load("solve", a)?;
        let mut x = b.clone();
        eliminate(&mut self.work, &mut x)?;
        Ok(x)
    }

    /// The most recent successful inverse
    pub fn inverse(&self) -> &BinaryMatrix {
        &self.inverse
    }
}

impl Drop for GaussWorkspace {
    fn drop(&mut self) {
        self.work.zeroize();
        self.inverse.zeroize();
    }
}

/// Inverse of a square matrix over GF(2)
pub fn invert(m: &BinaryMatrix) -> Result<BinaryMatrix> {
    validate::square("invert", m.shape())?;
    let mut work = m.clone();
    let mut inverse = BinaryMatrix::identity(m.rows());
    eliminate(&mut work, &mut inverse)?;
    Ok(inverse)
}

/// Solve `a * x = b` over GF(2)
///
/// Fails with [`Error::Singular`] exactly when [`invert`] would.
pub fn solve(a: &BinaryMatrix, b: &BinaryVector) -> Result<BinaryVector> {
    validate::square("solve", a.shape())?;
    validate::length("solve", b.len(), a.rows())?;
    let mut work = a.clone();
    let mut x = b.clone();
    eliminate(&mut work, &mut x)?;
    Ok(x)
}
