//! Dense matrices over GF(2)
//!
//! Rows are stored contiguously, each packed into `stride` little-endian
//! `u64` words with the unused tail bits kept at zero. Row operations are
//! therefore word-wise XORs, which is what both the elimination and the
//! matrix product are built on.

use core::fmt;

use rand::RngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use super::binary_vector::{dot_words, tail_mask, words_for, xor_words, BinaryVector, Ones, WORD_BITS};
use crate::error::{validate, Error, Result};

/// A dense matrix over GF(2)
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    stride: usize,
    data: Vec<u64>,
}

impl BinaryMatrix {
    /// All-zero `rows x cols` matrix
    pub fn zero(rows: usize, cols: usize) -> Self {
        let stride = words_for(cols);
        Self {
            rows,
            cols,
            stride,
            data: vec![0; rows * stride],
        }
    }

    /// `dim x dim` identity matrix
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zero(dim, dim);
        m.set_identity();
        m
    }

    /// Uniformly random `rows x cols` matrix
    pub fn random<R: RngCore + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let mut m = Self::zero(rows, cols);
        let mask = tail_mask(cols);
        let stride = m.stride;
        for row in m.data.chunks_exact_mut(stride.max(1)).take(rows) {
            for word in row.iter_mut() {
                *word = rng.next_u64();
            }
            if let Some(last) = row.last_mut() {
                *last &= mask;
            }
        }
        m
    }

    /// Stack equally long vectors as rows
    pub fn from_rows(rows: &[BinaryVector]) -> Result<Self> {
        let cols = rows.first().map_or(0, BinaryVector::len);
        let mut m = Self::zero(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            validate::length("from_rows", row.len(), cols)?;
            m.row_words_mut(i).copy_from_slice(row.words());
        }
        Ok(m)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when rows == cols
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline(always)]
    fn check(&self, row: usize, col: usize) {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
    }

    /// Entry at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.check(row, col);
        (self.data[row * self.stride + col / WORD_BITS] >> (col % WORD_BITS)) & 1 == 1
    }

    /// Set the entry at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.check(row, col);
        let word = &mut self.data[row * self.stride + col / WORD_BITS];
        let mask = 1u64 << (col % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Flip the entry at `(row, col)`
    #[inline]
    pub fn toggle(&mut self, row: usize, col: usize) {
        self.check(row, col);
        self.data[row * self.stride + col / WORD_BITS] ^= 1u64 << (col % WORD_BITS);
    }

    /// Reset every entry to zero
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|w| *w = 0);
    }

    /// Overwrite with the identity; the matrix must be square
    pub(crate) fn set_identity(&mut self) {
        debug_assert!(self.is_square());
        self.clear();
        for i in 0..self.rows {
            self.data[i * self.stride + i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
        }
    }

    /// Overwrite with the contents of a matrix of identical shape
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        validate::compatible("copy_from", self.shape(), other.shape(), self.shape() == other.shape())?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    #[inline]
    pub(crate) fn row_words(&self, row: usize) -> &[u64] {
        &self.data[row * self.stride..(row + 1) * self.stride]
    }

    #[inline]
    pub(crate) fn row_words_mut(&mut self, row: usize) -> &mut [u64] {
        &mut self.data[row * self.stride..(row + 1) * self.stride]
    }

    /// Copy of row `row`
    pub fn row(&self, row: usize) -> BinaryVector {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        BinaryVector::from_words(self.cols, self.row_words(row).to_vec())
    }

    /// Overwrite row `row` with `value`
    pub fn set_row(&mut self, row: usize, value: &BinaryVector) -> Result<()> {
        validate::length("set_row", value.len(), self.cols)?;
        self.row_words_mut(row).copy_from_slice(value.words());
        Ok(())
    }

    /// Overwrite row `dst` with row `src` of `other`, which must have as many columns
    pub fn copy_row_from(&mut self, dst: usize, other: &Self, src: usize) -> Result<()> {
        validate::compatible("copy_row_from", self.shape(), other.shape(), self.cols == other.cols)?;
        self.row_words_mut(dst).copy_from_slice(other.row_words(src));
        Ok(())
    }

    /// Positions of the ones in row `row`
    pub fn row_ones(&self, row: usize) -> Ones<'_> {
        Ones::new(self.row_words(row))
    }

    /// Hamming weight of row `row`
    pub fn row_weight(&self, row: usize) -> usize {
        self.row_words(row).iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Hamming weight of column `col`, read in place
    pub fn column_weight(&self, col: usize) -> usize {
        assert!(col < self.cols, "column {} out of range for {} columns", col, self.cols);
        let word = col / WORD_BITS;
        let shift = col % WORD_BITS;
        (0..self.rows)
            .filter(|&r| (self.data[r * self.stride + word] >> shift) & 1 == 1)
            .count()
    }

    /// Copy of column `col`
    pub fn column(&self, col: usize) -> BinaryVector {
        let mut v = BinaryVector::zero(self.rows);
        for r in 0..self.rows {
            if self.get(r, col) {
                v.set(r, true);
            }
        }
        v
    }

    /// Total Hamming weight
    pub fn weight(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Exchange two rows
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let s = self.stride;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * s);
        head[lo * s..(lo + 1) * s].swap_with_slice(&mut tail[..s]);
    }

    /// `row[dst] += row[src]`
    pub fn xor_row(&mut self, dst: usize, src: usize) {
        self.xor_row_from(dst, src, 0);
    }

    /// `row[dst] += row[src]` restricted to words `from_word..`
    #[inline]
    pub(crate) fn xor_row_from(&mut self, dst: usize, src: usize, from_word: usize) {
        assert!(dst != src, "cannot add a row to itself");
        let s = self.stride;
        if dst < src {
            let (head, tail) = self.data.split_at_mut(src * s);
            xor_words(&mut head[dst * s + from_word..(dst + 1) * s], &tail[from_word..s]);
        } else {
            let (head, tail) = self.data.split_at_mut(dst * s);
            xor_words(&mut tail[from_word..s], &head[src * s + from_word..(src + 1) * s]);
        }
    }

    /// Transpose
    pub fn transpose(&self) -> Self {
        let mut t = Self::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in self.row_ones(r) {
                t.data[c * t.stride + r / WORD_BITS] |= 1u64 << (r % WORD_BITS);
            }
        }
        t
    }

    /// Matrix product `self * rhs`
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        let mut out = Self::zero(self.rows, rhs.cols);
        self.mul_into(rhs, &mut out)?;
        Ok(out)
    }

    /// Matrix product written into a preallocated `out`
    pub fn mul_into(&self, rhs: &Self, out: &mut Self) -> Result<()> {
        validate::compatible("mul", self.shape(), rhs.shape(), self.cols == rhs.rows)?;
        validate::compatible(
            "mul output",
            out.shape(),
            (self.rows, rhs.cols),
            out.shape() == (self.rows, rhs.cols),
        )?;
        out.clear();
        for r in 0..self.rows {
            let dst = &mut out.data[r * out.stride..(r + 1) * out.stride];
            for k in Ones::new(&self.data[r * self.stride..(r + 1) * self.stride]) {
                xor_words(dst, rhs.row_words(k));
            }
        }
        Ok(())
    }

    /// Matrix-vector product `self * v`
    pub fn mul_vec(&self, v: &BinaryVector) -> Result<BinaryVector> {
        validate::compatible("mul_vec", self.shape(), (v.len(), 1), self.cols == v.len())?;
        let mut out = BinaryVector::zero(self.rows);
        for r in 0..self.rows {
            if dot_words(self.row_words(r), v.words()) {
                out.set(r, true);
            }
        }
        Ok(out)
    }

    /// Vector-matrix product `v * self`
    pub fn vec_mul(&self, v: &BinaryVector) -> Result<BinaryVector> {
        let mut out = BinaryVector::zero(self.cols);
        self.vec_mul_into(v, &mut out)?;
        Ok(out)
    }

    /// Vector-matrix product written into a preallocated `out`
    pub fn vec_mul_into(&self, v: &BinaryVector, out: &mut BinaryVector) -> Result<()> {
        validate::compatible("vec_mul", (1, v.len()), self.shape(), v.len() == self.rows)?;
        validate::length("vec_mul output", out.len(), self.cols)?;
        out.clear();
        for r in v.iter_ones() {
            xor_words(out.words_mut(), self.row_words(r));
        }
        Ok(())
    }

    /// Reorder rows: row `i` of the result is row `perm[i]` of `self`
    pub fn permute_rows(&self, perm: &[usize]) -> Result<Self> {
        check_permutation("permute_rows", perm, self.rows)?;
        let mut out = Self::zero(self.rows, self.cols);
        for (i, &p) in perm.iter().enumerate() {
            out.row_words_mut(i).copy_from_slice(self.row_words(p));
        }
        Ok(out)
    }

    /// Reorder columns: column `j` of the result is column `perm[j]` of `self`
    pub fn permute_columns(&self, perm: &[usize]) -> Result<Self> {
        check_permutation("permute_columns", perm, self.cols)?;
        let mut out = Self::zero(self.rows, self.cols);
        for r in 0..self.rows {
            for (j, &p) in perm.iter().enumerate() {
                if self.get(r, p) {
                    out.data[r * out.stride + j / WORD_BITS] |= 1u64 << (j % WORD_BITS);
                }
            }
        }
        Ok(out)
    }
}

fn check_permutation(operation: &'static str, perm: &[usize], len: usize) -> Result<()> {
    validate::length(operation, perm.len(), len)?;
    let mut seen = vec![false; len];
    for &p in perm {
        if p >= len || seen[p] {
            return Err(Error::dimension(operation, (perm.len(), 1), (len, 1)));
        }
        seen[p] = true;
    }
    Ok(())
}

impl ConstantTimeEq for BinaryMatrix {
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.shape() != other.shape() {
            return Choice::from(0);
        }
        self.data.as_slice().ct_eq(other.data.as_slice())
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for r in 0..self.rows {
            writeln!(f, "{}", self.row(r))?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryMatrix({}x{}, weight={})", self.rows, self.cols, self.weight())
    }
}
