//! Dense bit vectors over GF(2)
//!
//! Bits are packed little-endian into `u64` words: bit `i` lives in word
//! `i / 64` at position `i % 64`. Bits past `len` in the last word are
//! always zero, so weights can be computed with `count_ones` directly.

use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{validate, Result};

pub(crate) const WORD_BITS: usize = 64;

/// Number of words needed to hold `bits` bits
#[inline(always)]
pub(crate) const fn words_for(bits: usize) -> usize {
    (bits + WORD_BITS - 1) / WORD_BITS
}

/// Mask of the valid bits in the last word of a `bits`-bit row
#[inline(always)]
pub(crate) const fn tail_mask(bits: usize) -> u64 {
    match bits % WORD_BITS {
        0 => u64::MAX,
        r => (1u64 << r) - 1,
    }
}

#[inline(always)]
pub(crate) fn xor_words(dst: &mut [u64], src: &[u64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}

/// A dense vector over GF(2)
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct BinaryVector {
    len: usize,
    words: Vec<u64>,
}

impl BinaryVector {
    /// All-zero vector of `len` bits
    pub fn zero(len: usize) -> Self {
        Self {
            len,
            words: vec![0; words_for(len)],
        }
    }

    /// Build a vector from 0/1 values; any non-zero value counts as 1
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut v = Self::zero(bits.len());
        for (i, &b) in bits.iter().enumerate() {
            if b != 0 {
                v.set(i, true);
            }
        }
        v
    }

    /// Vector of length `len` with ones exactly at `indices`
    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut v = Self::zero(len);
        for &i in indices {
            v.set(i, true);
        }
        v
    }

    pub(crate) fn from_words(len: usize, mut words: Vec<u64>) -> Self {
        debug_assert_eq!(words.len(), words_for(len));
        if let Some(last) = words.last_mut() {
            *last &= tail_mask(len);
        }
        Self { len, words }
    }

    /// Number of bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the zero-length vector
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at position `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {} out of range for length {}", i, self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Set the bit at position `i`
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "bit index {} out of range for length {}", i, self.len);
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    /// Flip the bit at position `i`
    #[inline]
    pub fn toggle(&mut self, i: usize) {
        assert!(i < self.len, "bit index {} out of range for length {}", i, self.len);
        self.words[i / WORD_BITS] ^= 1u64 << (i % WORD_BITS);
    }

    /// Hamming weight
    pub fn weight(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Reset every bit to zero
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// `self += other` over GF(2)
    pub fn xor_assign(&mut self, other: &Self) -> Result<()> {
        validate::length("xor_assign", other.len, self.len)?;
        xor_words(&mut self.words, &other.words);
        Ok(())
    }

    /// Parity of the bitwise AND, i.e. the GF(2) inner product
    pub fn dot(&self, other: &Self) -> Result<bool> {
        validate::length("dot", other.len, self.len)?;
        Ok(dot_words(&self.words, &other.words))
    }

    /// Iterate over the positions of the set bits in increasing order
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones::new(&self.words)
    }

    /// Positions of the set bits
    pub fn ones(&self) -> Vec<usize> {
        self.iter_ones().collect()
    }

    #[inline]
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

#[inline(always)]
pub(crate) fn dot_words(a: &[u64], b: &[u64]) -> bool {
    let mut acc = 0u64;
    for (x, y) in a.iter().zip(b) {
        acc ^= x & y;
    }
    acc.count_ones() & 1 == 1
}

impl ConstantTimeEq for BinaryVector {
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.len != other.len {
            return Choice::from(0);
        }
        self.words.as_slice().ct_eq(other.words.as_slice())
    }
}

impl fmt::Display for BinaryVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.len {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.get(i) as u8)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for BinaryVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryVector(len={}, ones={:?})", self.len, self.ones())
    }
}

/// Iterator over set-bit positions of a packed word slice
pub struct Ones<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl<'a> Ones<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.index * WORD_BITS + bit);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}
