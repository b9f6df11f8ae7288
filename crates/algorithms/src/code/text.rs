//! Whitespace-separated `0`/`1` token format
//!
//! Matrices are stored row-major. The reader does not care how tokens are
//! split across lines; the writers emit one row per line with single spaces.

use std::io::{self, BufRead, Write};

use super::binary_matrix::BinaryMatrix;
use super::binary_vector::BinaryVector;
use crate::error::{Error, Result};

/// Streaming token reader over any buffered source
pub struct BitReader<R> {
    inner: R,
    line: String,
    pos: usize,
    consumed: u64,
}

impl<R: BufRead> BitReader<R> {
    /// Wrap a buffered reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
            pos: 0,
            consumed: 0,
        }
    }

    /// Number of tokens read so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Next token, or `None` at end of input
    fn next_token(&mut self, context: &'static str) -> Result<Option<bool>> {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if let Some(token) = trimmed.split_whitespace().next() {
                self.pos += token.len();
                self.consumed += 1;
                return match token {
                    "0" => Ok(Some(false)),
                    "1" => Ok(Some(true)),
                    other => Err(Error::format(
                        context,
                        format!("unexpected token {:?} after {} bits", other, self.consumed - 1),
                    )),
                };
            }

            self.line.clear();
            self.pos = 0;
            let read = self
                .inner
                .read_line(&mut self.line)
                .map_err(|e| Error::format(context, e.to_string()))?;
            if read == 0 {
                return Ok(None);
            }
        }
    }

    fn next_bit(&mut self, context: &'static str, expected: usize, found: usize) -> Result<bool> {
        self.next_token(context)?.ok_or_else(|| {
            Error::format(
                context,
                format!("truncated input: expected {} bits, found {}", expected, found),
            )
        })
    }

    /// True once only whitespace remains
    pub fn at_end(&mut self) -> Result<bool> {
        loop {
            if !self.line[self.pos..].trim().is_empty() {
                return Ok(false);
            }
            self.line.clear();
            self.pos = 0;
            let read = self
                .inner
                .read_line(&mut self.line)
                .map_err(|e| Error::format("token stream", e.to_string()))?;
            if read == 0 {
                return Ok(true);
            }
        }
    }

    /// Read `len` bits into a vector
    pub fn read_vector(&mut self, context: &'static str, len: usize) -> Result<BinaryVector> {
        let mut v = BinaryVector::zero(len);
        for i in 0..len {
            if self.next_bit(context, len, i)? {
                v.set(i, true);
            }
        }
        Ok(v)
    }

    /// Read a `rows x cols` matrix, row-major
    pub fn read_matrix(&mut self, context: &'static str, rows: usize, cols: usize) -> Result<BinaryMatrix> {
        let mut m = BinaryMatrix::zero(rows, cols);
        let total = rows * cols;
        for r in 0..rows {
            for c in 0..cols {
                if self.next_bit(context, total, r * cols + c)? {
                    m.set(r, c, true);
                }
            }
        }
        Ok(m)
    }
}

/// Write a vector as one line of tokens
pub fn write_vector<W: Write>(out: &mut W, v: &BinaryVector) -> io::Result<()> {
    let mut line = String::with_capacity(2 * v.len() + 1);
    for i in 0..v.len() {
        if i > 0 {
            line.push(' ');
        }
        line.push(if v.get(i) { '1' } else { '0' });
    }
    line.push('\n');
    out.write_all(line.as_bytes())
}

/// Write a matrix, one row per line
pub fn write_matrix<W: Write>(out: &mut W, m: &BinaryMatrix) -> io::Result<()> {
    for r in 0..m.rows() {
        write_vector(out, &m.row(r))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_across_arbitrary_whitespace() {
        let input = "1 0\n\n  1\t1 0\n 0\n";
        let mut reader = BitReader::new(Cursor::new(input));
        let m = reader.read_matrix("matrix", 2, 3).unwrap();
        assert_eq!(m.row(0), BinaryVector::from_bits(&[1, 0, 1]));
        assert_eq!(m.row(1), BinaryVector::from_bits(&[1, 0, 0]));
        assert_eq!(reader.consumed(), 6);
        assert!(reader.at_end().unwrap());
    }

    #[test]
    fn written_matrix_reads_back() {
        let mut m = BinaryMatrix::zero(3, 70);
        m.set(0, 0, true);
        m.set(2, 69, true);
        let mut buf = Vec::new();
        write_matrix(&mut buf, &m).unwrap();
        assert_eq!(String::from_utf8_lossy(&buf).lines().count(), 3);
        let mut reader = BitReader::new(Cursor::new(buf));
        assert_eq!(reader.read_matrix("matrix", 3, 70).unwrap(), m);
    }

    #[test]
    fn truncated_input_names_the_counts() {
        let mut reader = BitReader::new(Cursor::new("1 0 1"));
        let err = reader.read_vector("signature", 5).unwrap_err();
        assert_eq!(
            err,
            Error::format("signature", "truncated input: expected 5 bits, found 3")
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let mut reader = BitReader::new(Cursor::new("1 2 0"));
        assert!(matches!(
            reader.read_vector("public key", 3),
            Err(Error::Format { context: "public key", .. })
        ));
    }

    #[test]
    fn sequential_vectors() {
        let mut reader = BitReader::new(Cursor::new("1 1 0\n0 0 1\n"));
        assert_eq!(reader.read_vector("z", 3).unwrap().ones(), vec![0, 1]);
        assert!(!reader.at_end().unwrap());
        assert_eq!(reader.read_vector("z", 3).unwrap().ones(), vec![2]);
        assert!(reader.at_end().unwrap());
    }
}
