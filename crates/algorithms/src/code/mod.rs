//! Linear algebra over GF(2)
//!
//! Dense packed bit vectors and matrices, Gauss–Jordan inversion and
//! solving, and the plain-text token format used for keys and signatures.

pub mod binary_matrix;
pub mod binary_vector;
pub mod gauss;
pub mod text;

pub use binary_matrix::BinaryMatrix;
pub use binary_vector::{BinaryVector, Ones};
pub use gauss::{invert, solve, GaussWorkspace};
pub use text::{write_matrix, write_vector, BitReader};
