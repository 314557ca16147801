//! Dense complex matrix inversion and multiplication.
//!
//! This crate computes the inverse of a square matrix of [`num_complex::Complex64`]
//! entries using four interchangeable engines, plus a divide-and-conquer
//! Strassen multiplier:
//!
//! - [`lu::invert`] / [`lu::invert_parallel`]: Doolittle LU decomposition with
//!   forward/back substitution per unit basis column
//! - [`gauss_jordan::invert`] / [`gauss_jordan::invert_parallel`]: augmented
//!   `[M | I]` elimination with pivot search and swap
//! - [`strassen::multiply`] / [`strassen::multiply_parallel`]: recursive block
//!   decomposition with zero padding for odd dimensions
//!
//! # Core Types
//!
//! - [`CMatrix`]: dense row-major matrix over a single contiguous buffer
//! - [`InverseAlgorithm`]: engine selector consumed by [`calculate_inverse`]
//! - [`MatrixError`]: failure taxonomy shared by every engine
//!
//! Equality of complex entries is tolerance-based throughout ([`EPSILON`] =
//! `1e-6` per component); the same test decides whether a pivot is zero.
//!
//! # Example
//!
//! ```rust
//! use cmatrix::{calculate_inverse, CMatrix, InverseAlgorithm};
//! use num_complex::Complex64;
//!
//! let m = CMatrix::from_rows(&[
//!     vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
//!     vec![Complex64::new(3.0, 0.0), Complex64::new(4.0, 0.0)],
//! ]);
//!
//! let inv = calculate_inverse(&m, InverseAlgorithm::Lu).unwrap();
//! let product = &m * &inv;
//! assert!(product.approx_eq(&CMatrix::identity(2)));
//! ```
//!
//! # Concurrency
//!
//! The parallel engines fan out over rayon and join before every phase
//! boundary. Parallel Gauss-Jordan eliminates disjoint rows per pivot step;
//! parallel LU runs a stage-barrier wavefront over the Doolittle recurrence;
//! parallel Strassen spawns the seven independent sub-products. All three are
//! deterministic and result-equivalent to their sequential counterparts.

pub mod gauss_jordan;
pub mod invert;
pub mod lu;
pub mod matrix;
pub mod scalar;
pub mod strassen;

pub use invert::{calculate_inverse, calculate_inverse_timed, multiply, InverseAlgorithm};
pub use matrix::CMatrix;
pub use scalar::{approx_eq, is_zero, EPSILON};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during matrix inversion and multiplication.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// Inversion requires a square matrix.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Operand shapes are incompatible for multiplication.
    #[error("shape mismatch: {0}x{1} * {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    /// No usable pivot exists in the given column; the matrix has no inverse.
    #[error("singular matrix: no usable pivot in column {column}")]
    Singular { column: usize },

    /// Numeric algorithm selector outside the 1..=4 range.
    #[error("unknown inverse algorithm selector: {0}")]
    UnknownAlgorithm(u32),
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
