//! Algorithm selection and dispatch.
//!
//! The four inversion engines share one entry point, [`calculate_inverse`],
//! selected by [`InverseAlgorithm`]. The enum keeps dispatch exhaustive at
//! compile time; callers holding a raw numeric selector (the classic 1-4
//! menu choice) go through [`InverseAlgorithm::from_selector`], which turns
//! out-of-range values into [`MatrixError::UnknownAlgorithm`].

use crate::matrix::CMatrix;
use crate::{gauss_jordan, lu, strassen, MatrixError, Result};
use std::time::{Duration, Instant};

/// Selector for the inversion engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InverseAlgorithm {
    /// Sequential Doolittle LU decomposition.
    Lu,
    /// Wavefront-parallel LU decomposition.
    ParallelLu,
    /// Sequential Gauss-Jordan elimination.
    GaussJordan,
    /// Gauss-Jordan with per-pivot row parallelism.
    ParallelGaussJordan,
}

impl InverseAlgorithm {
    /// Map a numeric menu selector (1-4) to an algorithm.
    ///
    /// # Errors
    /// [`MatrixError::UnknownAlgorithm`] for anything outside 1..=4.
    pub fn from_selector(selector: u32) -> Result<Self> {
        match selector {
            1 => Ok(Self::Lu),
            2 => Ok(Self::ParallelLu),
            3 => Ok(Self::GaussJordan),
            4 => Ok(Self::ParallelGaussJordan),
            other => Err(MatrixError::UnknownAlgorithm(other)),
        }
    }
}

/// Compute the inverse of `matrix` with the chosen engine.
///
/// # Errors
/// - [`MatrixError::NonSquare`] for rectangular input.
/// - [`MatrixError::Singular`] when no inverse exists (or, for the LU
///   engines, when a zero pivot stops the non-pivoting decomposition).
pub fn calculate_inverse(matrix: &CMatrix, algorithm: InverseAlgorithm) -> Result<CMatrix> {
    match algorithm {
        InverseAlgorithm::Lu => lu::invert(matrix),
        InverseAlgorithm::ParallelLu => lu::invert_parallel(matrix),
        InverseAlgorithm::GaussJordan => gauss_jordan::invert(matrix),
        InverseAlgorithm::ParallelGaussJordan => gauss_jordan::invert_parallel(matrix),
    }
}

/// [`calculate_inverse`] plus the wall-clock duration of the call.
pub fn calculate_inverse_timed(
    matrix: &CMatrix,
    algorithm: InverseAlgorithm,
) -> Result<(CMatrix, Duration)> {
    let start = Instant::now();
    let inverse = calculate_inverse(matrix, algorithm)?;
    Ok((inverse, start.elapsed()))
}

/// Strassen product of `a` and `b`.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] when `cols(a) != rows(b)`.
pub fn multiply(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    strassen::multiply(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    const ALL: [InverseAlgorithm; 4] = [
        InverseAlgorithm::Lu,
        InverseAlgorithm::ParallelLu,
        InverseAlgorithm::GaussJordan,
        InverseAlgorithm::ParallelGaussJordan,
    ];

    fn real(v: f64) -> Complex64 {
        Complex64::new(v, 0.0)
    }

    #[test]
    fn test_from_selector_valid() {
        assert_eq!(
            InverseAlgorithm::from_selector(1).unwrap(),
            InverseAlgorithm::Lu
        );
        assert_eq!(
            InverseAlgorithm::from_selector(4).unwrap(),
            InverseAlgorithm::ParallelGaussJordan
        );
    }

    #[test]
    fn test_from_selector_out_of_range() {
        assert!(matches!(
            InverseAlgorithm::from_selector(0),
            Err(MatrixError::UnknownAlgorithm(0))
        ));
        assert!(matches!(
            InverseAlgorithm::from_selector(5),
            Err(MatrixError::UnknownAlgorithm(5))
        ));
    }

    #[test]
    fn test_dispatch_all_engines() {
        let m = CMatrix::from_rows(&[
            vec![real(1.0), real(2.0)],
            vec![real(3.0), real(4.0)],
        ]);
        let expected = CMatrix::from_rows(&[
            vec![real(-2.0), real(1.0)],
            vec![real(1.5), real(-0.5)],
        ]);
        for algorithm in ALL {
            let inverse = calculate_inverse(&m, algorithm).unwrap();
            assert!(inverse.approx_eq(&expected), "{algorithm:?}");
        }
    }

    #[test]
    fn test_timed_wrapper_returns_same_result() {
        let m = CMatrix::from_rows(&[
            vec![real(2.0), real(0.0)],
            vec![real(0.0), real(2.0)],
        ]);
        let (inverse, elapsed) =
            calculate_inverse_timed(&m, InverseAlgorithm::GaussJordan).unwrap();
        assert!(inverse.approx_eq(&calculate_inverse(&m, InverseAlgorithm::GaussJordan).unwrap()));
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    fn test_errors_surface_through_dispatcher() {
        let rect = CMatrix::new(2, 3);
        for algorithm in ALL {
            assert!(matches!(
                calculate_inverse(&rect, algorithm),
                Err(MatrixError::NonSquare { .. })
            ));
        }
    }
}
