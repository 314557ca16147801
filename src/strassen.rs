//! Strassen matrix multiplication, sequential and parallel.
//!
//! Below [`STRASSEN_CUTOFF`] the recursion bottoms out in the direct triple
//! loop. Above it, each operand splits into four quadrants of ceil-half
//! size, padding out-of-range cells with zeros so odd dimensions round-trip
//! correctly. The seven Strassen sub-products `M1..M7` are recombined into
//! the four result quadrants, writing back only cells that fall inside the
//! true (unpadded) result shape.
//!
//! The seven sub-products are mathematically independent, so the parallel
//! variant fans them out through nested `rayon::join` calls and joins all
//! seven before recombination.

use crate::matrix::CMatrix;
use crate::{MatrixError, Result};
use num_complex::Complex64;
use num_traits::Zero;

/// Dimension threshold below which the direct triple loop is used.
pub const STRASSEN_CUTOFF: usize = 8;

/// Direct triple-loop product.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] when `cols(a) != rows(b)`.
pub fn naive_multiply(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_shapes(a, b)?;
    Ok(a * b)
}

/// Strassen product `a * b`.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] when `cols(a) != rows(b)`.
pub fn multiply(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_shapes(a, b)?;
    Ok(recurse(a, b, false))
}

/// Strassen product with the seven sub-products computed in parallel.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] when `cols(a) != rows(b)`.
pub fn multiply_parallel(a: &CMatrix, b: &CMatrix) -> Result<CMatrix> {
    check_shapes(a, b)?;
    Ok(recurse(a, b, true))
}

fn check_shapes(a: &CMatrix, b: &CMatrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatrixError::ShapeMismatch(
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols(),
        ));
    }
    Ok(())
}

/// One recursion level; `parallel` only fans out the top levels (the fan-out
/// is inherited by sub-calls, rayon's work stealing balances the rest).
fn recurse(a: &CMatrix, b: &CMatrix, parallel: bool) -> CMatrix {
    let m = a.rows();
    let n = a.cols();
    let q = b.cols();

    if m <= STRASSEN_CUTOFF || n <= STRASSEN_CUTOFF || q <= STRASSEN_CUTOFF {
        return a * b;
    }

    // Ceil halves; the far quadrants are zero-padded when a dimension is odd.
    let half_m = m / 2 + m % 2;
    let half_n = n / 2 + n % 2;
    let half_q = q / 2 + q % 2;

    let a11 = quadrant(a, 0, 0, half_m, half_n);
    let a12 = quadrant(a, 0, half_n, half_m, half_n);
    let a21 = quadrant(a, half_m, 0, half_m, half_n);
    let a22 = quadrant(a, half_m, half_n, half_m, half_n);

    let b11 = quadrant(b, 0, 0, half_n, half_q);
    let b12 = quadrant(b, 0, half_q, half_n, half_q);
    let b21 = quadrant(b, half_n, 0, half_n, half_q);
    let b22 = quadrant(b, half_n, half_q, half_n, half_q);

    let d1 = &a11 + &a22;
    let d2 = &b11 + &b22;
    let d3 = &a21 + &a22;
    let d4 = &b12 - &b22;
    let d5 = &b21 - &b11;
    let d6 = &a11 + &a12;
    let d7 = &a21 - &a11;
    let d8 = &b11 + &b12;
    let d9 = &a12 - &a22;
    let d10 = &b21 + &b22;

    let (m1, m2, m3, m4, m5, m6, m7) = if parallel {
        let ((m1, (m2, m3)), ((m4, m5), (m6, m7))) = rayon::join(
            || {
                rayon::join(
                    || recurse(&d1, &d2, true),
                    || {
                        rayon::join(
                            || recurse(&d3, &b11, true),
                            || recurse(&a11, &d4, true),
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || recurse(&a22, &d5, true),
                            || recurse(&d6, &b22, true),
                        )
                    },
                    || {
                        rayon::join(
                            || recurse(&d7, &d8, true),
                            || recurse(&d9, &d10, true),
                        )
                    },
                )
            },
        );
        (m1, m2, m3, m4, m5, m6, m7)
    } else {
        (
            recurse(&d1, &d2, false),
            recurse(&d3, &b11, false),
            recurse(&a11, &d4, false),
            recurse(&a22, &d5, false),
            recurse(&d6, &b22, false),
            recurse(&d7, &d8, false),
            recurse(&d9, &d10, false),
        )
    };

    let r11 = &(&(&m1 + &m4) - &m5) + &m7;
    let r12 = &m3 + &m5;
    let r21 = &m2 + &m4;
    let r22 = &(&(&m1 - &m2) + &m3) + &m6;

    // Write back, skipping padded cells outside the true result shape.
    let mut result = CMatrix::new(m, q);
    for i in 0..half_m {
        for j in 0..half_q {
            result.set(i, j, r11.get(i, j));
            if j + half_q < q {
                result.set(i, j + half_q, r12.get(i, j));
            }
            if i + half_m < m {
                result.set(i + half_m, j, r21.get(i, j));
            }
            if i + half_m < m && j + half_q < q {
                result.set(i + half_m, j + half_q, r22.get(i, j));
            }
        }
    }
    result
}

/// Extract a `rows x cols` quadrant starting at `(row0, col0)`, zero-padding
/// cells that fall outside the source.
fn quadrant(src: &CMatrix, row0: usize, col0: usize, rows: usize, cols: usize) -> CMatrix {
    CMatrix::from_fn(rows, cols, |i, j| {
        if row0 + i < src.rows() && col0 + j < src.cols() {
            src.get(row0 + i, col0 + j)
        } else {
            Complex64::zero()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn random_matrix(rows: usize, cols: usize, seed: u64) -> CMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        CMatrix::random(rows, cols, -9..10, -9..10, &mut rng)
    }

    fn assert_matches_naive(rows: usize, inner: usize, cols: usize, seed: u64) {
        let a = random_matrix(rows, inner, seed);
        let b = random_matrix(inner, cols, seed.wrapping_add(1));
        let direct = naive_multiply(&a, &b).unwrap();
        assert!(multiply(&a, &b).unwrap().approx_eq(&direct));
        assert!(multiply_parallel(&a, &b).unwrap().approx_eq(&direct));
    }

    #[test]
    fn test_small_square_uses_fallback() {
        assert_matches_naive(4, 4, 4, 1);
    }

    #[test]
    fn test_square_even_dimensions() {
        assert_matches_naive(16, 16, 16, 2);
    }

    #[test]
    fn test_square_odd_dimensions() {
        assert_matches_naive(17, 17, 17, 3);
    }

    #[test]
    fn test_rectangular_even() {
        assert_matches_naive(12, 20, 16, 4);
    }

    #[test]
    fn test_rectangular_odd() {
        assert_matches_naive(13, 21, 9, 5);
    }

    #[test]
    fn test_power_of_two_above_cutoff() {
        assert_matches_naive(32, 32, 32, 6);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = CMatrix::new(2, 3);
        let b = CMatrix::new(4, 2);
        assert!(matches!(
            multiply(&a, &b),
            Err(MatrixError::ShapeMismatch(2, 3, 4, 2))
        ));
        assert!(matches!(
            multiply_parallel(&a, &b),
            Err(MatrixError::ShapeMismatch(..))
        ));
        assert!(matches!(
            naive_multiply(&a, &b),
            Err(MatrixError::ShapeMismatch(..))
        ));
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = random_matrix(20, 20, 7);
        let product = multiply(&a, &CMatrix::identity(20)).unwrap();
        assert!(product.approx_eq(&a));
    }
}
