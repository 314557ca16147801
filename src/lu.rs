//! Inverse via Doolittle LU decomposition, sequential and parallel.
//!
//! `decompose` factors a square matrix into a unit-lower-triangular `L` and
//! an upper-triangular `U` in a single pass. No pivoting is performed: an
//! exactly-zero diagonal `U[i][i]` aborts with [`MatrixError::Singular`]
//! even when a row swap would have rescued the factorization. The Gauss-Jordan engine does swap; the asymmetry is
//! deliberate and part of this engine's contract.
//!
//! `decompose_parallel` computes the same factors with a stage-barrier
//! wavefront: at stage `k`, every entry of row `k` of `U` depends only on
//! rows `< k` of `U` and columns `< k` of `L`, so the row is computed in
//! parallel over columns; after the pivot check, column `k` of `L` is
//! computed in parallel over rows. The barrier between sweeps preserves the
//! Doolittle dependency order exactly, so the parallel factors are bitwise
//! equal to the sequential ones.
//!
//! The inverse solves `L*y = e_i` then `U*x = y` for each unit basis vector;
//! substitution is inherently sequential (each row depends on all prior
//! rows) and stays so in both variants.

use crate::matrix::CMatrix;
use crate::{MatrixError, Result};
use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;

/// Doolittle factorization `M = L * U`.
///
/// Returns `(L, U)` with `L` unit-lower-triangular and `U` upper-triangular.
///
/// # Errors
/// - [`MatrixError::NonSquare`] for rectangular input.
/// - [`MatrixError::Singular`] when a pivot `U[j][j]` is exactly zero.
pub fn decompose(m: &CMatrix) -> Result<(CMatrix, CMatrix)> {
    let n = check_square(m)?;

    let mut l = CMatrix::identity(n);
    let mut u = CMatrix::new(n, n);

    for i in 0..n {
        for j in 0..n {
            if i <= j {
                // U[i][j] = M[i][j] - sum_{k<i} L[i][k] * U[k][j]
                let mut sum = m.get(i, j);
                for k in 0..i {
                    sum -= l.get(i, k) * u.get(k, j);
                }
                u.set(i, j, sum);
                // A zero diagonal stops the factorization even when no row
                // below row i remains to divide by it (the trailing pivot).
                if i == j && sum == Complex64::zero() {
                    return Err(MatrixError::Singular { column: i });
                }
            } else {
                // L[i][j] = (M[i][j] - sum_{k<j} L[i][k] * U[k][j]) / U[j][j]
                let divider = u.get(j, j);
                if divider == Complex64::zero() {
                    return Err(MatrixError::Singular { column: j });
                }
                let mut sum = m.get(i, j);
                for k in 0..j {
                    sum -= l.get(i, k) * u.get(k, j);
                }
                l.set(i, j, sum / divider);
            }
        }
    }

    Ok((l, u))
}

/// Doolittle factorization with a stage-barrier wavefront schedule.
///
/// Same contract and same results as [`decompose`]; stage `k` computes row
/// `k` of `U` and column `k` of `L` as two parallel sweeps with an implicit
/// join between them.
pub fn decompose_parallel(m: &CMatrix) -> Result<(CMatrix, CMatrix)> {
    let n = check_square(m)?;

    let mut l = CMatrix::identity(n);
    let mut u = CMatrix::new(n, n);

    for k in 0..n {
        // Row k of U: every dependency lies in stages < k.
        let u_row: Vec<Complex64> = (k..n)
            .into_par_iter()
            .map(|j| {
                let mut sum = m.get(k, j);
                for t in 0..k {
                    sum -= l.get(k, t) * u.get(t, j);
                }
                sum
            })
            .collect();
        for (j, v) in (k..n).zip(u_row) {
            u.set(k, j, v);
        }

        let pivot = u.get(k, k);
        if pivot == Complex64::zero() {
            return Err(MatrixError::Singular { column: k });
        }

        // Column k of L: depends on row k of U just written.
        let l_col: Vec<Complex64> = (k + 1..n)
            .into_par_iter()
            .map(|i| {
                let mut sum = m.get(i, k);
                for t in 0..k {
                    sum -= l.get(i, t) * u.get(t, k);
                }
                sum / pivot
            })
            .collect();
        for (i, v) in (k + 1..n).zip(l_col) {
            l.set(i, k, v);
        }
    }

    Ok((l, u))
}

/// Inverse via sequential LU decomposition.
pub fn invert(m: &CMatrix) -> Result<CMatrix> {
    let (l, u) = decompose(m)?;
    assemble_inverse(&l, &u)
}

/// Inverse via the wavefront-parallel LU decomposition.
///
/// Inverse assembly (per-column substitution) is unchanged from [`invert`]
/// and remains sequential within each column.
pub fn invert_parallel(m: &CMatrix) -> Result<CMatrix> {
    let (l, u) = decompose_parallel(m)?;
    assemble_inverse(&l, &u)
}

fn check_square(m: &CMatrix) -> Result<usize> {
    if !m.is_square() {
        return Err(MatrixError::NonSquare {
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    Ok(m.rows())
}

/// Solve `L*y = e_i`, `U*x = y` per unit basis vector; `x` becomes column
/// `i` of the inverse.
fn assemble_inverse(l: &CMatrix, u: &CMatrix) -> Result<CMatrix> {
    let n = l.rows();
    let mut result = CMatrix::new(n, n);

    for i in 0..n {
        let mut unit = vec![Complex64::zero(); n];
        unit[i] = Complex64::new(1.0, 0.0);
        let y = forward_substitute(l, &unit);
        let x = back_substitute(u, &y);
        result.set_column(i, &x);
    }

    Ok(result)
}

/// Solve `L*y = b` for lower-triangular `L`, top row down.
fn forward_substitute(l: &CMatrix, b: &[Complex64]) -> Vec<Complex64> {
    let n = b.len();
    let mut y = vec![Complex64::zero(); n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l.get(i, j) * y[j];
        }
        y[i] = sum / l.get(i, i);
    }
    y
}

/// Solve `U*x = b` for upper-triangular `U`, bottom row up.
fn back_substitute(u: &CMatrix, b: &[Complex64]) -> Vec<Complex64> {
    let n = b.len();
    let mut x = vec![Complex64::zero(); n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in i + 1..n {
            sum -= u.get(i, j) * x[j];
        }
        x[i] = sum / u.get(i, i);
    }
    x
}
