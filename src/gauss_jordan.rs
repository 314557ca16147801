//! Inverse via Gauss-Jordan elimination on an augmented matrix.
//!
//! Both variants build `[M | I]` of shape `n x 2n`, reduce the left half to
//! the identity and read the inverse out of the right half. A zero pivot
//! (tolerance test) triggers a downward search for a swappable row before
//! the pivot row advances; exhausting the search means the matrix is
//! structurally singular.
//!
//! The parallel variant distributes the per-pivot elimination over rows:
//! each rayon task owns one disjoint row of the row-major buffer and reads a
//! snapshot of the pivot row, which is not mutated during the step. All rows
//! join before the next pivot, so the parallel result is equal to the
//! sequential one. Of the four inversion engines this is the reference
//! concurrency model: disjoint writes plus a barrier per pivot step.

use crate::matrix::CMatrix;
use crate::scalar::is_zero;
use crate::{MatrixError, Result};
use num_complex::Complex64;
use rayon::prelude::*;

/// Inverse via sequential Gauss-Jordan elimination.
///
/// # Errors
/// - [`MatrixError::NonSquare`] for rectangular input.
/// - [`MatrixError::Singular`] when the input is rank-deficient or no
///   non-zero pivot can be swapped into place.
pub fn invert(m: &CMatrix) -> Result<CMatrix> {
    let (mut aug, n) = build_augmented(m)?;
    let width = 2 * n;

    for i in 0..n {
        find_pivot(&mut aug, i, n)?;

        for j in 0..n {
            if j != i {
                let factor = aug.get(j, i) / aug.get(i, i);
                for k in 0..width {
                    let v = aug.get(j, k) - aug.get(i, k) * factor;
                    aug.set(j, k, v);
                }
            }
        }
    }

    normalize_rows(&mut aug, n);
    Ok(extract_inverse(&aug, n))
}

/// Inverse via Gauss-Jordan elimination with per-pivot row parallelism.
///
/// Identical contract and results as [`invert`].
pub fn invert_parallel(m: &CMatrix) -> Result<CMatrix> {
    let (mut aug, n) = build_augmented(m)?;
    let width = 2 * n;

    for i in 0..n {
        find_pivot(&mut aug, i, n)?;

        // Snapshot the pivot row; every task below reads it and writes only
        // its own row. The for_each is the per-pivot barrier.
        let pivot_row = aug.row(i).to_vec();
        let pivot = pivot_row[i];

        aug.as_mut_slice()
            .par_chunks_exact_mut(width)
            .enumerate()
            .filter(|(j, _)| *j != i)
            .for_each(|(_, row)| {
                let factor = row[i] / pivot;
                for k in 0..width {
                    row[k] -= pivot_row[k] * factor;
                }
            });
    }

    normalize_rows(&mut aug, n);
    Ok(extract_inverse(&aug, n))
}

/// Build `[M | I]`, checking squareness and full rank up front.
fn build_augmented(m: &CMatrix) -> Result<(CMatrix, usize)> {
    if !m.is_square() {
        return Err(MatrixError::NonSquare {
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    let n = m.rows();
    if m.rank() != n {
        return Err(MatrixError::Singular {
            column: first_deficient_column(m),
        });
    }

    let mut aug = CMatrix::new(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            aug.set(i, j, m.get(i, j));
        }
        aug.set(i, i + n, Complex64::new(1.0, 0.0));
    }
    Ok((aug, n))
}

/// First column with no usable pivot at or below the diagonal, via forward
/// elimination on a working copy. Only called once the matrix is known to be
/// rank-deficient, to name the offending column in the error.
fn first_deficient_column(m: &CMatrix) -> usize {
    let mut w = m.clone();
    let n = w.rows();
    for col in 0..n {
        let Some(pivot_row) = (col..n).find(|&r| !is_zero(w.get(r, col))) else {
            return col;
        };
        w.swap_rows(col, pivot_row);
        for r in col + 1..n {
            let factor = w.get(r, col) / w.get(col, col);
            for k in col..n {
                let v = w.get(r, k) - w.get(col, k) * factor;
                w.set(r, k, v);
            }
        }
    }
    n.saturating_sub(1)
}

/// Ensure `aug[i][i]` is non-zero, swapping a lower row up if needed.
fn find_pivot(aug: &mut CMatrix, i: usize, n: usize) -> Result<()> {
    if !is_zero(aug.get(i, i)) {
        return Ok(());
    }
    for r in i + 1..n {
        if !is_zero(aug.get(r, i)) {
            aug.swap_rows(i, r);
            return Ok(());
        }
    }
    Err(MatrixError::Singular { column: i })
}

/// Scale each row by its own diagonal entry.
fn normalize_rows(aug: &mut CMatrix, n: usize) {
    for i in 0..n {
        let divider = aug.get(i, i);
        for v in aug.row_mut(i) {
            *v /= divider;
        }
    }
}

/// The right half of the reduced augmented matrix.
fn extract_inverse(aug: &CMatrix, n: usize) -> CMatrix {
    CMatrix::from_fn(n, n, |i, j| aug.get(i, j + n))
}
