//! Dense complex matrix over a single contiguous row-major buffer.
//!
//! `CMatrix` owns a `Vec<Complex64>` of length `rows * cols` and exposes
//! bounds-checked element, row and column accessors. The shape is fixed at
//! construction; resizing means building a new matrix. `Clone` produces a
//! deep, independent copy of the buffer.
//!
//! Out-of-range indices are a contract violation and fail fast via `assert!`.
//! Recoverable failures (shape mismatches during inversion, singular input)
//! are reported by the engines through [`crate::MatrixError`] instead.

use crate::scalar::{approx_eq, is_zero};
use num_complex::Complex64;
use num_traits::Zero;
use rand::Rng;
use std::fmt;
use std::ops::{Add, Mul, Range, Sub};

/// Dense `rows x cols` matrix of `Complex64` entries, row-major.
#[derive(Debug, Clone)]
pub struct CMatrix {
    data: Vec<Complex64>,
    rows: usize,
    cols: usize,
}

impl CMatrix {
    /// Create a zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Complex64::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create the `0 x 0` matrix.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.set(i, i, Complex64::new(1.0, 0.0));
        }
        m
    }

    /// Build a matrix from row vectors.
    ///
    /// # Panics
    /// Panics if the rows have unequal lengths.
    pub fn from_rows(rows: &[Vec<Complex64>]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == n_cols),
            "rows must have equal length"
        );
        Self {
            data: rows.iter().flatten().copied().collect(),
            rows: n_rows,
            cols: n_cols,
        }
    }

    /// Build a matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Complex64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    /// Fill a matrix with uniformly random integer-valued entries, real parts
    /// drawn from `re_range` and imaginary parts from `im_range`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        re_range: Range<i32>,
        im_range: Range<i32>,
        rng: &mut R,
    ) -> Self {
        Self::from_fn(rows, cols, |_, _| {
            Complex64::new(
                rng.gen_range(re_range.clone()) as f64,
                rng.gen_range(im_range.clone()) as f64,
            )
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for the `0 x 0` (or any zero-dimension) matrix.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// True when `rows == cols`.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Complex64 {
        assert!(i < self.rows && j < self.cols, "index out of bounds");
        self.data[i * self.cols + j]
    }

    /// Overwrite the element at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Complex64) {
        assert!(i < self.rows && j < self.cols, "index out of bounds");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a contiguous slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[Complex64] {
        assert!(i < self.rows, "row index out of bounds");
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row `i` as a mutable contiguous slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Complex64] {
        assert!(i < self.rows, "row index out of bounds");
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Overwrite row `i`.
    pub fn set_row(&mut self, i: usize, values: &[Complex64]) {
        assert!(values.len() == self.cols, "row length mismatch");
        self.row_mut(i).copy_from_slice(values);
    }

    /// Column `j`, copied out.
    pub fn column(&self, j: usize) -> Vec<Complex64> {
        assert!(j < self.cols, "column index out of bounds");
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// Overwrite column `j`.
    pub fn set_column(&mut self, j: usize, values: &[Complex64]) {
        assert!(values.len() == self.rows, "column length mismatch");
        for (i, &v) in values.iter().enumerate() {
            self.set(i, j, v);
        }
    }

    /// Exchange rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(a < self.rows && b < self.rows, "row index out of bounds");
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// The backing row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// The backing row-major buffer, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    /// Elementwise tolerance equality; matrices of different shapes compare
    /// unequal.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| approx_eq(a, b))
    }

    /// Rank via Gauss elimination with column compaction.
    ///
    /// Works on a private copy; the receiver is never mutated. The rank
    /// boundary starts at the column count. For each row up to the boundary,
    /// a non-zero diagonal eliminates its column from every other row; a zero
    /// diagonal triggers a downward search for a swappable row, and when none
    /// exists the column is linearly dependent: the boundary shrinks, the
    /// last active column moves into place, and the row is retried without
    /// advancing.
    pub fn rank(&self) -> usize {
        let mut m = self.clone();
        let n_rows = m.rows;
        let mut rank = m.cols;

        let mut row = 0;
        while row < rank && row < n_rows {
            if !is_zero(m.get(row, row)) {
                for col in 0..n_rows {
                    if col != row {
                        let mult = m.get(col, row) / m.get(row, row);
                        for i in 0..rank {
                            let v = m.get(col, i) - mult * m.get(row, i);
                            m.set(col, i, v);
                        }
                    }
                }
            } else {
                let mut reduced = true;
                for i in row + 1..n_rows {
                    if !is_zero(m.get(i, row)) {
                        m.swap_rows(row, i);
                        reduced = false;
                        break;
                    }
                }
                if reduced {
                    // Column `row` is dependent: compact the last active
                    // column into its place and retry this row.
                    rank -= 1;
                    for i in 0..n_rows {
                        let v = m.get(i, rank);
                        m.set(i, row, v);
                    }
                }
                continue;
            }
            row += 1;
        }

        rank.min(n_rows)
    }
}

impl Add for &CMatrix {
    type Output = CMatrix;

    fn add(self, other: &CMatrix) -> CMatrix {
        assert!(
            self.rows == other.rows && self.cols == other.cols,
            "shape mismatch in matrix addition"
        );
        CMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| a + b)
                .collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Sub for &CMatrix {
    type Output = CMatrix;

    fn sub(self, other: &CMatrix) -> CMatrix {
        assert!(
            self.rows == other.rows && self.cols == other.cols,
            "shape mismatch in matrix subtraction"
        );
        CMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Mul for &CMatrix {
    type Output = CMatrix;

    /// Direct triple-loop product.
    fn mul(self, other: &CMatrix) -> CMatrix {
        assert!(
            self.cols == other.rows,
            "inner dimension mismatch in matrix product"
        );
        let mut result = CMatrix::new(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = Complex64::zero();
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result.set(i, j, sum);
            }
        }
        result
    }
}

impl fmt::Display for CMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
