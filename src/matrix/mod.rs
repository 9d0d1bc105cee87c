mod block;
mod norm;
mod ops;
mod square;
pub mod vector;

use std::ops::{Index, IndexMut};

use num_traits::{One, Zero};

use crate::linalg::LinalgError;
use crate::traits::{ComplexScalar, C64};
use vector::Vector;

/// Dense complex matrix with runtime dimensions.
///
/// Column-major `Vec<C64>` storage: element `(row, col)` lives at
/// `data[col * nrows + row]`. Column and row views are built on demand
/// from this single backing store.
///
/// Matrices are value-like: arithmetic, transposition, block extraction and
/// the decompositions all return new values and never modify `self`.
///
/// # Examples
///
/// ```
/// use zmatrix::{c64, Matrix};
///
/// let a = Matrix::from_real_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], c64(2.0, 0.0));
/// assert_eq!(a.nrows(), 2);
///
/// let id = Matrix::eye(3);
/// assert_eq!(id[(1, 1)], c64(1.0, 0.0));
/// assert_eq!(id[(0, 1)], c64(0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<C64>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl Matrix {
    /// Create an `nrows x ncols` zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![C64::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = C64::one();
        }
        m
    }

    /// Alias of [`Matrix::eye`].
    #[inline]
    pub fn identity(n: usize) -> Self {
        Self::eye(n)
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let m = Matrix::from_fn(2, 3, |i, j| c64(i as f64, j as f64));
    /// assert_eq!(m[(1, 2)], c64(1.0, 2.0));
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> C64) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[C64]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Create a real-valued matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let m = Matrix::from_real_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], c64(3.0, 0.0));
    /// assert_eq!(m[(1, 0)], c64(4.0, 0.0));
    /// ```
    pub fn from_real_rows(nrows: usize, ncols: usize, row_major: &[f64]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| C64::from_real(row_major[i * ncols + j]))
    }

    /// Create a matrix from an owned `Vec` in column-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<C64>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Assemble a matrix from column vectors.
    ///
    /// Fails with a dimension error if the columns differ in length.
    ///
    /// ```
    /// use zmatrix::{Matrix, Vector};
    /// let cols = [Vector::from_real(&[1.0, 2.0]), Vector::from_real(&[3.0, 4.0])];
    /// let m = Matrix::from_columns(&cols).unwrap();
    /// assert_eq!(m[(1, 0)].re, 2.0);
    ///
    /// let ragged = [Vector::from_real(&[1.0, 2.0]), Vector::from_real(&[3.0])];
    /// assert!(Matrix::from_columns(&ragged).is_err());
    /// ```
    pub fn from_columns(columns: &[Vector]) -> Result<Self, LinalgError> {
        let ncols = columns.len();
        let nrows = columns.first().map_or(0, Vector::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for col in columns {
            if col.len() != nrows {
                return Err(LinalgError::DimensionMismatch {
                    expected: (nrows, ncols),
                    got: (col.len(), ncols),
                });
            }
            data.extend_from_slice(col.as_slice());
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Assemble a matrix from nested rows.
    ///
    /// Fails with a dimension error if the rows differ in length.
    pub fn from_nested<R: AsRef<[C64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        for row in rows {
            let len = row.as_ref().len();
            if len != ncols {
                return Err(LinalgError::DimensionMismatch {
                    expected: (nrows, ncols),
                    got: (nrows, len),
                });
            }
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]))
    }

    /// Square diagonal matrix with `v` on the diagonal.
    pub fn from_diag(v: &Vector) -> Self {
        let n = v.len();
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = v[i];
        }
        m
    }

    /// Permutation matrix whose column `i` is the basis vector `e_{order[i]}`.
    ///
    /// For a square `A`, `Pᵀ·A·P` reorders the diagonal so that position
    /// `i` holds `A[order[i], order[i]]`, and `A·P` reorders columns.
    ///
    /// Panics if `order` is not a permutation of `0..order.len()`.
    pub fn permutation(order: &[usize]) -> Self {
        let n = order.len();
        let mut seen = vec![false; n];
        let mut p = Self::zeros(n, n);
        for (col, &row) in order.iter().enumerate() {
            assert!(row < n && !seen[row], "order is not a permutation of 0..{}", n);
            seen[row] = true;
            p[(row, col)] = C64::one();
        }
        p
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl Matrix {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Column-major view of the backing store.
    #[inline]
    pub fn as_slice(&self) -> &[C64] {
        &self.data
    }

    /// Contiguous slice of column `col`, starting at `row_start`.
    #[inline]
    pub(crate) fn col_slice(&self, col: usize, row_start: usize) -> &[C64] {
        let start = col * self.nrows;
        &self.data[start + row_start..start + self.nrows]
    }

    /// Copy of column `col`.
    pub fn column(&self, col: usize) -> Vector {
        assert!(col < self.ncols, "column {} out of bounds for {} columns", col, self.ncols);
        Vector::from_slice(self.col_slice(col, 0))
    }

    /// Copy of row `row`.
    pub fn row(&self, row: usize) -> Vector {
        assert!(row < self.nrows, "row {} out of bounds for {} rows", row, self.nrows);
        Vector::from_vec((0..self.ncols).map(|j| self[(row, j)]).collect())
    }

    /// All columns as vectors.
    pub fn columns(&self) -> Vec<Vector> {
        (0..self.ncols).map(|j| self.column(j)).collect()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = C64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &C64 {
        debug_assert!(row < self.nrows && col < self.ncols);
        &self.data[col * self.nrows + row]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut C64 {
        debug_assert!(row < self.nrows && col < self.ncols);
        &mut self.data[col * self.nrows + row]
    }
}
