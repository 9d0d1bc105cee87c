use num_traits::Zero;
use once_cell::sync::OnceCell;

use crate::linalg::householder::{householder_reflector, tail_is_negligible};
use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::traits::{ComplexScalar, C64};
use crate::Matrix;

/// Householder QR factorization `A = QR` of an `m×n` matrix with `m ≥ n`.
///
/// `Q` is the full `m×m` unitary factor and `R` is `m×n` upper triangular.
/// Each step builds a reflector for the trailing part of one column, applies
/// it to the trailing block of `R`, and accumulates the embedded reflector
/// into `Qᴴ`. Columns whose sub-diagonal part is already negligible are
/// left alone, so zero columns and already-triangular input are accepted.
///
/// # Example
///
/// ```
/// use zmatrix::Matrix;
///
/// let a = Matrix::from_real_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let qr = a.qr().unwrap();
/// assert_eq!(qr.q().shape(), (3, 3));
/// assert_eq!(qr.r().shape(), (3, 2));
/// assert!(qr.r().is_upper_triangular());
/// assert!((&(qr.q() * qr.r()) - &a).frobenius_norm() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    q: Matrix,
    r: Matrix,
}

impl QrDecomposition {
    /// Factor `a`. Fails with a dimension error if `a` has more columns
    /// than rows.
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, n),
                got: (m, n),
            });
        }

        let mut r = a.clone();
        let mut qt = Matrix::eye(m);

        for k in 0..n.min(m.saturating_sub(1)) {
            let col = r.col_slice(k, k);
            if tail_is_negligible(col) {
                continue;
            }

            let h = householder_reflector(&Vector::from_slice(col))?;
            let mut trailing = &h * &r.block(k, k, m - k, n - k);
            for i in 1..(m - k) {
                trailing[(i, 0)] = C64::zero();
            }
            r.set_block(k, k, &trailing);

            qt = &h.expand(k) * &qt;
        }

        Ok(Self { q: qt.adjoint(), r })
    }

    /// The `m×m` unitary factor.
    #[inline]
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// The `m×n` upper-triangular factor.
    #[inline]
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// Consume the decomposition, returning `(Q, R)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.q, self.r)
    }

    /// Solve `Ax = b` by `y = Qᴴb` and back-substitution on `R`.
    ///
    /// For an overdetermined system this is the least-squares solution.
    /// Fails with [`LinalgError::Singular`] when a diagonal entry of `R` is
    /// below the rounding cutoff.
    pub fn solve(&self, b: &Vector) -> Result<Vector, LinalgError> {
        let m = self.q.nrows();
        if b.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: (m, 1),
                got: (b.len(), 1),
            });
        }

        let y = &self.q.adjoint() * b;
        let n = self.r.ncols();
        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let pivot = self.r[(i, i)];
            if pivot.is_negligible() {
                return Err(LinalgError::Singular);
            }
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.r[(i, j)] * x[j];
            }
            x[i] = sum / pivot;
        }
        Ok(x)
    }
}

impl Matrix {
    /// QR decomposition. See [`QrDecomposition`].
    pub fn qr(&self) -> Result<QrDecomposition, LinalgError> {
        QrDecomposition::new(self)
    }

    /// Solve `Ax = b` via QR.
    ///
    /// ```
    /// use zmatrix::{Matrix, Vector};
    ///
    /// let a = Matrix::from_real_rows(2, 2, &[2.0, 1.0, 1.0, 3.0]);
    /// let b = Vector::from_real(&[3.0, 5.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[0].re - 0.8).abs() < 1e-12);
    /// assert!((x[1].re - 1.4).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector) -> Result<Vector, LinalgError> {
        QrDecomposition::new(self)?.solve(b)
    }
}

// ── Cached form ─────────────────────────────────────────────────────

/// A matrix paired with a write-once QR factorization.
///
/// [`orthogonalize`](Self::orthogonalize) computes the factors on first use
/// and returns the cached ones afterwards. Reading `q()` or `r()` before
/// that fails with [`LinalgError::NotFactorized`]. The cell is `Sync`, so a
/// `LazyQr` can be shared across threads.
///
/// ```
/// use zmatrix::{LazyQr, Matrix, Vector};
/// use zmatrix::linalg::LinalgError;
///
/// let lazy = LazyQr::new(Matrix::eye(2));
/// assert_eq!(lazy.q().unwrap_err(), LinalgError::NotFactorized);
///
/// lazy.orthogonalize().unwrap();
/// assert!(lazy.is_factorized());
/// let x = lazy.solve(&Vector::from_real(&[3.0, 4.0])).unwrap();
/// assert_eq!(x, Vector::from_real(&[3.0, 4.0]));
/// ```
#[derive(Debug)]
pub struct LazyQr {
    matrix: Matrix,
    factors: OnceCell<QrDecomposition>,
}

impl LazyQr {
    /// Wrap a matrix without factorizing it.
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            factors: OnceCell::new(),
        }
    }

    /// The wrapped matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Compute the factorization if it has not been computed yet.
    pub fn orthogonalize(&self) -> Result<&QrDecomposition, LinalgError> {
        self.factors
            .get_or_try_init(|| QrDecomposition::new(&self.matrix))
    }

    /// Whether the factors have been computed.
    #[inline]
    pub fn is_factorized(&self) -> bool {
        self.factors.get().is_some()
    }

    /// The unitary factor, or [`LinalgError::NotFactorized`] before
    /// [`orthogonalize`](Self::orthogonalize).
    pub fn q(&self) -> Result<&Matrix, LinalgError> {
        self.factors
            .get()
            .map(|f| f.q())
            .ok_or(LinalgError::NotFactorized)
    }

    /// The upper-triangular factor, or [`LinalgError::NotFactorized`].
    pub fn r(&self) -> Result<&Matrix, LinalgError> {
        self.factors
            .get()
            .map(|f| f.r())
            .ok_or(LinalgError::NotFactorized)
    }

    /// `(Q, R)`, factorizing first if needed.
    pub fn qr(&self) -> Result<(&Matrix, &Matrix), LinalgError> {
        let f = self.orthogonalize()?;
        Ok((f.q(), f.r()))
    }

    /// Solve `Ax = b`, factorizing first if needed.
    pub fn solve(&self, b: &Vector) -> Result<Vector, LinalgError> {
        self.orthogonalize()?.solve(b)
    }
}
