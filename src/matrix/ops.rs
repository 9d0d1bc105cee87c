use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::traits::C64;

use super::vector::Vector;
use super::Matrix;

// ── Element-wise addition ───────────────────────────────────────────

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} + {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Matrix {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a + b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Matrix) -> Matrix {
        &self + &rhs
    }
}

impl Add<&Matrix> for Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        &self + rhs
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} += {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl Sub<&Matrix> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Matrix {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a - b).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Matrix) -> Matrix {
        &self - &rhs
    }
}

impl Sub<&Matrix> for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        &self - rhs
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} -= {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a -= b;
        }
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-C64::new(1.0, 0.0))
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![C64::zero(); m * p];
        // Column-major: out[:, j] = Σ_k self[:, k] * rhs[k, j]
        for j in 0..p {
            let out = &mut data[j * m..(j + 1) * m];
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                if b_kj.is_zero() {
                    continue;
                }
                let a_col = &self.data[k * m..(k + 1) * m];
                for (o, &a) in out.iter_mut().zip(a_col.iter()) {
                    *o += a * b_kj;
                }
            }
        }
        Matrix { data, nrows: m, ncols: p }
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl Mul<&Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        &self * rhs
    }
}

impl Mul<Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self * &rhs
    }
}

// ── Matrix-vector product ───────────────────────────────────────────

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        assert_eq!(
            self.ncols,
            rhs.len(),
            "dimension mismatch: {}x{} * vector of length {}",
            self.nrows, self.ncols, rhs.len(),
        );
        let mut out = vec![C64::zero(); self.nrows];
        for k in 0..self.ncols {
            let x = rhs[k];
            for (o, &a) in out.iter_mut().zip(self.col_slice(k, 0).iter()) {
                *o += a * x;
            }
        }
        Vector::from_vec(out)
    }
}

impl Mul<Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self * &rhs
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl Mul<C64> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: C64) -> Matrix {
        self.scale(rhs)
    }
}

impl Mul<C64> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: C64) -> Matrix {
        self.scale(rhs)
    }
}

// ── Fallible forms ──────────────────────────────────────────────────

impl Matrix {
    /// Multiply every element by `c`.
    pub fn scale(&self, c: C64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&x| x * c).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// `self + rhs`, or a dimension error if the shapes differ.
    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.require_shape(rhs.shape())?;
        Ok(self + rhs)
    }

    /// `self - rhs`, or a dimension error if the shapes differ.
    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.require_shape(rhs.shape())?;
        Ok(self - rhs)
    }

    /// `self * rhs`, or a dimension error if the inner dimensions differ.
    ///
    /// ```
    /// use zmatrix::Matrix;
    /// let a = Matrix::zeros(2, 3);
    /// assert!(a.checked_mul(&Matrix::zeros(3, 1)).is_ok());
    /// assert!(a.checked_mul(&Matrix::zeros(2, 1)).is_err());
    /// ```
    pub fn checked_mul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: rhs.shape(),
            });
        }
        Ok(self * rhs)
    }

    /// `self * v`, or a dimension error if `v.len() != ncols`.
    pub fn checked_mul_vector(&self, v: &Vector) -> Result<Vector, LinalgError> {
        if self.ncols != v.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (v.len(), 1),
            });
        }
        Ok(self * v)
    }

    pub(crate) fn require_shape(&self, shape: (usize, usize)) -> Result<(), LinalgError> {
        if self.shape() != shape {
            return Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: shape,
            });
        }
        Ok(())
    }

    pub(crate) fn require_square(&self) -> Result<usize, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.nrows, self.nrows),
                got: self.shape(),
            });
        }
        Ok(self.nrows)
    }
}
