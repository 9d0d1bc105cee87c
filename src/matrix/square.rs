use num_traits::Zero;

use crate::traits::{ComplexScalar, C64, ROUNDING_CUTOFF};

use super::vector::Vector;
use super::Matrix;

/// Entries below this modulus count as zero for the triangle predicates.
pub(crate) const TRIANGLE_TOLERANCE: f64 = 100.0 * ROUNDING_CUTOFF;

impl Matrix {
    /// Transpose (no conjugation).
    pub fn transpose(&self) -> Matrix {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Conjugate transpose `Aᴴ`.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let a = Matrix::from_rows(1, 2, &[c64(1.0, 2.0), c64(0.0, -1.0)]);
    /// let ah = a.adjoint();
    /// assert_eq!(ah.shape(), (2, 1));
    /// assert_eq!(ah[(0, 0)], c64(1.0, -2.0));
    /// assert_eq!(ah[(1, 0)], c64(0.0, 1.0));
    /// ```
    pub fn adjoint(&self) -> Matrix {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    /// Elementwise conjugate.
    pub fn conj(&self) -> Matrix {
        self.map(|z| z.conj())
    }

    /// Apply `f` to every element.
    pub fn map(&self, f: impl Fn(C64) -> C64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&z| f(z)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Sum of diagonal elements.
    pub fn trace(&self) -> C64 {
        (0..self.nrows.min(self.ncols)).fold(C64::zero(), |acc, i| acc + self[(i, i)])
    }

    /// The main diagonal as a vector.
    pub fn diag(&self) -> Vector {
        Vector::from_vec((0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect())
    }

    /// Copy with every entry snapped to exact zero when both of its parts
    /// are below the rounding cutoff.
    ///
    /// The predicates below never modify the matrix; call this when
    /// below-tolerance noise should actually be removed.
    pub fn sanitized(&self) -> Matrix {
        self.map(|z| z.snap())
    }

    /// Whether `A == Aᴴ` within the rounding tolerance.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let h = Matrix::from_rows(2, 2, &[
    ///     c64(2.0, 0.0), c64(1.0, -1.0),
    ///     c64(1.0, 1.0), c64(3.0, 0.0),
    /// ]);
    /// assert!(h.is_hermitian());
    /// assert!(!Matrix::from_real_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]).is_hermitian());
    /// ```
    pub fn is_hermitian(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for j in 0..n {
            for i in j..n {
                if !self[(i, j)].approx_eq(self[(j, i)].conj()) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether every entry below the diagonal is negligible
    /// (modulus at most `100 × ROUNDING_CUTOFF`).
    pub fn is_upper_triangular(&self) -> bool {
        for j in 0..self.ncols {
            for i in (j + 1)..self.nrows {
                if self[(i, j)].modulus() > TRIANGLE_TOLERANCE {
                    return false;
                }
            }
        }
        true
    }

    /// Whether every entry above the diagonal is negligible
    /// (modulus at most `100 × ROUNDING_CUTOFF`).
    pub fn is_lower_triangular(&self) -> bool {
        for j in 0..self.ncols {
            for i in 0..j.min(self.nrows) {
                if self[(i, j)].modulus() > TRIANGLE_TOLERANCE {
                    return false;
                }
            }
        }
        true
    }

    /// Whether every entry two or more rows below the diagonal is below
    /// the rounding cutoff.
    pub fn is_hessenberg(&self) -> bool {
        for j in 0..self.ncols {
            for i in (j + 2)..self.nrows {
                if self[(i, j)].modulus() > ROUNDING_CUTOFF {
                    return false;
                }
            }
        }
        true
    }

    /// Both upper and lower triangular.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.is_upper_triangular() && self.is_lower_triangular()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::c64;

    #[test]
    fn transpose_vs_adjoint() {
        let a = Matrix::from_rows(2, 2, &[c64(1.0, 1.0), c64(2.0, 0.0), c64(0.0, 3.0), c64(4.0, -1.0)]);
        let t = a.transpose();
        let h = a.adjoint();
        assert_eq!(t[(0, 1)], c64(0.0, 3.0));
        assert_eq!(h[(0, 1)], c64(0.0, -3.0));
        assert_eq!(h.adjoint(), a);
    }

    #[test]
    fn trace_and_diag() {
        let a = Matrix::from_real_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.trace(), c64(5.0, 0.0));
        assert_eq!(a.diag(), Vector::from_real(&[1.0, 4.0]));
    }

    #[test]
    fn hermitian_predicate() {
        let a = Matrix::from_rows(2, 2, &[c64(1.0, 0.0), c64(2.0, 3.0), c64(2.0, -3.0), c64(5.0, 0.0)]);
        assert!(a.is_hermitian());
        let b = Matrix::from_rows(2, 2, &[c64(1.0, 0.0), c64(2.0, 3.0), c64(2.0, 3.0), c64(5.0, 0.0)]);
        assert!(!b.is_hermitian());
        assert!(!Matrix::zeros(2, 3).is_hermitian());
    }

    #[test]
    fn hermitian_requires_real_diagonal() {
        let a = Matrix::from_rows(1, 1, &[c64(1.0, 1.0)]);
        assert!(!a.is_hermitian());
    }

    #[test]
    fn triangle_predicates_are_pure() {
        let a = Matrix::from_rows(2, 2, &[c64(1.0, 0.0), c64(1e-12, 0.0), c64(0.0, 0.0), c64(2.0, 0.0)]);
        let before = a.clone();
        assert!(a.is_upper_triangular());
        assert!(a.is_lower_triangular());
        assert!(a.is_diagonal());
        assert_eq!(a, before);
        assert_eq!(a.sanitized()[(0, 1)], C64::zero());
    }

    #[test]
    fn triangle_predicates_reject() {
        let upper = Matrix::from_real_rows(2, 2, &[1.0, 2.0, 0.0, 3.0]);
        assert!(upper.is_upper_triangular());
        assert!(!upper.is_lower_triangular());
        assert!(!upper.transpose().is_upper_triangular());
    }

    #[test]
    fn hessenberg_predicate() {
        let h = Matrix::from_real_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0]);
        assert!(h.is_hessenberg());
        let not_h = Matrix::from_real_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 7.0, 8.0]);
        assert!(!not_h.is_hessenberg());
    }
}
