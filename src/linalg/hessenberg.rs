use num_traits::Zero;

use crate::linalg::householder::{householder_reflector, tail_is_negligible};
use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::traits::C64;
use crate::Matrix;

/// Unitary similarity reduction to upper Hessenberg form: `A = Q·H·Qᴴ`.
///
/// Every entry two or more rows below the diagonal of `H` is exactly zero.
/// For Hermitian input `H` is tridiagonal up to rounding.
///
/// ```
/// use zmatrix::Matrix;
///
/// let a = Matrix::from_real_rows(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, 0.0, 5.0]);
/// let hess = a.hessenberg().unwrap();
/// assert!(hess.h().is_hessenberg());
/// let back = &(hess.q() * hess.h()) * &hess.q().adjoint();
/// assert!((&back - &a).frobenius_norm() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HessenbergDecomposition {
    h: Matrix,
    q: Matrix,
}

impl HessenbergDecomposition {
    /// Reduce a square matrix. Non-square input is a dimension error.
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        let n = a.require_square()?;
        let mut h = a.clone();
        let mut q = Matrix::eye(n);

        for k in 0..n.saturating_sub(2) {
            let col = h.col_slice(k, k + 1);
            if !tail_is_negligible(col) {
                // Reflectors are Hermitian, so P·H·P is the similarity P·H·Pᴴ.
                let p = householder_reflector(&Vector::from_slice(col))?.expand(k + 1);
                h = &(&p * &h) * &p;
                q = &q * &p;
            }
            for i in (k + 2)..n {
                h[(i, k)] = C64::zero();
            }
        }

        Ok(Self { h, q })
    }

    /// The Hessenberg factor.
    #[inline]
    pub fn h(&self) -> &Matrix {
        &self.h
    }

    /// The accumulated unitary similarity.
    #[inline]
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// Consume the decomposition, returning `(H, Q)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.h, self.q)
    }
}

impl Matrix {
    /// Hessenberg reduction. See [`HessenbergDecomposition`].
    pub fn hessenberg(&self) -> Result<HessenbergDecomposition, LinalgError> {
        HessenbergDecomposition::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::c64;

    const TOL: f64 = 1e-10;

    fn check_hessenberg(a: &Matrix) -> HessenbergDecomposition {
        let hess = a.hessenberg().unwrap();
        let (h, q) = (hess.h(), hess.q());
        let n = a.nrows();
        for j in 0..n {
            for i in (j + 2)..n {
                assert_eq!(h[(i, j)], C64::zero(), "H[({},{})] not zero", i, j);
            }
        }
        let unitary = (&(&q.adjoint() * q) - &Matrix::eye(n)).frobenius_norm();
        assert!(unitary < TOL, "QᴴQ - I = {}", unitary);
        let sim = (&(&(&q.adjoint() * a) * q) - h).frobenius_norm();
        assert!(sim < TOL, "QᴴAQ - H = {}", sim);
        hess
    }

    #[test]
    fn hessenberg_real_4x4() {
        let a = Matrix::from_real_rows(
            4,
            4,
            &[
                4.0, 1.0, -2.0, 2.0,
                1.0, 2.0, 0.0, 1.0,
                -2.0, 0.0, 3.0, -2.0,
                2.0, 1.0, -2.0, -1.0,
            ],
        );
        let hess = check_hessenberg(&a);
        // symmetric input stays symmetric: tridiagonal up to rounding
        let h = hess.h();
        assert!(h[(0, 2)].norm() < TOL);
        assert!(h[(0, 3)].norm() < TOL);
        assert!(h[(1, 3)].norm() < TOL);
    }

    #[test]
    fn hessenberg_nonsymmetric() {
        let a = Matrix::from_fn(5, 5, |i, j| c64((i * 5 + j) as f64 + 1.0, 0.0) + c64(0.0, (i as f64) - (j as f64)));
        check_hessenberg(&a);
    }

    #[test]
    fn hessenberg_hermitian_complex() {
        let a = Matrix::from_rows(
            3,
            3,
            &[
                c64(2.0, 0.0), c64(1.0, -1.0), c64(0.0, 2.0),
                c64(1.0, 1.0), c64(3.0, 0.0), c64(1.0, 0.0),
                c64(0.0, -2.0), c64(1.0, 0.0), c64(1.0, 0.0),
            ],
        );
        assert!(a.is_hermitian());
        let hess = check_hessenberg(&a);
        assert!(hess.h().is_hermitian());
    }

    #[test]
    fn already_hessenberg_is_untouched() {
        let a = Matrix::from_real_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0]);
        let hess = check_hessenberg(&a);
        assert_eq!(hess.h(), &a);
        assert_eq!(hess.q(), &Matrix::eye(3));
    }

    #[test]
    fn negligible_tail_is_cleared() {
        // column 0 is already reduced up to noise below the cutoff
        let mut a = Matrix::from_real_rows(
            4,
            4,
            &[
                2.0, 1.0, 0.5, 1.0,
                3.0, 1.0, 2.0, 0.0,
                0.0, 4.0, 1.0, 2.0,
                0.0, 1.0, 3.0, 5.0,
            ],
        );
        a[(2, 0)] = c64(3e-13, 0.0);
        a[(3, 0)] = c64(0.0, -2e-13);
        let hess = check_hessenberg(&a);
        assert_eq!(hess.h()[(2, 0)], C64::zero());
        assert_eq!(hess.h()[(3, 0)], C64::zero());
        assert!(hess.h().is_hessenberg());
    }

    #[test]
    fn small_sizes() {
        for n in 0..3 {
            let a = Matrix::from_fn(n, n, |i, j| c64((i + 2 * j) as f64, 0.0));
            let hess = a.hessenberg().unwrap();
            assert_eq!(hess.h(), &a);
            assert_eq!(hess.q(), &Matrix::eye(n));
        }
    }

    #[test]
    fn non_square_rejected() {
        assert!(matches!(
            Matrix::zeros(2, 3).hessenberg().unwrap_err(),
            LinalgError::DimensionMismatch { .. }
        ));
    }
}
