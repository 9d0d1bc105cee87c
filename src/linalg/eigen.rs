use std::cmp::Ordering;

use num_traits::Zero;

use crate::linalg::hessenberg::HessenbergDecomposition;
use crate::linalg::qr::QrDecomposition;
use crate::linalg::{EigenConfig, LinalgError};
use crate::traits::{ComplexScalar, C64};
use crate::Matrix;

/// Eigendecomposition `A = Q·D·Qᴴ` of a Hermitian matrix.
///
/// `D` is real diagonal with eigenvalues sorted by descending modulus (ties
/// keep the order in which they were isolated); column `i` of `Q` is the
/// unit eigenvector for `D[i,i]`.
///
/// The default solver reduces `A` to Hessenberg form, then runs shifted QR
/// iteration on the trailing entry, deflating one eigenvalue at a time.
/// [`power_method`](Self::power_method) and
/// [`hess_power_method`](Self::hess_power_method) run plain unshifted QR
/// iteration instead and are mainly useful for comparison.
///
/// # Example
///
/// ```
/// use zmatrix::Matrix;
///
/// let a = Matrix::from_real_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
/// let eig = a.qr_shift_eigs().unwrap();
/// let vals = eig.eigenvalues();
/// assert!((vals[0] - 3.0).abs() < 1e-10);
/// assert!((vals[1] - 1.0).abs() < 1e-10);
///
/// let q = eig.eigenvectors();
/// let residual = &(&a * q) - &(q * eig.d());
/// assert!(residual.frobenius_norm() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HermitianEigen {
    d: Matrix,
    q: Matrix,
    iterations: usize,
}

impl HermitianEigen {
    /// Shifted-QR eigendecomposition with the default [`EigenConfig`].
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        Self::with_config(a, &EigenConfig::default())
    }

    /// Shifted-QR eigendecomposition.
    ///
    /// Fails with a dimension error for non-square input,
    /// [`LinalgError::NotHermitian`] when `A ≠ Aᴴ`, and
    /// [`LinalgError::ConvergenceFailure`] once `config.max_iterations`
    /// QR sweeps have been spent across all deflation levels.
    pub fn with_config(a: &Matrix, config: &EigenConfig) -> Result<Self, LinalgError> {
        let n = require_hermitian(a)?;
        if n == 0 {
            return Ok(Self::empty());
        }

        let (h, q0) = HessenbergDecomposition::new(a)?.into_parts();
        let mut iterations = 0;
        let (d, q) = deflate(h, config, &mut iterations)?;
        log::debug!("shifted QR converged for {}x{} matrix after {} iterations", n, n, iterations);

        Ok(Self::sorted(d, &q0 * &q, iterations))
    }

    /// Unshifted QR iteration on `A` itself.
    ///
    /// Iterates `D ← R·Q` until `D` is diagonal within `100 × ROUNDING_CUTOFF`,
    /// or fails after `config.max_iterations` sweeps. Convergence is linear
    /// in the ratio of neighbouring eigenvalue moduli, so matrices with
    /// eigenvalues `λ` and `−λ` never converge.
    pub fn power_method(a: &Matrix, config: &EigenConfig) -> Result<Self, LinalgError> {
        let n = require_hermitian(a)?;
        Self::unshifted(a.clone(), Matrix::eye(n), config)
    }

    /// Unshifted QR iteration on the Hessenberg form of `A`.
    pub fn hess_power_method(a: &Matrix, config: &EigenConfig) -> Result<Self, LinalgError> {
        require_hermitian(a)?;
        let (h, q0) = HessenbergDecomposition::new(a)?.into_parts();
        Self::unshifted(h, q0, config)
    }

    fn unshifted(mut d: Matrix, mut q: Matrix, config: &EigenConfig) -> Result<Self, LinalgError> {
        let mut iterations = 0;
        while !d.is_diagonal() {
            if iterations >= config.max_iterations {
                return Err(LinalgError::ConvergenceFailure { iterations });
            }
            iterations += 1;
            let (qk, rk) = QrDecomposition::new(&d)?.into_parts();
            d = &rk * &qk;
            q = &q * &qk;
        }
        log::debug!("unshifted QR converged after {} iterations", iterations);

        let d = Matrix::from_fn(d.nrows(), d.ncols(), |i, j| {
            if i == j {
                C64::from_real(d[(i, i)].re)
            } else {
                C64::zero()
            }
        });
        Ok(Self::sorted(d, q, iterations))
    }

    fn empty() -> Self {
        Self {
            d: Matrix::zeros(0, 0),
            q: Matrix::zeros(0, 0),
            iterations: 0,
        }
    }

    /// Reorder so that `|d₀| ≥ |d₁| ≥ …`, applying the same permutation to
    /// the eigenvector columns.
    fn sorted(d: Matrix, q: Matrix, iterations: usize) -> Self {
        let mut order: Vec<usize> = (0..d.nrows()).collect();
        order.sort_by(|&i, &j| {
            d[(j, j)]
                .modulus()
                .partial_cmp(&d[(i, i)].modulus())
                .unwrap_or(Ordering::Equal)
        });
        let p = Matrix::permutation(&order);
        Self {
            d: &(&p.transpose() * &d) * &p,
            q: &q * &p,
            iterations,
        }
    }

    /// Real diagonal matrix of eigenvalues.
    #[inline]
    pub fn d(&self) -> &Matrix {
        &self.d
    }

    /// Unitary matrix whose columns are the eigenvectors.
    #[inline]
    pub fn eigenvectors(&self) -> &Matrix {
        &self.q
    }

    /// Eigenvalues, descending by modulus.
    pub fn eigenvalues(&self) -> Vec<f64> {
        (0..self.d.nrows()).map(|i| self.d[(i, i)].re).collect()
    }

    /// QR sweeps performed.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Matrix {
    /// Shifted-QR Hermitian eigendecomposition. See [`HermitianEigen`].
    pub fn qr_shift_eigs(&self) -> Result<HermitianEigen, LinalgError> {
        HermitianEigen::new(self)
    }

    /// Unshifted QR iteration on the raw matrix, default [`EigenConfig`].
    pub fn power_method(&self) -> Result<HermitianEigen, LinalgError> {
        HermitianEigen::power_method(self, &EigenConfig::default())
    }

    /// Unshifted QR iteration after Hessenberg reduction, default
    /// [`EigenConfig`].
    pub fn hess_power_method(&self) -> Result<HermitianEigen, LinalgError> {
        HermitianEigen::hess_power_method(self, &EigenConfig::default())
    }
}

fn require_hermitian(a: &Matrix) -> Result<usize, LinalgError> {
    let n = a.require_square()?;
    if !a.is_hermitian() {
        return Err(LinalgError::NotHermitian);
    }
    Ok(n)
}

/// Eigenvalue of the trailing 2×2 block nearest its bottom-right entry.
///
/// Only the real parts of the diagonal are used; for Hermitian input the
/// imaginary parts are rounding noise.
fn wilkinson_shift(h: &Matrix) -> C64 {
    let n = h.nrows();
    let a = h[(n - 2, n - 2)].re;
    let c = h[(n - 1, n - 1)].re;
    let b2 = h[(n - 1, n - 2)].norm_sqr();

    let delta = (a - c) / 2.0;
    let denom = delta.abs() + (delta * delta + b2).sqrt();
    if denom == 0.0 {
        return C64::from_real(c);
    }
    let sign = if delta >= 0.0 { 1.0 } else { -1.0 };
    C64::from_real(c - sign * b2 / denom)
}

/// Isolate the bottom-right eigenvalue of the Hessenberg matrix `h`, then
/// recurse on the leading block.
///
/// Returns `(D, Q)` with `h = Q·D·Qᴴ` and `D` real diagonal, unsorted.
fn deflate(
    mut h: Matrix,
    config: &EigenConfig,
    iterations: &mut usize,
) -> Result<(Matrix, Matrix), LinalgError> {
    let n = h.nrows();
    if n == 1 {
        let d = Matrix::from_fn(1, 1, |_, _| C64::from_real(h[(0, 0)].re));
        return Ok((d, Matrix::eye(1)));
    }

    let eye = Matrix::eye(n);
    let mut q = eye.clone();
    let mut sub = h[(n - 1, n - 2)].modulus();

    while sub >= config.tolerance {
        if *iterations >= config.max_iterations {
            return Err(LinalgError::ConvergenceFailure {
                iterations: *iterations,
            });
        }
        *iterations += 1;

        let mu = wilkinson_shift(&h);
        let shift = eye.scale(mu);
        let (qk, rk) = QrDecomposition::new(&(&h - &shift))?.into_parts();
        h = &(&rk * &qk) + &shift;
        q = &q * &qk;

        let next = h[(n - 1, n - 2)].modulus();
        if (sub - next).abs() < config.tolerance {
            // stagnated
            break;
        }
        sub = next;
    }

    h[(n - 1, n - 2)] = C64::zero();
    h[(n - 2, n - 1)] = C64::zero();
    let lambda = h[(n - 1, n - 1)].re;
    log::trace!("deflated eigenvalue {} at size {}", lambda, n);

    let (d_inner, q_inner) = deflate(h.top_left(n - 1, n - 1), config, iterations)?;
    let mut d = d_inner.expand_bottom();
    d[(n - 1, n - 1)] = C64::from_real(lambda);
    Ok((d, &q * &q_inner.expand_bottom()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::c64;

    const TOL: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn check_eigen(a: &Matrix, eig: &HermitianEigen) {
        check_eigen_tol(a, eig, TOL);
    }

    // Unshifted iteration stops once off-diagonals drop below 1e-8, so its
    // residual is only that good.
    fn check_eigen_tol(a: &Matrix, eig: &HermitianEigen, tol: f64) {
        let n = a.nrows();
        let (d, q) = (eig.d(), eig.eigenvectors());
        let residual = (&(a * q) - &(q * d)).frobenius_norm();
        assert!(residual < tol, "AQ - QD = {}", residual);
        let unitary = (&(&q.adjoint() * q) - &Matrix::eye(n)).frobenius_norm();
        assert!(unitary < TOL, "QᴴQ - I = {}", unitary);
        assert!(d.is_diagonal());
        for i in 0..n {
            assert_eq!(d[(i, i)].im, 0.0);
        }
        let vals = eig.eigenvalues();
        for w in vals.windows(2) {
            assert!(w[0].abs() >= w[1].abs(), "not sorted: {:?}", vals);
        }
    }

    #[test]
    fn wilkinson_shift_symmetric_2x2() {
        let h = Matrix::from_real_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        assert_eq!(wilkinson_shift(&h), c64(1.0, 0.0));
        let diag = Matrix::from_real_rows(2, 2, &[5.0, 0.0, 0.0, 5.0]);
        assert_eq!(wilkinson_shift(&diag), c64(5.0, 0.0));
    }

    #[test]
    fn eigen_2x2() {
        let a = Matrix::from_real_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let eig = a.qr_shift_eigs().unwrap();
        check_eigen(&a, &eig);
        let vals = eig.eigenvalues();
        assert_near(vals[0], 3.0, TOL, "λ0");
        assert_near(vals[1], 1.0, TOL, "λ1");

        let q = eig.eigenvectors();
        assert_near(q[(0, 0)].norm(), q[(1, 0)].norm(), TOL, "v0 ∝ [1,1]");
        assert_near((q[(0, 0)] - q[(1, 0)]).norm(), 0.0, TOL, "v0 ∝ [1,1]");
        assert_near((q[(0, 1)] + q[(1, 1)]).norm(), 0.0, TOL, "v1 ∝ [1,-1]");
    }

    #[test]
    fn eigen_identity() {
        let a = Matrix::eye(3);
        let eig = a.qr_shift_eigs().unwrap();
        assert_eq!(eig.eigenvalues(), vec![1.0, 1.0, 1.0]);
        assert_eq!(eig.iterations(), 0);
        assert_eq!(eig.eigenvectors(), &Matrix::eye(3));
    }

    #[test]
    fn eigen_tridiagonal_4x4() {
        let a = Matrix::from_real_rows(
            4,
            4,
            &[
                2.0, -1.0, 0.0, 0.0,
                -1.0, 2.0, -1.0, 0.0,
                0.0, -1.0, 2.0, -1.0,
                0.0, 0.0, -1.0, 2.0,
            ],
        );
        let eig = a.qr_shift_eigs().unwrap();
        check_eigen(&a, &eig);
        // 2 - 2cos(kπ/5), k = 4, 3, 2, 1
        let vals = eig.eigenvalues();
        for (i, k) in [4.0, 3.0, 2.0, 1.0].iter().enumerate() {
            let expected = 2.0 - 2.0 * (k * std::f64::consts::PI / 5.0).cos();
            assert_near(vals[i], expected, TOL, &format!("λ{}", i));
        }
    }

    #[test]
    fn eigen_negative_eigenvalues_sort_by_modulus() {
        let a = Matrix::from_real_rows(3, 3, &[-5.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 3.0]);
        let eig = a.qr_shift_eigs().unwrap();
        check_eigen(&a, &eig);
        assert_eq!(eig.eigenvalues(), vec![-5.0, 3.0, 1.0]);
    }

    #[test]
    fn eigen_hermitian_complex() {
        let a = Matrix::from_rows(
            3,
            3,
            &[
                c64(2.0, 0.0), c64(1.0, -1.0), c64(0.0, 2.0),
                c64(1.0, 1.0), c64(3.0, 0.0), c64(1.0, 0.0),
                c64(0.0, -2.0), c64(1.0, 0.0), c64(1.0, 0.0),
            ],
        );
        let eig = a.qr_shift_eigs().unwrap();
        check_eigen(&a, &eig);
        let sum: f64 = eig.eigenvalues().iter().sum();
        assert_near(sum, 6.0, TOL, "trace");
    }

    #[test]
    fn eigen_opposite_pair() {
        let a = Matrix::from_real_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let eig = a.qr_shift_eigs().unwrap();
        check_eigen(&a, &eig);
        let vals = eig.eigenvalues();
        assert_near(vals[0].abs(), 1.0, TOL, "|λ0|");
        assert_near(vals[0] + vals[1], 0.0, TOL, "λ0 + λ1");
    }

    #[test]
    fn eigen_1x1_and_empty() {
        let a = Matrix::from_real_rows(1, 1, &[-7.0]);
        let eig = a.qr_shift_eigs().unwrap();
        assert_eq!(eig.eigenvalues(), vec![-7.0]);
        assert_eq!(eig.eigenvectors(), &Matrix::eye(1));

        let eig = Matrix::zeros(0, 0).qr_shift_eigs().unwrap();
        assert!(eig.eigenvalues().is_empty());
    }

    #[test]
    fn eigen_rejects_non_hermitian() {
        let a = Matrix::from_real_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.qr_shift_eigs().unwrap_err(), LinalgError::NotHermitian);
        assert_eq!(a.power_method().unwrap_err(), LinalgError::NotHermitian);
        assert_eq!(a.hess_power_method().unwrap_err(), LinalgError::NotHermitian);
        assert!(matches!(
            Matrix::zeros(2, 3).qr_shift_eigs().unwrap_err(),
            LinalgError::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn eigen_iteration_cap() {
        let a = Matrix::from_real_rows(3, 3, &[4.0, 1.0, 2.0, 1.0, 3.0, 0.0, 2.0, 0.0, 5.0]);
        let cfg = EigenConfig::default().with_max_iterations(0);
        assert_eq!(
            HermitianEigen::with_config(&a, &cfg).unwrap_err(),
            LinalgError::ConvergenceFailure { iterations: 0 }
        );
    }

    #[test]
    fn deflate_stops_when_subdiagonal_stalls() {
        let h = Matrix::from_real_rows(3, 3, &[1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        let cfg = EigenConfig::new(0.5, 100);

        // One sweep takes the last subdiagonal from 1 to 1/√2: a change
        // below the tolerance while the entry itself is still above it.
        let mu = wilkinson_shift(&h);
        let shift = Matrix::eye(3).scale(mu);
        let (qk, rk) = QrDecomposition::new(&(&h - &shift)).unwrap().into_parts();
        let swept = &(&rk * &qk) + &shift;
        let next = swept[(2, 1)].modulus();
        assert_near(next, std::f64::consts::FRAC_1_SQRT_2, TOL, "|h21| after one sweep");
        assert!(next >= cfg.tolerance && 1.0 - next < cfg.tolerance);

        let mut iterations = 0;
        let (d, q) = deflate(h.clone(), &cfg, &mut iterations).unwrap();
        assert!(iterations >= 1);
        assert!(d.is_diagonal());
        // the stalled entry is dropped after that single sweep
        assert_near(d[(2, 2)].re, swept[(2, 2)].re, 1e-12, "λ isolated after one sweep");

        let unitary = (&(&q.adjoint() * &q) - &Matrix::eye(3)).frobenius_norm();
        assert!(unitary < TOL, "QᴴQ - I = {}", unitary);
        // HQ - QD is exactly the pair of zeroed entries
        let residual = (&(&h * &q) - &(&q * &d)).frobenius_norm();
        assert_near(residual, std::f64::consts::SQRT_2 * next, TOL, "HQ - QD");
    }

    #[test]
    fn power_method_matches_shifted() {
        let a = Matrix::from_real_rows(3, 3, &[4.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 1.0]);
        let shifted = a.qr_shift_eigs().unwrap();
        for eig in [a.power_method().unwrap(), a.hess_power_method().unwrap()] {
            check_eigen_tol(&a, &eig, 1e-6);
            assert!(eig.iterations() > 0);
            for (x, y) in eig.eigenvalues().iter().zip(shifted.eigenvalues()) {
                assert_near(*x, y, 1e-7, "eigenvalue");
            }
        }
    }

    #[test]
    fn power_method_diagonal_input() {
        let a = Matrix::from_real_rows(2, 2, &[1.0, 0.0, 0.0, 2.0]);
        let eig = a.power_method().unwrap();
        assert_eq!(eig.iterations(), 0);
        assert_eq!(eig.eigenvalues(), vec![2.0, 1.0]);
    }

    #[test]
    fn power_method_opposite_pair_hits_cap() {
        let a = Matrix::from_real_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let cfg = EigenConfig::default().with_max_iterations(25);
        assert_eq!(
            HermitianEigen::power_method(&a, &cfg).unwrap_err(),
            LinalgError::ConvergenceFailure { iterations: 25 }
        );
    }
}
