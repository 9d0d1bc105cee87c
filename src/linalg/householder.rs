use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::traits::{ComplexScalar, C64, ROUNDING_CUTOFF};
use crate::Matrix;

/// Householder reflector mapping `x` onto the first coordinate axis.
///
/// Returns the `n×n` unitary, Hermitian matrix `H = I − 2·v·vᴴ` with
/// `v = normalize(x + signum(x₀)·‖x‖·e₁)`, so that
/// `H·x = −signum(x₀)·‖x‖·e₁`. Taking the sign from `x₀` keeps
/// `x₀ + signum(x₀)‖x‖` free of cancellation; for complex `x₀` the sign is
/// the unit value at its argument.
///
/// Fails with [`LinalgError::Degenerate`] when `x` is (numerically) zero
/// and with a dimension error when `x` is empty.
///
/// ```
/// use zmatrix::{c64, Vector};
/// use zmatrix::linalg::householder_reflector;
///
/// let x = Vector::from_real(&[3.0, 4.0]);
/// let h = householder_reflector(&x).unwrap();
/// let hx = &h * &x;
/// assert!((hx[0] - c64(-5.0, 0.0)).norm() < 1e-12);
/// assert!(hx[1].norm() < 1e-12);
/// ```
pub fn householder_reflector(x: &Vector) -> Result<Matrix, LinalgError> {
    let n = x.len();
    if n == 0 {
        return Err(LinalgError::DimensionMismatch {
            expected: (1, 1),
            got: (0, 1),
        });
    }

    let alpha = x[0].signum() * C64::from_real(x.norm());
    let v = (x + &Vector::e1(n).scale(alpha)).normalize()?;

    // I - 2 v v^H
    let two = C64::from_real(2.0);
    Ok(Matrix::from_fn(n, n, |i, j| {
        let id = if i == j { C64::from_real(1.0) } else { C64::from_real(0.0) };
        id - two * v[i] * v[j].conj()
    }))
}

/// Whether everything after the first entry of `col` has a combined norm
/// below the rounding cutoff, i.e. no reflector is needed.
pub(crate) fn tail_is_negligible(col: &[C64]) -> bool {
    col.iter().skip(1).map(|z| z.norm_sqr()).sum::<f64>().sqrt() < ROUNDING_CUTOFF
}
