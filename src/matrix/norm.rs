use super::Matrix;

impl Matrix {
    /// Frobenius norm `sqrt(Σ |aᵢⱼ|²)`.
    ///
    /// ```
    /// use zmatrix::{c64, Matrix};
    /// let m = Matrix::from_rows(2, 2, &[c64(3.0, 4.0), c64(0.0, 0.0), c64(0.0, 0.0), c64(1.0, 0.0)]);
    /// assert!((m.frobenius_norm() - 26.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Largest element modulus.
    pub fn max_modulus(&self) -> f64 {
        self.data.iter().map(|z| z.norm()).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::c64;

    #[test]
    fn frobenius_identity() {
        assert!((Matrix::eye(4).frobenius_norm() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn max_modulus() {
        let m = Matrix::from_rows(1, 3, &[c64(1.0, 0.0), c64(0.0, -7.0), c64(3.0, 4.0)]);
        assert_eq!(m.max_modulus(), 7.0);
        assert_eq!(Matrix::zeros(0, 0).max_modulus(), 0.0);
    }
}
