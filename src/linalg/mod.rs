pub(crate) mod eigen;
pub(crate) mod hessenberg;
pub(crate) mod householder;
pub(crate) mod qr;
pub(crate) mod svd;

pub use eigen::HermitianEigen;
pub use hessenberg::HessenbergDecomposition;
pub use householder::householder_reflector;
pub use qr::{LazyQr, QrDecomposition};
pub use svd::SvdDecomposition;

use crate::traits::ROUNDING_CUTOFF;

/// Errors from matrix construction and linear algebra operations.
///
/// ```
/// use zmatrix::Matrix;
/// use zmatrix::linalg::LinalgError;
///
/// let wide = Matrix::zeros(2, 3);
/// assert!(matches!(wide.qr().unwrap_err(), LinalgError::DimensionMismatch { .. }));
///
/// let skew = Matrix::from_real_rows(2, 2, &[0.0, 1.0, -1.0, 0.0]);
/// assert_eq!(skew.qr_shift_eigs().unwrap_err(), LinalgError::NotHermitian);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// Operand shapes are incompatible.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// Division by a zero or near-zero norm.
    #[error("degenerate input: norm below rounding cutoff")]
    Degenerate,
    /// Zero pivot during back-substitution.
    #[error("matrix is singular")]
    Singular,
    /// A Hermitian-only routine received a non-Hermitian matrix.
    #[error("matrix is not Hermitian")]
    NotHermitian,
    /// Factors were read before the decomposition ran.
    #[error("decomposition has not been computed")]
    NotFactorized,
    /// Iterative algorithm hit its iteration budget.
    #[error("iterative algorithm did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// Iterations performed before giving up.
        iterations: usize,
    },
}

/// Tuning for the QR-iteration eigensolvers.
///
/// ```
/// use zmatrix::linalg::EigenConfig;
/// let cfg = EigenConfig::default().with_max_iterations(50);
/// assert_eq!(cfg.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenConfig {
    /// Off-diagonal modulus treated as converged.
    pub tolerance: f64,
    /// Total QR sweeps allowed across all deflation levels.
    pub max_iterations: usize,
}

impl EigenConfig {
    /// Config with the given convergence tolerance and sweep budget.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Replace the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the sweep budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self::new(ROUNDING_CUTOFF, 1000)
    }
}
