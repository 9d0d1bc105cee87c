use crate::linalg::eigen::HermitianEigen;
use crate::linalg::LinalgError;
use crate::traits::{ComplexScalar, C64, ROUNDING_CUTOFF};
use crate::Matrix;

/// Thin singular value decomposition `A = U·S·Vᴴ`.
///
/// For an `m×n` matrix of numerical rank `r`, `U` is `m×r`, `S` is the
/// `r×r` real diagonal of singular values in descending order and `V` is
/// `n×r`; the columns of `U` and of `V` are orthonormal.
///
/// Computed from the Hermitian eigendecomposition of the Gram matrix `AᴴA`
/// (or of `AAᴴ` for tall input): `V` holds its leading eigenvectors,
/// `σᵢ = √λᵢ` and `uᵢ = A·vᵢ/σᵢ`. The rank is the number of eigenvalues
/// before the first one at or below `ROUNDING_CUTOFF · max(1, λ₀)`, so the
/// cut follows the scale of `A`. Squaring halves the attainable precision,
/// so singular values below roughly `1e-5 · max(1, σ₀)` are treated as zero.
///
/// ```
/// use zmatrix::Matrix;
///
/// let a = Matrix::from_real_rows(2, 1, &[3.0, 4.0]);
/// let svd = a.svd().unwrap();
/// assert_eq!(svd.rank(), 1);
/// assert!((svd.singular_values()[0] - 5.0).abs() < 1e-10);
/// assert!((svd.u()[(0, 0)].norm() - 0.6).abs() < 1e-10);
/// assert!((svd.u()[(1, 0)].norm() - 0.8).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SvdDecomposition {
    u: Matrix,
    s: Matrix,
    v: Matrix,
    rank: usize,
}

impl SvdDecomposition {
    /// Decompose an `m×n` matrix of any shape.
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m > n {
            // A = U S Vᴴ  ⇔  Aᴴ = V S Uᴴ
            let t = Self::new(&a.adjoint())?;
            return Ok(Self {
                u: t.v,
                s: t.s,
                v: t.u,
                rank: t.rank,
            });
        }

        let gram = &a.adjoint() * a;
        let eig = HermitianEigen::new(&gram)?;
        let lambdas = eig.eigenvalues();
        // Negative eigenvalues of the Gram matrix are rounding noise.
        let cutoff = ROUNDING_CUTOFF * lambdas.first().map_or(0.0, |l| l.abs()).max(1.0);
        let rank = lambdas.iter().position(|&l| l <= cutoff).unwrap_or(n);
        log::debug!("svd of {}x{} matrix: rank {}", m, n, rank);

        // Every kept eigenvalue exceeds the cutoff, so each σ is positive.
        let sigma: Vec<f64> = lambdas[..rank].iter().map(|l| l.sqrt()).collect();
        let v = eig.eigenvectors().block(0, 0, n, rank);

        let mut u = Matrix::zeros(m, rank);
        for (i, &s) in sigma.iter().enumerate() {
            let ui = (a * &v.column(i)).scale(C64::from_real(1.0 / s));
            for row in 0..m {
                u[(row, i)] = ui[row];
            }
        }

        let s = Matrix::from_fn(rank, rank, |i, j| {
            if i == j {
                C64::from_real(sigma[i])
            } else {
                C64::from_real(0.0)
            }
        });

        Ok(Self { u, s, v, rank })
    }

    /// Left singular vectors, `m×r`.
    #[inline]
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Diagonal of singular values, `r×r`.
    #[inline]
    pub fn s(&self) -> &Matrix {
        &self.s
    }

    /// Right singular vectors, `n×r`.
    #[inline]
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// Singular values, descending.
    pub fn singular_values(&self) -> Vec<f64> {
        (0..self.rank).map(|i| self.s[(i, i)].re).collect()
    }

    /// Numerical rank.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl Matrix {
    /// Singular value decomposition. See [`SvdDecomposition`].
    pub fn svd(&self) -> Result<SvdDecomposition, LinalgError> {
        SvdDecomposition::new(self)
    }
}
