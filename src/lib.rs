//! # zmatrix
//!
//! Dense complex matrices and the decompositions built on Householder
//! reflections: QR, Hessenberg reduction, a shifted-QR eigensolver for
//! Hermitian matrices, and a singular value decomposition.
//!
//! ## Quick start
//!
//! ```
//! use zmatrix::{c64, Matrix, Vector};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_real_rows(3, 3, &[
//!     2.0, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_real(&[8.0, -11.0, -3.0]);
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - c64(2.0, 0.0)).norm() < 1e-10);
//!
//! // Eigenvalues of a Hermitian matrix, descending by modulus
//! let h = Matrix::from_rows(2, 2, &[
//!     c64(2.0, 0.0), c64(0.0, -1.0),
//!     c64(0.0, 1.0), c64(2.0, 0.0),
//! ]);
//! let eig = h.qr_shift_eigs().unwrap();
//! assert!((eig.eigenvalues()[0] - 3.0).abs() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`traits`]: the [`C64`] element type, [`ROUNDING_CUTOFF`] and the
//!   tolerance-aware [`ComplexScalar`] helpers.
//!
//! - [`matrix`]: column-major [`Matrix`] with runtime dimensions and the
//!   [`Vector`] column type. Arithmetic operators panic on shape mismatch;
//!   the `checked_*` forms return [`LinalgError::DimensionMismatch`].
//!   Includes 1-based `minor`, `append_right` / `append_bottom`, identity
//!   embedding (`expand`, `expand_bottom`) and the structural predicates.
//!
//! - [`linalg`]: [`householder_reflector`](linalg::householder_reflector),
//!   [`QrDecomposition`] and the write-once [`LazyQr`],
//!   [`HessenbergDecomposition`], [`HermitianEigen`] (shifted QR plus the
//!   unshifted power methods) and [`SvdDecomposition`]. Every decomposition
//!   returns `Result<_, LinalgError>`.
//!
//! ## Logging
//!
//! Iteration counts and deflation steps are reported through the [`log`]
//! facade at `debug` and `trace` level. No logger is installed.

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{
    EigenConfig, HermitianEigen, HessenbergDecomposition, LazyQr, LinalgError, QrDecomposition,
    SvdDecomposition,
};
pub use matrix::vector::Vector;
pub use matrix::Matrix;
pub use traits::{c64, ComplexScalar, C64, ROUNDING_CUTOFF};

pub use num_complex::Complex;
