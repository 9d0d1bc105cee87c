use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::linalg::LinalgError;
use crate::traits::{ComplexScalar, C64, ROUNDING_CUTOFF};

use super::Matrix;

/// Fixed-length complex vector.
///
/// Indexing with `v[i]` is 0-based; the inclusive range operation
/// [`Vector::slice`] uses 1-based positions. Every transformation returns a
/// new vector.
///
/// # Examples
///
/// ```
/// use zmatrix::{c64, Vector};
///
/// let v = Vector::from_slice(&[c64(3.0, 4.0), c64(0.0, 0.0)]);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// let u = v.normalize().unwrap();
/// assert!((u[0].re - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<C64>,
}

impl Vector {
    /// Create a vector from a slice.
    pub fn from_slice(data: &[C64]) -> Self {
        Self { data: data.to_vec() }
    }

    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<C64>) -> Self {
        Self { data }
    }

    /// Create a real-valued vector.
    pub fn from_real(data: &[f64]) -> Self {
        Self {
            data: data.iter().map(|&x| C64::from_real(x)).collect(),
        }
    }

    /// Zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![C64::zero(); n],
        }
    }

    /// Standard basis vector `e_i` of length `n` (0-based `i`).
    pub fn basis(n: usize, i: usize) -> Self {
        assert!(i < n, "basis index {} out of bounds for length {}", i, n);
        let mut v = Self::zeros(n);
        v.data[i] = C64::one();
        v
    }

    /// First standard basis vector `e₁` of length `n`.
    #[inline]
    pub fn e1(n: usize) -> Self {
        Self::basis(n, 0)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[C64] {
        &self.data
    }

    /// Consume the vector, returning its elements.
    #[inline]
    pub fn into_vec(self) -> Vec<C64> {
        self.data
    }

    /// Iterate over the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, C64> {
        self.data.iter()
    }

    /// Euclidean norm `sqrt(Σ |vᵢ|²)`.
    pub fn norm(&self) -> f64 {
        self.data
            .iter()
            .map(|z| z.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Fails with [`LinalgError::Degenerate`] if the norm is below the
    /// rounding cutoff.
    pub fn normalize(&self) -> Result<Self, LinalgError> {
        let n = self.norm();
        if n < ROUNDING_CUTOFF {
            return Err(LinalgError::Degenerate);
        }
        Ok(self.scale(C64::from_real(1.0 / n)))
    }

    /// Multiply every element by `c`.
    pub fn scale(&self, c: C64) -> Self {
        Self {
            data: self.data.iter().map(|&x| x * c).collect(),
        }
    }

    /// Inner product `⟨self, rhs⟩ = Σ conj(selfᵢ)·rhsᵢ`.
    ///
    /// Panics if the lengths differ.
    ///
    /// ```
    /// use zmatrix::{c64, Vector};
    /// let a = Vector::from_slice(&[c64(0.0, 1.0), c64(1.0, 0.0)]);
    /// assert_eq!(a.inner(&a), c64(2.0, 0.0));
    /// ```
    pub fn inner(&self, rhs: &Self) -> C64 {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        self.data
            .iter()
            .zip(rhs.data.iter())
            .fold(C64::zero(), |acc, (&a, &b)| acc + a.conj() * b)
    }

    /// Outer product `self · rhsᴴ` as a `self.len() x rhs.len()` matrix.
    pub fn outer(&self, rhs: &Self) -> Matrix {
        Matrix::from_fn(self.len(), rhs.len(), |i, j| self.data[i] * rhs.data[j].conj())
    }

    /// Elements `begin..=end`, using 1-based positions.
    ///
    /// Fails with a dimension error if `begin < 1`, `end < begin` or
    /// `end > len`.
    ///
    /// ```
    /// use zmatrix::Vector;
    /// let v = Vector::from_real(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.slice(2, 3).unwrap(), Vector::from_real(&[2.0, 3.0]));
    /// ```
    pub fn slice(&self, begin: usize, end: usize) -> Result<Self, LinalgError> {
        if begin < 1 || end < begin || end > self.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: (1, self.len()),
                got: (begin, end),
            });
        }
        Ok(Self::from_slice(&self.data[begin - 1..end]))
    }

    /// Concatenate `rhs` after `self`.
    pub fn append(&self, rhs: &Self) -> Self {
        let mut data = Vec::with_capacity(self.len() + rhs.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&rhs.data);
        Self { data }
    }

    /// Elements in reverse order.
    pub fn reverse(&self) -> Self {
        Self {
            data: self.data.iter().rev().copied().collect(),
        }
    }

    /// Prepend a zero.
    pub fn expand(&self) -> Self {
        Self::zeros(1).append(self)
    }

    /// Append a zero.
    pub fn expand_bottom(&self) -> Self {
        self.append(&Self::zeros(1))
    }

    /// Drop the first element.
    pub fn remove_first(&self) -> Self {
        Self::from_slice(self.data.get(1..).unwrap_or(&[]))
    }

    /// Elementwise [`ComplexScalar::snap`].
    pub fn sanitized(&self) -> Self {
        Self {
            data: self.data.iter().map(|z| z.snap()).collect(),
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl Index<usize> for Vector {
    type Output = C64;

    #[inline]
    fn index(&self, i: usize) -> &C64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut C64 {
        &mut self.data[i]
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl Add<&Vector> for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch: {} + {}", self.len(), rhs.len());
        Vector {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a + b).collect(),
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        &self + &rhs
    }
}

impl Sub<&Vector> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch: {} - {}", self.len(), rhs.len());
        Vector {
            data: self.data.iter().zip(rhs.data.iter()).map(|(&a, &b)| a - b).collect(),
        }
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        &self - &rhs
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector {
            data: self.data.iter().map(|&x| -x).collect(),
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

impl Mul<C64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: C64) -> Vector {
        self.scale(rhs)
    }
}

impl Mul<C64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: C64) -> Vector {
        self.scale(rhs)
    }
}

impl From<Vec<C64>> for Vector {
    fn from(data: Vec<C64>) -> Self {
        Self { data }
    }
}
