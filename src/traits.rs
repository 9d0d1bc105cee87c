use num_complex::Complex;
use num_traits::{One, Zero};

/// Complex scalar used for every matrix and vector element.
pub type C64 = Complex<f64>;

/// Magnitude below which a value is treated as exact zero.
///
/// Shared by scalar equality, rank detection, pivot checks and the
/// convergence tests of the eigensolvers.
pub const ROUNDING_CUTOFF: f64 = 1e-10;

/// Shorthand constructor for a [`C64`].
///
/// ```
/// use zmatrix::c64;
/// let z = c64(3.0, -4.0);
/// assert_eq!(z.norm(), 5.0);
/// ```
#[inline]
pub fn c64(re: f64, im: f64) -> C64 {
    Complex::new(re, im)
}

/// Tolerance-aware helpers on top of [`num_complex::Complex`].
///
/// `Complex<f64>` provides the field arithmetic, conjugate, modulus
/// (`norm`), argument, `sqrt` and `powf`; this trait adds the pieces the
/// decompositions rely on that depend on [`ROUNDING_CUTOFF`].
pub trait ComplexScalar: Copy {
    /// Modulus `|z|`.
    fn modulus(self) -> f64;

    /// Unit-modulus value at the argument of `self`.
    ///
    /// The signum of zero is `1`, so a reflector built from a zero pivot
    /// still has a well-defined sign.
    fn signum(self) -> Self;

    /// Replace a value whose parts are both below the cutoff by exact zero.
    fn snap(self) -> Self;

    /// Componentwise equality within [`ROUNDING_CUTOFF`].
    fn approx_eq(self, other: Self) -> bool;

    /// Whether `|z|` is below [`ROUNDING_CUTOFF`].
    fn is_negligible(self) -> bool;

    /// Promote a real value.
    fn from_real(r: f64) -> Self;
}

impl ComplexScalar for C64 {
    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn signum(self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            Complex::one()
        } else {
            Complex::from_polar(1.0, self.arg())
        }
    }

    #[inline]
    fn snap(self) -> Self {
        if self.re.abs() < ROUNDING_CUTOFF && self.im.abs() < ROUNDING_CUTOFF {
            Complex::zero()
        } else {
            self
        }
    }

    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        (self.re - other.re).abs() < ROUNDING_CUTOFF && (self.im - other.im).abs() < ROUNDING_CUTOFF
    }

    #[inline]
    fn is_negligible(self) -> bool {
        self.norm() < ROUNDING_CUTOFF
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex::new(r, 0.0)
    }
}
