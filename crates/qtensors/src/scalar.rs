//! Scalar trait for array element types.

use faer_traits::ComplexField;
use std::fmt::Debug;

pub use faer::c64;

/// Trait for element types stored in strided arrays and matrices.
///
/// Quantum objects always hold `c64`; `f64` is accepted by the strided
/// utilities so index bookkeeping can be tested on real data.
pub trait Scalar: ComplexField + Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embeds a real number.
    fn from_real(x: f64) -> Self;

    /// Squared modulus `|x|^2`.
    fn modulus_squared(self) -> f64;
}

impl Scalar for f64 {
    fn one() -> Self {
        1.0
    }

    fn from_real(x: f64) -> Self {
        x
    }

    fn modulus_squared(self) -> f64 {
        self * self
    }
}

impl Scalar for c64 {
    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_real(x: f64) -> Self {
        c64::new(x, 0.0)
    }

    fn modulus_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

/// Imaginary unit.
pub const I: c64 = c64::new(0.0, 1.0);
