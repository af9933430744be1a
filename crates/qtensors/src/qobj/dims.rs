//! Composite Hilbert-space dimensions.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{QuantumError, Result};

/// Ordered subsystem sizes of a composite Hilbert space.
///
/// Never empty and every entry is positive. Equality is order-sensitive:
/// `[2, 3]` and `[3, 2]` are different spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dims(SmallVec<[usize; 4]>);

impl Dims {
    /// # Errors
    ///
    /// Returns `QuantumError::InvalidDims` for an empty list or a zero size.
    ///
    /// ```
    /// use qtensors::Dims;
    ///
    /// let dims = Dims::new(&[2, 3]).unwrap();
    /// assert_eq!(dims.hilbert_dim(), 6);
    /// assert!(Dims::new(&[2, 0]).is_err());
    /// ```
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(QuantumError::InvalidDims {
                dims: dims.to_vec(),
            });
        }
        Ok(Self(SmallVec::from_slice(dims)))
    }

    /// Single subsystem of size `n` (`n > 0`).
    pub fn single(n: usize) -> Result<Self> {
        Self::new(&[n])
    }

    /// `[2]`.
    pub(crate) fn qubit() -> Self {
        Self(SmallVec::from_slice(&[2]))
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of subsystems.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total Hilbert-space dimension `prod(dims)`.
    pub fn hilbert_dim(&self) -> usize {
        self.0.iter().product()
    }

    /// Subsystem sizes at the given positions, in that order.
    pub(crate) fn select(&self, positions: &[usize]) -> Self {
        Self(positions.iter().map(|&p| self.0[p]).collect())
    }

    /// Dims of `self ⊗ other`.
    pub fn concat(&self, other: &Dims) -> Self {
        let mut out = self.0.clone();
        out.extend_from_slice(&other.0);
        Self(out)
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_slice())
    }
}

impl TryFrom<&[usize]> for Dims {
    type Error = QuantumError;

    fn try_from(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for Dims {
    type Error = QuantumError;

    fn try_from(dims: [usize; N]) -> Result<Self> {
        Self::new(&dims)
    }
}

impl TryFrom<Vec<usize>> for Dims {
    type Error = QuantumError;

    fn try_from(dims: Vec<usize>) -> Result<Self> {
        Self::new(&dims)
    }
}
