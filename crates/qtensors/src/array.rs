//! Owned column-major strided arrays.
//!
//! This is the index-bookkeeping layer behind partial trace and subsystem
//! permutation: a flat buffer plus shape, with axis permutation and
//! reshaping.
//!
//! ```text
//! permutedims(array, perm)
//!     → validate permutation
//!     → allocate output with permuted shape
//!     → permutedims_into(output, array, perm)   # backend dispatch
//! ```

use crate::backend::{GenericBackend, PermutationBackend};
use crate::error::{QuantumError, Result};
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides, validate_permutation};

/// A dense n-dimensional array in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct StridedArray<T: Scalar> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T: Scalar> StridedArray<T> {
    /// Zero-initialized array.
    ///
    /// ```
    /// use qtensors::array::StridedArray;
    ///
    /// let a: StridedArray<f64> = StridedArray::zeros(&[2, 3, 4]);
    /// assert_eq!(a.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        let len: usize = shape.iter().product();
        Self {
            data: vec![T::zero(); len],
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Wrap column-major data.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::LengthMismatch` if `data.len()` differs from the
    /// product of `shape`.
    ///
    /// ```
    /// use qtensors::array::StridedArray;
    ///
    /// let a = StridedArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(a.get(&[1, 0]), Some(&2.0));
    /// assert_eq!(a.get(&[0, 1]), Some(&3.0));
    /// ```
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(QuantumError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn linear_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }
        if indices.iter().zip(&self.shape).any(|(&i, &d)| i >= d) {
            return None;
        }
        Some(cartesian_to_linear(indices, &self.strides))
    }

    /// Element at a multi-index, `None` when out of bounds.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        self.linear_index(indices).map(|i| &self.data[i])
    }

    /// Set the element at a multi-index.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::InvalidArgument` if the index does not address an
    /// element.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        let i = self
            .linear_index(indices)
            .ok_or_else(|| QuantumError::InvalidArgument {
                message: format!("index {indices:?} out of bounds for shape {:?}", self.shape),
            })?;
        self.data[i] = value;
        Ok(())
    }

    /// Reinterpret the buffer with a new shape of equal size. No data moves.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::LengthMismatch` if the sizes differ.
    pub fn reshape(self, shape: &[usize]) -> Result<Self> {
        Self::from_vec(self.data, shape)
    }

    /// Permute axes, returning a new array.
    ///
    /// `perm[i]` gives the source axis for result axis `i`.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::InvalidPermutation` if `perm` is not a
    /// permutation of `0..ndim`.
    ///
    /// ```
    /// use qtensors::array::StridedArray;
    ///
    /// let a = StridedArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let t = a.permutedims(&[1, 0]).unwrap();
    /// assert_eq!(t.shape(), &[3, 2]);
    /// assert_eq!(a.get(&[1, 0]), t.get(&[0, 1]));
    /// ```
    pub fn permutedims(&self, perm: &[usize]) -> Result<Self> {
        validate_permutation(perm, self.ndim())?;

        let new_shape: Vec<usize> = perm.iter().map(|&p| self.shape[p]).collect();
        let mut result = Self::zeros(&new_shape);
        permutedims_into(&mut result, self, perm);
        Ok(result)
    }
}

/// Permute `src` into a preallocated `dest` of the permuted shape.
pub fn permutedims_into<T: Scalar>(
    dest: &mut StridedArray<T>,
    src: &StridedArray<T>,
    perm: &[usize],
) {
    GenericBackend::permute_into(dest, src, perm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    #[test]
    fn test_zeros() {
        let a: StridedArray<c64> = StridedArray::zeros(&[2, 3]);
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.strides(), &[1, 2]);
        assert!(a.data().iter().all(|&x| x == c64::new(0.0, 0.0)));
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = StridedArray::from_vec(vec![1.0; 5], &[2, 3]).unwrap_err();
        assert_eq!(
            err,
            QuantumError::LengthMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_get_set() {
        let mut a: StridedArray<f64> = StridedArray::zeros(&[2, 3]);
        a.set(&[1, 2], 7.0).unwrap();
        assert_eq!(a.get(&[1, 2]), Some(&7.0));
        assert_eq!(a.data()[1 + 2 * 2], 7.0);
        assert_eq!(a.get(&[2, 0]), None);
        assert_eq!(a.get(&[0]), None);
        assert!(a.set(&[0, 3], 1.0).is_err());
    }

    #[test]
    fn test_reshape_keeps_buffer() {
        let a = StridedArray::from_vec((0..12).map(f64::from).collect(), &[3, 4]).unwrap();
        let b = a.clone().reshape(&[2, 6]).unwrap();
        assert_eq!(a.data(), b.data());
        assert!(a.reshape(&[5, 2]).is_err());
    }

    #[test]
    fn test_permutedims_3d() {
        let mut a: StridedArray<f64> = StridedArray::zeros(&[2, 3, 4]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    a.set(&[i, j, k], (i * 100 + j * 10 + k) as f64).unwrap();
                }
            }
        }

        let p = a.permutedims(&[2, 0, 1]).unwrap();
        assert_eq!(p.shape(), &[4, 2, 3]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(a.get(&[i, j, k]), p.get(&[k, i, j]));
                }
            }
        }
    }

    #[test]
    fn test_permutedims_invalid() {
        let a: StridedArray<f64> = StridedArray::zeros(&[2, 3]);
        assert!(matches!(
            a.permutedims(&[0, 0]),
            Err(QuantumError::InvalidPermutation { .. })
        ));
    }
}
