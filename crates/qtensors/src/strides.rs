//! Stride and multi-index utilities.
//!
//! Arrays are column-major, matching faer. A composite Hilbert space with
//! subsystem sizes `[d0, d1, ..., dn-1]` uses the Kronecker ordering where
//! `d0` is the most significant digit; as a column-major array this is the
//! shape `[dn-1, ..., d1, d0]`. Strided axis `a` therefore holds subsystem
//! `n - 1 - a`.

use crate::error::{QuantumError, Result};

/// Compute column-major strides from shape.
///
/// For shape [d0, d1, d2, ...], returns strides [1, d0, d0*d1, ...].
///
/// # Examples
///
/// ```
/// use qtensors::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![1, 3, 12]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut stride = 1;

    for &dim in shape {
        strides.push(stride);
        stride *= dim;
    }

    strides
}

/// Linear offset of a multi-index.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides)
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Column-major array shape of a composite space: `dims` reversed.
///
/// ```
/// use qtensors::strides::composite_shape;
///
/// assert_eq!(composite_shape(&[2, 3, 4]), vec![4, 3, 2]);
/// ```
pub fn composite_shape(dims: &[usize]) -> Vec<usize> {
    dims.iter().rev().copied().collect()
}

/// Strided axis holding subsystem `subsystem` of an `n`-subsystem space.
#[inline]
pub fn subsystem_axis(subsystem: usize, n: usize) -> usize {
    n - 1 - subsystem
}

/// Check that `perm` is a bijection on `0..ndim`.
pub fn validate_permutation(perm: &[usize], ndim: usize) -> Result<()> {
    let invalid = || QuantumError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };

    if perm.len() != ndim {
        return Err(invalid());
    }

    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }

    Ok(())
}

/// Inverse of a valid permutation: `inv[perm[i]] = i`.
pub fn inverse_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inv[p] = i;
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_strides() {
        assert_eq!(compute_strides(&[3, 4, 5]), vec![1, 3, 12]);
        assert_eq!(compute_strides(&[2, 3]), vec![1, 2]);
        assert_eq!(compute_strides(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_cartesian_to_linear() {
        let strides = compute_strides(&[3, 4, 5]);
        // index [i, j, k] -> i + 3*j + 12*k
        assert_eq!(cartesian_to_linear(&[1, 0, 0], &strides), 1);
        assert_eq!(cartesian_to_linear(&[0, 1, 0], &strides), 3);
        assert_eq!(
            cartesian_to_linear(&[2, 3, 4], &strides),
            2 + 3 * 3 + 4 * 12
        );
    }

    #[test]
    fn test_composite_shape_matches_kron_ordering() {
        // |i0, i1> in dims [2, 3] has kron index 3*i0 + i1.
        let shape = composite_shape(&[2, 3]);
        let strides = compute_strides(&shape);
        for i0 in 0..2 {
            for i1 in 0..3 {
                let axes = [i1, i0];
                assert_eq!(cartesian_to_linear(&axes, &strides), 3 * i0 + i1);
            }
        }
        assert_eq!(subsystem_axis(0, 2), 1);
        assert_eq!(subsystem_axis(1, 2), 0);
    }

    #[test]
    fn test_validate_permutation() {
        assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
        assert!(validate_permutation(&[0, 0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1, 3], 3).is_err());
    }

    #[test]
    fn test_inverse_permutation() {
        let perm = [2, 0, 3, 1];
        let inv = inverse_permutation(&perm);
        for i in 0..4 {
            assert_eq!(inv[perm[i]], i);
            assert_eq!(perm[inv[i]], i);
        }
    }
}
