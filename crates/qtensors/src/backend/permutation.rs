//! Permutation backend trait.

use crate::array::StridedArray;
use crate::scalar::Scalar;

/// Backend trait for axis permutation of strided arrays.
pub trait PermutationBackend {
    /// Permute `src` into `dest`.
    ///
    /// `perm[i]` gives the source axis for axis `i` of the result.
    ///
    /// # Panics
    ///
    /// Panics if `dest` does not have the permuted shape of `src`.
    fn permute_into<T: Scalar>(dest: &mut StridedArray<T>, src: &StridedArray<T>, perm: &[usize]);
}
