//! Generic loop-based backend.

use crate::array::StridedArray;
use crate::backend::PermutationBackend;
use crate::scalar::Scalar;

/// Walks the source buffer linearly with an odometer over its multi-index
/// and scatters into the destination.
pub struct GenericBackend;

impl PermutationBackend for GenericBackend {
    fn permute_into<T: Scalar>(dest: &mut StridedArray<T>, src: &StridedArray<T>, perm: &[usize]) {
        let shape = src.shape();
        let ndim = shape.len();
        assert_eq!(dest.len(), src.len(), "permute_into: size mismatch");
        for (i, &p) in perm.iter().enumerate() {
            assert_eq!(dest.shape()[i], shape[p], "permute_into: shape mismatch");
        }

        // Destination stride seen by each source axis.
        let mut scatter = vec![0usize; ndim];
        for (i, &p) in perm.iter().enumerate() {
            scatter[p] = dest.strides()[i];
        }

        let mut counter = vec![0usize; ndim];
        let mut offset = 0usize;
        let out = dest.data_mut();
        for &value in src.data() {
            out[offset] = value;

            for axis in 0..ndim {
                counter[axis] += 1;
                offset += scatter[axis];
                if counter[axis] < shape[axis] {
                    break;
                }
                offset -= scatter[axis] * shape[axis];
                counter[axis] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_permute_transpose() {
        let src = StridedArray::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let mut dest: StridedArray<f64> = StridedArray::zeros(&[3, 2]);

        GenericBackend::permute_into(&mut dest, &src, &[1, 0]);

        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(src.get(&[i, j]), dest.get(&[j, i]));
            }
        }
    }

    #[test]
    fn test_generic_permute_identity_is_copy() {
        let src = StridedArray::from_vec((0..24).map(f64::from).collect(), &[2, 3, 4]).unwrap();
        let mut dest: StridedArray<f64> = StridedArray::zeros(&[2, 3, 4]);
        GenericBackend::permute_into(&mut dest, &src, &[0, 1, 2]);
        assert_eq!(src.data(), dest.data());
    }

    #[test]
    fn test_generic_permute_4d_reverse() {
        let shape = [2, 3, 1, 4];
        let src = StridedArray::from_vec((0..24).map(f64::from).collect(), &shape).unwrap();
        let mut dest: StridedArray<f64> = StridedArray::zeros(&[4, 1, 3, 2]);
        GenericBackend::permute_into(&mut dest, &src, &[3, 2, 1, 0]);

        for a in 0..2 {
            for b in 0..3 {
                for d in 0..4 {
                    assert_eq!(src.get(&[a, b, 0, d]), dest.get(&[d, 0, b, a]));
                }
            }
        }
    }
}
