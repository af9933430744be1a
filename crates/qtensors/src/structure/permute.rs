//! Reordering of the subsystems of a composite object.

use crate::array::StridedArray;
use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};
use crate::strides::{composite_shape, validate_permutation};

/// Array-axis permutation for one half (rows or columns) of the object.
///
/// Subsystem `s` lives on axis `n - 1 - s`, so the new axis `a` holds the
/// new subsystem `n - 1 - a`, which is the old subsystem `order[n - 1 - a]`.
fn axis_permutation(order: &[usize]) -> Vec<usize> {
    let n = order.len();
    (0..n).map(|a| n - 1 - order[n - 1 - a]).collect()
}

/// Maps a flat Kronecker index over `dims` to its position after the
/// subsystems are reordered by `order`.
fn index_map(dims: &[usize], order: &[usize]) -> impl Fn(usize) -> usize {
    let new_dims: Vec<usize> = order.iter().map(|&s| dims[s]).collect();
    let old_dims = dims.to_vec();
    let order = order.to_vec();
    move |mut flat| {
        let mut digits = vec![0usize; old_dims.len()];
        for (digit, &d) in digits.iter_mut().zip(&old_dims).rev() {
            *digit = flat % d;
            flat /= d;
        }
        order
            .iter()
            .zip(&new_dims)
            .fold(0, |acc, (&s, &d)| acc * d + digits[s])
    }
}

/// Reorder the subsystems of a Ket, Bra or Operator: subsystem `order[k]` of
/// the input becomes subsystem `k` of the result.
///
/// Entries are moved, never recomputed, so permuting back with the inverse
/// order restores the input exactly. Sparse storage stays sparse.
///
/// ```
/// use qtensors::{basis, permute, tensor};
///
/// let ab = tensor(&[&basis(2, 1).unwrap(), &basis(3, 0).unwrap()]).unwrap();
/// let ba = permute(&ab, &[1, 0]).unwrap();
/// let expected = tensor(&[&basis(3, 0).unwrap(), &basis(2, 1).unwrap()]).unwrap();
/// assert_eq!(ba, expected);
/// ```
pub fn permute(object: &QuantumObject, order: &[usize]) -> Result<QuantumObject> {
    let role = object.role();
    if !matches!(role, Role::Ket | Role::Bra | Role::Operator) {
        return Err(QuantumError::UnsupportedRole { op: "permute", role });
    }
    let dims = object.dims();
    let n = dims.len();
    validate_permutation(order, n)?;
    let new_dims = dims.select(order);

    let data = match object.data() {
        Storage::Sparse(m) => {
            let map = index_map(dims.as_slice(), order);
            let (rows, cols) = (m.nrows(), m.ncols());
            let entries = m.iter().map(|(i, j, v)| match role {
                Role::Ket => (map(i), j, v),
                Role::Bra => (i, map(j), v),
                _ => (map(i), map(j), v),
            });
            Storage::Sparse(SparseMatrix::from_triplets(rows, cols, entries)?)
        }
        Storage::Dense(m) => {
            let (rows, cols) = (m.nrows(), m.ncols());
            let half = composite_shape(dims.as_slice());
            let axes = axis_permutation(order);
            let (shape, perm) = if role == Role::Operator {
                let cols_half = axes.iter().map(|&a| a + n);
                (
                    [half.as_slice(), half.as_slice()].concat(),
                    axes.iter().copied().chain(cols_half).collect::<Vec<_>>(),
                )
            } else {
                (half, axes)
            };
            let array = StridedArray::from_vec(m.data().to_vec(), &shape)?;
            let permuted = array.permutedims(&perm)?;
            Storage::Dense(DenseMatrix::from_vec(permuted.into_vec(), rows, cols)?)
        }
    };

    QuantumObject::from_parts(data, role, new_dims)
}

impl QuantumObject {
    /// Method form of [`permute`].
    pub fn permute(&self, order: &[usize]) -> Result<QuantumObject> {
        permute(self, order)
    }
}
