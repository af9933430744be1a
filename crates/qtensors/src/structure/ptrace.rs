//! Partial trace over subsystems of a composite space.
//!
//! The object is viewed as a column-major strided array (shape `rev(dims)`
//! for a Ket, `rev(dims) ++ rev(dims)` for an Operator), the kept axes are
//! permuted to the front, and the traced axes are contracted:
//!
//! ```text
//! Ket:      ψ → M (K × T)          ρ = M M†
//! Operator: ρ → X (K, K, T, T)     ρ'[a, b] = Σ_t X[a, b, t, t]
//! ```
//!
//! The result is not re-symmetrized: for an Operator input it is exactly the
//! sum of the input entries, and for a Ket input Hermiticity holds up to the
//! rounding of the product `M M†`.

use tracing::trace;

use crate::array::StridedArray;
use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::c64;
use crate::storage::{DenseMatrix, Storage};
use crate::strides::{composite_shape, subsystem_axis};

/// Subsystems to keep, as 0-based positions in `dims`.
///
/// A bare index is a one-element selection. Order and repetition are
/// irrelevant: the kept subsystems appear in their original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection(Vec<usize>);

impl Selection {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Sorted, deduplicated positions after range checks.
    fn resolve(&self, ndim: usize) -> Result<Vec<usize>> {
        let invalid = || QuantumError::InvalidSelection {
            selection: self.0.clone(),
            ndim,
        };
        if self.0.is_empty() || self.0.iter().any(|&s| s >= ndim) {
            return Err(invalid());
        }
        let mut kept = self.0.clone();
        kept.sort_unstable();
        kept.dedup();
        Ok(kept)
    }
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection(vec![index])
    }
}

impl From<&[usize]> for Selection {
    fn from(indices: &[usize]) -> Self {
        Selection(indices.to_vec())
    }
}

impl From<Vec<usize>> for Selection {
    fn from(indices: Vec<usize>) -> Self {
        Selection(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Selection {
    fn from(indices: [usize; N]) -> Self {
        Selection(indices.to_vec())
    }
}

impl<const N: usize> From<&[usize; N]> for Selection {
    fn from(indices: &[usize; N]) -> Self {
        Selection(indices.to_vec())
    }
}

/// Reduce a Ket or Operator to the subsystems in `keep`, returning an
/// Operator whose dims are the kept subsystem sizes.
///
/// An object with a single subsystem is returned unchanged whatever `keep`
/// is.
///
/// # Errors
///
/// - `QuantumError::UnsupportedRole` for roles other than Ket and Operator
/// - `QuantumError::InvalidSelection` for an empty or out-of-range selection
///
/// ```
/// use qtensors::{basis, partial_trace, tensor};
///
/// // Tr_0 |0⟩⟨0| ⊗ |1⟩⟨1| = |1⟩⟨1|
/// let psi = tensor(&[&basis(2, 0).unwrap(), &basis(2, 1).unwrap()]).unwrap();
/// let rho = partial_trace(&psi, 1).unwrap();
/// assert_eq!(rho.dims().as_slice(), &[2]);
/// assert_eq!(rho.get(1, 1).unwrap().re, 1.0);
/// assert_eq!(rho.get(0, 0).unwrap().re, 0.0);
/// ```
pub fn partial_trace(object: &QuantumObject, keep: impl Into<Selection>) -> Result<QuantumObject> {
    let role = object.role();
    if !matches!(role, Role::Ket | Role::Operator) {
        return Err(QuantumError::UnsupportedRole {
            op: "partial_trace",
            role,
        });
    }

    let dims = object.dims();
    let n = dims.len();
    if n == 1 {
        return Ok(object.clone());
    }

    let kept = keep.into().resolve(n)?;
    let traced: Vec<usize> = (0..n).filter(|s| !kept.contains(s)).collect();
    let kept_dims = dims.select(&kept);
    let k = kept_dims.hilbert_dim();
    let t = dims.hilbert_dim() / k;
    trace!(?kept, ?traced, k, t, "partial trace");

    let axes = |subsystems: &[usize], offset: usize| -> Vec<usize> {
        subsystems
            .iter()
            .rev()
            .map(|&s| offset + subsystem_axis(s, n))
            .collect()
    };
    let data = object.to_dense_matrix().into_vec();

    let reduced = match role {
        Role::Ket => {
            let array = StridedArray::from_vec(data, &composite_shape(dims.as_slice()))?;
            let perm: Vec<usize> = [axes(&kept, 0), axes(&traced, 0)].concat();
            let m = DenseMatrix::from_vec(array.permutedims(&perm)?.into_vec(), k, t)?;
            m.matmul(&m.adjoint())
        }
        _ => {
            let half = composite_shape(dims.as_slice());
            let array = StridedArray::from_vec(data, &[half.as_slice(), half.as_slice()].concat())?;
            let perm: Vec<usize> = [
                axes(&kept, 0),
                axes(&kept, n),
                axes(&traced, 0),
                axes(&traced, n),
            ]
            .concat();
            let x = array.permutedims(&perm)?;
            let x = x.data();
            let kk = k * k;
            DenseMatrix::from_fn(k, k, |a, b| {
                (0..t)
                    .map(|r| x[a + b * k + r * kk + r * kk * t])
                    .sum::<c64>()
            })
        }
    };

    QuantumObject::from_parts(Storage::Dense(reduced), Role::Operator, kept_dims)
}

impl QuantumObject {
    /// Method form of [`partial_trace`].
    pub fn ptrace(&self, keep: impl Into<Selection>) -> Result<QuantumObject> {
        partial_trace(self, keep)
    }
}
