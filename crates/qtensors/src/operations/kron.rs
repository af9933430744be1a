//! Tensor (Kronecker) products of quantum objects.

use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};

impl QuantumObject {
    /// `self ⊗ other`. Both must share a role among Ket, Bra and Operator;
    /// the result's dims are the concatenation.
    pub fn kron(&self, other: &QuantumObject) -> Result<QuantumObject> {
        if !matches!(self.role(), Role::Ket | Role::Bra | Role::Operator) {
            return Err(QuantumError::UnsupportedRole {
                op: "kron",
                role: self.role(),
            });
        }
        if self.role() != other.role() {
            return Err(QuantumError::IncompatibleRoles {
                op: "kron",
                left: self.role(),
                right: other.role(),
            });
        }
        QuantumObject::from_parts(
            self.data().kron(other.data()),
            self.role(),
            self.dims().concat(other.dims()),
        )
    }
}

/// Tensor product of several objects, first factor outermost.
///
/// ```
/// use qtensors::{tensor, basis};
///
/// let psi = tensor(&[&basis(2, 0).unwrap(), &basis(3, 2).unwrap()]).unwrap();
/// assert_eq!(psi.dims().as_slice(), &[2, 3]);
/// assert_eq!(psi.get(2, 0).unwrap().re, 1.0);
/// ```
pub fn tensor(objects: &[&QuantumObject]) -> Result<QuantumObject> {
    let (first, rest) = objects
        .split_first()
        .ok_or_else(|| QuantumError::InvalidArgument {
            message: "tensor product of an empty list".into(),
        })?;
    rest.iter()
        .try_fold((*first).clone(), |acc, next| acc.kron(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;
    use crate::storage::{DenseMatrix, SparseMatrix};

    fn basis_ket(n: usize, k: usize) -> QuantumObject {
        let mut amps = vec![c64::new(0.0, 0.0); n];
        amps[k] = c64::new(1.0, 0.0);
        QuantumObject::ket(amps, &[n]).unwrap()
    }

    #[test]
    fn test_kron_index_convention() {
        // |i0, i1, i2> in dims [2, 3, 4] sits at 12*i0 + 4*i1 + i2.
        let psi = tensor(&[&basis_ket(2, 1), &basis_ket(3, 2), &basis_ket(4, 3)]).unwrap();
        assert_eq!(psi.dims().as_slice(), &[2, 3, 4]);
        for k in 0..24 {
            let expected = if k == 12 + 8 + 3 { 1.0 } else { 0.0 };
            assert_eq!(psi.get(k, 0).unwrap().re, expected);
        }
    }

    #[test]
    fn test_kron_role_rules() {
        let psi = basis_ket(2, 0);
        let op = QuantumObject::operator(DenseMatrix::identity(2), &[2]).unwrap();
        assert!(matches!(
            psi.kron(&op),
            Err(QuantumError::IncompatibleRoles { .. })
        ));
        let sop = QuantumObject::super_operator(DenseMatrix::identity(4), &[2]).unwrap();
        assert!(matches!(
            sop.kron(&sop),
            Err(QuantumError::UnsupportedRole { .. })
        ));
        assert!(tensor(&[]).is_err());
    }

    #[test]
    fn test_sparse_factors_stay_sparse() {
        let a = QuantumObject::operator(SparseMatrix::identity(2), &[2]).unwrap();
        let b = QuantumObject::operator(SparseMatrix::identity(3), &[3]).unwrap();
        let ab = a.kron(&b).unwrap();
        assert!(ab.is_sparse());
        assert_eq!(ab.dims().as_slice(), &[2, 3]);
        assert_eq!(ab.to_dense_matrix(), DenseMatrix::identity(6));
    }
}
