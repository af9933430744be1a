//! Adjoint, transpose, trace and related single-object transforms.

use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::{Scalar, c64};
use crate::storage::Storage;

impl QuantumObject {
    /// Conjugate transpose. Ket ↔ Bra, OperatorKet ↔ OperatorBra, square
    /// roles keep their role.
    pub fn dag(&self) -> QuantumObject {
        QuantumObject::from_parts_unchecked(
            self.data().adjoint(),
            self.role().adjoint(),
            self.dims().clone(),
        )
    }

    /// Transpose. Roles change as for [`QuantumObject::dag`].
    pub fn transpose(&self) -> QuantumObject {
        QuantumObject::from_parts_unchecked(
            self.data().transpose(),
            self.role().adjoint(),
            self.dims().clone(),
        )
    }

    /// Entry-wise complex conjugate.
    pub fn conj(&self) -> QuantumObject {
        self.with_data(self.data().conj())
    }

    /// In place entry-wise complex conjugate.
    pub fn conj_mut(&mut self) {
        let conj = self.data().conj();
        *self.data_mut() = conj;
    }

    /// Matrix trace of a square object.
    pub fn trace(&self) -> Result<c64> {
        self.require_square("trace")?;
        Ok(self.data().trace())
    }

    /// `|ψ⟩⟨ψ|` for a Ket, `|ψ⟩⟨ψ|` from `⟨ψ|` for a Bra. Operators are
    /// returned unchanged.
    pub fn ket_to_dm(&self) -> Result<QuantumObject> {
        match self.role() {
            Role::Ket => self.matmul(&self.dag()),
            Role::Bra => self.dag().matmul(self),
            Role::Operator => Ok(self.clone()),
            role => Err(QuantumError::UnsupportedRole {
                op: "ket_to_dm",
                role,
            }),
        }
    }

    /// Expectation value of `self` (an Operator) in `state`.
    ///
    /// `⟨ψ|A|ψ⟩` for a Ket or Bra state, `tr(Aρ)` for a density operator.
    pub fn expect(&self, state: &QuantumObject) -> Result<c64> {
        if self.role() != Role::Operator {
            return Err(QuantumError::UnsupportedRole {
                op: "expect",
                role: self.role(),
            });
        }
        self.check_same_dims(state)?;
        match state.role() {
            Role::Ket => state.dag().matmul(self)?.dot(state),
            Role::Bra => state.matmul(self)?.dot(&state.dag()),
            Role::Operator => self.matmul(state)?.trace(),
            role => Err(QuantumError::IncompatibleRoles {
                op: "expect",
                left: self.role(),
                right: role,
            }),
        }
    }

    /// Normalized copy: unit 2-norm for vector roles, unit trace for
    /// square roles.
    pub fn normalize(&self) -> Result<QuantumObject> {
        let scale = if self.role().is_square() {
            self.trace()?
        } else {
            c64::from_real(self.data().frobenius_norm())
        };
        if scale == c64::zero() {
            return Err(QuantumError::InvalidArgument {
                message: "cannot normalize an object with zero norm".into(),
            });
        }
        Ok(self.scale(c64::one() / scale))
    }

    /// `[A, B] = AB - BA`.
    pub fn commutator(&self, other: &QuantumObject) -> Result<QuantumObject> {
        self.require_square("commutator")?;
        let ab = self.matmul(other)?;
        let ba = other.matmul(self)?;
        ab.try_sub(&ba)
    }

    /// Column-stacking vectorization of an Operator into an OperatorKet.
    pub fn operator_to_vector(&self) -> Result<QuantumObject> {
        if self.role() != Role::Operator {
            return Err(QuantumError::UnsupportedRole {
                op: "operator_to_vector",
                role: self.role(),
            });
        }
        let n = self.hilbert_dim();
        let data = match self.data() {
            Storage::Sparse(m) => Storage::Sparse(
                crate::storage::SparseMatrix::from_triplets(
                    n * n,
                    1,
                    m.iter().map(|(i, j, v)| (i + j * n, 0, v)),
                )?,
            ),
            dense => dense.reshaped(n * n, 1)?,
        };
        QuantumObject::from_parts(data, Role::OperatorKet, self.dims().clone())
    }

    /// Inverse of [`QuantumObject::operator_to_vector`].
    pub fn vector_to_operator(&self) -> Result<QuantumObject> {
        if self.role() != Role::OperatorKet {
            return Err(QuantumError::UnsupportedRole {
                op: "vector_to_operator",
                role: self.role(),
            });
        }
        let n = self.hilbert_dim();
        let data = match self.data() {
            Storage::Sparse(m) => Storage::Sparse(crate::storage::SparseMatrix::from_triplets(
                n,
                n,
                m.iter().map(|(i, _, v)| (i % n, i / n, v)),
            )?),
            dense => dense.reshaped(n, n)?,
        };
        QuantumObject::from_parts(data, Role::Operator, self.dims().clone())
    }
}
