//! Super-operators acting on column-stacked density matrices.
//!
//! With `vec(ρ)` the column stacking of ρ, `vec(A ρ B) = (Bᵀ ⊗ A) vec(ρ)`:
//!
//! ```text
//! spre(A)        = I ⊗ A        ρ ↦ A ρ
//! spost(B)       = Bᵀ ⊗ I       ρ ↦ ρ B
//! sprepost(A, B) = Bᵀ ⊗ A       ρ ↦ A ρ B
//!
//! D[c]      = sprepost(c, c†) − ½ spre(c†c) − ½ spost(c†c)
//! L(H, {c}) = −i (spre(H) − spost(H)) + Σ D[c]
//! ```
//!
//! Sparse inputs give sparse super-operators.

use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::{I, Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};

fn require_operator(op: &'static str, object: &QuantumObject) -> Result<()> {
    if object.role() != Role::Operator {
        return Err(QuantumError::UnsupportedRole {
            op,
            role: object.role(),
        });
    }
    Ok(())
}

fn identity_like(data: &Storage, n: usize) -> Storage {
    match data {
        Storage::Sparse(_) => Storage::Sparse(SparseMatrix::identity(n)),
        Storage::Dense(_) => Storage::Dense(DenseMatrix::identity(n)),
    }
}

fn into_super(data: Storage, like: &QuantumObject) -> QuantumObject {
    QuantumObject::from_parts_unchecked(data, Role::SuperOperator, like.dims().clone())
}

/// Left multiplication `ρ ↦ A ρ`.
pub fn spre(a: &QuantumObject) -> Result<QuantumObject> {
    require_operator("spre", a)?;
    let eye = identity_like(a.data(), a.hilbert_dim());
    Ok(into_super(eye.kron(a.data()), a))
}

/// Right multiplication `ρ ↦ ρ B`.
pub fn spost(b: &QuantumObject) -> Result<QuantumObject> {
    require_operator("spost", b)?;
    let eye = identity_like(b.data(), b.hilbert_dim());
    Ok(into_super(b.data().transpose().kron(&eye), b))
}

/// Two-sided multiplication `ρ ↦ A ρ B`.
pub fn sprepost(a: &QuantumObject, b: &QuantumObject) -> Result<QuantumObject> {
    require_operator("sprepost", a)?;
    require_operator("sprepost", b)?;
    a.check_same_dims(b)?;
    Ok(into_super(b.data().transpose().kron(a.data()), a))
}

/// Lindblad dissipator of one collapse operator,
/// `D[c]ρ = c ρ c† − ½ {c†c, ρ}`. Rates are folded into `c`.
pub fn lindblad_dissipator(c: &QuantumObject) -> Result<QuantumObject> {
    let c_dag = c.dag();
    let cdc = c_dag.matmul(c)?;
    let mut d = sprepost(c, &c_dag)?;
    let half = c64::from_real(-0.5);
    d.add_scaled_mut(half, &spre(&cdc)?)?;
    d.add_scaled_mut(half, &spost(&cdc)?)?;
    Ok(d)
}

/// Liouvillian `L ρ = −i [H, ρ] + Σ_k D[c_k] ρ`.
///
/// # Errors
///
/// `UnsupportedRole` unless every argument is an Operator, and
/// `DimensionMismatch` if a collapse operator lives on other dims than `H`.
///
/// ```
/// use qtensors::{destroy, liouvillian};
///
/// let a = destroy(3).unwrap();
/// let h = a.dag().matmul(&a).unwrap();
/// let l = liouvillian(&h, &[a]).unwrap();
/// assert!(l.is_super_operator());
/// assert_eq!(l.shape(), (9, 9));
/// ```
pub fn liouvillian(hamiltonian: &QuantumObject, c_ops: &[QuantumObject]) -> Result<QuantumObject> {
    let mut l = spre(hamiltonian)?;
    l.add_scaled_mut(-c64::one(), &spost(hamiltonian)?)?;
    l.scale_mut(-I);
    for c in c_ops {
        hamiltonian.check_same_dims(c)?;
        l.add_scaled_mut(c64::one(), &lindblad_dissipator(c)?)?;
    }
    Ok(l)
}
