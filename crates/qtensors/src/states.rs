//! Standard states and operators.
//!
//! Ladder operators, number operators and identities are stored sparse; the
//! 2×2 Pauli family is dense. Spin conventions: `σz = diag(1, −1)`, so
//! `basis(2, 0)` is spin up and `σ₋ = |1⟩⟨0|` lowers it.

use crate::error::{QuantumError, Result};
use crate::qobj::{Dims, QuantumObject, Role};
use crate::scalar::{I, Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};

fn out_of_range(what: &str, index: usize, n: usize) -> QuantumError {
    QuantumError::InvalidArgument {
        message: format!("{what} {index} out of range for dimension {n}"),
    }
}

fn pauli(entries: [c64; 4]) -> QuantumObject {
    // column-major [(0,0), (1,0), (0,1), (1,1)]
    let m = DenseMatrix::from_fn(2, 2, |i, j| entries[i + 2 * j]);
    QuantumObject::from_parts_unchecked(Storage::Dense(m), Role::Operator, Dims::qubit())
}

/// Basis ket `|k⟩` of an `n`-level system.
///
/// ```
/// use qtensors::basis;
///
/// let psi = basis(3, 1).unwrap();
/// assert_eq!(psi.get(1, 0).unwrap().re, 1.0);
/// assert!(basis(3, 3).is_err());
/// ```
pub fn basis(n: usize, k: usize) -> Result<QuantumObject> {
    basis_composite(&[n], &[k])
}

/// Product basis ket `|i₀, …, i_{m−1}⟩` on `dims`.
pub fn basis_composite(dims: &[usize], indices: &[usize]) -> Result<QuantumObject> {
    let dims = Dims::new(dims)?;
    if indices.len() != dims.len() {
        return Err(QuantumError::LengthMismatch {
            expected: dims.len(),
            actual: indices.len(),
        });
    }
    let mut flat = 0;
    for (&i, &d) in indices.iter().zip(dims.as_slice()) {
        if i >= d {
            return Err(out_of_range("basis index", i, d));
        }
        flat = flat * d + i;
    }
    let mut amplitudes = vec![c64::zero(); dims.hilbert_dim()];
    amplitudes[flat] = c64::one();
    QuantumObject::ket(amplitudes, dims.as_slice())
}

/// Identity Operator on `dims`.
pub fn identity(dims: &[usize]) -> Result<QuantumObject> {
    let dims = Dims::new(dims)?;
    let n = dims.hilbert_dim();
    QuantumObject::from_parts(Storage::Sparse(SparseMatrix::identity(n)), Role::Operator, dims)
}

/// `I / N` on `dims`.
pub fn maximally_mixed(dims: &[usize]) -> Result<QuantumObject> {
    let eye = identity(dims)?;
    let n = eye.hilbert_dim() as f64;
    Ok(eye.scale(c64::from_real(1.0 / n)))
}

/// Annihilation operator on an `n`-level truncated oscillator,
/// `a|k⟩ = √k |k−1⟩`.
pub fn destroy(n: usize) -> Result<QuantumObject> {
    let entries = (1..n).map(|k| (k - 1, k, c64::from_real((k as f64).sqrt())));
    let m = SparseMatrix::from_triplets(n, n, entries)?;
    QuantumObject::operator(m, &[n])
}

/// Creation operator, the adjoint of [`destroy`].
pub fn create(n: usize) -> Result<QuantumObject> {
    Ok(destroy(n)?.dag())
}

/// Number operator `a†a = diag(0, 1, …, n−1)`.
pub fn number(n: usize) -> Result<QuantumObject> {
    let entries = (1..n).map(|k| (k, k, c64::from_real(k as f64)));
    QuantumObject::operator(SparseMatrix::from_triplets(n, n, entries)?, &[n])
}

/// `|i⟩⟨j|` on an `n`-level system.
pub fn projection(n: usize, i: usize, j: usize) -> Result<QuantumObject> {
    for k in [i, j] {
        if k >= n {
            return Err(out_of_range("projection index", k, n));
        }
    }
    let m = SparseMatrix::from_triplets(n, n, [(i, j, c64::one())])?;
    QuantumObject::operator(m, &[n])
}

pub fn sigma_x() -> QuantumObject {
    let (o, z) = (c64::one(), c64::zero());
    pauli([z, o, o, z])
}

pub fn sigma_y() -> QuantumObject {
    let z = c64::zero();
    pauli([z, I, -I, z])
}

pub fn sigma_z() -> QuantumObject {
    let (o, z) = (c64::one(), c64::zero());
    pauli([o, z, z, -o])
}

/// `σ₋ = |1⟩⟨0|`.
pub fn sigma_minus() -> QuantumObject {
    let (o, z) = (c64::one(), c64::zero());
    pauli([z, o, z, z])
}

/// `σ₊ = |0⟩⟨1|`.
pub fn sigma_plus() -> QuantumObject {
    let (o, z) = (c64::one(), c64::zero());
    pauli([z, z, o, z])
}
