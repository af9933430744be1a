//! The quantum object: a matrix tagged with its role and composite dims.

use std::fmt;

use crate::config::DEFAULT_HERMITIAN_TOLERANCE;
use crate::error::{QuantumError, Result};
use crate::qobj::{Dims, Role};
use crate::scalar::c64;
use crate::storage::{DenseMatrix, SparseMatrix, Storage};

/// A state, operator or super-operator on a composite Hilbert space.
///
/// The matrix shape always agrees with `role` and `dims` (see
/// [`Role::shape_for`]). Operations return new objects; methods ending in
/// `_mut` modify `self` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumObject {
    data: Storage,
    role: Role,
    dims: Dims,
}

fn isqrt_exact(n: usize) -> Option<usize> {
    let r = (n as f64).sqrt().round() as usize;
    (r * r == n).then_some(r)
}

impl QuantumObject {
    /// Create an object from its matrix, role and subsystem sizes.
    ///
    /// # Errors
    ///
    /// - `QuantumError::InvalidDims` if `dims` is empty or has a zero
    /// - `QuantumError::ShapeMismatch` if the matrix shape disagrees with
    ///   `role` and `prod(dims)`
    ///
    /// ```
    /// use qtensors::{DenseMatrix, QuantumObject, Role};
    ///
    /// let op = QuantumObject::new(DenseMatrix::identity(6), Role::Operator, &[2, 3]).unwrap();
    /// assert_eq!(op.dims().as_slice(), &[2, 3]);
    ///
    /// // 6x6 is not the shape of an operator on a 3x3 space.
    /// assert!(QuantumObject::new(DenseMatrix::identity(6), Role::Operator, &[3, 3]).is_err());
    /// ```
    pub fn new(data: impl Into<Storage>, role: Role, dims: &[usize]) -> Result<Self> {
        Self::from_parts(data.into(), role, Dims::new(dims)?)
    }

    /// Same as [`QuantumObject::new`] with prevalidated dims.
    pub fn from_parts(data: Storage, role: Role, dims: Dims) -> Result<Self> {
        let expected = role.shape_for(dims.hilbert_dim());
        let actual = data.shape();
        if expected != actual {
            return Err(QuantumError::ShapeMismatch {
                role,
                dims,
                expected,
                actual,
            });
        }
        Ok(Self { data, role, dims })
    }

    /// Create an object with a single subsystem whose size is inferred from
    /// the matrix shape: `[len]` for Ket/Bra/Operator, `[sqrt(len)]` for the
    /// Liouville-space roles.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::InvalidArgument` if no such size exists and
    /// `QuantumError::ShapeMismatch` if the shape does not fit the role.
    pub fn with_inferred_dims(data: impl Into<Storage>, role: Role) -> Result<Self> {
        let data = data.into();
        let (rows, cols) = data.shape();
        let n = match role {
            Role::Ket | Role::Operator => Some(rows),
            Role::Bra => Some(cols),
            Role::SuperOperator | Role::OperatorKet => isqrt_exact(rows),
            Role::OperatorBra => isqrt_exact(cols),
        };
        let n = n
            .filter(|&n| n > 0)
            .ok_or_else(|| QuantumError::InvalidArgument {
                message: format!("cannot infer dims of a {role} from shape ({rows}, {cols})"),
            })?;
        Self::from_parts(data, role, Dims::single(n)?)
    }

    /// Ket from its amplitudes.
    pub fn ket(amplitudes: Vec<c64>, dims: &[usize]) -> Result<Self> {
        let n = amplitudes.len();
        Self::new(DenseMatrix::from_vec(amplitudes, n, 1)?, Role::Ket, dims)
    }

    /// Bra from its (already conjugated) coefficients.
    pub fn bra(coefficients: Vec<c64>, dims: &[usize]) -> Result<Self> {
        let n = coefficients.len();
        Self::new(DenseMatrix::from_vec(coefficients, 1, n)?, Role::Bra, dims)
    }

    pub fn operator(matrix: impl Into<Storage>, dims: &[usize]) -> Result<Self> {
        Self::new(matrix, Role::Operator, dims)
    }

    pub fn super_operator(matrix: impl Into<Storage>, dims: &[usize]) -> Result<Self> {
        Self::new(matrix, Role::SuperOperator, dims)
    }

    /// Swap in new data of identical shape. Used by kernels that already
    /// guarantee the shape.
    pub(crate) fn with_data(&self, data: Storage) -> Self {
        debug_assert_eq!(data.shape(), self.data.shape());
        Self {
            data,
            role: self.role,
            dims: self.dims.clone(),
        }
    }

    /// Build from parts whose consistency the caller has established.
    pub(crate) fn from_parts_unchecked(data: Storage, role: Role, dims: Dims) -> Self {
        debug_assert_eq!(data.shape(), role.shape_for(dims.hilbert_dim()));
        Self { data, role, dims }
    }

    #[inline]
    pub fn data(&self) -> &Storage {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut Storage {
        &mut self.data
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn dims(&self) -> &Dims {
        &self.dims
    }

    /// Matrix shape `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Number of matrix entries, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        let (r, c) = self.shape();
        r * c
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hilbert-space dimension `prod(dims)`.
    #[inline]
    pub fn hilbert_dim(&self) -> usize {
        self.dims.hilbert_dim()
    }

    pub fn is_ket(&self) -> bool {
        self.role == Role::Ket
    }

    pub fn is_bra(&self) -> bool {
        self.role == Role::Bra
    }

    pub fn is_operator(&self) -> bool {
        self.role == Role::Operator
    }

    pub fn is_super_operator(&self) -> bool {
        self.role == Role::SuperOperator
    }

    pub fn is_operator_ket(&self) -> bool {
        self.role == Role::OperatorKet
    }

    pub fn is_operator_bra(&self) -> bool {
        self.role == Role::OperatorBra
    }

    pub fn is_sparse(&self) -> bool {
        self.data.is_sparse()
    }

    /// Hermiticity within [`DEFAULT_HERMITIAN_TOLERANCE`]. Always false for
    /// non-square roles.
    pub fn is_hermitian(&self) -> bool {
        self.is_hermitian_with_tol(DEFAULT_HERMITIAN_TOLERANCE)
    }

    pub fn is_hermitian_with_tol(&self, tol: f64) -> bool {
        self.role.is_square() && self.data.is_hermitian(tol)
    }

    /// Matrix entry `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<c64> {
        self.data.get(i, j)
    }

    /// Dense column-major copy of the matrix.
    pub fn to_dense_matrix(&self) -> DenseMatrix {
        self.data.to_dense()
    }

    /// Same object with dense storage.
    pub fn to_dense(&self) -> Self {
        self.with_data(Storage::Dense(self.data.to_dense()))
    }

    /// Same object with sparse storage.
    pub fn to_sparse(&self) -> Self {
        self.with_data(Storage::Sparse(self.data.to_sparse()))
    }

    /// Sparse copy of the matrix.
    pub fn to_sparse_matrix(&self) -> SparseMatrix {
        self.data.to_sparse()
    }
}

impl fmt::Display for QuantumObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        let storage = if self.is_sparse() { "sparse" } else { "dense" };
        write!(
            f,
            "Quantum Object: role={}, dims={}, shape=({rows}, {cols}), storage={storage}",
            self.role, self.dims
        )?;
        if self.role.is_square() {
            write!(f, ", hermitian={}", self.is_hermitian())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;

    fn c(re: f64) -> c64 {
        c64::new(re, 0.0)
    }

    #[test]
    fn test_role_shape_invariant() {
        assert!(QuantumObject::ket(vec![c(1.0), c(0.0)], &[2]).is_ok());
        let err = QuantumObject::ket(vec![c(1.0), c(0.0)], &[3]).unwrap_err();
        assert!(matches!(err, QuantumError::ShapeMismatch { .. }));

        let col = DenseMatrix::zeros(4, 1);
        assert!(QuantumObject::new(col.clone(), Role::Bra, &[4]).is_err());
        assert!(QuantumObject::new(col.clone(), Role::OperatorKet, &[2]).is_ok());
        assert!(QuantumObject::new(DenseMatrix::zeros(2, 3), Role::Operator, &[2]).is_err());
        assert!(
            QuantumObject::new(DenseMatrix::identity(16), Role::SuperOperator, &[2, 2]).is_ok()
        );
    }

    #[test]
    fn test_invalid_dims() {
        let err = QuantumObject::new(DenseMatrix::zeros(1, 1), Role::Ket, &[]).unwrap_err();
        assert!(matches!(err, QuantumError::InvalidDims { .. }));
    }

    #[test]
    fn test_inferred_dims() {
        let ket = QuantumObject::with_inferred_dims(DenseMatrix::zeros(5, 1), Role::Ket).unwrap();
        assert_eq!(ket.dims().as_slice(), &[5]);

        let sop = QuantumObject::with_inferred_dims(DenseMatrix::identity(9), Role::SuperOperator)
            .unwrap();
        assert_eq!(sop.dims().as_slice(), &[3]);

        let vec = QuantumObject::with_inferred_dims(DenseMatrix::zeros(1, 4), Role::OperatorBra)
            .unwrap();
        assert_eq!(vec.dims().as_slice(), &[2]);

        assert!(
            QuantumObject::with_inferred_dims(DenseMatrix::identity(8), Role::SuperOperator)
                .is_err()
        );
        assert!(
            QuantumObject::with_inferred_dims(DenseMatrix::zeros(2, 3), Role::Operator).is_err()
        );
    }

    #[test]
    fn test_queries() {
        let op = QuantumObject::operator(SparseMatrix::identity(6), &[2, 3]).unwrap();
        assert_eq!(op.shape(), (6, 6));
        assert_eq!(op.len(), 36);
        assert_eq!(op.hilbert_dim(), 6);
        assert!(op.is_operator() && !op.is_ket());
        assert!(op.is_sparse());
        assert!(op.is_hermitian());
        assert_eq!(op.get(2, 2), Some(c64::one()));
        assert!(!op.to_dense().is_sparse());
    }

    #[test]
    fn test_ket_is_never_hermitian() {
        let ket = QuantumObject::ket(vec![c(1.0)], &[1]).unwrap();
        assert!(!ket.is_hermitian());
    }

    #[test]
    fn test_display_summary() {
        let op = QuantumObject::operator(DenseMatrix::identity(4), &[2, 2]).unwrap();
        let expected = concat!(
            "Quantum Object: role=Operator, dims=[2, 2], shape=(4, 4), ",
            "storage=dense, hermitian=true"
        );
        assert_eq!(op.to_string(), expected);
    }
}
