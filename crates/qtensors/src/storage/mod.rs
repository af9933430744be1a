//! Backing matrices for quantum objects.
//!
//! ```text
//! MatrixStorage (trait)
//! ├── DenseMatrix   - column-major buffer, faer views
//! └── SparseMatrix  - compressed sparse column
//!
//! Storage (enum)    - what a QuantumObject owns
//! ```
//!
//! Binary operations keep the sparse format when both operands are sparse
//! and fall back to dense otherwise.

mod dense;
mod sparse;

pub use dense::DenseMatrix;
pub use sparse::SparseMatrix;

use crate::scalar::c64;

/// Operations shared by every matrix format.
pub trait MatrixStorage: Clone + std::fmt::Debug {
    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Number of explicitly stored entries.
    fn stored_len(&self) -> usize;

    /// Entry `(i, j)`, `None` when out of bounds.
    fn entry(&self, i: usize, j: usize) -> Option<c64>;

    fn to_dense(&self) -> DenseMatrix;

    fn adjoint(&self) -> Self;

    fn transpose(&self) -> Self;

    fn conj(&self) -> Self;

    fn scale(&self, alpha: c64) -> Self;

    fn scale_mut(&mut self, alpha: c64);

    fn trace(&self) -> c64;

    fn frobenius_norm(&self) -> f64;

    fn inf_norm(&self) -> f64;

    fn is_hermitian(&self, tol: f64) -> bool;
}

macro_rules! forward_matrix_storage {
    ($ty:ty, $stored:ident, $dense:ident) => {
        impl MatrixStorage for $ty {
            fn nrows(&self) -> usize {
                <$ty>::nrows(self)
            }
            fn ncols(&self) -> usize {
                <$ty>::ncols(self)
            }
            fn stored_len(&self) -> usize {
                <$ty>::$stored(self)
            }
            fn entry(&self, i: usize, j: usize) -> Option<c64> {
                <$ty>::get(self, i, j)
            }
            fn to_dense(&self) -> DenseMatrix {
                <$ty>::$dense(self)
            }
            fn adjoint(&self) -> Self {
                <$ty>::adjoint(self)
            }
            fn transpose(&self) -> Self {
                <$ty>::transpose(self)
            }
            fn conj(&self) -> Self {
                <$ty>::conj(self)
            }
            fn scale(&self, alpha: c64) -> Self {
                <$ty>::scale(self, alpha)
            }
            fn scale_mut(&mut self, alpha: c64) {
                <$ty>::scale_mut(self, alpha)
            }
            fn trace(&self) -> c64 {
                <$ty>::trace(self)
            }
            fn frobenius_norm(&self) -> f64 {
                <$ty>::frobenius_norm(self)
            }
            fn inf_norm(&self) -> f64 {
                <$ty>::inf_norm(self)
            }
            fn is_hermitian(&self, tol: f64) -> bool {
                <$ty>::is_hermitian(self, tol)
            }
        }
    };
}

forward_matrix_storage!(DenseMatrix, len, clone);
forward_matrix_storage!(SparseMatrix, nnz, to_dense);

/// Matrix owned by a quantum object.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Storage::Dense($m) => $body,
            Storage::Sparse($m) => $body,
        }
    };
}

macro_rules! dispatch_map {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Storage::Dense($m) => Storage::Dense($body),
            Storage::Sparse($m) => Storage::Sparse($body),
        }
    };
}

impl Storage {
    pub fn nrows(&self) -> usize {
        dispatch!(self, m => m.nrows())
    }

    pub fn ncols(&self) -> usize {
        dispatch!(self, m => m.ncols())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Storage::Sparse(_))
    }

    pub fn stored_len(&self) -> usize {
        dispatch!(self, m => MatrixStorage::stored_len(m))
    }

    pub fn get(&self, i: usize, j: usize) -> Option<c64> {
        dispatch!(self, m => m.get(i, j))
    }

    /// Dense copy (clone for dense storage).
    pub fn to_dense(&self) -> DenseMatrix {
        dispatch!(self, m => MatrixStorage::to_dense(m))
    }

    pub fn to_sparse(&self) -> SparseMatrix {
        match self {
            Storage::Dense(m) => SparseMatrix::from_dense(m),
            Storage::Sparse(m) => m.clone(),
        }
    }

    pub fn adjoint(&self) -> Self {
        dispatch_map!(self, m => m.adjoint())
    }

    pub fn transpose(&self) -> Self {
        dispatch_map!(self, m => m.transpose())
    }

    pub fn conj(&self) -> Self {
        dispatch_map!(self, m => m.conj())
    }

    pub fn scale(&self, alpha: c64) -> Self {
        dispatch_map!(self, m => m.scale(alpha))
    }

    pub fn scale_mut(&mut self, alpha: c64) {
        dispatch!(self, m => m.scale_mut(alpha))
    }

    pub fn trace(&self) -> c64 {
        dispatch!(self, m => m.trace())
    }

    pub fn frobenius_norm(&self) -> f64 {
        dispatch!(self, m => m.frobenius_norm())
    }

    pub fn inf_norm(&self) -> f64 {
        dispatch!(self, m => m.inf_norm())
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        dispatch!(self, m => m.is_hermitian(tol))
    }

    /// `self + alpha * other`. Shapes must agree.
    pub fn add_scaled(&self, alpha: c64, other: &Self) -> Self {
        match (self, other) {
            (Storage::Sparse(a), Storage::Sparse(b)) => Storage::Sparse(a.add_scaled(alpha, b)),
            (Storage::Dense(a), Storage::Dense(b)) => Storage::Dense(a.add_scaled(alpha, b)),
            (a, b) => Storage::Dense(a.to_dense().add_scaled(alpha, &b.to_dense())),
        }
    }

    /// In-place `self += alpha * other`. Sparse `self` becomes dense unless
    /// `other` is sparse too.
    pub fn axpy_mut(&mut self, alpha: c64, other: &Self) {
        match (&mut *self, other) {
            (Storage::Dense(a), Storage::Dense(b)) => a.axpy_mut(alpha, b),
            (Storage::Dense(a), Storage::Sparse(b)) => {
                for (i, j, v) in b.iter() {
                    a[(i, j)] += alpha * v;
                }
            }
            (Storage::Sparse(a), Storage::Sparse(b)) => *a = a.add_scaled(alpha, b),
            (Storage::Sparse(a), Storage::Dense(b)) => {
                let mut dense = a.to_dense();
                dense.axpy_mut(alpha, b);
                *self = Storage::Dense(dense);
            }
        }
    }

    /// Matrix product. Inner dimensions must agree.
    pub fn matmul(&self, other: &Self) -> Self {
        match (self, other) {
            (Storage::Sparse(a), Storage::Sparse(b)) => Storage::Sparse(a.matmul(b)),
            (Storage::Sparse(a), Storage::Dense(b)) => Storage::Dense(a.matmul_dense(b)),
            (Storage::Dense(a), Storage::Sparse(b)) => {
                // A·B = (B†·A†)†
                Storage::Dense(b.adjoint().matmul_dense(&a.adjoint()).adjoint())
            }
            (Storage::Dense(a), Storage::Dense(b)) => Storage::Dense(a.matmul(b)),
        }
    }

    /// Kronecker product; sparse only when both factors are sparse.
    pub fn kron(&self, other: &Self) -> Self {
        match (self, other) {
            (Storage::Sparse(a), Storage::Sparse(b)) => Storage::Sparse(a.kron(b)),
            (a, b) => Storage::Dense(a.to_dense().kron(&b.to_dense())),
        }
    }

    /// Reinterpret as a matrix of another shape with the same column-major
    /// entries. Sparse storage is densified.
    pub fn reshaped(&self, nrows: usize, ncols: usize) -> crate::Result<Self> {
        Ok(Storage::Dense(self.to_dense().reshaped(nrows, ncols)?))
    }
}

impl From<DenseMatrix> for Storage {
    fn from(m: DenseMatrix) -> Self {
        Storage::Dense(m)
    }
}

impl From<SparseMatrix> for Storage {
    fn from(m: SparseMatrix) -> Self {
        Storage::Sparse(m)
    }
}
