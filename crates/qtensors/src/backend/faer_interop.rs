//! Zero-copy views of dense and sparse matrices as faer types.
//!
//! `DenseMatrix` and faer share the column-major layout, and `SparseMatrix`
//! keeps the sorted CSC arrays faer expects, so views cost nothing; only
//! `dense_from_faer` copies.

use faer::sparse::{SparseColMatRef, SymbolicSparseColMatRef};
use faer::{MatMut, MatRef};

use crate::scalar::c64;
use crate::storage::{DenseMatrix, SparseMatrix};

/// Extension trait for viewing a matrix as faer's `MatRef` / `MatMut`.
pub trait AsFaerMat {
    fn as_faer(&self) -> MatRef<'_, c64>;

    fn as_faer_mut(&mut self) -> MatMut<'_, c64>;
}

impl AsFaerMat for DenseMatrix {
    fn as_faer(&self) -> MatRef<'_, c64> {
        MatRef::from_column_major_slice(self.data(), self.nrows(), self.ncols())
    }

    fn as_faer_mut(&mut self) -> MatMut<'_, c64> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        MatMut::from_column_major_slice_mut(self.data_mut(), nrows, ncols)
    }
}

/// Extension trait for viewing a CSC matrix as faer's `SparseColMatRef`.
pub trait AsFaerSparse {
    fn as_faer_sparse(&self) -> SparseColMatRef<'_, usize, c64>;
}

impl AsFaerSparse for SparseMatrix {
    fn as_faer_sparse(&self) -> SparseColMatRef<'_, usize, c64> {
        let symbolic = SymbolicSparseColMatRef::new_checked(
            self.nrows(),
            self.ncols(),
            self.col_ptr(),
            None,
            self.row_idx(),
        );
        SparseColMatRef::new(symbolic, self.values())
    }
}

/// Copy a faer matrix into a `DenseMatrix`.
///
/// ```
/// use faer::Mat;
/// use qtensors::backend::dense_from_faer;
/// use qtensors::c64;
///
/// let mat = Mat::from_fn(2, 3, |i, j| c64::new((i * 3 + j) as f64, 0.0));
/// let dense = dense_from_faer(mat.as_ref());
/// assert_eq!(dense.nrows(), 2);
/// assert_eq!(dense[(1, 2)], c64::new(5.0, 0.0));
/// ```
pub fn dense_from_faer(mat: MatRef<'_, c64>) -> DenseMatrix {
    DenseMatrix::from_fn(mat.nrows(), mat.ncols(), |i, j| mat[(i, j)])
}
