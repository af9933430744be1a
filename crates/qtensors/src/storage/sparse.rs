//! Compressed sparse column (CSC) complex matrices.
//!
//! Row indices are strictly increasing within each column. Explicit zeros are
//! only present if produced by arithmetic and are removed by `prune`.

use faer::sparse::linalg::matmul::sparse_dense_matmul;
use faer::{Accum, get_global_parallelism};

use crate::backend::{AsFaerMat, AsFaerSparse};
use crate::error::{QuantumError, Result};
use crate::scalar::{Scalar, c64};
use crate::storage::DenseMatrix;

/// Sparse complex matrix in CSC layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    nrows: usize,
    ncols: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<c64>,
}

impl SparseMatrix {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            col_ptr: vec![0; ncols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn identity(n: usize) -> Self {
        Self {
            nrows: n,
            ncols: n,
            col_ptr: (0..=n).collect(),
            row_idx: (0..n).collect(),
            values: vec![c64::one(); n],
        }
    }

    /// Build from `(row, col, value)` triplets. Duplicates are summed and
    /// exact zeros dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::InvalidArgument` for an out-of-range position.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, c64)>,
    ) -> Result<Self> {
        let mut entries: Vec<(usize, usize, c64)> = Vec::new();
        for (i, j, v) in triplets {
            if i >= nrows || j >= ncols {
                return Err(QuantumError::InvalidArgument {
                    message: format!("triplet ({i}, {j}) outside {nrows}x{ncols} matrix"),
                });
            }
            entries.push((i, j, v));
        }
        entries.sort_by_key(|&(i, j, _)| (j, i));

        let mut col_ptr = vec![0; ncols + 1];
        let mut row_idx = Vec::with_capacity(entries.len());
        let mut values: Vec<c64> = Vec::with_capacity(entries.len());
        let mut last: Option<(usize, usize)> = None;
        for (i, j, v) in entries {
            if last == Some((i, j)) {
                if let Some(acc) = values.last_mut() {
                    *acc += v;
                }
            } else {
                row_idx.push(i);
                values.push(v);
                col_ptr[j + 1] += 1;
                last = Some((i, j));
            }
        }
        for j in 0..ncols {
            col_ptr[j + 1] += col_ptr[j];
        }

        let mut m = Self {
            nrows,
            ncols,
            col_ptr,
            row_idx,
            values,
        };
        m.prune_mut(0.0);
        Ok(m)
    }

    /// Convert a dense matrix, keeping nonzero entries.
    pub fn from_dense(dense: &DenseMatrix) -> Self {
        let (nrows, ncols) = (dense.nrows(), dense.ncols());
        let mut col_ptr = Vec::with_capacity(ncols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);
        for j in 0..ncols {
            for i in 0..nrows {
                let v = dense[(i, j)];
                if v != c64::zero() {
                    row_idx.push(i);
                    values.push(v);
                }
            }
            col_ptr.push(row_idx.len());
        }
        Self {
            nrows,
            ncols,
            col_ptr,
            row_idx,
            values,
        }
    }

    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.nrows, self.ncols);
        for (i, j, v) in self.iter() {
            dense[(i, j)] = v;
        }
        dense
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column pointers, `ncols + 1` long.
    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    pub fn values(&self) -> &[c64] {
        &self.values
    }

    fn column(&self, j: usize) -> (&[usize], &[c64]) {
        let range = self.col_ptr[j]..self.col_ptr[j + 1];
        (&self.row_idx[range.clone()], &self.values[range])
    }

    pub fn get(&self, i: usize, j: usize) -> Option<c64> {
        if i >= self.nrows || j >= self.ncols {
            return None;
        }
        let (rows, vals) = self.column(j);
        Some(match rows.binary_search(&i) {
            Ok(k) => vals[k],
            Err(_) => c64::zero(),
        })
    }

    /// Stored entries as `(row, col, value)`, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, c64)> + '_ {
        (0..self.ncols).flat_map(move |j| {
            let (rows, vals) = self.column(j);
            rows.iter().zip(vals).map(move |(&i, &v)| (i, j, v))
        })
    }

    fn map_transposed(&self, f: impl Fn(c64) -> c64) -> Self {
        let mut counts = vec![0usize; self.nrows + 1];
        for &i in &self.row_idx {
            counts[i + 1] += 1;
        }
        for i in 0..self.nrows {
            counts[i + 1] += counts[i];
        }
        let col_ptr = counts.clone();
        let mut next = counts;
        let mut row_idx = vec![0; self.nnz()];
        let mut values = vec![c64::zero(); self.nnz()];
        // Columns are visited in order, so rows of the result stay sorted.
        for (i, j, v) in self.iter() {
            let slot = next[i];
            row_idx[slot] = j;
            values[slot] = f(v);
            next[i] += 1;
        }
        Self {
            nrows: self.ncols,
            ncols: self.nrows,
            col_ptr,
            row_idx,
            values,
        }
    }

    pub fn transpose(&self) -> Self {
        self.map_transposed(|v| v)
    }

    pub fn adjoint(&self) -> Self {
        self.map_transposed(|v| v.conj())
    }

    pub fn conj(&self) -> Self {
        self.map_values(|v| v.conj())
    }

    /// Apply `f` to stored entries only.
    pub fn map_values(&self, f: impl Fn(c64) -> c64) -> Self {
        let mut out = self.clone();
        out.values.iter_mut().for_each(|v| *v = f(*v));
        out
    }

    pub fn scale(&self, alpha: c64) -> Self {
        self.map_values(|v| v * alpha)
    }

    pub fn scale_mut(&mut self, alpha: c64) {
        self.values.iter_mut().for_each(|v| *v *= alpha);
    }

    /// `self + alpha * other`, merging column patterns.
    pub fn add_scaled(&self, alpha: c64, other: &Self) -> Self {
        debug_assert_eq!((self.nrows, self.ncols), (other.nrows, other.ncols));
        let mut col_ptr = Vec::with_capacity(self.ncols + 1);
        let mut row_idx = Vec::with_capacity(self.nnz() + other.nnz());
        let mut values = Vec::with_capacity(self.nnz() + other.nnz());
        col_ptr.push(0);
        for j in 0..self.ncols {
            let (ra, va) = self.column(j);
            let (rb, vb) = other.column(j);
            let (mut p, mut q) = (0, 0);
            while p < ra.len() || q < rb.len() {
                let take_a = q == rb.len() || (p < ra.len() && ra[p] <= rb[q]);
                let take_b = p == ra.len() || (q < rb.len() && rb[q] <= ra[p]);
                let (row, value) = match (take_a, take_b) {
                    (true, true) => {
                        let r = (ra[p], va[p] + alpha * vb[q]);
                        p += 1;
                        q += 1;
                        r
                    }
                    (true, false) => {
                        p += 1;
                        (ra[p - 1], va[p - 1])
                    }
                    _ => {
                        q += 1;
                        (rb[q - 1], alpha * vb[q - 1])
                    }
                };
                row_idx.push(row);
                values.push(value);
            }
            col_ptr.push(row_idx.len());
        }
        Self {
            nrows: self.nrows,
            ncols: self.ncols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Sparse product `self * other` (column-wise accumulation).
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    pub fn matmul(&self, other: &Self) -> Self {
        assert_eq!(self.ncols, other.nrows, "sparse matmul: inner dimensions");
        let mut work = vec![c64::zero(); self.nrows];
        let mut occupied = vec![false; self.nrows];
        let mut pattern: Vec<usize> = Vec::new();

        let mut col_ptr = Vec::with_capacity(other.ncols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);
        for j in 0..other.ncols {
            let (rb, vb) = other.column(j);
            for (&k, &b) in rb.iter().zip(vb) {
                let (ra, va) = self.column(k);
                for (&i, &a) in ra.iter().zip(va) {
                    if !occupied[i] {
                        occupied[i] = true;
                        pattern.push(i);
                    }
                    work[i] += a * b;
                }
            }
            pattern.sort_unstable();
            for &i in &pattern {
                row_idx.push(i);
                values.push(work[i]);
                work[i] = c64::zero();
                occupied[i] = false;
            }
            pattern.clear();
            col_ptr.push(row_idx.len());
        }
        Self {
            nrows: self.nrows,
            ncols: other.ncols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Sparse-times-dense product.
    pub fn matmul_dense(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.ncols, other.nrows(), "sparse matmul: inner dimensions");
        let mut out = DenseMatrix::zeros(self.nrows, other.ncols());
        sparse_dense_matmul(
            out.as_faer_mut(),
            Accum::Replace,
            self.as_faer_sparse(),
            other.as_faer(),
            c64::one(),
            get_global_parallelism(),
        );
        out
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Self {
        let (m, n) = (other.nrows, other.ncols);
        let triplets = self.iter().flat_map(|(i, j, a)| {
            other
                .iter()
                .map(move |(k, l, b)| (i * m + k, j * n + l, a * b))
        });
        let mut col_ptr = vec![0usize; self.ncols * n + 1];
        let mut entries: Vec<(usize, usize, c64)> = triplets.collect();
        entries.sort_by_key(|&(i, j, _)| (j, i));
        for &(_, j, _) in &entries {
            col_ptr[j + 1] += 1;
        }
        for j in 0..self.ncols * n {
            col_ptr[j + 1] += col_ptr[j];
        }
        Self {
            nrows: self.nrows * m,
            ncols: self.ncols * n,
            col_ptr,
            row_idx: entries.iter().map(|e| e.0).collect(),
            values: entries.iter().map(|e| e.2).collect(),
        }
    }

    /// Remove stored entries with `|v| <= tol` (exact zeros for `tol = 0`).
    pub fn prune_mut(&mut self, tol: f64) {
        let mut write = 0;
        let mut start = 0;
        for j in 0..self.ncols {
            let end = self.col_ptr[j + 1];
            for k in start..end {
                let v = self.values[k];
                let keep = if tol == 0.0 { v != c64::zero() } else { v.norm() > tol };
                if keep {
                    self.row_idx[write] = self.row_idx[k];
                    self.values[write] = v;
                    write += 1;
                }
            }
            start = end;
            self.col_ptr[j + 1] = write;
        }
        self.row_idx.truncate(write);
        self.values.truncate(write);
    }

    /// Maximum absolute row sum.
    pub fn inf_norm(&self) -> f64 {
        let mut sums = vec![0.0; self.nrows];
        for (i, _, v) in self.iter() {
            sums[i] += v.norm();
        }
        sums.into_iter().fold(0.0, f64::max)
    }

    /// Maximum absolute column sum.
    pub fn one_norm(&self) -> f64 {
        (0..self.ncols)
            .map(|j| self.column(j).1.iter().map(|v| v.norm()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.values
            .iter()
            .map(|v| v.modulus_squared())
            .sum::<f64>()
            .sqrt()
    }

    pub fn trace(&self) -> c64 {
        (0..self.nrows.min(self.ncols))
            .filter_map(|i| self.get(i, i))
            .sum()
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.nrows == self.ncols
            && self.iter().all(|(i, j, v)| {
                let mirror = self.get(j, i).unwrap_or_default();
                (v - mirror.conj()).norm() <= tol
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> c64 {
        c64::new(re, im)
    }

    fn sample() -> SparseMatrix {
        SparseMatrix::from_triplets(
            3,
            3,
            [
                (0, 0, c(1.0, 0.0)),
                (2, 0, c(0.0, 2.0)),
                (1, 1, c(3.0, 0.0)),
                (0, 2, c(-1.0, 1.0)),
                (2, 2, c(4.0, 0.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_triplets_sum_duplicates_and_drop_zeros() {
        let m = SparseMatrix::from_triplets(
            2,
            2,
            [
                (0, 1, c(1.0, 0.0)),
                (0, 1, c(2.0, 0.0)),
                (1, 0, c(1.0, 0.0)),
                (1, 0, c(-1.0, 0.0)),
            ],
        )
        .unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 1), Some(c(3.0, 0.0)));
        assert_eq!(m.get(1, 0), Some(c64::zero()));
        assert!(SparseMatrix::from_triplets(2, 2, [(2, 0, c64::one())]).is_err());
    }

    #[test]
    fn test_dense_roundtrip() {
        let m = sample();
        assert_eq!(SparseMatrix::from_dense(&m.to_dense()), m);
    }

    #[test]
    fn test_adjoint_matches_dense() {
        let m = sample();
        assert_eq!(m.adjoint().to_dense(), m.to_dense().adjoint());
        assert_eq!(m.transpose().to_dense(), m.to_dense().transpose());
    }

    #[test]
    fn test_matmul_matches_dense() {
        let a = sample();
        let b = sample().adjoint();
        let sparse = a.matmul(&b).to_dense();
        let dense = a.to_dense().matmul(&b.to_dense());
        for (x, y) in sparse.data().iter().zip(dense.data()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
        assert_eq!(a.matmul_dense(&b.to_dense()), sparse);
    }

    #[test]
    fn test_add_scaled_merges_patterns() {
        let a = sample();
        let b = SparseMatrix::identity(3);
        let sum = a.add_scaled(c(2.0, 0.0), &b);
        assert_eq!(sum.to_dense(), a.to_dense().add_scaled(c(2.0, 0.0), &b.to_dense()));
    }

    #[test]
    fn test_kron_matches_dense() {
        let a = sample();
        let b = SparseMatrix::from_triplets(2, 2, [(0, 1, c(1.0, 0.0)), (1, 0, c(0.0, 1.0))])
            .unwrap();
        assert_eq!(a.kron(&b).to_dense(), a.to_dense().kron(&b.to_dense()));
    }

    #[test]
    fn test_prune_and_norms() {
        let mut m = sample();
        m.prune_mut(1.5);
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(0, 0), Some(c64::zero()));
        assert_relative_eq!(sample().inf_norm(), 2.0 + 4.0);
        assert_relative_eq!(sample().one_norm(), 2.0f64.sqrt() + 4.0);
        assert_eq!(sample().trace(), c(8.0, 0.0));
    }

    #[test]
    fn test_is_hermitian() {
        let h = SparseMatrix::from_triplets(2, 2, [(0, 1, c(0.0, -1.0)), (1, 0, c(0.0, 1.0))])
            .unwrap();
        assert!(h.is_hermitian(0.0));
        assert!(!sample().is_hermitian(1e-12));
    }
}
