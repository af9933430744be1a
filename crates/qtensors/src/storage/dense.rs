//! Dense column-major complex matrices.

use std::ops::{Index, IndexMut};

use faer::linalg::matmul::matmul;
use faer::{Accum, get_global_parallelism};

use crate::backend::AsFaerMat;
use crate::error::{QuantumError, Result};
use crate::scalar::{Scalar, c64};

/// Dense complex matrix stored column-major: entry `(i, j)` lives at
/// `data[i + j * nrows]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<c64>,
    nrows: usize,
    ncols: usize,
}

impl DenseMatrix {
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![c64::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i + i * n] = c64::one();
        }
        m
    }

    /// Wrap column-major data.
    ///
    /// # Errors
    ///
    /// Returns `QuantumError::LengthMismatch` if `data.len() != nrows * ncols`.
    pub fn from_vec(data: Vec<c64>, nrows: usize, ncols: usize) -> Result<Self> {
        if data.len() != nrows * ncols {
            return Err(QuantumError::LengthMismatch {
                expected: nrows * ncols,
                actual: data.len(),
            });
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Build a matrix from an entry function `f(i, j)`.
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> c64) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Diagonal matrix from its diagonal.
    pub fn from_diagonal(diag: &[c64]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m.data[i + i * n] = d;
        }
        m
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Number of entries, `nrows * ncols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[c64] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [c64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<c64> {
        self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Option<c64> {
        (i < self.nrows && j < self.ncols).then(|| self.data[i + j * self.nrows])
    }

    /// Reinterpret the buffer with another shape of equal size.
    pub fn reshaped(self, nrows: usize, ncols: usize) -> Result<Self> {
        Self::from_vec(self.data, nrows, ncols)
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    pub fn adjoint(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    pub fn conj(&self) -> Self {
        self.map(|x| x.conj())
    }

    /// Apply `f` to every entry.
    pub fn map(&self, f: impl Fn(c64) -> c64) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Combine two equally shaped matrices entry by entry.
    pub fn zip_map(&self, other: &Self, f: impl Fn(c64, c64) -> c64) -> Self {
        debug_assert_eq!((self.nrows, self.ncols), (other.nrows, other.ncols));
        Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    pub fn scale(&self, alpha: c64) -> Self {
        self.map(|x| x * alpha)
    }

    /// In-place scaling.
    pub fn scale_mut(&mut self, alpha: c64) {
        self.data.iter_mut().for_each(|x| *x *= alpha);
    }

    /// `self + alpha * other`.
    pub fn add_scaled(&self, alpha: c64, other: &Self) -> Self {
        self.zip_map(other, |a, b| a + alpha * b)
    }

    /// In-place `self += alpha * other`.
    pub fn axpy_mut(&mut self, alpha: c64, other: &Self) {
        debug_assert_eq!((self.nrows, self.ncols), (other.nrows, other.ncols));
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += alpha * b;
        }
    }

    /// Add `alpha` to the diagonal in place.
    pub fn shift_diagonal_mut(&mut self, alpha: c64) {
        let n = self.nrows.min(self.ncols);
        for i in 0..n {
            self.data[i + i * self.nrows] += alpha;
        }
    }

    /// Matrix product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    pub fn matmul(&self, other: &Self) -> Self {
        assert_eq!(
            self.ncols, other.nrows,
            "matmul: inner dimensions {}x{} * {}x{}",
            self.nrows, self.ncols, other.nrows, other.ncols
        );
        let mut out = Self::zeros(self.nrows, other.ncols);
        matmul(
            out.as_faer_mut(),
            Accum::Replace,
            self.as_faer(),
            other.as_faer(),
            c64::one(),
            get_global_parallelism(),
        );
        out
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Self {
        let (m, n) = (other.nrows, other.ncols);
        Self::from_fn(self.nrows * m, self.ncols * n, |i, j| {
            self[(i / m, j / n)] * other[(i % m, j % n)]
        })
    }

    pub fn trace(&self) -> c64 {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self.data[i + i * self.nrows]).sum()
    }

    /// Entrywise 2-norm (Frobenius).
    pub fn frobenius_norm(&self) -> f64 {
        self.data
            .iter()
            .map(|x| x.modulus_squared())
            .sum::<f64>()
            .sqrt()
    }

    /// Maximum absolute row sum.
    pub fn inf_norm(&self) -> f64 {
        let mut sums = vec![0.0; self.nrows];
        for j in 0..self.ncols {
            for (i, sum) in sums.iter_mut().enumerate() {
                *sum += self.data[i + j * self.nrows].norm();
            }
        }
        sums.into_iter().fold(0.0, f64::max)
    }

    /// Maximum absolute column sum.
    pub fn one_norm(&self) -> f64 {
        self.data
            .chunks(self.nrows.max(1))
            .map(|col| col.iter().map(|x| x.norm()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for j in 0..n {
            for i in 0..=j {
                if (self[(i, j)] - self[(j, i)].conj()).norm() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// `(A + A†) / 2`.
    pub fn hermitian_part(&self) -> Self {
        let half = c64::from_real(0.5);
        Self::from_fn(self.nrows, self.ncols, |i, j| {
            (self[(i, j)] + self[(j, i)].conj()) * half
        })
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.re.is_finite() && x.im.is_finite())
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = c64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &c64 {
        debug_assert!(i < self.nrows && j < self.ncols);
        &self.data[i + j * self.nrows]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut c64 {
        debug_assert!(i < self.nrows && j < self.ncols);
        &mut self.data[i + j * self.nrows]
    }
}
