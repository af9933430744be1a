//! Linear solves with LU and partial pivoting.
//!
//! Every solve also estimates the reciprocal 1-norm condition number
//! `1 / (‖A‖₁ ‖A⁻¹‖₁)` from the factorization (Hager's method, as in
//! LAPACK's `xGECON`). A rank-deficient matrix rarely yields an exactly zero
//! pivot in floating point, so the estimate is what tells a singular system
//! from a regular one.

use faer::Mat;
use faer::linalg::solvers::Solve;
use faer::sparse::linalg::LuError;

use crate::backend::{AsFaerMat, AsFaerSparse, dense_from_faer};
use crate::error::{QuantumError, Result};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix};

/// Systems whose estimated reciprocal condition number falls below this are
/// reported as singular.
pub const SINGULAR_RCOND: f64 = 1e-12;

fn check_shapes(nrows: usize, ncols: usize, rhs_rows: usize) -> Result<()> {
    if nrows != ncols {
        return Err(QuantumError::NotSquareMatrix {
            rows: nrows,
            cols: ncols,
        });
    }
    if rhs_rows != nrows {
        return Err(QuantumError::LengthMismatch {
            expected: nrows,
            actual: rhs_rows,
        });
    }
    Ok(())
}

/// Solve `A X = B` with dense LU and partial pivoting.
///
/// # Errors
///
/// - `QuantumError::NotSquareMatrix` if `A` is not square
/// - `QuantumError::LengthMismatch` if `B` has the wrong number of rows
/// - `QuantumError::LinearAlgebra` if `A` is singular to working precision
pub fn solve(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_shapes(a.nrows(), a.ncols(), b.nrows())?;
    let lu = a.as_faer().partial_piv_lu();
    finish(&lu, a.nrows(), a.one_norm(), b)
}

/// Solve `A X = B` with faer's sparse LU.
///
/// # Errors
///
/// As [`solve`]; a structurally singular `A` is a `LinearAlgebra` error too.
pub fn solve_sparse(a: &SparseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    check_shapes(a.nrows(), a.ncols(), b.nrows())?;
    let lu = a
        .as_faer_sparse()
        .sp_lu()
        .map_err(|e: LuError| QuantumError::LinearAlgebra {
            message: format!("sparse LU of {}x{} system failed: {e}", a.nrows(), a.ncols()),
        })?;
    finish(&lu, a.nrows(), a.one_norm(), b)
}

fn finish(lu: &impl Solve<c64>, n: usize, norm: f64, b: &DenseMatrix) -> Result<DenseMatrix> {
    let mut x_mat = b.as_faer().to_owned();
    lu.solve_in_place(&mut x_mat);
    let x = dense_from_faer(x_mat.as_ref());

    let rcond = 1.0 / (norm * inverse_one_norm(lu, n));
    if !x.is_finite() || rcond.is_nan() || rcond < SINGULAR_RCOND {
        return Err(QuantumError::LinearAlgebra {
            message: format!("{n}x{n} system is singular (rcond {rcond:.3e})"),
        });
    }
    Ok(x)
}

fn one_norm(v: &Mat<c64>) -> f64 {
    (0..v.nrows()).map(|i| v[(i, 0)].norm()).sum()
}

fn unit_phase(z: c64) -> c64 {
    let r = z.norm();
    if r > 0.0 { z / r } else { c64::one() }
}

/// Lower estimate of `‖A⁻¹‖₁` from solves with `A` and `A†`.
fn inverse_one_norm(lu: &impl Solve<c64>, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let mut x = Mat::from_fn(n, 1, |_, _| c64::from_real(1.0 / n as f64));
    let mut estimate = 0.0;
    let mut last = None;
    for _ in 0..5 {
        lu.solve_in_place(&mut x);
        let norm = one_norm(&x);
        if !norm.is_finite() {
            return f64::INFINITY;
        }
        if norm <= estimate {
            break;
        }
        estimate = norm;

        let mut z = Mat::from_fn(n, 1, |i, _| unit_phase(x[(i, 0)]));
        lu.solve_adjoint_in_place(&mut z);
        let j = (0..n)
            .max_by(|&p, &q| z[(p, 0)].norm().total_cmp(&z[(q, 0)].norm()))
            .unwrap_or(0);
        if last == Some(j) {
            break;
        }
        last = Some(j);
        x = Mat::zeros(n, 1);
        x[(j, 0)] = c64::one();
    }

    // Alternating ramp, for matrices where the iteration above stalls.
    let span = (n.max(2) - 1) as f64;
    let mut ramp = Mat::from_fn(n, 1, |i, _| {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        c64::from_real(sign * (1.0 + i as f64 / span))
    });
    lu.solve_in_place(&mut ramp);
    let ramp_estimate = 2.0 * one_norm(&ramp) / (3.0 * n as f64);
    if ramp_estimate.is_finite() {
        estimate.max(ramp_estimate)
    } else {
        f64::INFINITY
    }
}
