//! Matrix functions through eigendecomposition.
//!
//! For A = V diag(λ) V⁻¹ we have f(A) = V diag(f(λ)) V⁻¹, with V⁻¹ = V†
//! when A is Hermitian.

use faer::linalg::solvers::EvdError;

use crate::backend::AsFaerMat;
use crate::decomposition::solve;
use crate::error::{QuantumError, Result};
use crate::scalar::c64;
use crate::storage::DenseMatrix;

fn require_square(m: &DenseMatrix) -> Result<()> {
    if !m.is_square() {
        return Err(QuantumError::NotSquareMatrix {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(())
}

/// V scaled column-wise by `d`.
fn scale_columns(v: &DenseMatrix, d: &[c64]) -> DenseMatrix {
    DenseMatrix::from_fn(v.nrows(), v.ncols(), |i, j| v[(i, j)] * d[j])
}

/// `f(A)` for Hermitian `A`, using the real eigenvalues.
///
/// Only the lower triangle of `m` is read.
pub fn apply_hermitian(m: &DenseMatrix, f: impl Fn(f64) -> c64) -> Result<DenseMatrix> {
    require_square(m)?;
    let n = m.nrows();

    let evd = m
        .as_faer()
        .self_adjoint_eigen(faer::Side::Lower)
        .map_err(|e: EvdError| QuantumError::LinearAlgebra {
            message: format!("self-adjoint eigendecomposition failed: {e:?}"),
        })?;

    let u = evd.U();
    let s = evd.S();
    let v = DenseMatrix::from_fn(n, n, |i, j| u[(i, j)]);
    // Eigenvalues of a self-adjoint matrix come back with zero imaginary part.
    let f_lambda: Vec<c64> = (0..n).map(|i| f(s[i].re)).collect();

    Ok(scale_columns(&v, &f_lambda).matmul(&v.adjoint()))
}

/// `f(A)` for a diagonalizable `A` through the general eigendecomposition.
///
/// # Errors
///
/// `QuantumError::LinearAlgebra` if the decomposition fails or the
/// eigenvector matrix is singular (defective `A`).
pub fn apply_diagonalizable(m: &DenseMatrix, f: impl Fn(c64) -> c64) -> Result<DenseMatrix> {
    require_square(m)?;
    let n = m.nrows();

    let evd = m
        .as_faer()
        .eigen()
        .map_err(|e: EvdError| QuantumError::LinearAlgebra {
            message: format!("eigendecomposition failed: {e:?}"),
        })?;

    let u = evd.U();
    let s = evd.S();
    let v = DenseMatrix::from_fn(n, n, |i, j| u[(i, j)]);
    let f_lambda: Vec<c64> = (0..n).map(|i| f(s[i])).collect();

    // f(A) V = V diag(f(λ))  ⇒  f(A) = (V diag(f(λ))) V⁻¹, solved as
    // V† f(A)† = (V diag(f(λ)))†.
    let rhs = scale_columns(&v, &f_lambda);
    let adjoint = solve(&v.adjoint(), &rhs.adjoint()).map_err(|_| QuantumError::LinearAlgebra {
        message: "matrix is not diagonalizable".into(),
    })?;
    Ok(adjoint.adjoint())
}
