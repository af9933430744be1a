//! Matrix exponential.
//!
//! Dense matrices use the [13/13] Padé approximant with scaling and squaring
//! (Higham 2005). Sparse matrices use a truncated Taylor series on a scaled
//! copy, pruning small entries so the iterates stay sparse.

use tracing::{debug, warn};

use crate::config::ExpmOptions;
use crate::decomposition::solve;
use crate::error::{QuantumError, Result};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix};

/// Padé [13/13] coefficients.
const PADE_13: [f64; 14] = [
    64764752532480000.0,
    32382376266240000.0,
    7771770303897600.0,
    1187353796428800.0,
    129060195264000.0,
    10559470521600.0,
    670442572800.0,
    33522128640.0,
    1323241920.0,
    40840800.0,
    960960.0,
    16380.0,
    182.0,
    1.0,
];

/// 1-norm bound below which [13/13] is accurate to double precision.
const THETA_13: f64 = 5.371920351148152;

fn require_finite(norm: f64) -> Result<()> {
    if norm.is_finite() {
        Ok(())
    } else {
        Err(QuantumError::InvalidArgument {
            message: format!("matrix exponential of a matrix with norm {norm}"),
        })
    }
}

/// `exp(A)` for a dense square matrix.
///
/// `exp(0)` is exactly the identity.
///
/// # Errors
///
/// `QuantumError::InvalidArgument` if `A` has an infinite or NaN entry.
pub fn expm_dense(a: &DenseMatrix) -> Result<DenseMatrix> {
    let n = a.nrows();
    let norm1 = a.one_norm();
    require_finite(norm1)?;
    if norm1 == 0.0 {
        return Ok(DenseMatrix::identity(n));
    }

    let s = if norm1 > THETA_13 {
        (norm1 / THETA_13).log2().ceil() as i32
    } else {
        0
    };
    let a_scaled = a.scale(c64::from_real(0.5f64.powi(s)));
    debug!(n, norm1, squarings = s, "dense expm");

    let mut result = pade_13(&a_scaled)?;
    for _ in 0..s {
        result = result.matmul(&result);
    }
    Ok(result)
}

fn pade_13(a: &DenseMatrix) -> Result<DenseMatrix> {
    let b = PADE_13.map(c64::from_real);
    let n = a.nrows();
    let identity = DenseMatrix::identity(n);

    let a2 = a.matmul(a);
    let a4 = a2.matmul(&a2);
    let a6 = a2.matmul(&a4);

    // U = A [A6 (b13 A6 + b11 A4 + b9 A2) + b7 A6 + b5 A4 + b3 A2 + b1 I]
    let mut u_inner = a6.matmul(&a6.scale(b[13]).add_scaled(b[11], &a4).add_scaled(b[9], &a2));
    u_inner.axpy_mut(b[7], &a6);
    u_inner.axpy_mut(b[5], &a4);
    u_inner.axpy_mut(b[3], &a2);
    u_inner.axpy_mut(b[1], &identity);
    let u = a.matmul(&u_inner);

    // V = A6 (b12 A6 + b10 A4 + b8 A2) + b6 A6 + b4 A4 + b2 A2 + b0 I
    let mut v = a6.matmul(&a6.scale(b[12]).add_scaled(b[10], &a4).add_scaled(b[8], &a2));
    v.axpy_mut(b[6], &a6);
    v.axpy_mut(b[4], &a4);
    v.axpy_mut(b[2], &a2);
    v.axpy_mut(b[0], &identity);

    // exp(A) ≈ (V - U)⁻¹ (V + U)
    let v_plus_u = v.add_scaled(c64::one(), &u);
    let v_minus_u = v.add_scaled(-c64::one(), &u);
    solve(&v_minus_u, &v_plus_u)
}

/// `exp(A)` for a sparse square matrix.
///
/// `A` is scaled by `2^-s` with the smallest `s` that brings its infinity
/// norm below one. The Taylor series of the scaled matrix is summed until a
/// term's infinity norm drops below `options.series_tolerance`, and the sum
/// is squared `s` times. Entries at or below `options.drop_tolerance` are
/// removed after every term and every squaring.
///
/// # Errors
///
/// `QuantumError::InvalidArgument` if `A` has an infinite or NaN entry.
pub fn expm_sparse(a: &SparseMatrix, options: &ExpmOptions) -> Result<SparseMatrix> {
    let n = a.nrows();
    let norm = a.inf_norm();
    require_finite(norm)?;
    if norm == 0.0 {
        return Ok(SparseMatrix::identity(n));
    }

    let s = if norm < 1.0 {
        0
    } else {
        norm.log2().floor() as i32 + 1
    };
    let scaled = a.scale(c64::from_real(0.5f64.powi(s)));

    let mut result = SparseMatrix::identity(n);
    let mut term = SparseMatrix::identity(n);
    let mut terms = 0;
    let mut converged = false;
    for k in 1..=options.max_terms {
        term = term.matmul(&scaled);
        term.scale_mut(c64::from_real(1.0 / k as f64));
        term.prune_mut(options.drop_tolerance);

        result = result.add_scaled(c64::one(), &term);
        result.prune_mut(options.drop_tolerance);

        terms = k;
        if term.inf_norm() < options.series_tolerance {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            max_terms = options.max_terms,
            "sparse expm series hit its term cap before reaching tolerance"
        );
    }

    for _ in 0..s {
        result = result.matmul(&result);
        result.prune_mut(options.drop_tolerance);
    }
    debug!(n, norm, squarings = s, terms, nnz = result.nnz(), "sparse expm");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_close(a: &DenseMatrix, b: &DenseMatrix, eps: f64) {
        assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
        for (x, y) in a.data().iter().zip(b.data()) {
            assert_relative_eq!(x.re, y.re, epsilon = eps, max_relative = eps);
            assert_relative_eq!(x.im, y.im, epsilon = eps, max_relative = eps);
        }
    }

    #[test]
    fn test_zero_is_identity_exactly() {
        assert_eq!(expm_dense(&DenseMatrix::zeros(3, 3)).unwrap(), DenseMatrix::identity(3));
        assert_eq!(
            expm_sparse(&SparseMatrix::zeros(3, 3), &ExpmOptions::default()).unwrap(),
            SparseMatrix::identity(3)
        );
    }

    #[test]
    fn test_diagonal_matches_scalar_exponentials() {
        let diag = [
            c64::new(0.5, 0.0),
            c64::new(-2.0, 1.0),
            c64::new(7.0, 0.0),
        ];
        let expected = DenseMatrix::from_diagonal(&diag.map(|z| z.exp()));
        let dense = DenseMatrix::from_diagonal(&diag);

        assert_close(&expm_dense(&dense).unwrap(), &expected, 1e-12);
        let sparse =
            expm_sparse(&SparseMatrix::from_dense(&dense), &ExpmOptions::default()).unwrap();
        assert_close(&sparse.to_dense(), &expected, 1e-12);
        assert_eq!(sparse.nnz(), 3);
    }

    #[test]
    fn test_rotation_generator() {
        // exp(-iθX) = cos θ I - i sin θ X
        let theta = 1.3;
        let x = DenseMatrix::from_fn(2, 2, |i, j| {
            if i != j {
                c64::new(0.0, -theta)
            } else {
                c64::new(0.0, 0.0)
            }
        });
        let expected = DenseMatrix::from_fn(2, 2, |i, j| {
            if i == j {
                c64::new(theta.cos(), 0.0)
            } else {
                c64::new(0.0, -theta.sin())
            }
        });
        assert_close(&expm_dense(&x).unwrap(), &expected, 1e-13);
        let sparse = expm_sparse(&SparseMatrix::from_dense(&x), &ExpmOptions::default()).unwrap();
        assert_close(&sparse.to_dense(), &expected, 1e-13);
    }

    #[test]
    fn test_large_norm_nilpotent() {
        // exp([[0, a], [0, 0]]) = [[1, a], [0, 1]] regardless of scaling.
        let a = 40.0;
        let m = DenseMatrix::from_fn(2, 2, |i, j| {
            if (i, j) == (0, 1) {
                c64::new(a, 0.0)
            } else {
                c64::new(0.0, 0.0)
            }
        });
        let expected = DenseMatrix::from_fn(2, 2, |i, j| match (i, j) {
            (0, 1) => c64::new(a, 0.0),
            (0, 0) | (1, 1) => c64::new(1.0, 0.0),
            _ => c64::new(0.0, 0.0),
        });
        assert_close(&expm_dense(&m).unwrap(), &expected, 1e-10);
        let sparse = expm_sparse(&SparseMatrix::from_dense(&m), &ExpmOptions::default()).unwrap();
        assert_close(&sparse.to_dense(), &expected, 1e-10);
    }

    #[test]
    fn test_drop_tolerance_is_lossy() {
        let m = SparseMatrix::from_triplets(2, 2, [(0, 1, c64::new(1e-3, 0.0))]).unwrap();
        let options = ExpmOptions {
            drop_tolerance: 1e-2,
            ..Default::default()
        };
        let e = expm_sparse(&m, &options).unwrap();
        assert_eq!(e, SparseMatrix::identity(2));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        for bad in [f64::INFINITY, f64::NAN] {
            let m = DenseMatrix::from_diagonal(&[c64::new(bad, 0.0), c64::one()]);
            assert!(matches!(
                expm_dense(&m),
                Err(QuantumError::InvalidArgument { .. })
            ));
            assert!(matches!(
                expm_sparse(&SparseMatrix::from_dense(&m), &ExpmOptions::default()),
                Err(QuantumError::InvalidArgument { .. })
            ));
        }
    }
}
