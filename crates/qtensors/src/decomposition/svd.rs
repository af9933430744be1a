//! Singular values.

use faer::linalg::solvers::{Svd, SvdError};

use crate::backend::AsFaerMat;
use crate::error::{QuantumError, Result};
use crate::scalar::c64;
use crate::storage::DenseMatrix;

/// Singular values of `m` in non-increasing order.
pub fn singular_values(m: &DenseMatrix) -> Result<Vec<f64>> {
    let k = m.nrows().min(m.ncols());
    if k == 0 {
        return Ok(Vec::new());
    }

    let svd: Svd<c64> = Svd::new_thin(m.as_faer()).map_err(|e: SvdError| {
        QuantumError::LinearAlgebra {
            message: format!("SVD failed: {e:?}"),
        }
    })?;

    // Singular values are real and non-negative, stored as c64.
    let s = svd.S();
    let mut values: Vec<f64> = (0..k).map(|i| s[i].re).collect();
    values.sort_by(|a, b| b.total_cmp(a));
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_singular_values() {
        let m = DenseMatrix::from_diagonal(&[
            c64::new(-3.0, 0.0),
            c64::new(0.0, 1.0),
            c64::new(2.0, 0.0),
        ]);
        let s = singular_values(&m).unwrap();
        assert_relative_eq!(s[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(s[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(s[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rectangular() {
        // Rank one: u v† with |u| = sqrt(2), |v| = sqrt(3).
        let m = DenseMatrix::from_fn(2, 3, |_, _| c64::new(1.0, 0.0));
        let s = singular_values(&m).unwrap();
        assert_eq!(s.len(), 2);
        assert_relative_eq!(s[0], 6.0f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(s[1], 0.0, epsilon = 1e-12);
    }
}
