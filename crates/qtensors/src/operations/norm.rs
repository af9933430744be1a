//! Norms of quantum objects.

use crate::decomposition::singular_values;
use crate::error::{QuantumError, Result};
use crate::qobj::QuantumObject;
use crate::scalar::c64;
use crate::storage::Storage;

fn entries(data: &Storage) -> Vec<c64> {
    match data {
        Storage::Dense(m) => m.data().to_vec(),
        // Implicit zeros never contribute to a p-norm.
        Storage::Sparse(m) => m.iter().map(|(_, _, v)| v).collect(),
    }
}

fn p_sum(values: impl Iterator<Item = f64>, p: f64) -> f64 {
    if p.is_infinite() {
        values.fold(0.0, f64::max)
    } else {
        values.map(|x| x.powf(p)).sum::<f64>().powf(1.0 / p)
    }
}

impl QuantumObject {
    /// Default norm: the 2-norm for vector roles, the trace norm (Schatten
    /// p = 1) for Operator and SuperOperator.
    ///
    /// ```
    /// use qtensors::{QuantumObject, c64};
    ///
    /// let psi = QuantumObject::ket(vec![c64::new(3.0, 0.0), c64::new(0.0, 4.0)], &[2]).unwrap();
    /// assert!((psi.norm().unwrap() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> Result<f64> {
        let p = if self.role().is_square() { 1.0 } else { 2.0 };
        self.norm_p(p)
    }

    /// Vector p-norm for vector roles, Schatten p-norm for square roles.
    /// `p = f64::INFINITY` is accepted.
    ///
    /// # Errors
    ///
    /// `QuantumError::InvalidArgument` for `p < 1` or NaN, and
    /// `QuantumError::LinearAlgebra` if the SVD fails.
    pub fn norm_p(&self, p: f64) -> Result<f64> {
        if p.is_nan() || p < 1.0 {
            return Err(QuantumError::InvalidArgument {
                message: format!("norm order must be >= 1, got {p}"),
            });
        }

        if !self.role().is_square() {
            return Ok(p_sum(entries(self.data()).into_iter().map(|z| z.norm()), p));
        }

        if p == 2.0 {
            // Schatten-2 equals the entrywise 2-norm.
            return Ok(self.data().frobenius_norm());
        }
        let sigma = singular_values(&self.data().to_dense())?;
        Ok(p_sum(sigma.into_iter(), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DenseMatrix, SparseMatrix};
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> c64 {
        c64::new(re, im)
    }

    #[test]
    fn test_vector_norms() {
        let psi = QuantumObject::ket(vec![c(3.0, 0.0), c(0.0, -4.0)], &[2]).unwrap();
        assert_relative_eq!(psi.norm().unwrap(), 5.0, epsilon = 1e-14);
        assert_relative_eq!(psi.norm_p(1.0).unwrap(), 7.0, epsilon = 1e-14);
        assert_relative_eq!(psi.norm_p(f64::INFINITY).unwrap(), 4.0);
        assert_relative_eq!(psi.dag().norm().unwrap(), 5.0, epsilon = 1e-14);
    }

    #[test]
    fn test_trace_norm_of_density_matrix_is_one() {
        let m = DenseMatrix::from_fn(2, 2, |i, j| match (i, j) {
            (0, 1) => c(0.0, -0.25),
            (1, 0) => c(0.0, 0.25),
            _ => c(0.5, 0.0),
        });
        let rho = QuantumObject::operator(m, &[2]).unwrap();
        assert_relative_eq!(rho.norm().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_schatten_norms() {
        let a = QuantumObject::operator(
            DenseMatrix::from_diagonal(&[c(-3.0, 0.0), c(0.0, 4.0)]),
            &[2],
        )
        .unwrap();
        assert_relative_eq!(a.norm_p(1.0).unwrap(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(a.norm_p(2.0).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(a.norm_p(3.0).unwrap(), 91.0f64.cbrt(), epsilon = 1e-12);
        assert_relative_eq!(a.norm_p(f64::INFINITY).unwrap(), 4.0, epsilon = 1e-12);
        // Fast path agrees with the singular-value route.
        assert_relative_eq!(a.norm_p(2.0).unwrap(), a.norm_p(2.0 + 1e-12).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_sparse_and_invalid_order() {
        let a = QuantumObject::operator(SparseMatrix::identity(4), &[2, 2]).unwrap();
        assert_relative_eq!(a.norm().unwrap(), 4.0, epsilon = 1e-12);
        assert!(a.norm_p(0.5).is_err());
        assert!(a.norm_p(f64::NAN).is_err());
    }
}
