//! Matrix functions of Operator and SuperOperator objects.
//!
//! ```text
//! expm  dense  → Padé [13/13] scaling and squaring
//!       sparse → Taylor scaling and squaring (ExpmOptions), stays sparse
//! logm, sqrtm  → eigendecomposition (self-adjoint when Hermitian)
//! sinm, cosm   → self-adjoint eigendecomposition when Hermitian,
//!                otherwise built from exp(±iA)
//! ```

use crate::config::{DEFAULT_HERMITIAN_TOLERANCE, ExpmOptions};
use crate::decomposition::{apply_diagonalizable, apply_hermitian, expm_dense, expm_sparse};
use crate::error::Result;
use crate::qobj::QuantumObject;
use crate::scalar::{I, Scalar, c64};
use crate::storage::{DenseMatrix, Storage};

impl QuantumObject {
    /// Matrix exponential with default [`ExpmOptions`].
    ///
    /// ```
    /// use qtensors::{QuantumObject, DenseMatrix};
    ///
    /// let zero = QuantumObject::operator(DenseMatrix::zeros(2, 2), &[2]).unwrap();
    /// assert_eq!(zero.expm().unwrap().to_dense_matrix(), DenseMatrix::identity(2));
    /// ```
    pub fn expm(&self) -> Result<QuantumObject> {
        self.expm_with(&ExpmOptions::default())
    }

    /// Matrix exponential. Sparse storage uses `options`; dense storage
    /// ignores them.
    pub fn expm_with(&self, options: &ExpmOptions) -> Result<QuantumObject> {
        self.require_square("expm")?;
        let data = match self.data() {
            Storage::Dense(m) => Storage::Dense(expm_dense(m)?),
            Storage::Sparse(m) => {
                options.validate()?;
                Storage::Sparse(expm_sparse(m, options)?)
            }
        };
        Ok(self.with_data(data))
    }

    /// Principal matrix logarithm.
    pub fn logm(&self) -> Result<QuantumObject> {
        self.spectral("logm", |z| z.ln())
    }

    /// Principal matrix square root.
    pub fn sqrtm(&self) -> Result<QuantumObject> {
        self.spectral("sqrtm", |z| z.sqrt())
    }

    /// Matrix sine.
    pub fn sinm(&self) -> Result<QuantumObject> {
        self.require_square("sinm")?;
        let dense = self.data().to_dense();
        let out = if dense.is_hermitian(DEFAULT_HERMITIAN_TOLERANCE) {
            apply_hermitian(&dense, |x| c64::from_real(x.sin()))?
        } else {
            // sin A = (e^{iA} - e^{-iA}) / 2i
            let (plus, minus) = exp_pm_i(&dense)?;
            plus.add_scaled(-c64::one(), &minus)
                .scale(c64::one() / (I * 2.0))
        };
        Ok(self.with_data(Storage::Dense(out)))
    }

    /// Matrix cosine.
    pub fn cosm(&self) -> Result<QuantumObject> {
        self.require_square("cosm")?;
        let dense = self.data().to_dense();
        let out = if dense.is_hermitian(DEFAULT_HERMITIAN_TOLERANCE) {
            apply_hermitian(&dense, |x| c64::from_real(x.cos()))?
        } else {
            // cos A = (e^{iA} + e^{-iA}) / 2
            let (plus, minus) = exp_pm_i(&dense)?;
            plus.add_scaled(c64::one(), &minus)
                .scale(c64::from_real(0.5))
        };
        Ok(self.with_data(Storage::Dense(out)))
    }

    fn spectral(&self, op: &'static str, f: impl Fn(c64) -> c64) -> Result<QuantumObject> {
        self.require_square(op)?;
        let dense = self.data().to_dense();
        let out = if dense.is_hermitian(DEFAULT_HERMITIAN_TOLERANCE) {
            apply_hermitian(&dense, |x| f(c64::from_real(x)))?
        } else {
            apply_diagonalizable(&dense, f)?
        };
        Ok(self.with_data(Storage::Dense(out)))
    }
}

fn exp_pm_i(a: &DenseMatrix) -> Result<(DenseMatrix, DenseMatrix)> {
    let plus = expm_dense(&a.scale(I))?;
    let minus = expm_dense(&a.scale(-I))?;
    Ok((plus, minus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumError;
    use crate::storage::SparseMatrix;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> c64 {
        c64::new(re, im)
    }

    fn assert_close(a: &QuantumObject, b: &QuantumObject, eps: f64) {
        assert_eq!(a.dims(), b.dims());
        let (x, y) = (a.to_dense_matrix(), b.to_dense_matrix());
        for (p, q) in x.data().iter().zip(y.data()) {
            assert_relative_eq!(p.re, q.re, epsilon = eps);
            assert_relative_eq!(p.im, q.im, epsilon = eps);
        }
    }

    fn hermitian() -> QuantumObject {
        QuantumObject::operator(
            DenseMatrix::from_fn(2, 2, |i, j| match (i, j) {
                (0, 0) => c(2.0, 0.0),
                (1, 1) => c(1.0, 0.0),
                (0, 1) => c(0.3, -0.4),
                _ => c(0.3, 0.4),
            }),
            &[2],
        )
        .unwrap()
    }

    fn non_hermitian() -> QuantumObject {
        QuantumObject::operator(
            DenseMatrix::from_fn(2, 2, |i, j| match (i, j) {
                (0, 0) => c(1.0, 0.0),
                (0, 1) => c(0.5, 0.0),
                (1, 1) => c(2.0, 0.5),
                _ => c(0.0, 0.0),
            }),
            &[2],
        )
        .unwrap()
    }

    #[test]
    fn test_expm_rejects_vectors() {
        let psi = QuantumObject::ket(vec![c(1.0, 0.0)], &[1]).unwrap();
        assert!(matches!(
            psi.expm(),
            Err(QuantumError::UnsupportedRole { .. })
        ));
        assert!(psi.logm().is_err());
    }

    #[test]
    fn test_expm_sparse_matches_dense() {
        let h = hermitian();
        let dense = h.scale(-I).expm().unwrap();
        let sparse = h.to_sparse().scale(-I).expm().unwrap();
        assert!(sparse.is_sparse());
        assert_close(&dense, &sparse, 1e-12);
    }

    #[test]
    fn test_expm_of_zero_sparse_is_identity() {
        let zero = QuantumObject::operator(SparseMatrix::zeros(3, 3), &[3]).unwrap();
        assert_eq!(zero.expm().unwrap().to_dense_matrix(), DenseMatrix::identity(3));
    }

    #[test]
    fn test_logm_inverts_expm() {
        for a in [hermitian(), non_hermitian()] {
            let back = a.expm().unwrap().logm().unwrap();
            assert_close(&back, &a, 1e-10);
        }
    }

    #[test]
    fn test_sqrtm_squares_back() {
        for a in [hermitian(), non_hermitian()] {
            let root = a.sqrtm().unwrap();
            assert_close(&root.matmul(&root).unwrap(), &a, 1e-10);
        }
    }

    #[test]
    fn test_sin_cos_identity() {
        for a in [hermitian(), non_hermitian()] {
            let s = a.sinm().unwrap();
            let co = a.cosm().unwrap();
            let sum = s
                .matmul(&s)
                .unwrap()
                .try_add(&co.matmul(&co).unwrap())
                .unwrap();
            let eye = QuantumObject::operator(DenseMatrix::identity(2), &[2]).unwrap();
            assert_close(&sum, &eye, 1e-10);
        }
    }

    #[test]
    fn test_hermitian_and_general_paths_agree() {
        // A Hermitian input forced through the exp-based path.
        let h = hermitian().to_dense_matrix();
        let (plus, minus) = exp_pm_i(&h).unwrap();
        let cos_exp = plus.add_scaled(c64::one(), &minus).scale(c(0.5, 0.0));
        let cos_eig = hermitian().cosm().unwrap().to_dense_matrix();
        for (p, q) in cos_exp.data().iter().zip(cos_eig.data()) {
            assert_relative_eq!(p.re, q.re, epsilon = 1e-12);
            assert_relative_eq!(p.im, q.im, epsilon = 1e-12);
        }
    }
}
