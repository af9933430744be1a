//! Random states and unitaries.
//!
//! Everything is built from complex Ginibre matrices (independent standard
//! complex normal entries). Each constructor has a `_with_rng` variant for
//! reproducible results with a seeded RNG.

use faer::linalg::solvers::Qr;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::backend::AsFaerMat;
use crate::error::Result;
use crate::qobj::{Dims, QuantumObject, Role};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, Storage};

/// Standard complex normal: real and imaginary parts are independent
/// N(0, 1/2), so `E|z|² = 1`.
fn complex_normal<R: Rng>(rng: &mut R) -> c64 {
    let scale = std::f64::consts::FRAC_1_SQRT_2;
    c64::new(
        rng.sample::<f64, _>(StandardNormal) * scale,
        rng.sample::<f64, _>(StandardNormal) * scale,
    )
}

fn ginibre<R: Rng>(nrows: usize, ncols: usize, rng: &mut R) -> DenseMatrix {
    DenseMatrix::from_fn(nrows, ncols, |_, _| complex_normal(rng))
}

/// Haar-random ket on `dims`.
pub fn random_ket(dims: &[usize]) -> Result<QuantumObject> {
    random_ket_with_rng(dims, &mut rand::rng())
}

/// Haar-random ket using a specific RNG.
///
/// ```
/// use qtensors::random_ket_with_rng;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let psi = random_ket_with_rng(&[2, 3], &mut rng).unwrap();
/// assert!((psi.norm().unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn random_ket_with_rng<R: Rng>(dims: &[usize], rng: &mut R) -> Result<QuantumObject> {
    let dims = Dims::new(dims)?;
    let psi = ginibre(dims.hilbert_dim(), 1, rng);
    QuantumObject::from_parts(Storage::Dense(psi), Role::Ket, dims)?.normalize()
}

/// Random density matrix `G G† / tr(G G†)` (Hilbert-Schmidt measure).
pub fn random_dm(dims: &[usize]) -> Result<QuantumObject> {
    random_dm_with_rng(dims, &mut rand::rng())
}

pub fn random_dm_with_rng<R: Rng>(dims: &[usize], rng: &mut R) -> Result<QuantumObject> {
    let dims = Dims::new(dims)?;
    let n = dims.hilbert_dim();
    let g = ginibre(n, n, rng);
    let rho = g.matmul(&g.adjoint()).hermitian_part();
    QuantumObject::from_parts(Storage::Dense(rho), Role::Operator, dims)?.normalize()
}

/// Haar-random unitary on `dims`.
pub fn random_unitary(dims: &[usize]) -> Result<QuantumObject> {
    random_unitary_with_rng(dims, &mut rand::rng())
}

/// Haar-random unitary using a specific RNG.
///
/// The `Q` factor of a Ginibre matrix, with column `j` multiplied by the
/// phase of `R_jj` so that `R` has a positive diagonal.
pub fn random_unitary_with_rng<R: Rng>(dims: &[usize], rng: &mut R) -> Result<QuantumObject> {
    let dims = Dims::new(dims)?;
    let n = dims.hilbert_dim();
    let g = ginibre(n, n, rng);

    let qr: Qr<c64> = Qr::new(g.as_faer());
    let q = qr.compute_thin_Q();
    let r = qr.thin_R();
    let phases: Vec<c64> = (0..n)
        .map(|j| {
            let d = r[(j, j)];
            if d.norm() > 0.0 { d / d.norm() } else { c64::one() }
        })
        .collect();
    let u = DenseMatrix::from_fn(n, n, |i, j| q[(i, j)] * phases[j]);
    QuantumObject::from_parts(Storage::Dense(u), Role::Operator, dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_ket_reproducible() {
        let mut rng1 = StdRng::seed_from_u64(12345);
        let mut rng2 = StdRng::seed_from_u64(12345);
        let a = random_ket_with_rng(&[3, 2], &mut rng1).unwrap();
        let b = random_ket_with_rng(&[3, 2], &mut rng2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dims().as_slice(), &[3, 2]);
        assert_relative_eq!(a.norm().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_random_dm_is_state() {
        let mut rng = StdRng::seed_from_u64(42);
        let rho = random_dm_with_rng(&[4], &mut rng).unwrap();
        assert!(rho.is_hermitian());
        assert_relative_eq!(rho.trace().unwrap().re, 1.0, epsilon = 1e-12);
        // Positive semidefinite: the trace norm equals the trace.
        assert_relative_eq!(rho.norm().unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_random_unitary_is_unitary() {
        let mut rng = StdRng::seed_from_u64(3);
        let u = random_unitary_with_rng(&[2, 2], &mut rng).unwrap();
        let uu = u.dag().matmul(&u).unwrap().to_dense_matrix();
        let eye = DenseMatrix::identity(4);
        for (x, y) in uu.data().iter().zip(eye.data()) {
            assert_relative_eq!(x.re, y.re, epsilon = 1e-12);
            assert_relative_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_large_random_unitary_is_unitary() {
        let mut rng = StdRng::seed_from_u64(31);
        let u = random_unitary_with_rng(&[8, 16], &mut rng).unwrap().to_dense_matrix();
        let uu = u.adjoint().matmul(&u);
        let eye = DenseMatrix::identity(128);
        let err = uu.add_scaled(-c64::one(), &eye).frobenius_norm();
        assert!(err < 1e-11, "deviation from unitarity {err}");
    }

    #[test]
    fn test_random_unitary_has_positive_r_diagonal() {
        // U† G is the R factor of the same Ginibre draw; the phase fix makes
        // its diagonal real and positive.
        let n = 6;
        let g = ginibre(n, n, &mut StdRng::seed_from_u64(17));
        let u = random_unitary_with_rng(&[n], &mut StdRng::seed_from_u64(17))
            .unwrap()
            .to_dense_matrix();
        let r = u.adjoint().matmul(&g);
        for j in 0..n {
            assert!(r[(j, j)].re > 0.0);
            assert_relative_eq!(r[(j, j)].im, 0.0, epsilon = 1e-12);
            for i in j + 1..n {
                assert!(r[(i, j)].norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_thread_rng_variants() {
        assert!(random_ket(&[2]).unwrap().is_ket());
        assert!(random_dm(&[2]).unwrap().is_operator());
        assert!(random_unitary(&[0]).is_err());
    }
}
