//! Steady state of a periodically driven generator
//! `L(t) = L₀ + L₊ e^{iωt} + L₋ e^{−iωt}`.
//!
//! With `ρ(t) = Σ_n ρ_n e^{inωt}`, the harmonics obey
//! `inω ρ_n = L₀ ρ_n + L₊ ρ_{n−1} + L₋ ρ_{n+1}`. Truncating at `n_max` and
//! writing `ρ_n = S_n ρ_{n−1}`, `ρ_{−n} = T_n ρ_{−n+1}` gives
//!
//! ```text
//! S_n = ( inω − L₀ − L₋ S_{n+1})⁻¹ L₊      S_{n_max+1} = 0
//! T_n = (−inω − L₀ − L₊ T_{n+1})⁻¹ L₋      T_{n_max+1} = 0
//! L_eff = L₀ + L₋ S₁ + L₊ T₁
//! ```
//!
//! and `ρ₀` is the steady state of `L_eff`.
//!
//! The levels `S_n`, `T_n` are dense. When all three generators are sparse,
//! `L_eff` is assembled sparse, since `S₁` vanishes on every column where
//! `L₊` does (likewise `T₁` and `L₋`).

use tracing::{debug, trace};

use super::direct::solve_direct;
use crate::config::FloquetOptions;
use crate::decomposition::solve;
use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};

fn require_generator(op: &'static str, generator: &QuantumObject) -> Result<()> {
    if generator.role() != Role::SuperOperator {
        return Err(QuantumError::UnsupportedRole {
            op,
            role: generator.role(),
        });
    }
    Ok(())
}

/// One sideband chain, eliminated from `n_max` down to 1.
fn sideband(
    base: &DenseMatrix,
    up: &DenseMatrix,
    down: &DenseMatrix,
    frequency: f64,
    n_max: usize,
) -> Result<DenseMatrix> {
    let size = base.nrows();
    let mut s = DenseMatrix::zeros(size, size);
    for n in (1..=n_max).rev() {
        let mut lhs = base.add_scaled(c64::one(), &down.matmul(&s)).scale(-c64::one());
        lhs.shift_diagonal_mut(c64::new(0.0, n as f64 * frequency));
        s = solve(&lhs, up)?;
        trace!(harmonic = n, norm = s.frobenius_norm(), "sideband eliminated");
    }
    Ok(s)
}

fn zero_below(m: &DenseMatrix, tol: f64) -> DenseMatrix {
    m.map(|z| if z.norm() < tol { c64::zero() } else { z })
}

/// Time-independent generator whose steady state is the zeroth harmonic of
/// the driven problem.
///
/// # Errors
///
/// - `UnsupportedRole` unless all three generators are SuperOperators
/// - `DimensionMismatch` if their dims differ
/// - `InvalidArgument` for invalid `options` or a non-finite `frequency`
/// - `LinearAlgebra` if a continued-fraction level is singular
pub fn effective_floquet_generator(
    base: &QuantumObject,
    plus: &QuantumObject,
    minus: &QuantumObject,
    frequency: f64,
    options: &FloquetOptions,
) -> Result<QuantumObject> {
    options.validate()?;
    if !frequency.is_finite() {
        return Err(QuantumError::InvalidArgument {
            message: format!("drive frequency must be finite, got {frequency}"),
        });
    }
    for generator in [base, plus, minus] {
        require_generator("steady_state_floquet", generator)?;
    }
    base.check_same_dims(plus)?;
    base.check_same_dims(minus)?;

    debug!(
        n_max = options.n_max,
        tol = options.tol,
        frequency,
        "floquet continued fraction"
    );
    let l0 = base.data().to_dense();
    let lp = plus.data().to_dense();
    let lm = minus.data().to_dense();

    let s1 = zero_below(&sideband(&l0, &lp, &lm, frequency, options.n_max)?, options.tol);
    let t1 = zero_below(&sideband(&l0, &lm, &lp, -frequency, options.n_max)?, options.tol);

    let effective = match (base.data(), plus.data(), minus.data()) {
        (Storage::Sparse(l0), Storage::Sparse(lp), Storage::Sparse(lm)) => {
            let s1 = SparseMatrix::from_dense(&s1);
            let t1 = SparseMatrix::from_dense(&t1);
            Storage::Sparse(
                l0.add_scaled(c64::one(), &lm.matmul(&s1))
                    .add_scaled(c64::one(), &lp.matmul(&t1)),
            )
        }
        _ => Storage::Dense(
            l0.add_scaled(c64::one(), &lm.matmul(&s1))
                .add_scaled(c64::one(), &lp.matmul(&t1)),
        ),
    };
    QuantumObject::from_parts(effective, Role::SuperOperator, base.dims().clone())
}

/// Time-averaged steady state of `L₀ + L₊ e^{iωt} + L₋ e^{−iωt}`.
///
/// A small `n_max` gives a less accurate answer, not an error.
///
/// ```
/// use qtensors::{FloquetOptions, liouvillian, sigma_minus, sigma_x, sigma_z, spre, spost};
/// use qtensors::{c64, steady_state_floquet};
///
/// let h0 = sigma_z().scale(c64::new(0.5, 0.0));
/// let l0 = liouvillian(&h0, &[sigma_minus()]).unwrap();
/// // Drive H₁ = ½ σx cos ωt, so L± = −i/4 [σx, ·].
/// let x = sigma_x();
/// let l1 = spre(&x).unwrap().try_sub(&spost(&x).unwrap()).unwrap().scale(c64::new(0.0, -0.25));
///
/// let rho = steady_state_floquet(&l0, &l1, &l1, 1.0, &FloquetOptions::default()).unwrap();
/// assert!((rho.trace().unwrap().re - 1.0).abs() < 1e-10);
/// ```
pub fn steady_state_floquet(
    base: &QuantumObject,
    plus: &QuantumObject,
    minus: &QuantumObject,
    frequency: f64,
    options: &FloquetOptions,
) -> Result<QuantumObject> {
    solve_direct(&effective_floquet_generator(
        base, plus, minus, frequency, options,
    )?)
}
