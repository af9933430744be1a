//! Steady state of a time-independent generator by one linear solve.
//!
//! `L vec(ρ) = 0` is singular, so the trace condition is folded into the
//! first row: adding `w` at `(0, k(N+1))` for every diagonal position `k`
//! adds `w·tr ρ` to the first equation, and the right-hand side `w e₀`
//! pins `tr ρ = 1`. `w` is the mean entry magnitude of `L`, which keeps the
//! extra row on the same scale as the rest of the system.
//!
//! Sparse generators are solved with sparse LU; dense ones with dense LU.

use tracing::debug;

use crate::decomposition::{solve, solve_sparse};
use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};
use crate::superop::liouvillian;

/// Steady state of a generator.
///
/// A SuperOperator is used as the Liouvillian. An Operator is taken to be a
/// Hamiltonian and converted with `liouvillian(H, [])`; a closed system has
/// no unique steady state, so this usually ends in a
/// [`QuantumError::LinearAlgebra`] error and exists for symmetry with
/// [`steady_state_from_hamiltonian`].
///
/// The result is an Operator with the generator's dims, trace one and
/// Hermitian by construction.
///
/// # Errors
///
/// - `UnsupportedRole` for roles other than SuperOperator and Operator
/// - `LinearAlgebra` if the system is singular
///
/// ```
/// use qtensors::{destroy, liouvillian, steady_state};
///
/// // A decaying cavity relaxes to vacuum.
/// let a = destroy(4).unwrap();
/// let h = a.dag().matmul(&a).unwrap();
/// let rho = steady_state(&liouvillian(&h, &[a]).unwrap()).unwrap();
/// assert!((rho.get(0, 0).unwrap().re - 1.0).abs() < 1e-10);
/// ```
pub fn steady_state(generator: &QuantumObject) -> Result<QuantumObject> {
    match generator.role() {
        Role::SuperOperator => solve_direct(generator),
        Role::Operator => solve_direct(&liouvillian(generator, &[])?),
        role => Err(QuantumError::UnsupportedRole {
            op: "steady_state",
            role,
        }),
    }
}

/// Steady state of `−i[H, ρ] + Σ D[c]ρ`.
pub fn steady_state_from_hamiltonian(
    hamiltonian: &QuantumObject,
    c_ops: &[QuantumObject],
) -> Result<QuantumObject> {
    solve_direct(&liouvillian(hamiltonian, c_ops)?)
}

pub(super) fn solve_direct(generator: &QuantumObject) -> Result<QuantumObject> {
    let n = generator.hilbert_dim();
    let size = n * n;
    let magnitude: f64 = match generator.data() {
        Storage::Dense(l) => l.data().iter().map(|z| z.norm()).sum(),
        Storage::Sparse(l) => l.values().iter().map(|z| z.norm()).sum(),
    };
    let weight = magnitude / (size * size) as f64;
    debug!(n, weight, sparse = generator.is_sparse(), "steady-state solve");

    let w = c64::from_real(weight);
    let mut rhs = DenseMatrix::zeros(size, 1);
    rhs[(0, 0)] = w;

    let x = match generator.data() {
        Storage::Dense(l) => {
            let mut system = l.clone();
            for k in 0..n {
                system[(0, k * (n + 1))] += w;
            }
            solve(&system, &rhs)?
        }
        Storage::Sparse(l) => {
            let trace_row =
                SparseMatrix::from_triplets(size, size, (0..n).map(|k| (0, k * (n + 1), w)))?;
            solve_sparse(&l.add_scaled(c64::one(), &trace_row), &rhs)?
        }
    };

    let rho = x.reshaped(n, n)?.hermitian_part();
    QuantumObject::from_parts(Storage::Dense(rho), Role::Operator, generator.dims().clone())
}
