//! Steady states of Lindblad generators, undriven and periodically driven.

use approx::assert_relative_eq;
use qtensors::{
    FloquetOptions, QuantumObject, c64, identity, liouvillian, partial_trace, sigma_minus,
    sigma_x, sigma_z, spost, spre, steady_state, steady_state_floquet,
    steady_state_from_hamiltonian, tensor,
};

fn real(x: f64) -> c64 {
    c64::new(x, 0.0)
}

fn distance(a: &QuantumObject, b: &QuantumObject) -> f64 {
    a.try_sub(b).unwrap().data().frobenius_norm()
}

/// Qubit with splitting ω₀ = 1 decaying at rate γ = 0.5.
fn undriven_qubit() -> QuantumObject {
    let h = sigma_z().scale(real(0.5));
    liouvillian(&h, &[sigma_minus().scale(real(0.5f64.sqrt()))]).unwrap()
}

/// `H₁ cos ωt` with `H₁ = amplitude σx` contributes
/// `L₊ = L₋ = −i (amplitude / 2) [σx, ·]`.
fn sideband(amplitude: f64) -> QuantumObject {
    let x = sigma_x();
    spre(&x)
        .unwrap()
        .try_sub(&spost(&x).unwrap())
        .unwrap()
        .scale(c64::new(0.0, -0.5 * amplitude))
}

#[test]
fn test_two_qubit_steady_state_properties() {
    let i2 = identity(&[2]).unwrap();
    let z1 = tensor(&[&sigma_z(), &i2]).unwrap();
    let z2 = tensor(&[&i2, &sigma_z()]).unwrap();
    let xx = tensor(&[&sigma_x(), &sigma_x()]).unwrap();
    let h = z1
        .scale(real(0.5))
        .try_add(&z2.scale(real(0.7)))
        .unwrap()
        .try_add(&xx.scale(real(0.2)))
        .unwrap();
    let c_ops = [
        tensor(&[&sigma_minus(), &i2]).unwrap().scale(real(0.4)),
        tensor(&[&i2, &sigma_minus()]).unwrap().scale(real(0.3)),
    ];
    let l = liouvillian(&h, &c_ops).unwrap();
    let rho = steady_state(&l).unwrap();

    assert_eq!(rho.dims().as_slice(), &[2, 2]);
    assert!(l.matmul(&rho).unwrap().data().frobenius_norm() < 1e-10);
    assert_relative_eq!(rho.trace().unwrap().re, 1.0, epsilon = 1e-12);
    assert!(distance(&rho, &rho.dag()) < 1e-14);

    // Same answer through the Hamiltonian entry point.
    let again = steady_state_from_hamiltonian(&h, &c_ops).unwrap();
    assert!(distance(&rho, &again) < 1e-12);

    // Reduced states are valid density matrices.
    for keep in [0, 1] {
        let reduced = partial_trace(&rho, keep).unwrap();
        assert_relative_eq!(reduced.trace().unwrap().re, 1.0, epsilon = 1e-12);
        assert!(reduced.is_hermitian());
    }
}

#[test]
fn test_floquet_converges_with_harmonics() {
    let l0 = undriven_qubit();
    let l1 = sideband(1.0);
    let states: Vec<QuantumObject> = (2..=6)
        .map(|n_max| {
            let options = FloquetOptions {
                n_max,
                ..FloquetOptions::default()
            };
            steady_state_floquet(&l0, &l1, &l1, 1.7, &options).unwrap()
        })
        .collect();

    let steps: Vec<f64> = states.windows(2).map(|w| distance(&w[0], &w[1])).collect();
    for pair in steps.windows(2) {
        assert!(pair[1] < pair[0], "differences not shrinking: {steps:?}");
    }
    assert!(steps[steps.len() - 1] < 1e-6, "not converged: {steps:?}");

    for rho in &states {
        assert_relative_eq!(rho.trace().unwrap().re, 1.0, epsilon = 1e-12);
        assert!(rho.is_hermitian());
    }
}

#[test]
fn test_vanishing_drive_reproduces_undriven_state() {
    let l0 = undriven_qubit();
    let undriven = steady_state(&l0).unwrap();
    let l1 = sideband(1e-8);
    let driven = steady_state_floquet(&l0, &l1, &l1, 1.7, &FloquetOptions::default()).unwrap();
    assert!(distance(&driven, &undriven) < 1e-10);
}

#[test]
fn test_drive_depletes_the_relaxed_level() {
    // Without drive the qubit relaxes fully to |1⟩; a drive near resonance
    // moves population back to |0⟩.
    let l0 = undriven_qubit();
    let undriven = steady_state(&l0).unwrap();
    assert_relative_eq!(undriven.get(1, 1).unwrap().re, 1.0, epsilon = 1e-12);

    let l1 = sideband(0.5);
    let driven = steady_state_floquet(&l0, &l1, &l1, 1.0, &FloquetOptions::default()).unwrap();
    let p0 = driven.get(0, 0).unwrap().re;
    assert!(p0 > 1e-3 && p0 < 0.5, "excited population {p0}");
}
