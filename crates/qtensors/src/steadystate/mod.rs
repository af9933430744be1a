//! Steady states of Lindblad generators.
//!
//! - [`steady_state`]: one LU solve, sparse or dense to match the generator,
//!   with the trace condition folded into the first row
//! - [`steady_state_floquet`]: periodic drive reduced to an effective
//!   time-independent generator by continued fractions
//!
//! Nothing is cached: every call rebuilds and solves its system.

mod direct;
mod floquet;

pub use direct::{steady_state, steady_state_from_hamiltonian};
pub use floquet::{effective_floquet_generator, steady_state_floquet};
