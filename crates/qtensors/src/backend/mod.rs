//! Backend abstraction for array kernels and faer interop.
//!
//! - `GenericBackend`: odometer loop for axis permutation (always available)
//! - `faer_interop`: zero-copy views of dense and CSC matrices as faer types

mod faer_interop;
mod generic;
mod permutation;

pub use faer_interop::{AsFaerMat, AsFaerSparse, dense_from_faer};
pub use generic::GenericBackend;
pub use permutation::PermutationBackend;
