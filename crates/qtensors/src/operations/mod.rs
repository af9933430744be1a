//! Operations on quantum objects.
//!
//! Most operations are inherent methods on [`QuantumObject`](crate::QuantumObject);
//! this module groups their implementations.
//!
//! ```text
//! transform  → dag, transpose, conj, trace, expect, vectorization
//! kron       → kron, tensor
//! norm       → norm, norm_p
//! functions  → expm, logm, sqrtm, sinm, cosm
//! ```

mod functions;
mod kron;
mod norm;
mod transform;

pub use kron::tensor;
