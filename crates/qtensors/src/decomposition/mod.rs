//! Dense and sparse matrix kernels built on faer.
//!
//! - `solve`: dense and sparse LU with a conditioning check
//! - `eigen`: spectral calculus through self-adjoint or general
//!   eigendecompositions
//! - `svd`: singular values for Schatten norms
//! - `expm`: Padé scaling-and-squaring (dense) and truncated Taylor
//!   scaling-and-squaring (sparse)

mod eigen;
mod expm;
mod solve;
mod svd;

pub use eigen::{apply_diagonalizable, apply_hermitian};
pub use expm::{expm_dense, expm_sparse};
pub use solve::{SINGULAR_RCOND, solve, solve_sparse};
pub use svd::singular_values;
