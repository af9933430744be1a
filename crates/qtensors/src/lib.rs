//! qtensors - typed quantum objects over composite Hilbert spaces
//!
//! A [`QuantumObject`] is a matrix tagged with a [`Role`] (Ket, Bra,
//! Operator, SuperOperator, OperatorKet, OperatorBra) and the [`Dims`] of
//! the composite space it lives on. Every operation checks roles and dims
//! before touching the data.
//!
//! # Architecture
//!
//! ```text
//! Level 1: quantum objects
//!     → QuantumObject algebra, matrix functions, norms (qobj, operations)
//!     → partial_trace, permute (structure)
//!     → spre/spost/liouvillian (superop), steady_state (steadystate)
//!
//! Level 2: storage
//!     → DenseMatrix (column-major, faer views), SparseMatrix (CSC)
//!     → StridedArray: one axis per subsystem for structural transforms
//!
//! Level 3: kernels
//!     → faer matmul, LU, eigen, SVD (decomposition)
//!     → GenericBackend permutation (backend)
//! ```
//!
//! # Index convention
//!
//! For `dims = [d0, d1, …]` the basis state `|i0, i1, …⟩` sits at
//! `i0·(d1⋯) + i1·(d2⋯) + …`, the Kronecker-product order. Subsystems are
//! numbered from 0.
//!
//! # Example
//!
//! ```
//! use qtensors::{basis, partial_trace, tensor, QuantumObject, Role};
//!
//! let up = basis(2, 0).unwrap();
//! let down = basis(2, 1).unwrap();
//! let psi = tensor(&[&up, &down]).unwrap();
//! assert_eq!(psi.role(), Role::Ket);
//! assert_eq!(psi.dims().as_slice(), &[2, 2]);
//!
//! // Reduced state of the second qubit is |1⟩⟨1|.
//! let rho = partial_trace(&psi, 1).unwrap();
//! assert_eq!(rho, down.ket_to_dm().unwrap());
//! ```

pub mod array;
pub mod backend;
pub mod config;
pub mod decomposition;
pub mod error;
mod operations;
pub mod qobj;
pub mod random;
pub mod scalar;
pub mod states;
pub mod steadystate;
pub mod storage;
pub mod strides;
pub mod structure;
pub mod superop;

pub use array::StridedArray;
pub use config::{
    DEFAULT_HERMITIAN_TOLERANCE, ExpmOptions, FloquetOptions, Parallelism, current_parallelism,
    init_parallelism,
};
pub use error::{QuantumError, Result};
pub use operations::tensor;
pub use qobj::{Dims, Product, QuantumObject, Role};
pub use random::{
    random_dm, random_dm_with_rng, random_ket, random_ket_with_rng, random_unitary,
    random_unitary_with_rng,
};
pub use scalar::{I, Scalar, c64};
pub use states::{
    basis, basis_composite, create, destroy, identity, maximally_mixed, number, projection,
    sigma_minus, sigma_plus, sigma_x, sigma_y, sigma_z,
};
pub use steadystate::{
    effective_floquet_generator, steady_state, steady_state_floquet, steady_state_from_hamiltonian,
};
pub use storage::{DenseMatrix, MatrixStorage, SparseMatrix, Storage};
pub use structure::{Selection, partial_trace, permute};
pub use superop::{lindblad_dissipator, liouvillian, spost, spre, sprepost};
