//! Error types for qtensors.

use thiserror::Error;

use crate::qobj::{Dims, Role};

/// Errors that can occur in quantum object operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Two operands live on different composite Hilbert spaces.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: Dims, right: Dims },

    /// The roles of two operands cannot be combined by the operation.
    #[error("incompatible roles for {op}: {left} and {right}")]
    IncompatibleRoles {
        op: &'static str,
        left: Role,
        right: Role,
    },

    /// The operation is not defined for this role.
    #[error("{op} is not supported for role {role}")]
    UnsupportedRole { op: &'static str, role: Role },

    /// Subsystem reordering is not a bijection on `0..ndim`.
    #[error("invalid permutation {perm:?} for {ndim} subsystems")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// Subsystem selection is empty or out of range.
    #[error("invalid subsystem selection {selection:?} for {ndim} subsystems")]
    InvalidSelection { selection: Vec<usize>, ndim: usize },

    /// Data shape does not match the role and dims.
    #[error("shape mismatch for {role} with dims {dims}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        role: Role,
        dims: Dims,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Element count does not match the requested shape.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Dims list is empty or contains a zero.
    #[error("invalid dims {dims:?}: subsystem sizes must be positive and non-empty")]
    InvalidDims { dims: Vec<usize> },

    /// Matrix must be square.
    #[error("matrix must be square: got {rows}x{cols}")]
    NotSquareMatrix { rows: usize, cols: usize },

    /// A decomposition or solve failed, or produced non-finite values.
    #[error("linear algebra failure: {message}")]
    LinearAlgebra { message: String },

    /// A numeric option or argument is outside its valid range.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuantumError>;
