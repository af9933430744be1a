//! Physical role of a quantum object.

use std::fmt;

/// What a matrix represents.
///
/// The role fixes the expected shape for a Hilbert-space dimension `n`:
///
/// | role            | shape      |
/// |-----------------|------------|
/// | `Ket`           | `n x 1`    |
/// | `Bra`           | `1 x n`    |
/// | `Operator`      | `n x n`    |
/// | `SuperOperator` | `n² x n²`  |
/// | `OperatorKet`   | `n² x 1`   |
/// | `OperatorBra`   | `1 x n²`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Ket,
    Bra,
    Operator,
    SuperOperator,
    OperatorKet,
    OperatorBra,
}

impl Role {
    /// Expected `(rows, cols)` for Hilbert-space dimension `n`.
    pub fn shape_for(self, n: usize) -> (usize, usize) {
        match self {
            Role::Ket => (n, 1),
            Role::Bra => (1, n),
            Role::Operator => (n, n),
            Role::SuperOperator => (n * n, n * n),
            Role::OperatorKet => (n * n, 1),
            Role::OperatorBra => (1, n * n),
        }
    }

    /// Role of the conjugate transpose.
    pub fn adjoint(self) -> Role {
        match self {
            Role::Ket => Role::Bra,
            Role::Bra => Role::Ket,
            Role::OperatorKet => Role::OperatorBra,
            Role::OperatorBra => Role::OperatorKet,
            square => square,
        }
    }

    /// Operator and SuperOperator.
    pub fn is_square(self) -> bool {
        matches!(self, Role::Operator | Role::SuperOperator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Ket => "Ket",
            Role::Bra => "Bra",
            Role::Operator => "Operator",
            Role::SuperOperator => "SuperOperator",
            Role::OperatorKet => "OperatorKet",
            Role::OperatorBra => "OperatorBra",
        };
        f.write_str(name)
    }
}
