//! Role-checked arithmetic on quantum objects.
//!
//! Multiplication follows the role table
//!
//! ```text
//! Ket           × Bra           → Operator
//! Bra           × Ket           → scalar
//! Operator      × Operator      → Operator
//! Operator      × Ket           → Ket
//! Bra           × Operator      → Bra
//! SuperOperator × SuperOperator → SuperOperator
//! SuperOperator × Operator      → Operator       (through vec(ρ))
//! SuperOperator × OperatorKet   → OperatorKet
//! OperatorBra   × SuperOperator → OperatorBra
//! OperatorKet   × OperatorBra   → SuperOperator
//! OperatorBra   × OperatorKet   → scalar
//! ```
//!
//! and every other pairing is an `IncompatibleRoles` error. Addition needs
//! equal roles. Dims are compared before roles in all binary operations.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{QuantumError, Result};
use crate::qobj::{QuantumObject, Role};
use crate::scalar::{Scalar, c64};
use crate::storage::{DenseMatrix, SparseMatrix, Storage};

/// Outcome of a role-dispatched product.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Scalar(c64),
    Object(QuantumObject),
}

impl Product {
    pub fn into_object(self) -> Option<QuantumObject> {
        match self {
            Product::Object(o) => Some(o),
            Product::Scalar(_) => None,
        }
    }

    pub fn into_scalar(self) -> Option<c64> {
        match self {
            Product::Scalar(s) => Some(s),
            Product::Object(_) => None,
        }
    }
}

impl QuantumObject {
    pub(crate) fn check_same_dims(&self, other: &QuantumObject) -> Result<()> {
        if self.dims() != other.dims() {
            return Err(QuantumError::DimensionMismatch {
                left: self.dims().clone(),
                right: other.dims().clone(),
            });
        }
        Ok(())
    }

    fn check_same_space(&self, other: &QuantumObject, op: &'static str) -> Result<()> {
        self.check_same_dims(other)?;
        if self.role() != other.role() {
            return Err(QuantumError::IncompatibleRoles {
                op,
                left: self.role(),
                right: other.role(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_square(&self, op: &'static str) -> Result<()> {
        if !self.role().is_square() {
            return Err(QuantumError::UnsupportedRole {
                op,
                role: self.role(),
            });
        }
        Ok(())
    }

    /// `self + other`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for different dims, `IncompatibleRoles` for
    /// different roles.
    pub fn try_add(&self, other: &QuantumObject) -> Result<QuantumObject> {
        self.check_same_space(other, "+")?;
        Ok(self.with_data(self.data().add_scaled(c64::one(), other.data())))
    }

    /// `self - other`.
    pub fn try_sub(&self, other: &QuantumObject) -> Result<QuantumObject> {
        self.check_same_space(other, "-")?;
        Ok(self.with_data(self.data().add_scaled(-c64::one(), other.data())))
    }

    /// In place `self += alpha * other`.
    pub fn add_scaled_mut(&mut self, alpha: c64, other: &QuantumObject) -> Result<()> {
        self.check_same_space(other, "+=")?;
        self.data_mut().axpy_mut(alpha, other.data());
        Ok(())
    }

    /// Multiply by a scalar.
    pub fn scale(&self, alpha: c64) -> QuantumObject {
        self.with_data(self.data().scale(alpha))
    }

    /// In place scalar multiplication.
    pub fn scale_mut(&mut self, alpha: c64) {
        self.data_mut().scale_mut(alpha);
    }

    /// `A + alpha·I` for square roles.
    pub fn add_scalar(&self, alpha: c64) -> Result<QuantumObject> {
        self.require_square("add_scalar")?;
        let n = self.shape().0;
        let shift = match self.data() {
            Storage::Sparse(_) => Storage::Sparse(SparseMatrix::identity(n)),
            Storage::Dense(_) => Storage::Dense(DenseMatrix::identity(n)),
        };
        Ok(self.with_data(self.data().add_scaled(alpha, &shift)))
    }

    /// Role-dispatched product, see the module table.
    pub fn product(&self, rhs: &QuantumObject) -> Result<Product> {
        use Role::*;

        self.check_same_dims(rhs)?;
        let result_role = match (self.role(), rhs.role()) {
            (Bra, Ket) | (OperatorBra, OperatorKet) => {
                let value = self.data().matmul(rhs.data()).get(0, 0).unwrap_or_default();
                return Ok(Product::Scalar(value));
            }
            (SuperOperator, Operator) => {
                let n = rhs.hilbert_dim();
                let vec = rhs.data().reshaped(n * n, 1)?;
                let out = self.data().matmul(&vec).reshaped(n, n)?;
                return Ok(Product::Object(QuantumObject::from_parts_unchecked(
                    out,
                    Operator,
                    rhs.dims().clone(),
                )));
            }
            (Ket, Bra) | (Operator, Operator) => Operator,
            (Operator, Ket) => Ket,
            (Bra, Operator) => Bra,
            (SuperOperator, SuperOperator) | (OperatorKet, OperatorBra) => SuperOperator,
            (SuperOperator, OperatorKet) => OperatorKet,
            (OperatorBra, SuperOperator) => OperatorBra,
            (left, right) => {
                return Err(QuantumError::IncompatibleRoles {
                    op: "*",
                    left,
                    right,
                });
            }
        };
        Ok(Product::Object(QuantumObject::from_parts_unchecked(
            self.data().matmul(rhs.data()),
            result_role,
            self.dims().clone(),
        )))
    }

    /// Product that must yield an object.
    ///
    /// # Errors
    ///
    /// `IncompatibleRoles` for pairings without a product and for the scalar
    /// pairings, which go through [`QuantumObject::dot`].
    pub fn matmul(&self, rhs: &QuantumObject) -> Result<QuantumObject> {
        match self.product(rhs)? {
            Product::Object(o) => Ok(o),
            Product::Scalar(_) => Err(QuantumError::IncompatibleRoles {
                op: "matmul (use dot for inner products)",
                left: self.role(),
                right: rhs.role(),
            }),
        }
    }

    /// Inner product `⟨self|rhs⟩`.
    ///
    /// Accepts a Bra or a Ket on the left (a Ket is conjugated first) and a
    /// Ket on the right, or the same combinations of the operator-vector
    /// roles.
    pub fn dot(&self, rhs: &QuantumObject) -> Result<c64> {
        let left = match self.role() {
            Role::Ket | Role::OperatorKet => self.dag(),
            _ => self.clone(),
        };
        left.product(rhs)?
            .into_scalar()
            .ok_or(QuantumError::IncompatibleRoles {
                op: "dot",
                left: self.role(),
                right: rhs.role(),
            })
    }

    /// Integer matrix power by repeated squaring. `powi(0)` is the identity.
    pub fn powi(&self, exponent: u32) -> Result<QuantumObject> {
        self.require_square("powi")?;
        let n = self.shape().0;
        let mut result = match self.data() {
            Storage::Sparse(_) => Storage::Sparse(SparseMatrix::identity(n)),
            Storage::Dense(_) => Storage::Dense(DenseMatrix::identity(n)),
        };
        let mut base = self.data().clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.matmul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.matmul(&base);
            }
        }
        Ok(self.with_data(result))
    }

    /// Apply `f` to every matrix entry. The result is dense.
    pub fn map(&self, f: impl Fn(c64) -> c64) -> QuantumObject {
        self.with_data(Storage::Dense(self.data().to_dense().map(f)))
    }

    /// Entry-by-entry product of two objects on the same space.
    pub fn hadamard(&self, other: &QuantumObject) -> Result<QuantumObject> {
        self.check_same_space(other, ".*")?;
        let out = self
            .data()
            .to_dense()
            .zip_map(&other.data().to_dense(), |a, b| a * b);
        Ok(self.with_data(Storage::Dense(out)))
    }

    /// Entry-by-entry quotient. Zero divisors give non-finite entries.
    pub fn elementwise_div(&self, other: &QuantumObject) -> Result<QuantumObject> {
        self.check_same_space(other, "./")?;
        let out = self
            .data()
            .to_dense()
            .zip_map(&other.data().to_dense(), |a, b| a / b);
        Ok(self.with_data(Storage::Dense(out)))
    }
}

impl Add for &QuantumObject {
    type Output = Result<QuantumObject>;

    fn add(self, rhs: &QuantumObject) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Sub for &QuantumObject {
    type Output = Result<QuantumObject>;

    fn sub(self, rhs: &QuantumObject) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Mul for &QuantumObject {
    type Output = Result<QuantumObject>;

    fn mul(self, rhs: &QuantumObject) -> Self::Output {
        self.matmul(rhs)
    }
}

impl Neg for &QuantumObject {
    type Output = QuantumObject;

    fn neg(self) -> QuantumObject {
        self.scale(-c64::one())
    }
}

impl Mul<c64> for &QuantumObject {
    type Output = QuantumObject;

    fn mul(self, rhs: c64) -> QuantumObject {
        self.scale(rhs)
    }
}

impl Mul<f64> for &QuantumObject {
    type Output = QuantumObject;

    fn mul(self, rhs: f64) -> QuantumObject {
        self.scale(c64::from_real(rhs))
    }
}

impl Mul<&QuantumObject> for c64 {
    type Output = QuantumObject;

    fn mul(self, rhs: &QuantumObject) -> QuantumObject {
        rhs.scale(self)
    }
}

impl Mul<&QuantumObject> for f64 {
    type Output = QuantumObject;

    fn mul(self, rhs: &QuantumObject) -> QuantumObject {
        rhs.scale(c64::from_real(self))
    }
}

impl Div<c64> for &QuantumObject {
    type Output = QuantumObject;

    fn div(self, rhs: c64) -> QuantumObject {
        self.scale(c64::one() / rhs)
    }
}

impl Div<f64> for &QuantumObject {
    type Output = QuantumObject;

    fn div(self, rhs: f64) -> QuantumObject {
        self.scale(c64::from_real(1.0 / rhs))
    }
}
