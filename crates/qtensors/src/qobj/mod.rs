//! Typed quantum objects.
//!
//! A [`QuantumObject`] is a matrix plus a [`Role`] tag plus [`Dims`]. Every
//! constructor checks that the three agree; every binary operation checks
//! dims first and roles second.

mod arithmetic;
mod dims;
mod object;
mod role;

pub use arithmetic::Product;
pub use dims::Dims;
pub use object::QuantumObject;
pub use role::Role;
