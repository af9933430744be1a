//! Subsystem structure of composite objects: partial trace and reordering.
//!
//! Both operations view a matrix as a strided array with one axis per
//! subsystem and reuse [`crate::array::StridedArray::permutedims`].

mod permute;
mod ptrace;

pub use permute::permute;
pub use ptrace::{Selection, partial_trace};
