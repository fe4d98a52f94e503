//! Square matrices of order 3 and 4.
//!
//! - [`Matrix3`]: linear maps of 3-space, with general, symmetric and
//!   positive-definite inverses
//! - [`Matrix4`]: homogeneous transforms; see [`crate::transform`] for builders
//!
//! Both are row-major with 0-based `(row, col)` indexing and compose as
//! `a * b` = "apply `b`, then `a`".

mod matrix3;
mod matrix4;

pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
