//! Small fixed-size linear algebra for 3D graphics and kinematics.
//!
//! `linear-core` provides 2D/3D/4D vectors, 3×3 and 4×4 matrices, and the
//! OpenGL-style transform builders a renderer needs to place objects and
//! cameras. Everything is `f64` on the stack; the only conversion to `f32` is
//! the column-major export for shader uniforms.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`vector`] | [`Vector2`], [`Vector3`], [`Vector4`]: arithmetic, norms, rotation |
//! | [`matrix`] | [`Matrix3`], [`Matrix4`]: composition, determinant, inverses, renormalize |
//! | [`transform`] | Ortho, frustum, perspective, look-at, rotate, translate, scale builders |
//! | [`basis`] | Orthonormal completion of a unit vector, outer products |
//! | [`export`] | Column-major `f32` flattening |
//! | [`constants`] | Numerical thresholds |
//! | [`errors`] | [`LinearError`] and [`LinearResult`] |
//!
//! # Building a Frame
//!
//! ```
//! use linear_core::{Matrix4, Vector3};
//! use std::f64::consts::FRAC_PI_4;
//!
//! let projection = Matrix4::perspective(FRAC_PI_4, 4.0 / 3.0, 0.1, 100.0);
//! let view = Matrix4::look_at(
//!     &Vector3::new(0.0, 2.0, 10.0),
//!     &Vector3::zeros(),
//!     &Vector3::y_axis(),
//! );
//! let mut model = Matrix4::identity();
//! model
//!     .mult_translate(&Vector3::new(3.0, 0.0, 0.0))
//!     .mult_rotate(0.5, 0.0, 1.0, 0.0)
//!     .mult_scale(0.25);
//!
//! let mvp = projection * view * model;
//! let uniform: [f32; 16] = mvp.flatten_column_major();
//! assert!(uniform.iter().all(|v| v.is_finite()));
//! ```
//!
//! # Re-exports
//!
//! Common types are re-exported at the crate root for convenience:
//!
//! ```
//! use linear_core::{Matrix3, Matrix4, Vector2, Vector3, Vector4};
//! use linear_core::{LinearError, LinearResult, MathErrorKind};
//! ```
//!
//! # Design Notes
//!
//! - **Two tiers**: the plain methods (`inverse`, `normalize`, `look_at`, ...)
//!   never check their preconditions outside `debug_assert!`; degenerate input
//!   gives NaN or infinity. The `try_*` methods validate and return
//!   [`LinearResult`].
//!
//! - **Self-composition is safe**: in-place operations read every old entry
//!   before writing, so `m *= m` and `m.invert()` behave as expected.
//!
//! - **No shared instances**: identity and axis values come from associated
//!   functions such as [`Matrix4::identity`] and [`Vector3::x_axis`].

pub mod basis;
pub mod constants;
pub mod errors;
pub mod export;
pub mod math;
pub mod matrix;
pub mod transform;
pub mod vector;

pub use errors::{LinearError, LinearResult, MathErrorKind};
pub use matrix::{Matrix3, Matrix4};
pub use vector::{Vector2, Vector3, Vector4};

pub mod test_helpers;
