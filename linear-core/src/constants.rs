//! Numerical thresholds used across the crate.
//!
//! The unchecked fast path only consults these in `debug_assert!` checks; the
//! checked `try_*` tier and the safe positive-definite inverse use them at runtime.

/// Pivot floor for [`Matrix3::invert_positive_definite_safe`](crate::Matrix3::invert_positive_definite_safe),
/// as a fraction of the matrix trace.
pub const SAFE_PIVOT_TRACE_FRACTION: f64 = 1.0e-5;

/// A matrix is treated as singular by `try_inverse` when `|det| <= tol * max_abs^N`.
pub const SINGULAR_RELATIVE_TOLERANCE: f64 = 1.0e-12;

/// Allowed deviation from unit length in debug precondition checks.
pub const UNIT_LENGTH_TOLERANCE: f64 = 1.0e-4;

/// Allowed dot product between "perpendicular" vectors in debug precondition checks.
pub const PERPENDICULAR_TOLERANCE: f64 = 1.0e-4;

/// Squared-length floor below which a look-at frame is considered degenerate.
pub const DEGENERATE_TOLERANCE: f64 = 1.0e-12;

/// Debug-build bound on how far the look-at right vector may drift from unit length
/// before the first-order renormalization.
pub const LOOK_AT_RENORMALIZE_TOLERANCE: f64 = 1.0e-10;
