//! Scalar helpers shared by the vector and matrix types.

/// First-order approximation of `1 / sqrt(norm_sq)` around `norm_sq = 1`.
///
/// Multiplying a nearly-unit vector by this factor moves its length closer to 1
/// without taking a square root. The error is second order in `norm_sq - 1`.
#[inline]
pub fn renormalize_factor(norm_sq: f64) -> f64 {
    1.0 - 0.5 * (norm_sq - 1.0)
}

/// Largest absolute value in `values` (the L∞ norm). Returns 0 for an empty slice.
#[inline]
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

/// Difference of products `a*d - b*c`, the 2x2 determinant.
#[inline]
pub fn det2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}
