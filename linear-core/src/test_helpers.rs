//! Assertions shared by unit and integration tests.
//!
//! ULP comparisons for scalars, plus max-entry closeness checks for the vector
//! and matrix types that report both operands on failure.

use crate::{Matrix3, Matrix4, Vector3};

/// Maps an `f64` onto `u64` so that integer order matches float order and
/// adjacent floats differ by one.
#[inline]
pub fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

/// Number of representable `f64` values between `a` and `b`.
#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    f64_to_ordered_u64(a).abs_diff(f64_to_ordered_u64(b))
}

/// Asserts `a` and `b` are within `max_ulp` units in the last place. Two zeros of
/// either sign always pass.
#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(a.is_finite() && b.is_finite(), "non-finite value in {}", ctx);
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} (0x{:016x}) b={} (0x{:016x})",
        ctx,
        d,
        max_ulp,
        a,
        a.to_bits(),
        b,
        b.to_bits()
    );
}

#[track_caller]
pub fn assert_vector3_close(a: &Vector3, b: &Vector3, tol: f64, ctx: &str) {
    let diff = (*a - *b).max_abs();
    assert!(diff <= tol, "{}: |{} - {}| = {:e} exceeds {:e}", ctx, a, b, diff, tol);
}

#[track_caller]
pub fn assert_matrix3_close(a: &Matrix3, b: &Matrix3, tol: f64, ctx: &str) {
    let diff = a.max_difference(b);
    assert!(
        diff <= tol,
        "{}: max difference {:e} exceeds {:e}\nleft:\n{}right:\n{}",
        ctx,
        diff,
        tol,
        a,
        b
    );
}

#[track_caller]
pub fn assert_matrix4_close(a: &Matrix4, b: &Matrix4, tol: f64, ctx: &str) {
    let diff = a.max_difference(b);
    assert!(
        diff <= tol,
        "{}: max difference {:e} exceeds {:e}\nleft:\n{}right:\n{}",
        ctx,
        diff,
        tol,
        a,
        b
    );
}

/// [`assert_ulp_le`] with the compared expressions, or a format string, as context.
#[macro_export]
macro_rules! assert_ulp_lt {
    ($a:expr, $b:expr, $max_ulp:expr) => {
        $crate::test_helpers::assert_ulp_le(
            $a,
            $b,
            $max_ulp,
            &format!(
                "ULP check failed: {} vs {} (max_ulp={})",
                stringify!($a),
                stringify!($b),
                $max_ulp
            ),
        )
    };
    ($a:expr, $b:expr, $max_ulp:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_ulp_le($a, $b, $max_ulp, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulp_diff_adjacent() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        assert_eq!(ulp_diff(a, b), 1);
        assert_eq!(ulp_diff(b, a), 1);
        assert_eq!(ulp_diff(0.0, -0.0), 1);
    }

    #[test]
    fn test_ulp_macro() {
        let third = 1.0_f64 / 3.0;
        crate::assert_ulp_lt!(third * 3.0, 1.0, 1);
        crate::assert_ulp_lt!(third, 0.1 / 0.3, 2, "third vs {}", 0.1 / 0.3);
    }

    #[test]
    #[should_panic(expected = "max difference")]
    fn test_matrix_close_reports() {
        assert_matrix3_close(&Matrix3::identity(), &Matrix3::zeros(), 0.5, "identity vs zero");
    }
}
