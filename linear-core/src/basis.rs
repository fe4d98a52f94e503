//! Orthonormal-basis helpers and outer products.
//!
//! [`orthonormal_complement`] completes a unit vector `u` to a right-handed
//! orthonormal frame `(u, v, w)`, e.g. to place a disc or a camera roll axis
//! around a given normal.
//!
//! ```
//! use linear_core::basis::orthonormal_complement;
//! use linear_core::Vector3;
//!
//! let u = Vector3::new(0.0, 0.6, 0.8);
//! let (v, w) = orthonormal_complement(&u);
//! assert!(u.dot(&v).abs() < 1e-14);
//! assert!((u.cross(&v) - w).norm() < 1e-14);
//! ```

use crate::{Matrix3, Matrix4, Vector3, Vector4};

/// Returns a unit vector perpendicular to the unit vector `u`.
///
/// The candidate is chosen to stay well away from zero length: when `u` has a
/// sizeable x or y component the result lies in the xy-plane, otherwise in the
/// yz-plane. `u` must be unit length (not checked).
pub fn orthogonal_unit(u: &Vector3) -> Vector3 {
    let v = if u.x.abs() > 0.5 || u.y.abs() > 0.5 {
        Vector3::new(u.y, -u.x, 0.0)
    } else {
        Vector3::new(0.0, u.z, -u.y)
    };
    v.normalized()
}

/// Returns `(v, w)` such that `(u, v, w)` is a right-handed orthonormal basis.
///
/// `v` is [`orthogonal_unit(u)`](orthogonal_unit) and `w = u × v`, normalized to
/// absorb rounding. `u` must be unit length (not checked).
pub fn orthonormal_complement(u: &Vector3) -> (Vector3, Vector3) {
    let v = orthogonal_unit(u);
    let w = u.cross(&v).normalized();
    (v, w)
}

/// Outer product `u vᵗ`: entry `(i, j)` is `u[i] * v[j]`.
pub fn outer_product3(u: &Vector3, v: &Vector3) -> Matrix3 {
    Matrix3::from_rows(&(*v * u.x), &(*v * u.y), &(*v * u.z))
}

/// Outer product `u vᵗ` of two 4-vectors.
pub fn outer_product4(u: &Vector4, v: &Vector4) -> Matrix4 {
    Matrix4::from_rows(&(*v * u.x), &(*v * u.y), &(*v * u.z), &(*v * u.w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_frame(u: &Vector3) {
        let (v, w) = orthonormal_complement(u);
        assert!((v.norm() - 1.0).abs() < 1e-14, "v not unit for {}", u);
        assert!((w.norm() - 1.0).abs() < 1e-14, "w not unit for {}", u);
        assert!(u.dot(&v).abs() < 1e-14, "u·v != 0 for {}", u);
        assert!(u.dot(&w).abs() < 1e-14, "u·w != 0 for {}", u);
        assert!(v.dot(&w).abs() < 1e-14, "v·w != 0 for {}", u);
        assert!((u.cross(&v) - w).max_abs() < 1e-14, "not right-handed for {}", u);
    }

    #[test]
    fn test_orthonormal_complement_axes() {
        check_frame(&Vector3::x_axis());
        check_frame(&Vector3::y_axis());
        check_frame(&Vector3::z_axis());
        check_frame(&-Vector3::z_axis());
    }

    #[test]
    fn test_orthonormal_complement_general() {
        check_frame(&Vector3::new(1.0, 2.0, 3.0).normalized());
        check_frame(&Vector3::new(-0.3, 0.1, 0.9).normalized());
        check_frame(&Vector3::new(0.5, -0.5, 0.5).normalized());
    }

    #[test]
    fn test_orthogonal_unit_branch() {
        assert_eq!(orthogonal_unit(&Vector3::x_axis()), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(orthogonal_unit(&Vector3::z_axis()), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_outer_products() {
        let u = Vector3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(-1.0, 0.5, 2.0);
        let m = outer_product3(&u, &v);
        assert_eq!(m[(1, 2)], 4.0);
        assert_eq!(m[(2, 0)], -3.0);
        assert_eq!(m.determinant(), 0.0);
        // (u vᵗ) x = u (v·x)
        let x = Vector3::new(0.25, -1.0, 4.0);
        assert_eq!(m * x, u * v.dot(&x));

        let m4 = outer_product4(&Vector4::new(1.0, 0.0, 2.0, 1.0), &Vector4::w_axis());
        assert_eq!(m4.column(3), Vector4::new(1.0, 0.0, 2.0, 1.0));
        assert_eq!(m4.column(0), Vector4::zeros());
    }
}
