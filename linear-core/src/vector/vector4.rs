//! 4D vectors and homogeneous coordinates.
//!
//! A `Vector4` is either a general 4-tuple or a homogeneous point/direction in
//! 3-space. [`from_point`](Vector4::from_point) sets `w = 1` so that translations
//! apply; [`from_direction`](Vector4::from_direction) sets `w = 0` so that they
//! do not.

use super::Vector3;
use crate::constants::{PERPENDICULAR_TOLERANCE, UNIT_LENGTH_TOLERANCE};

/// A 4D vector of `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl_vector_common!(Vector4, 4, { x: 0, y: 1, z: 2, w: 3 });

impl Vector4 {
    /// Creates a new vector from x, y, z, w components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Returns the unit vector along the X axis `<1,0,0,0>`.
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the Y axis `<0,1,0,0>`.
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the Z axis `<0,0,1,0>`.
    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Returns the unit vector along the W axis `<0,0,0,1>`.
    #[inline]
    pub fn w_axis() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Homogeneous point: `<p.x, p.y, p.z, 1>`.
    #[inline]
    pub fn from_point(p: &Vector3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    /// Homogeneous direction: `<d.x, d.y, d.z, 0>`.
    #[inline]
    pub fn from_direction(d: &Vector3) -> Self {
        Self::new(d.x, d.y, d.z, 0.0)
    }

    /// The first three components, with `w` discarded (no perspective divide).
    #[inline]
    pub fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotates this unit vector toward `dir` by the angle `|dir|`, in place.
    ///
    /// Same contract as [`Vector3::rotate_unit_in_direction`]: `self` must be unit
    /// length and `dir` perpendicular to it (debug-asserted only), and a zero `dir`
    /// is a no-op.
    pub fn rotate_unit_in_direction(&mut self, dir: &Self) -> &mut Self {
        debug_assert!(
            (self.norm() - 1.0).abs() < UNIT_LENGTH_TOLERANCE,
            "rotate_unit_in_direction: {} is not a unit vector",
            self
        );
        debug_assert!(
            dir.dot(self).abs() < PERPENDICULAR_TOLERANCE,
            "rotate_unit_in_direction: {} is not perpendicular to {}",
            dir,
            self
        );

        let theta_sq = dir.norm_squared();
        if theta_sq == 0.0 {
            return self;
        }
        let theta = libm::sqrt(theta_sq);
        let (sin_theta, cos_theta) = libm::sincos(theta);
        let dir_unit = *dir / theta;
        *self = *self * cos_theta + dir_unit * sin_theta;
        self
    }
}

impl From<Vector4> for Vector3 {
    /// Drops `w`; equivalent to [`Vector4::xyz`].
    #[inline]
    fn from(v: Vector4) -> Self {
        v.xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_vector4_basics() {
        let v = Vector4::new(1.0, -2.0, 2.0, 4.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.max_abs(), 4.0);
        assert_eq!(v.dot(&Vector4::w_axis()), 4.0);
        assert_eq!(format!("{}", v), "<1,-2,2,4>");
    }

    #[test]
    fn test_homogeneous_conversions() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Vector4::from_point(&p), Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(Vector4::from_direction(&p), Vector4::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(Vector4::from_point(&p).xyz(), p);
        assert_eq!(Vector3::from(Vector4::from_direction(&p)), p);
    }

    #[test]
    fn test_rotate_unit_in_direction() {
        let mut v = Vector4::w_axis();
        v.rotate_unit_in_direction(&Vector4::new(FRAC_PI_2, 0.0, 0.0, 0.0));
        assert_abs_diff_eq!(v.x, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(v.w, 0.0, epsilon = 1e-15);

        let mut u = Vector4::x_axis();
        u.rotate_unit_in_direction(&Vector4::zeros());
        assert_eq!(u, Vector4::x_axis());
    }

    #[test]
    #[should_panic(expected = "Vector4 index out of bounds: 4")]
    fn test_index_panic() {
        let v = Vector4::zeros();
        let _ = v[4];
    }
}
