//! 3D Cartesian vectors.
//!
//! `Vector3` carries positions, directions and rotation axes. Besides the shared
//! componentwise arithmetic it provides the right-handed cross product and two
//! rotation primitives:
//!
//! - [`rotate`](Vector3::rotate): rotate by an angle about a unit axis (Rodrigues).
//! - [`rotate_unit_in_direction`](Vector3::rotate_unit_in_direction): advance a unit
//!   frame vector by an angular step, where the step's length is the angle.
//!
//! ```
//! use linear_core::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut v = Vector3::x_axis();
//! v.rotate(FRAC_PI_2, &Vector3::z_axis());
//! assert!((v - Vector3::y_axis()).norm() < 1e-15);
//!
//! // X × Y = Z (right-hand rule)
//! assert_eq!(Vector3::x_axis().cross(&Vector3::y_axis()), Vector3::z_axis());
//! ```
//!
//! # Preconditions
//!
//! Rotation axes are assumed to be unit length. Nothing checks this: a non-unit
//! axis gives a well-defined but wrong result. [`normalize`](Vector3::normalize)
//! on the zero vector yields NaN; use [`try_normalized`](Vector3::try_normalized)
//! when the input may be degenerate.

use crate::constants::{PERPENDICULAR_TOLERANCE, UNIT_LENGTH_TOLERANCE};

/// A 3D vector of `f64` components.
///
/// Components are public for direct access.
///
/// ```
/// use linear_core::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// let x = Vector3::x_axis();
/// let from_array = Vector3::from_array([1.0, 2.0, 3.0]);
/// assert_eq!(v, from_array);
/// assert_eq!(format!("{}", x), "<1,0,0>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl_vector_common!(Vector3, 3, { x: 0, y: 1, z: 2 });

impl Vector3 {
    /// Creates a new vector from x, y, z components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the unit vector along the X axis `<1,0,0>`.
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Returns the unit vector along the Y axis `<0,1,0>`.
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Returns the unit vector along the Z axis `<0,0,1>`.
    #[inline]
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Computes the right-handed cross product `self × other`.
    ///
    /// ```
    /// use linear_core::Vector3;
    ///
    /// let z = Vector3::x_axis().cross(&Vector3::y_axis());
    /// assert_eq!(z, Vector3::z_axis());
    /// ```
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Rotates this vector by `theta` radians about the unit vector `axis`, in place.
    ///
    /// The vector is split into its projection onto the axis, `v0 = (v·w)w`, and the
    /// remainder `v1 = v - v0` lying in the plane normal to the axis. Only `v1` turns:
    ///
    /// ```text
    /// v' = v0 + cos(θ)·v1 + sin(θ)·(w × v1)
    /// ```
    ///
    /// Positive angles rotate counter-clockwise when looking down the axis toward
    /// the origin. `axis` must be unit length (not checked).
    pub fn rotate(&mut self, theta: f64, axis: &Self) -> &mut Self {
        let (s, c) = libm::sincos(theta);
        let dotw = self.dot(axis);
        let v0 = *axis * dotw;
        let v1 = *self - v0;
        let v2 = axis.cross(&v1);

        *self = v0 + v1 * c + v2 * s;
        self
    }

    /// Returns this vector rotated by `theta` radians about the unit vector `axis`.
    #[inline]
    pub fn rotated(&self, theta: f64, axis: &Self) -> Self {
        let mut v = *self;
        v.rotate(theta, axis);
        v
    }

    /// Rotates this unit vector toward `dir` by the angle `|dir|`, in place.
    ///
    /// With `θ = |dir|` the update is `self = cos(θ)·self + sin(θ)·dir/θ`, which is
    /// exact when `dir` is perpendicular to `self`. Use it to advance a frame vector
    /// by one angular-velocity step. A zero `dir` leaves the vector unchanged.
    ///
    /// `self` must be a unit vector and `dir` must be perpendicular to it. Debug
    /// builds assert both; release builds do not check.
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
