//! 2D vectors.

use crate::math::det2;

/// A 2D vector of `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl_vector_common!(Vector2, 2, { x: 0, y: 1 });

impl Vector2 {
    /// Creates a new vector from x, y components.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the unit vector along the X axis `<1,0>`.
    #[inline]
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Returns the unit vector along the Y axis `<0,1>`.
    #[inline]
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The z component of the 3D cross product of `self` and `other` embedded in
    /// the plane: positive when `other` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: &Self) -> f64 {
        det2(self.x, self.y, other.x, other.y)
    }

    /// Counter-clockwise perpendicular `<-y, x>`.
    #[inline]
    pub fn perp(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates this vector counter-clockwise by `theta` radians, in place.
    pub fn rotate(&mut self, theta: f64) -> &mut Self {
        let (s, c) = libm::sincos(theta);
        let x = c * self.x - s * self.y;
        self.y = s * self.x + c * self.y;
        self.x = x;
        self
    }

    /// Returns this vector rotated counter-clockwise by `theta` radians.
    #[inline]
    pub fn rotated(&self, theta: f64) -> Self {
        let mut v = *self;
        v.rotate(theta);
        v
    }
}
