//! OpenGL-style transform and projection builders for [`Matrix4`].
//!
//! Each `set_*` method replaces the whole matrix and returns `&mut Self` so that
//! calls chain. Each `mult_*` method right-multiplies the corresponding elementary
//! transform onto the existing matrix, the composition order of the legacy
//! fixed-function pipeline: the transform named last is applied to points first.
//!
//! ```
//! use linear_core::{Matrix4, Vector3};
//!
//! let mut model = Matrix4::identity();
//! model
//!     .mult_translate(&Vector3::new(0.0, 0.0, -5.0))
//!     .mult_scale(2.0);
//! let p = model.transform_position(&Vector3::new(1.0, 0.0, 0.0));
//! assert_eq!(p, Vector3::new(2.0, 0.0, -5.0));
//! ```
//!
//! # Projection Conventions
//!
//! Projections map eye space (camera at the origin looking down -z) to clip
//! space, with the near plane going to NDC depth -1 and the far plane to +1:
//!
//! | Builder | Matches |
//! |---------|---------|
//! | [`set_ortho`](Matrix4::set_ortho) | `glOrtho` |
//! | [`set_frustum`](Matrix4::set_frustum) | `glFrustum` |
//! | [`set_perspective`](Matrix4::set_perspective) | `gluPerspective`, with `fovy` in radians |
//! | [`set_look_at`](Matrix4::set_look_at) | `gluLookAt` |
//!
//! Parameters are not validated. `left == right`, `near == far` and similar
//! degenerate inputs divide by zero.

use crate::constants::{DEGENERATE_TOLERANCE, LOOK_AT_RENORMALIZE_TOLERANCE};
use crate::{LinearError, LinearResult, MathErrorKind, Matrix3, Matrix4, Vector3};

impl Matrix4 {
    /// Sets this matrix to the orthographic projection of the box
    /// `[left, right] x [bottom, top] x [-near, -far]` onto the clip cube.
    pub fn set_ortho(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        let width_inv = 1.0 / (right - left);
        let height_inv = 1.0 / (top - bottom);
        let depth_inv = 1.0 / (far - near);
        *self = Self::from_array([
            [2.0 * width_inv, 0.0, 0.0, -(right + left) * width_inv],
            [0.0, 2.0 * height_inv, 0.0, -(top + bottom) * height_inv],
            [0.0, 0.0, -2.0 * depth_inv, -(far + near) * depth_inv],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        self
    }

    /// Sets this matrix to the perspective projection of the frustum whose near
    /// face is `[left, right] x [bottom, top]` at `z = -near`.
    ///
    /// `near` and `far` are positive distances. The result has last row
    /// `(0, 0, -1, 0)`, so `w' = -z`.
    pub fn set_frustum(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        let width_inv = 1.0 / (right - left);
        let height_inv = 1.0 / (top - bottom);
        let depth_inv = 1.0 / (near - far);
        let near2 = 2.0 * near;
        *self = Self::from_array([
            [near2 * width_inv, 0.0, (right + left) * width_inv, 0.0],
            [0.0, near2 * height_inv, (top + bottom) * height_inv, 0.0],
            [
                0.0,
                0.0,
                (far + near) * depth_inv,
                near2 * far * depth_inv,
            ],
            [0.0, 0.0, -1.0, 0.0],
        ]);
        self
    }

    /// Sets this matrix to a symmetric perspective projection.
    ///
    /// `fovy` is the full vertical field of view in radians and `aspect` is
    /// width / height. Equivalent to
    /// `set_frustum(-aspect*t, aspect*t, -t, t, near, far)` with `t = near * tan(fovy/2)`.
    pub fn set_perspective(&mut self, fovy: f64, aspect: f64, near: f64, far: f64) -> &mut Self {
        let top = near * libm::tan(0.5 * fovy);
        let right = aspect * top;
        self.set_frustum(-right, right, -top, top, near, far)
    }

    /// Sets this matrix to the view transform of a camera at `eye` looking at
    /// `target`, with `up` giving the approximate vertical.
    ///
    /// Rows 1-3 of the result are the camera's right, up and backward axes:
    ///
    /// ```text
    /// forward = normalize(eye - target)
    /// up'     = normalize(up - (up·forward)·forward)
    /// right   = up' × forward
    /// ```
    ///
    /// The translation column is `-(eye·right, eye·up', eye·forward)`, so `eye`
    /// maps to the origin. Unchecked: `eye == target` or `up` parallel to the view
    /// direction gives NaN. See [`try_look_at`](Self::try_look_at).
    pub fn set_look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) -> &mut Self {
        let forward = (*eye - *target).normalized();
        let up_ortho = (*up - forward * up.dot(&forward)).normalized();
        self.set_look_at_frame(eye, &forward, &up_ortho)
    }

    /// Fills the matrix from an already orthonormal `forward` / `up` pair.
    fn set_look_at_frame(&mut self, eye: &Vector3, forward: &Vector3, up: &Vector3) -> &mut Self {
        let mut right = up.cross(forward);
        debug_assert!(
            (right.norm_squared() - 1.0).abs() < LOOK_AT_RENORMALIZE_TOLERANCE,
            "look-at right vector {} drifted from unit length",
            right
        );
        right.renormalize();

        *self = Self::from_array([
            [right.x, right.y, right.z, -eye.dot(&right)],
            [up.x, up.y, up.z, -eye.dot(up)],
            [forward.x, forward.y, forward.z, -eye.dot(forward)],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        self
    }

    /// Sets this matrix to the rotation by `theta` radians about `(x, y, z)`.
    ///
    /// The axis need not be unit length; a zero axis is a precondition violation.
    pub fn set_rotate(&mut self, theta: f64, x: f64, y: f64, z: f64) -> &mut Self {
        *self = Self::from_linear(&Matrix3::rotation(theta, &Vector3::new(x, y, z)));
        self
    }

    /// Same as [`set_rotate`](Self::set_rotate) with `cos θ` and `sin θ` precomputed.
    pub fn set_rotate_cos_sin(
        &mut self,
        cos_theta: f64,
        sin_theta: f64,
        x: f64,
        y: f64,
        z: f64,
    ) -> &mut Self {
        let linear = Matrix3::rotation_cos_sin(cos_theta, sin_theta, &Vector3::new(x, y, z));
        *self = Self::from_linear(&linear);
        self
    }

    /// Sets this matrix to the translation by `t`.
    pub fn set_translate(&mut self, t: &Vector3) -> &mut Self {
        *self = Self::identity();
        self.set(0, 3, t.x);
        self.set(1, 3, t.y);
        self.set(2, 3, t.z);
        self
    }

    /// Sets this matrix to a uniform scale.
    pub fn set_scale(&mut self, s: f64) -> &mut Self {
        self.set_scale_xyz(s, s, s)
    }

    /// Sets this matrix to the axis-aligned scale `diag(sx, sy, sz, 1)`.
    pub fn set_scale_xyz(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        *self = Self::from_linear(&Matrix3::from_diagonal(&Vector3::new(sx, sy, sz)));
        self
    }

    /// Sets `self = self * ortho(..)`.
    pub fn mult_ortho(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        self.right_multiply(&Self::ortho(left, right, bottom, top, near, far))
    }

    /// Sets `self = self * frustum(..)`.
    pub fn mult_frustum(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> &mut Self {
        self.right_multiply(&Self::frustum(left, right, bottom, top, near, far))
    }

    /// Sets `self = self * perspective(..)`.
    pub fn mult_perspective(&mut self, fovy: f64, aspect: f64, near: f64, far: f64) -> &mut Self {
        self.right_multiply(&Self::perspective(fovy, aspect, near, far))
    }

    /// Sets `self = self * look_at(..)`.
    pub fn mult_look_at(&mut self, eye: &Vector3, target: &Vector3, up: &Vector3) -> &mut Self {
        self.right_multiply(&Self::look_at(eye, target, up))
    }

    /// Sets `self = self * rotation(theta, (x, y, z))`.
    pub fn mult_rotate(&mut self, theta: f64, x: f64, y: f64, z: f64) -> &mut Self {
        self.right_multiply(&Self::rotation(theta, &Vector3::new(x, y, z)))
    }

    /// Right-multiplies by a translation: only the last column changes,
    /// `c4 += t.x*c1 + t.y*c2 + t.z*c3`.
    pub fn mult_translate(&mut self, t: &Vector3) -> &mut Self {
        let c4 = self.column(0) * t.x + self.column(1) * t.y + self.column(2) * t.z
            + self.column(3);
        self.set_column(3, &c4)
    }

    /// Right-multiplies by a uniform scale (the first three columns scale).
    pub fn mult_scale(&mut self, s: f64) -> &mut Self {
        self.mult_scale_xyz(s, s, s)
    }

    /// Right-multiplies by `diag(sx, sy, sz, 1)`: column `j` scales by the `j`-th factor.
    pub fn mult_scale_xyz(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        for (j, s) in [sx, sy, sz].into_iter().enumerate() {
            let c = self.column(j) * s;
            self.set_column(j, &c);
        }
        self
    }

    /// By-value [`set_ortho`](Self::set_ortho).
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let mut m = Self::zeros();
        m.set_ortho(left, right, bottom, top, near, far);
        m
    }

    /// By-value [`set_frustum`](Self::set_frustum).
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let mut m = Self::zeros();
        m.set_frustum(left, right, bottom, top, near, far);
        m
    }

    /// By-value [`set_perspective`](Self::set_perspective).
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let mut m = Self::zeros();
        m.set_perspective(fovy, aspect, near, far);
        m
    }

    /// By-value [`set_look_at`](Self::set_look_at).
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let mut m = Self::zeros();
        m.set_look_at(eye, target, up);
        m
    }

    /// Rotation by `theta` radians about `axis` (not necessarily unit length).
    pub fn rotation(theta: f64, axis: &Vector3) -> Self {
        Self::from_linear(&Matrix3::rotation(theta, axis))
    }

    /// Translation by `t`.
    pub fn translation(t: &Vector3) -> Self {
        let mut m = Self::zeros();
        m.set_translate(t);
        m
    }

    /// Axis-aligned scale `diag(s.x, s.y, s.z, 1)`.
    pub fn scaling(s: &Vector3) -> Self {
        let mut m = Self::zeros();
        m.set_scale_xyz(s.x, s.y, s.z);
        m
    }

    /// Checked [`look_at`](Self::look_at).
    ///
    /// Fails with [`MathErrorKind::Degenerate`] when `eye` and `target` coincide
    /// or when `up` has no component perpendicular to the view direction.
    pub fn try_look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> LinearResult<Self> {
        let back = *eye - *target;
        let back_sq = back.norm_squared();
        if !(back_sq > DEGENERATE_TOLERANCE) {
            log::debug!("Matrix4::try_look_at rejected eye {} == target {}", eye, target);
            return Err(LinearError::math_error(
                "Matrix4::try_look_at",
                MathErrorKind::Degenerate,
                "eye and target coincide",
            ));
        }
        let forward = back / libm::sqrt(back_sq);

        let up_perp = *up - forward * up.dot(&forward);
        let up_perp_sq = up_perp.norm_squared();
        if !(up_perp_sq > DEGENERATE_TOLERANCE * up.norm_squared()) {
            log::debug!(
                "Matrix4::try_look_at rejected up {} parallel to view direction {}",
                up,
                forward
            );
            return Err(LinearError::math_error(
                "Matrix4::try_look_at",
                MathErrorKind::Degenerate,
                "up vector is parallel to the view direction",
            ));
        }
        let up_ortho = up_perp / libm::sqrt(up_perp_sq);

        let mut m = Self::zeros();
        m.set_look_at_frame(eye, &forward, &up_ortho);
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector4;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn test_frustum_depth_mapping() {
        let (near, far) = (1.5, 40.0);
        let m = Matrix4::frustum(-1.0, 2.0, -0.5, 1.0, near, far);
        let p_near = m.transform_position(&Vector3::new(0.0, 0.0, -near));
        let p_far = m.transform_position(&Vector3::new(0.0, 0.0, -far));
        assert_abs_diff_eq!(p_near.z, -1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(p_far.z, 1.0, epsilon = 1e-14);
        assert_eq!(m.row(3), Vector4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_frustum_corners() {
        let (l, r, b, t, n, f) = (-1.0, 2.0, -0.5, 1.0, 1.5, 40.0);
        let m = Matrix4::frustum(l, r, b, t, n, f);
        let corner = m.transform_position(&Vector3::new(r, t, -n));
        assert_abs_diff_eq!(corner.x, 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(corner.y, 1.0, epsilon = 1e-14);
        let corner = m.transform_position(&Vector3::new(l, b, -n));
        assert_abs_diff_eq!(corner.x, -1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(corner.y, -1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_perspective_depth_mapping() {
        let (near, far) = (0.1, 100.0);
        let m = Matrix4::perspective(FRAC_PI_3, 16.0 / 9.0, near, far);
        let p_near = m.transform_position(&Vector3::new(0.3, -0.2, -near));
        let p_far = m.transform_position(&Vector3::new(0.0, 0.0, -far));
        assert_abs_diff_eq!(p_near.z, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p_far.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perspective_field_of_view() {
        let near = 2.0;
        let m = Matrix4::perspective(FRAC_PI_2, 2.0, near, 10.0);
        // 90° fovy: the top edge of the near plane sits at y = near.
        let top = m.transform_position(&Vector3::new(0.0, near, -near));
        assert_abs_diff_eq!(top.y, 1.0, epsilon = 1e-14);
        let right = m.transform_position(&Vector3::new(2.0 * near, 0.0, -near));
        assert_abs_diff_eq!(right.x, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_ortho_mapping() {
        let m = Matrix4::ortho(-2.0, 4.0, -1.0, 1.0, 0.5, 10.0);
        let lo = m.transform_position(&Vector3::new(-2.0, -1.0, -0.5));
        let hi = m.transform_position(&Vector3::new(4.0, 1.0, -10.0));
        assert_abs_diff_eq!(lo.x, -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(lo.y, -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(lo.z, -1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(hi.x, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(hi.y, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(hi.z, 1.0, epsilon = 1e-15);
        assert!(m.is_affine());
    }

    #[test]
    fn test_look_at_axis_aligned() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let m = Matrix4::look_at(&eye, &Vector3::zeros(), &Vector3::y_axis());
        assert_eq!(m.row(2).xyz(), Vector3::z_axis());
        assert_eq!(m.row(0).xyz(), Vector3::x_axis());
        assert_eq!(m.row(1).xyz(), Vector3::y_axis());
        assert_eq!(m.transform_position(&eye), Vector3::zeros());
        let target = m.transform_position(&Vector3::zeros());
        assert_eq!(target, Vector3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_look_at_general() {
        let eye = Vector3::new(3.0, -2.0, 4.0);
        let target = Vector3::new(-1.0, 0.5, 0.0);
        let m = Matrix4::look_at(&eye, &target, &Vector3::new(0.1, 1.0, 0.2));
        assert!(m.linear_part().is_rotation_matrix(1e-12));
        let e = m.transform_position(&eye);
        assert!(e.max_abs() < 1e-14);

        let t = m.transform_position(&target);
        assert_abs_diff_eq!(t.x, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(t.y, 0.0, epsilon = 1e-14);
        assert_abs_diff_eq!(t.z, -(eye - target).norm(), epsilon = 1e-14);
    }

    #[test]
    fn test_try_look_at() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let checked = Matrix4::try_look_at(&eye, &Vector3::zeros(), &Vector3::y_axis()).unwrap();
        let unchecked = Matrix4::look_at(&eye, &Vector3::zeros(), &Vector3::y_axis());
        assert_eq!(checked, unchecked);

        let err = Matrix4::try_look_at(&eye, &eye, &Vector3::y_axis()).unwrap_err();
        assert_eq!(err.kind(), Some(MathErrorKind::Degenerate));

        let err = Matrix4::try_look_at(&eye, &Vector3::zeros(), &Vector3::new(0.0, 0.0, 3.0))
            .unwrap_err();
        assert_eq!(err.kind(), Some(MathErrorKind::Degenerate));
    }

    #[test]
    fn test_rotate_builders() {
        let mut m = Matrix4::zeros();
        m.set_rotate(FRAC_PI_2, 0.0, 0.0, 2.0);
        let p = m.transform_position(&Vector3::x_axis());
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-15);
        assert!(m.is_affine());

        let mut cs = Matrix4::zeros();
        cs.set_rotate_cos_sin(0.0, 1.0, 0.0, 0.0, 1.0);
        assert!(cs.max_difference(&m) < 1e-15);
        assert_eq!(Matrix4::rotation(FRAC_PI_2, &Vector3::new(0.0, 0.0, 2.0)), m);
    }

    #[test]
    fn test_translate_and_scale() {
        let t = Vector3::new(1.0, -2.0, 3.0);
        let m = Matrix4::translation(&t);
        assert_eq!(m.translation_part(), t);
        assert_eq!(m.linear_part(), Matrix3::identity());
        assert_eq!(m.transform_direction(&Vector3::x_axis()), Vector3::x_axis());

        let s = Matrix4::scaling(&Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(
            s.transform_position(&Vector3::new(1.0, 1.0, 1.0)),
            Vector3::new(2.0, 3.0, 4.0)
        );
        let mut u = Matrix4::zeros();
        u.set_scale(5.0);
        assert_eq!(u.trace(), 16.0);
    }

    #[test]
    fn test_mult_variants_post_multiply() {
        let base = Matrix4::rotation(0.3, &Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::translation(&Vector3::new(0.5, 0.0, -1.0));
        let t = Vector3::new(2.0, -1.0, 0.25);

        let mut m = base;
        m.mult_translate(&t);
        assert!(m.max_difference(&(base * Matrix4::translation(&t))) < 1e-15);

        let mut m = base;
        m.mult_scale_xyz(2.0, 3.0, 0.5);
        assert!(m.max_difference(&(base * Matrix4::scaling(&Vector3::new(2.0, 3.0, 0.5)))) < 1e-15);

        let mut m = base;
        m.mult_scale(2.0);
        assert!(m.max_difference(&(base * Matrix4::scaling(&Vector3::new(2.0, 2.0, 2.0)))) < 1e-15);

        let mut m = base;
        m.mult_rotate(0.7, 0.0, 1.0, 0.0);
        assert_eq!(m, base * Matrix4::rotation(0.7, &Vector3::y_axis()));

        let mut m = base;
        m.mult_ortho(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        assert_eq!(m, base * Matrix4::ortho(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0));

        let mut m = base;
        m.mult_frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        assert_eq!(m, base * Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0));

        let mut m = base;
        m.mult_perspective(1.0, 1.5, 0.1, 50.0);
        assert_eq!(m, base * Matrix4::perspective(1.0, 1.5, 0.1, 50.0));

        let (eye, target, up) = (Vector3::new(1.0, 1.0, 1.0), Vector3::zeros(), Vector3::z_axis());
        let mut m = base;
        m.mult_look_at(&eye, &target, &up);
        assert_eq!(m, base * Matrix4::look_at(&eye, &target, &up));
    }

    #[test]
    fn test_set_replaces_contents() {
        let mut m = Matrix4::from_diagonal(&Vector4::new(9.0, 9.0, 9.0, 9.0));
        m.set_translate(&Vector3::zeros());
        assert_eq!(m, Matrix4::identity());
    }
}
