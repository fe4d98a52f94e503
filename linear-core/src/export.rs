//! Column-major `f32` export for graphics uniforms.
//!
//! Shader uniform uploads (`glUniformMatrix4fv` and friends) expect sixteen (or
//! nine) single-precision floats in column-major order. These methods are the
//! boundary between the `f64` algebra and that buffer.
//!
//! # Precision
//!
//! Every entry is narrowed with `as f32`, rounding to nearest. This is the only
//! place in the crate where precision is dropped, and it is intended: keep
//! composing in `f64` and export once per upload.
//!
//! ```
//! use linear_core::{Matrix4, Vector3};
//!
//! let m = Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0));
//! let buf = m.flatten_column_major();
//! assert_eq!(&buf[12..], &[1.0, 2.0, 3.0, 1.0]);
//! ```

use crate::{Matrix3, Matrix4};

impl Matrix3 {
    /// Returns the nine entries in column-major order, narrowed to `f32`.
    pub fn flatten_column_major(&self) -> [f32; 9] {
        let mut out = [0.0_f32; 9];
        self.write_column_major(&mut out);
        out
    }

    /// Writes the nine entries in column-major order into `dest[..9]`.
    ///
    /// # Panics
    ///
    /// Panics if `dest.len() < 9`.
    pub fn write_column_major(&self, dest: &mut [f32]) {
        assert!(
            dest.len() >= 9,
            "Matrix3::write_column_major needs 9 slots, got {}",
            dest.len()
        );
        let e = self.elements();
        for (k, slot) in dest[..9].iter_mut().enumerate() {
            *slot = e[k % 3][k / 3] as f32;
        }
    }
}

impl Matrix4 {
    /// Returns the sixteen entries in column-major order, narrowed to `f32`.
    pub fn flatten_column_major(&self) -> [f32; 16] {
        let mut out = [0.0_f32; 16];
        self.write_column_major(&mut out);
        out
    }

    /// Writes the sixteen entries in column-major order into `dest[..16]`.
    ///
    /// # Panics
    ///
    /// Panics if `dest.len() < 16`.
    pub fn write_column_major(&self, dest: &mut [f32]) {
        assert!(
            dest.len() >= 16,
            "Matrix4::write_column_major needs 16 slots, got {}",
            dest.len()
        );
        let e = self.elements();
        for (k, slot) in dest[..16].iter_mut().enumerate() {
            *slot = e[k % 4][k / 4] as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector3;

    #[test]
    fn test_matrix4_column_order() {
        let mut m = Matrix4::zeros();
        for i in 0..4 {
            for j in 0..4 {
                m[(i, j)] = (10 * i + j) as f64;
            }
        }
        let buf = m.flatten_column_major();
        assert_eq!(&buf[..4], &[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(&buf[4..8], &[1.0, 11.0, 21.0, 31.0]);
        assert_eq!(buf[15], 33.0);
    }

    #[test]
    fn test_matrix3_column_order() {
        let m = Matrix3::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(
            m.flatten_column_major(),
            [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]
        );
    }

    #[test]
    fn test_narrowing_is_nearest_f32() {
        let third = 1.0 / 3.0;
        let m = Matrix3::from_diagonal(&Vector3::new(third, 1.0, 1.0));
        let buf = m.flatten_column_major();
        assert_eq!(buf[0], third as f32);
        assert_ne!(buf[0] as f64, third);
    }

    #[test]
    fn test_narrowing_within_half_f32_ulp() {
        // Nearest rounding to f32 moves a value by at most half an f32 ulp, which
        // is 2^28 f64 ulps within one binade.
        let values = [1.0 / 3.0, std::f64::consts::PI, 1e-3, -12345.678];
        let m = Matrix4::from_diagonal(&crate::Vector4::new(
            values[0], values[1], values[2], values[3],
        ));
        let buf = m.flatten_column_major();
        for (k, &v) in values.iter().enumerate() {
            crate::assert_ulp_lt!(buf[5 * k] as f64, v, 1 << 28, "diagonal entry {}", k);
        }
    }

    #[test]
    fn test_write_into_larger_buffer() {
        let mut dest = [-1.0_f32; 20];
        Matrix4::identity().write_column_major(&mut dest);
        assert_eq!(dest[0], 1.0);
        assert_eq!(dest[5], 1.0);
        assert_eq!(dest[1], 0.0);
        assert_eq!(dest[16], -1.0);
    }

    #[test]
    #[should_panic(expected = "needs 16 slots, got 15")]
    fn test_write_short_buffer_panics() {
        let mut dest = [0.0_f32; 15];
        Matrix4::identity().write_column_major(&mut dest);
    }
}
