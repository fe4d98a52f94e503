//! 4x4 matrices: homogeneous transforms of 3-space.
//!
//! A `Matrix4` is usually an affine transform (last row `(0,0,0,1)`) or a
//! projection (last row non-trivial). The builders that create them live in
//! [`crate::transform`]; this module holds storage, composition and inversion.
//!
//! Storage, indexing and composition follow [`Matrix3`]: row-major, 0-based
//! `m[(i, j)]`, column vectors, and `a * b` applies `b` first.
//!
//! # Points and Directions
//!
//! [`transform_position`](Matrix4::transform_position) treats its argument as
//! `(p, 1)` and divides by the resulting `w'`, so projections work.
//! [`transform_direction`](Matrix4::transform_direction) treats its argument as
//! `(d, 0)`: translation is ignored and there is no divide.
//!
//! ```
//! use linear_core::{Matrix4, Vector3};
//!
//! let t = Matrix4::translation(&Vector3::new(1.0, 2.0, 3.0));
//! let p = t.transform_position(&Vector3::zeros());
//! let d = t.transform_direction(&Vector3::x_axis());
//! assert_eq!(p, Vector3::new(1.0, 2.0, 3.0));
//! assert_eq!(d, Vector3::x_axis());
//! ```

use super::matrix3::check_determinant;
use crate::{LinearResult, Matrix3, Vector3, Vector4};
use std::fmt;

/// A 4x4 matrix of `f64` entries, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4 {
    elements: [[f64; 4]; 4],
}

/// Row-major product `a * b`, unrolled per row.
#[inline]
fn product(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let row = |r: &[f64; 4]| {
        [
            r[0] * b[0][0] + r[1] * b[1][0] + r[2] * b[2][0] + r[3] * b[3][0],
            r[0] * b[0][1] + r[1] * b[1][1] + r[2] * b[2][1] + r[3] * b[3][1],
            r[0] * b[0][2] + r[1] * b[1][2] + r[2] * b[2][2] + r[3] * b[3][2],
            r[0] * b[0][3] + r[1] * b[1][3] + r[2] * b[2][3] + r[3] * b[3][3],
        ]
    };
    [row(&a[0]), row(&a[1]), row(&a[2]), row(&a[3])]
}

/// The six 2x2 minors of a pair of rows, keyed by column pair:
/// `[c12, c13, c14, c23, c24, c34]`.
#[inline]
fn pair_minors(r: &[f64; 4], s: &[f64; 4]) -> [f64; 6] {
    [
        r[0] * s[1] - r[1] * s[0],
        r[0] * s[2] - r[2] * s[0],
        r[0] * s[3] - r[3] * s[0],
        r[1] * s[2] - r[2] * s[1],
        r[1] * s[3] - r[3] * s[1],
        r[2] * s[3] - r[3] * s[2],
    ]
}

/// The four 3x3 minors obtained by deleting one column from the 3x4 block made
/// of row `r` on top of the rows whose pair minors are `c`.
///
/// Entry `k` is the minor with column `k` deleted.
#[inline]
fn row_minors(r: &[f64; 4], c: &[f64; 6]) -> [f64; 4] {
    let [c12, c13, c14, c23, c24, c34] = *c;
    [
        r[1] * c34 - r[2] * c24 + r[3] * c23,
        r[0] * c34 - r[2] * c14 + r[3] * c13,
        r[0] * c24 - r[1] * c14 + r[3] * c12,
        r[0] * c23 - r[1] * c13 + r[2] * c12,
    ]
}

impl Matrix4 {
    /// Creates the 4x4 identity matrix.
    pub fn identity() -> Self {
        Self::from_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the zero matrix (same as `Default`).
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Creates a matrix from a row-major array.
    pub fn from_array(elements: [[f64; 4]; 4]) -> Self {
        Self { elements }
    }

    /// Creates a matrix whose columns are `c1`..`c4`.
    pub fn from_columns(c1: &Vector4, c2: &Vector4, c3: &Vector4, c4: &Vector4) -> Self {
        Self::from_array([
            [c1.x, c2.x, c3.x, c4.x],
            [c1.y, c2.y, c3.y, c4.y],
            [c1.z, c2.z, c3.z, c4.z],
            [c1.w, c2.w, c3.w, c4.w],
        ])
    }

    /// Creates a matrix whose rows are `r1`..`r4`.
    pub fn from_rows(r1: &Vector4, r2: &Vector4, r3: &Vector4, r4: &Vector4) -> Self {
        Self::from_array([r1.to_array(), r2.to_array(), r3.to_array(), r4.to_array()])
    }

    /// Creates a diagonal matrix.
    pub fn from_diagonal(d: &Vector4) -> Self {
        let mut m = Self::zeros();
        for (i, v) in d.to_array().into_iter().enumerate() {
            m.elements[i][i] = v;
        }
        m
    }

    /// Embeds a 3x3 linear map as the upper-left block, with last row and column
    /// `(0,0,0,1)`.
    pub fn from_linear(linear: &Matrix3) -> Self {
        let [r1, r2, r3] = *linear.elements();
        Self::from_array([
            [r1[0], r1[1], r1[2], 0.0],
            [r2[0], r2[1], r2[2], 0.0],
            [r3[0], r3[1], r3[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// The upper-left 3x3 block.
    pub fn linear_part(&self) -> Matrix3 {
        let e = &self.elements;
        Matrix3::from_array([
            [e[0][0], e[0][1], e[0][2]],
            [e[1][0], e[1][1], e[1][2]],
            [e[2][0], e[2][1], e[2][2]],
        ])
    }

    /// The first three entries of the last column.
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.elements[0][3], self.elements[1][3], self.elements[2][3])
    }

    /// Returns the element at the specified row and column (0-based).
    ///
    /// Panics if `row >= 4` or `col >= 4`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    /// Sets the element at the specified row and column (0-based).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.elements[row][col] = value;
    }

    /// Returns a reference to the underlying row-major array.
    pub fn elements(&self) -> &[[f64; 4]; 4] {
        &self.elements
    }

    /// Returns row `i` (0-based) as a vector.
    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::from_array(self.elements[i])
    }

    /// Returns column `j` (0-based) as a vector.
    pub fn column(&self, j: usize) -> Vector4 {
        let e = &self.elements;
        Vector4::new(e[0][j], e[1][j], e[2][j], e[3][j])
    }

    /// Overwrites column `j` (0-based).
    pub fn set_column(&mut self, j: usize, v: &Vector4) -> &mut Self {
        for (row, value) in self.elements.iter_mut().zip(v.to_array()) {
            row[j] = value;
        }
        self
    }

    /// Sum of the diagonal entries.
    pub fn trace(&self) -> f64 {
        (0..4).map(|i| self.elements[i][i]).sum()
    }

    /// Returns `true` when the last row is exactly `(0, 0, 0, 1)`.
    pub fn is_affine(&self) -> bool {
        self.elements[3] == [0.0, 0.0, 0.0, 1.0]
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        let mut t = [[0.0; 4]; 4];
        for (i, row) in t.iter_mut().enumerate() {
            *row = [e[0][i], e[1][i], e[2][i], e[3][i]];
        }
        Self::from_array(t)
    }

    /// Transposes this matrix in place.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        *self = self.transpose();
        self
    }

    /// Multiplies this matrix by another, returning `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_array(product(&self.elements, &other.elements))
    }

    /// Sets `self = self * b`.
    pub fn right_multiply(&mut self, b: &Self) -> &mut Self {
        self.elements = product(&self.elements, &b.elements);
        self
    }

    /// Sets `self = m * self`.
    pub fn left_multiply(&mut self, m: &Self) -> &mut Self {
        self.elements = product(&m.elements, &self.elements);
        self
    }

    /// Applies this matrix to a homogeneous vector.
    pub fn apply_to_vector(&self, v: &Vector4) -> Vector4 {
        let row = |r: &[f64; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        let e = &self.elements;
        Vector4::new(row(&e[0]), row(&e[1]), row(&e[2]), row(&e[3]))
    }

    /// Transforms the point `p` (as `(p, 1)`) and divides by the resulting `w'`.
    ///
    /// For an affine matrix `w' = 1` and the divide is exact. For a projection,
    /// a point on the eye plane gives `w' = 0` and infinite or NaN output.
    pub fn transform_position(&self, p: &Vector3) -> Vector3 {
        let h = self.apply_to_vector(&Vector4::from_point(p));
        h.xyz() / h.w
    }

    /// Transforms the direction `d` (as `(d, 0)`): linear part only, no divide.
    ///
    /// Directions are not meaningful under a projective matrix. Debug builds
    /// assert that the first three entries of the last row are zero.
    pub fn transform_direction(&self, d: &Vector3) -> Vector3 {
        debug_assert!(
            self.elements[3][..3].iter().all(|v| *v == 0.0),
            "transform_direction on a projective matrix: last row {:?}",
            self.elements[3]
        );
        self.linear_part() * *d
    }

    /// Computes the determinant by cofactor expansion along the first row, using
    /// the six 2x2 minors of rows 3 and 4.
    pub fn determinant(&self) -> f64 {
        let [r1, r2, r3, r4] = &self.elements;
        let sd1 = row_minors(r2, &pair_minors(r3, r4));
        r1[0] * sd1[0] - r1[1] * sd1[1] + r1[2] * sd1[2] - r1[3] * sd1[3]
    }

    /// Returns the adjugate and the determinant.
    ///
    /// `sd[i][j]` is the 3x3 minor with row `i` and column `j` deleted. Rows 1 and
    /// 2 share the minors of rows 3-4; row 3 uses rows 2-4 and row 4 uses rows 2-3.
    fn adjugate(&self) -> ([[f64; 4]; 4], f64) {
        let [r1, r2, r3, r4] = &self.elements;

        let c34 = pair_minors(r3, r4);
        let c24 = pair_minors(r2, r4);
        let c23 = pair_minors(r2, r3);

        let sd = [
            row_minors(r2, &c34),
            row_minors(r1, &c34),
            row_minors(r1, &c24),
            row_minors(r1, &c23),
        ];
        let det = r1[0] * sd[0][0] - r1[1] * sd[0][1] + r1[2] * sd[0][2] - r1[3] * sd[0][3];

        let mut adj = [[0.0; 4]; 4];
        for (i, row) in adj.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                let minor = sd[j][i];
                *v = if (i + j) % 2 == 0 { minor } else { -minor };
            }
        }
        (adj, det)
    }

    /// Returns the inverse, computed as the adjugate divided by the determinant.
    ///
    /// The matrix must be non-singular; this is not checked. See
    /// [`try_inverse`](Self::try_inverse).
    pub fn inverse(&self) -> Self {
        let (adj, det) = self.adjugate();
        Self::from_array(adj) * (1.0 / det)
    }

    /// Replaces this matrix with its inverse.
    pub fn invert(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    /// Checked inverse; fails with [`LinearError::Singular`](crate::LinearError::Singular)
    /// when `|det| <= SINGULAR_RELATIVE_TOLERANCE * max_abs⁴` or det is not finite.
    pub fn try_inverse(&self) -> LinearResult<Self> {
        let (adj, det) = self.adjugate();
        check_determinant("Matrix4::try_inverse", det, self.max_abs(), 4)?;
        Ok(Self::from_array(adj) * (1.0 / det))
    }

    /// Solves `self * x = rhs` as `inverse() * rhs`.
    pub fn solve(&self, rhs: &Vector4) -> Vector4 {
        self.inverse() * *rhs
    }

    /// Checked [`solve`](Self::solve).
    pub fn try_solve(&self, rhs: &Vector4) -> LinearResult<Vector4> {
        let (adj, det) = self.adjugate();
        check_determinant("Matrix4::try_solve", det, self.max_abs(), 4)?;
        Ok((Self::from_array(adj) * (1.0 / det)) * *rhs)
    }

    /// Pulls a nearly orthonormal matrix back toward orthonormality.
    ///
    /// Same scheme as [`Matrix3::renormalize`] over four columns: first-order
    /// length correction, then half of each of the six pairwise column dot products
    /// removed from both columns of the pair.
    pub fn renormalize(&mut self) -> &mut Self {
        let mut c = [self.column(0), self.column(1), self.column(2), self.column(3)];
        for col in c.iter_mut() {
            col.renormalize();
        }

        let alpha = 0.5 * c[0].dot(&c[1]);
        let beta = 0.5 * c[0].dot(&c[2]);
        let gamma = 0.5 * c[0].dot(&c[3]);
        let delta = 0.5 * c[1].dot(&c[2]);
        let eps = 0.5 * c[1].dot(&c[3]);
        let phi = 0.5 * c[2].dot(&c[3]);

        let n1 = c[0] - c[1] * alpha - c[2] * beta - c[3] * gamma;
        let n2 = c[1] - c[0] * alpha - c[2] * delta - c[3] * eps;
        let n3 = c[2] - c[0] * beta - c[1] * delta - c[3] * phi;
        let n4 = c[3] - c[0] * gamma - c[1] * eps - c[2] * phi;
        *self = Self::from_columns(&n1, &n2, &n3, &n4);
        self
    }

    /// Squared Frobenius norm.
    pub fn sum_squares_norm(&self) -> f64 {
        self.elements.iter().flatten().map(|v| v * v).sum()
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> f64 {
        self.elements
            .iter()
            .flatten()
            .fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Returns the maximum absolute difference between corresponding elements.
    pub fn max_difference(&self, other: &Self) -> f64 {
        self.elements
            .iter()
            .flatten()
            .zip(other.elements.iter().flatten())
            .fold(0.0_f64, |m, (a, b)| m.max((a - b).abs()))
    }

    /// Checks whether `M * Mᵗ = I` within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        (self * &self.transpose()).max_difference(&Self::identity()) <= tolerance
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix4> for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        self.multiply(rhs)
    }
}

impl std::ops::MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        self.right_multiply(&rhs);
    }
}

impl std::ops::Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, vec: Vector4) -> Vector4 {
        self.apply_to_vector(&vec)
    }
}

impl std::ops::Mul<Vector4> for &Matrix4 {
    type Output = Vector4;

    fn mul(self, vec: Vector4) -> Vector4 {
        self.apply_to_vector(&vec)
    }
}

impl std::ops::Mul<f64> for Matrix4 {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::from_array(self.elements.map(|row| row.map(|v| v * s)))
    }
}

impl std::ops::Add for Matrix4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for (row, rhs_row) in out.elements.iter_mut().zip(rhs.elements.iter()) {
            for (v, r) in row.iter_mut().zip(rhs_row) {
                *v += r;
            }
        }
        out
    }
}

impl std::ops::Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl std::ops::Neg for Matrix4 {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl std::ops::Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            writeln!(f, " <{}, {}, {}, {}>", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearError;

    fn triangular() -> Matrix4 {
        Matrix4::from_array([
            [2.0, 1.0, 0.0, 3.0],
            [0.0, 3.0, 1.0, 0.0],
            [0.0, 0.0, 4.0, 2.0],
            [0.0, 0.0, 0.0, 5.0],
        ])
    }

    fn general() -> Matrix4 {
        Matrix4::from_array([
            [4.0, 1.0, 2.0, 0.5],
            [1.0, -3.0, 0.0, 1.0],
            [2.0, 0.0, 5.0, 1.0],
            [0.5, 1.0, -1.0, 2.0],
        ])
    }

    #[test]
    fn test_identity() {
        let i = Matrix4::identity();
        assert_eq!(i.trace(), 4.0);
        assert_eq!(i.determinant(), 1.0);
        assert!(i.is_affine());
        assert_eq!(i.inverse(), i);
    }

    #[test]
    fn test_determinant_triangular() {
        assert_eq!(triangular().determinant(), 120.0);
        assert_eq!(triangular().transpose().determinant(), 120.0);
    }

    #[test]
    fn test_determinant_swapped_rows_changes_sign() {
        let m = general();
        let swapped = Matrix4::from_rows(&m.row(1), &m.row(0), &m.row(2), &m.row(3));
        let (d, ds) = (m.determinant(), swapped.determinant());
        assert!((d + ds).abs() < 1e-12 * d.abs());
    }

    #[test]
    fn test_inverse_round_trip() {
        for m in [triangular(), general()] {
            let inv = m.inverse();
            assert!((m * inv).max_difference(&Matrix4::identity()) < 1e-14);
            assert!((inv * m).max_difference(&Matrix4::identity()) < 1e-14);

            let mut in_place = m;
            in_place.invert();
            assert_eq!(in_place, inv);
        }
    }

    #[test]
    fn test_inverse_matches_adjugate_of_from_linear() {
        let linear = Matrix3::from_array([[1.0, 2.0, 3.0], [3.0, -1.0, 2.0], [2.0, 3.0, -1.0]]);
        let m = Matrix4::from_linear(&linear);
        let inv4 = m.inverse();
        let inv3 = linear.inverse();

        // Integer entries keep every minor exact, so both paths divide the same
        // cofactors by the same determinant.
        crate::assert_ulp_lt!(m.determinant(), linear.determinant(), 0);
        for i in 0..3 {
            for j in 0..3 {
                crate::assert_ulp_lt!(inv4[(i, j)], inv3[(i, j)], 0, "inverse entry ({}, {})", i, j);
            }
            crate::assert_ulp_lt!(inv4[(i, 3)], 0.0, 0);
            crate::assert_ulp_lt!(inv4[(3, i)], 0.0, 0);
        }
        crate::assert_ulp_lt!(inv4[(3, 3)], 1.0, 1);
    }

    #[test]
    fn test_try_inverse_singular() {
        let mut m = general();
        let c0 = m.column(0);
        m.set_column(3, &(c0 * 2.0));
        assert!(matches!(m.try_inverse(), Err(LinearError::Singular { .. })));
        assert!(Matrix4::zeros().try_inverse().is_err());
        assert!(general().try_inverse().is_ok());
    }

    #[test]
    fn test_solve() {
        let m = general();
        let x = Vector4::new(1.0, -1.0, 0.5, 2.0);
        let rhs = m * x;
        assert!((m.solve(&rhs) - x).max_abs() < 1e-14);
        assert!((m.try_solve(&rhs).unwrap() - x).max_abs() < 1e-14);
        assert!(Matrix4::zeros().try_solve(&rhs).is_err());
    }

    #[test]
    fn test_composition_variants() {
        let a = general();
        let b = triangular();

        let mut r = a;
        r.right_multiply(&b);
        assert_eq!(r, a * b);

        let mut l = a;
        l.left_multiply(&b);
        assert_eq!(l, b * a);

        let mut sq = a;
        sq *= sq;
        assert_eq!(sq, a * a);
    }

    #[test]
    fn test_linear_part_round_trip() {
        let linear = Matrix3::rotation(0.4, &Vector3::new(1.0, 1.0, 0.0));
        let m = Matrix4::from_linear(&linear);
        assert_eq!(m.linear_part(), linear);
        assert_eq!(m.translation_part(), Vector3::zeros());
        assert!(m.is_affine());
    }

    #[test]
    fn test_transform_position_divides_by_w() {
        let mut m = Matrix4::identity();
        m[(3, 3)] = 2.0;
        let p = m.transform_position(&Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(p, Vector3::new(1.0, 2.0, 3.0));
        assert!(!m.is_affine());
    }

    #[test]
    fn test_renormalize() {
        let r = Matrix4::from_linear(&Matrix3::rotation(0.9, &Vector3::new(1.0, -2.0, 0.5)));
        let mut m = r;
        m.renormalize();
        assert!(m.max_difference(&r) < 1e-10);

        let mut perturbed = r
            + Matrix4::from_array([
                [2e-3, 1e-3, 0.0, 0.0],
                [1e-3, -1e-3, 0.0, 5e-4],
                [0.0, 0.0, 3e-3, 0.0],
                [0.0, 5e-4, 0.0, -2e-3],
            ]);
        for _ in 0..4 {
            perturbed.renormalize();
        }
        assert!(perturbed.is_orthonormal(1e-10));
    }

    #[test]
    fn test_norms() {
        let m = triangular();
        assert_eq!(m.max_abs(), 5.0);
        assert_eq!(m.sum_squares_norm(), 4.0 + 1.0 + 9.0 + 9.0 + 1.0 + 16.0 + 4.0 + 25.0);
    }

    #[test]
    fn test_arithmetic() {
        let m = general();
        assert_eq!(m + m, m * 2.0);
        assert_eq!(m - m, Matrix4::zeros());
        assert_eq!(&m * &Matrix4::identity(), m);
        assert_eq!(&m * Vector4::w_axis(), m.column(3));
        let d = Matrix4::from_diagonal(&Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(d.trace(), 10.0);
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Matrix4::identity());
        assert_eq!(
            s,
            " <1, 0, 0, 0>\n <0, 1, 0, 0>\n <0, 0, 1, 0>\n <0, 0, 0, 1>\n"
        );
    }
}
