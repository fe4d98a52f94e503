//! 3x3 matrices: linear maps of 3-space.
//!
//! `Matrix3` is the workhorse for rotations, inertia-like symmetric tensors and
//! the linear part of affine transforms. Besides plain composition it offers
//! several inversion strategies, chosen by what the caller knows about the matrix:
//!
//! | Method | Assumes | Reads |
//! |--------|---------|-------|
//! | [`inverse`](Matrix3::inverse) | non-singular | all nine entries |
//! | [`inverse_symmetric`](Matrix3::inverse_symmetric) | symmetric | lower triangle |
//! | [`inverse_positive_definite`](Matrix3::inverse_positive_definite) | symmetric positive definite | lower triangle |
//! | [`inverse_positive_definite_safe`](Matrix3::inverse_positive_definite_safe) | nearly positive semidefinite | lower triangle |
//! | [`try_inverse`](Matrix3::try_inverse) | nothing (checked) | all nine entries |
//!
//! None of the unchecked methods validate their assumptions. A singular matrix
//! passed to [`inverse`](Matrix3::inverse) yields infinities or NaN; a non-symmetric
//! matrix passed to [`inverse_symmetric`](Matrix3::inverse_symmetric) yields the
//! inverse of the symmetric matrix formed from its lower triangle.
//!
//! # Storage Layout
//!
//! Elements are stored row-major as `[[f64; 3]; 3]`. The element at row `i`,
//! column `j` (0-based) is `m[(i, j)]`; the docs write it `m(i+1)(j+1)`, so
//! `m11` is `m[(0, 0)]`. Matrices act on column vectors:
//!
//! ```text
//! | m11 m12 m13 |   | x |   | m11*x + m12*y + m13*z |
//! | m21 m22 m23 | * | y | = | m21*x + m22*y + m23*z |
//! | m31 m32 m33 |   | z |   | m31*x + m32*y + m33*z |
//! ```
//!
//! # Composition
//!
//! `a * b` applies `b` first, then `a`. The in-place forms
//! [`right_multiply`](Matrix3::right_multiply) (`A = A·B`) and
//! [`left_multiply`](Matrix3::left_multiply) (`A = M·A`) read every old entry into
//! locals before writing, so `a *= a` is safe.
//!
//! ```
//! use linear_core::{Matrix3, Vector3};
//!
//! let r = Matrix3::rotation(0.3, &Vector3::z_axis());
//! let mut m = r;
//! m *= m;
//! let twice = Matrix3::rotation(0.6, &Vector3::z_axis());
//! assert!(m.max_difference(&twice) < 1e-14);
//! ```

use crate::constants::{SAFE_PIVOT_TRACE_FRACTION, SINGULAR_RELATIVE_TOLERANCE};
use crate::{LinearError, LinearResult, Vector3};
use std::convert::Infallible;
use std::fmt;

/// A 3x3 matrix of `f64` entries, stored row-major.
///
/// ```
/// use linear_core::Matrix3;
///
/// let m = Matrix3::from_array([
///     [2.0, 0.0, 0.0],
///     [0.0, 4.0, 0.0],
///     [0.0, 0.0, 8.0],
/// ]);
/// assert_eq!(m.determinant(), 64.0);
/// assert_eq!(m.inverse()[(2, 2)], 0.125);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3 {
    elements: [[f64; 3]; 3],
}

/// Row-major product `a * b`, unrolled.
#[inline]
fn product(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let row = |r: &[f64; 3]| {
        [
            r[0] * b[0][0] + r[1] * b[1][0] + r[2] * b[2][0],
            r[0] * b[0][1] + r[1] * b[1][1] + r[2] * b[2][1],
            r[0] * b[0][2] + r[1] * b[1][2] + r[2] * b[2][2],
        ]
    };
    [row(&a[0]), row(&a[1]), row(&a[2])]
}

impl Matrix3 {
    /// Creates the 3x3 identity matrix.
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates the zero matrix (same as `Default`).
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Creates a matrix from a row-major array: `elements[i][j]` is row `i`, column `j`.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Creates a matrix whose columns are `c1`, `c2`, `c3`.
    pub fn from_columns(c1: &Vector3, c2: &Vector3, c3: &Vector3) -> Self {
        Self::from_array([[c1.x, c2.x, c3.x], [c1.y, c2.y, c3.y], [c1.z, c2.z, c3.z]])
    }

    /// Creates a matrix whose rows are `r1`, `r2`, `r3`.
    pub fn from_rows(r1: &Vector3, r2: &Vector3, r3: &Vector3) -> Self {
        Self::from_array([r1.to_array(), r2.to_array(), r3.to_array()])
    }

    /// Creates a diagonal matrix.
    pub fn from_diagonal(d: &Vector3) -> Self {
        Self::from_array([[d.x, 0.0, 0.0], [0.0, d.y, 0.0], [0.0, 0.0, d.z]])
    }

    /// Rotation by `theta` radians about `axis`, counter-clockwise when looking
    /// down the axis toward the origin.
    ///
    /// `axis` need not be unit length; it is normalized here. A zero axis is a
    /// precondition violation (debug-asserted) and yields NaN entries.
    pub fn rotation(theta: f64, axis: &Vector3) -> Self {
        let (s, c) = libm::sincos(theta);
        Self::rotation_cos_sin(c, s, axis)
    }

    /// Same as [`rotation`](Self::rotation) with `cos θ` and `sin θ` precomputed.
    pub fn rotation_cos_sin(cos_theta: f64, sin_theta: f64, axis: &Vector3) -> Self {
        let norm_sq = axis.norm_squared();
        debug_assert!(norm_sq > 0.0, "rotation axis must be non-zero");
        let Vector3 { x, y, z } = *axis / libm::sqrt(norm_sq);

        let om_c = 1.0 - cos_theta;
        let om_cx = om_c * x;
        let om_cy = om_c * y;
        let om_cz = om_c * z;
        Self::from_array([
            [
                om_cx * x + cos_theta,
                om_cy * x - sin_theta * z,
                om_cz * x + sin_theta * y,
            ],
            [
                om_cx * y + sin_theta * z,
                om_cy * y + cos_theta,
                om_cz * y - sin_theta * x,
            ],
            [
                om_cx * z - sin_theta * y,
                om_cy * z + sin_theta * x,
                om_cz * z + cos_theta,
            ],
        ])
    }

    /// Returns the element at the specified row and column (0-based).
    ///
    /// Panics if `row >= 3` or `col >= 3`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    /// Sets the element at the specified row and column (0-based).
    ///
    /// Panics if `row >= 3` or `col >= 3`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.elements[row][col] = value;
    }

    /// Returns a reference to the underlying row-major array.
    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    /// Returns row `i` (0-based) as a vector.
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::from_array(self.elements[i])
    }

    /// Returns column `j` (0-based) as a vector.
    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(self.elements[0][j], self.elements[1][j], self.elements[2][j])
    }

    /// Overwrites column `j` (0-based).
    pub fn set_column(&mut self, j: usize, v: &Vector3) -> &mut Self {
        self.elements[0][j] = v.x;
        self.elements[1][j] = v.y;
        self.elements[2][j] = v.z;
        self
    }

    /// Sum of the diagonal entries.
    pub fn trace(&self) -> f64 {
        self.elements[0][0] + self.elements[1][1] + self.elements[2][2]
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]] = self.elements;
        Self::from_array([[m11, m21, m31], [m12, m22, m32], [m13, m23, m33]])
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

    /// Sets `self = self * bᵗ`.
    ///
    /// Entry `(i, j)` of the result is the dot product of row `i` of `self` with
    /// row `j` of `b`.
    pub fn right_multiply_by_transpose(&mut self, b: &Self) -> &mut Self {
        let a = self.elements;
        let b = &b.elements;
        let row = |r: &[f64; 3]| {
            [
                r[0] * b[0][0] + r[1] * b[0][1] + r[2] * b[0][2],
                r[0] * b[1][0] + r[1] * b[1][1] + r[2] * b[1][2],
                r[0] * b[2][0] + r[1] * b[2][1] + r[2] * b[2][2],
            ]
        };
        self.elements = [row(&a[0]), row(&a[1]), row(&a[2])];
        self
    }

    /// Sets `self = mᵗ * self`.
    ///
    /// Entry `(i, j)` of the result is the dot product of column `i` of `m` with
    /// column `j` of `self`.
    pub fn left_multiply_by_transpose(&mut self, m: &Self) -> &mut Self {
        let a = self.elements;
        let m = &m.elements;
        let row = |i: usize| {
            [
                m[0][i] * a[0][0] + m[1][i] * a[1][0] + m[2][i] * a[2][0],
                m[0][i] * a[0][1] + m[1][i] * a[1][1] + m[2][i] * a[2][1],
                m[0][i] * a[0][2] + m[1][i] * a[1][2] + m[2][i] * a[2][2],
            ]
        };
        self.elements = [row(0), row(1), row(2)];
        self
    }

    /// Applies this matrix to a vector: `self * v`.
    pub fn apply_to_vector(&self, v: &Vector3) -> Vector3 {
        let m = &self.elements;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Computes the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]] = self.elements;

        m11 * (m22 * m33 - m23 * m32) - m12 * (m21 * m33 - m23 * m31)
            + m13 * (m21 * m32 - m22 * m31)
    }

    /// Returns the adjugate (transposed cofactor matrix) and the determinant.
    fn adjugate(&self) -> ([[f64; 3]; 3], f64) {
        let [[m11, m12, m13], [m21, m22, m23], [m31, m32, m33]] = self.elements;

        let sd11 = m22 * m33 - m23 * m32;
        let sd21 = m32 * m13 - m12 * m33;
        let sd31 = m12 * m23 - m22 * m13;
        let sd12 = m31 * m23 - m21 * m33;
        let sd22 = m11 * m33 - m31 * m13;
        let sd32 = m21 * m13 - m11 * m23;
        let sd13 = m21 * m32 - m31 * m22;
        let sd23 = m31 * m12 - m11 * m32;
        let sd33 = m11 * m22 - m21 * m12;

        let det = m11 * sd11 + m12 * sd12 + m13 * sd13;
        (
            [[sd11, sd21, sd31], [sd12, sd22, sd32], [sd13, sd23, sd33]],
            det,
        )
    }

    /// Returns the inverse, computed as the adjugate divided by the determinant.
    ///
    /// The matrix must be non-singular. This is not checked: a zero determinant
    /// produces infinite or NaN entries. See [`try_inverse`](Self::try_inverse).
    pub fn inverse(&self) -> Self {
        let (adj, det) = self.adjugate();
        Self::from_array(adj) * (1.0 / det)
    }

    /// Replaces this matrix with its inverse. Same precondition as [`inverse`](Self::inverse).
    pub fn invert(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    /// Checked inverse.
    ///
    /// Fails with [`LinearError::Singular`] when the determinant is not finite or
    /// `|det| <= SINGULAR_RELATIVE_TOLERANCE * max_abs³`.
    pub fn try_inverse(&self) -> LinearResult<Self> {
        let (adj, det) = self.adjugate();
        check_determinant("Matrix3::try_inverse", det, self.max_abs(), 3)?;
        Ok(Self::from_array(adj) * (1.0 / det))
    }

    /// Solves `self * x = rhs` by Cramer's rule.
    ///
    /// Same singularity precondition as [`inverse`](Self::inverse).
    pub fn solve(&self, rhs: &Vector3) -> Vector3 {
        let (adj, det) = self.adjugate();
        Self::from_array(adj).apply_to_vector(rhs) * (1.0 / det)
    }

    /// Checked [`solve`](Self::solve); fails like [`try_inverse`](Self::try_inverse).
    pub fn try_solve(&self, rhs: &Vector3) -> LinearResult<Vector3> {
        let (adj, det) = self.adjugate();
        check_determinant("Matrix3::try_solve", det, self.max_abs(), 3)?;
        Ok(Self::from_array(adj).apply_to_vector(rhs) * (1.0 / det))
    }

    /// Inverse of a symmetric matrix.
    ///
    /// Only the lower triangle (`m11, m21, m22, m31, m32, m33`) is read; symmetry is
    /// not checked. Six cofactors are computed and mirrored into both triangles of
    /// the result.
    pub fn inverse_symmetric(&self) -> Self {
        let [[m11, _, _], [m21, m22, _], [m31, m32, m33]] = self.elements;

        let sd11 = m22 * m33 - m32 * m32;
        let sd12 = m31 * m32 - m21 * m33;
        let sd22 = m11 * m33 - m31 * m31;
        let sd13 = m21 * m32 - m31 * m22;
        let sd23 = m31 * m21 - m11 * m32;
        let sd33 = m11 * m22 - m21 * m21;

        let det_inv = 1.0 / (m11 * sd11 + m21 * sd12 + m31 * sd13);

        let i12 = sd12 * det_inv;
        let i13 = sd13 * det_inv;
        let i23 = sd23 * det_inv;
        Self::from_array([
            [sd11 * det_inv, i12, i13],
            [i12, sd22 * det_inv, i23],
            [i13, i23, sd33 * det_inv],
        ])
    }

    /// Replaces this symmetric matrix with its inverse. See
    /// [`inverse_symmetric`](Self::inverse_symmetric).
    pub fn invert_symmetric(&mut self) -> &mut Self {
        *self = self.inverse_symmetric();
        self
    }

    /// LDLᵗ inverse of the symmetric matrix given by the lower triangle.
    ///
    /// The factorization is
    ///
    /// ```text
    /// L = | 1 0 0 |      D = diag(1/d1, 1/d2, 1/d3)
    ///     | a 1 0 |
    ///     | b c 1 |
    /// ```
    ///
    /// where `d1, d2, d3` are stored as reciprocals so the back substitution needs
    /// no further division. `pivot(index, value)` vets each pivot before it is
    /// inverted and may replace it.
    fn ldlt_inverse<E>(
        &self,
        mut pivot: impl FnMut(usize, f64) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let [[m11, _, _], [m21, m22, _], [m31, m32, m33]] = self.elements;

        let d1 = 1.0 / pivot(1, m11)?;
        let a = m21 * d1;
        let b = m31 * d1;
        let u22 = m22 - m21 * a;
        let u23 = m32 - m31 * a;
        let u33 = m33 - m31 * b;
        let d2 = 1.0 / pivot(2, u22)?;
        let c = u23 * d2;
        let d3 = 1.0 / pivot(3, u33 - u23 * c)?;

        let i33 = d3;
        let i23 = -c * d3;
        let i22 = d2 - c * i23;
        let ac_minus_b = a * c - b;
        let i13 = ac_minus_b * d3;
        let ad2 = a * d2;
        let i12 = -c * i13 - ad2;
        let i11 = d1 + a * ad2 + ac_minus_b * i13;

        Ok(Self::from_array([
            [i11, i12, i13],
            [i12, i22, i23],
            [i13, i23, i33],
        ]))
    }

    /// Inverse of a symmetric positive-definite matrix via LDLᵗ factorization.
    ///
    /// Only the lower triangle is read. Every pivot (`m11`, the Schur complement
    /// after eliminating row/column 1, and the final scalar Schur complement) must
    /// be strictly positive. Debug builds assert this; release builds divide
    /// regardless and return garbage for indefinite input.
    pub fn inverse_positive_definite(&self) -> Self {
        let result = self.ldlt_inverse(|index, p| {
            debug_assert!(p > 0.0, "pivot {} = {} is not positive", index, p);
            Ok::<f64, Infallible>(p)
        });
        match result {
            Ok(m) => m,
            Err(never) => match never {},
        }
    }

    /// Replaces this matrix with its positive-definite inverse. See
    /// [`inverse_positive_definite`](Self::inverse_positive_definite).
    pub fn invert_positive_definite(&mut self) -> &mut Self {
        *self = self.inverse_positive_definite();
        self
    }

    /// Checked positive-definite inverse.
    ///
    /// Fails with [`LinearError::NotPositiveDefinite`] naming the first pivot
    /// (1-based) that is not strictly positive and finite.
    pub fn try_inverse_positive_definite(&self) -> LinearResult<Self> {
        self.ldlt_inverse(|index, p| {
            if p > 0.0 && p.is_finite() {
                Ok(p)
            } else {
                log::debug!(
                    "Matrix3::try_inverse_positive_definite rejected pivot {} = {:e}",
                    index,
                    p
                );
                Err(LinearError::not_positive_definite(
                    "Matrix3::try_inverse_positive_definite",
                    index,
                    p,
                ))
            }
        })
    }

    /// Positive-definite inverse that tolerates nearly singular input.
    ///
    /// Runs the same LDLᵗ elimination as
    /// [`inverse_positive_definite`](Self::inverse_positive_definite), but raises every
    /// pivot to at least `ε = SAFE_PIVOT_TRACE_FRACTION * trace` before inverting it.
    /// When all eigenvalues are comfortably positive this is the exact inverse; when
    /// some are near zero (or slightly negative from rounding) it is the inverse of a
    /// slightly perturbed matrix instead of a blow-up.
    ///
    /// This is a heuristic. The clamped pivots are not compensated against each
    /// other, and there is no proven bound on how far the result is from a true
    /// inverse when the perturbation is large. An LDLᵗ pivot is not an eigenvalue:
    /// a near-zero early pivot can drive later Schur complements well below `-ε`
    /// even when the smallest eigenvalue is only slightly negative, and those are
    /// clamped like any other. Debug builds assert only that the trace is
    /// non-negative.
    pub fn invert_positive_definite_safe(&mut self) -> &mut Self {
        let trace = self.trace();
        debug_assert!(trace >= 0.0, "trace {} is negative", trace);
        let epsilon = SAFE_PIVOT_TRACE_FRACTION * trace;

        let result = self.ldlt_inverse(|index, p| {
            if p < epsilon {
                log::debug!(
                    "Matrix3::invert_positive_definite_safe clamped pivot {} from {:e} to {:e}",
                    index,
                    p,
                    epsilon
                );
                Ok::<f64, Infallible>(epsilon)
            } else {
                Ok(p)
            }
        });
        *self = match result {
            Ok(m) => m,
            Err(never) => match never {},
        };
        self
    }

    /// By-value form of [`invert_positive_definite_safe`](Self::invert_positive_definite_safe).
    pub fn inverse_positive_definite_safe(&self) -> Self {
        let mut m = *self;
        m.invert_positive_definite_safe();
        m
    }

    /// Pulls a nearly orthonormal matrix back toward orthonormality.
    ///
    /// First each column `c` is rescaled by `1 - (|c|² - 1)/2`, the first-order
    /// approximation to `1/|c|`. Then, for each pair of columns, half of their dot
    /// product is removed from each along the other:
    ///
    /// ```text
    /// c1' = c1 - α·c2 - β·c3      α = (c1·c2)/2
    /// c2' = c2 - α·c1 - γ·c3      β = (c1·c3)/2
    /// c3' = c3 - β·c1 - γ·c2      γ = (c2·c3)/2
    /// ```
    ///
    /// This is a cheap first-order correction, not an exact orthonormalization. Call
    /// it periodically on rotation matrices accumulated by repeated composition.
    pub fn renormalize(&mut self) -> &mut Self {
        let mut c1 = self.column(0);
        let mut c2 = self.column(1);
        let mut c3 = self.column(2);
        c1.renormalize();
        c2.renormalize();
        c3.renormalize();

        let alpha = 0.5 * c1.dot(&c2);
        let beta = 0.5 * c1.dot(&c3);
        let gamma = 0.5 * c2.dot(&c3);

        let n1 = c1 - c2 * alpha - c3 * beta;
        let n2 = c2 - c1 * alpha - c3 * gamma;
        let n3 = c3 - c1 * beta - c2 * gamma;
        *self = Self::from_columns(&n1, &n2, &n3);
        self
    }

    /// Sum of squares of all nine entries (squared Frobenius norm).
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
        let mut max_diff: f64 = 0.0;

        for i in 0..3 {
            for j in 0..3 {
                let diff = (self.elements[i][j] - other.elements[i][j]).abs();
                max_diff = max_diff.max(diff);
            }
        }

        max_diff
    }

    /// Checks whether this matrix is orthonormal (`M * Mᵗ = I`) within `tolerance`.
    ///
    /// Reflections (determinant -1) pass; use [`is_rotation_matrix`](Self::is_rotation_matrix)
    /// to also require determinant +1.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let mut product = *self;
        product.right_multiply_by_transpose(self);
        product.max_difference(&Self::identity()) <= tolerance
    }

    /// Checks whether this matrix is a proper rotation within `tolerance`.
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        (self.determinant() - 1.0).abs() <= tolerance && self.is_orthonormal(tolerance)
    }
}

/// Rejects determinants that are non-finite or negligible relative to the
/// matrix scale.
pub(crate) fn check_determinant(
    operation: &str,
    det: f64,
    scale: f64,
    dim: i32,
) -> LinearResult<()> {
    let threshold = SINGULAR_RELATIVE_TOLERANCE * scale.powi(dim);
    if !det.is_finite() || det.abs() <= threshold {
        log::debug!("{} rejected determinant {:e} (threshold {:e})", operation, det, threshold);
        return Err(LinearError::singular(operation, det));
    }
    Ok(())
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Matrix3> for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<&Matrix3> for &Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: &Matrix3) -> Matrix3 {
        self.multiply(rhs)
    }
}

/// `a *= b` is `a = a * b`. The right-hand side is taken by value, so `a *= a`
/// squares the matrix.
impl std::ops::MulAssign for Matrix3 {
    fn mul_assign(&mut self, rhs: Self) {
        self.right_multiply(&rhs);
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply_to_vector(&vec)
    }
}

impl std::ops::Mul<Vector3> for &Matrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply_to_vector(&vec)
    }
}

impl std::ops::Mul<f64> for Matrix3 {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::from_array(self.elements.map(|row| row.map(|v| v * s)))
    }
}

impl std::ops::Add for Matrix3 {
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

impl std::ops::Sub for Matrix3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl std::ops::Neg for Matrix3 {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl std::ops::Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.elements[row][col]
    }
}

/// One row per line in angle-bracket notation.
impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            writeln!(f, " <{}, {}, {}>", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
