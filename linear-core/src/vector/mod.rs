//! Fixed-size real vectors in 2, 3 and 4 dimensions.
//!
//! - [`Vector2`]: planar points and directions
//! - [`Vector3`]: positions, directions and rotation axes in 3-space
//! - [`Vector4`]: homogeneous coordinates and 4D frame vectors
//!
//! All three share the same componentwise arithmetic, norms and normalization,
//! generated by the `impl_vector_common!` macro below. Dimension-specific operations (cross
//! product, axis rotation, homogeneous conversion) live next to each type.

/// Shared constructors, norms and operator impls for the fixed-size vectors.
///
/// Invoked as `impl_vector_common!(Vector3, 3, { x: 0, y: 1, z: 2 })`.
macro_rules! impl_vector_common {
    ($name:ident, $dim:expr, { $($field:ident : $idx:tt),+ }) => {
        impl $name {
            /// Returns the zero vector.
            #[inline]
            pub fn zeros() -> Self {
                Self { $($field: 0.0),+ }
            }

            /// Creates a vector from an array of components.
            #[inline]
            pub fn from_array(arr: [f64; $dim]) -> Self {
                Self { $($field: arr[$idx]),+ }
            }

            /// Returns the components as an array.
            #[inline]
            pub fn to_array(&self) -> [f64; $dim] {
                [$(self.$field),+]
            }

            /// Returns the component at the given index.
            ///
            /// Returns an error for indices outside the vector's dimension. For
            /// unchecked access, use indexing syntax `v[i]` or the public fields.
            pub fn get(&self, index: usize) -> $crate::LinearResult<f64> {
                match index {
                    $($idx => Ok(self.$field),)+
                    _ => Err($crate::LinearError::math_error(
                        concat!(stringify!($name), "::get"),
                        $crate::MathErrorKind::InvalidInput,
                        &format!("index {} out of bounds (valid range: 0-{})", index, $dim - 1),
                    )),
                }
            }

            /// Sets the component at the given index.
            ///
            /// Returns an error for indices outside the vector's dimension.
            pub fn set(&mut self, index: usize, value: f64) -> $crate::LinearResult<()> {
                match index {
                    $($idx => {
                        self.$field = value;
                        Ok(())
                    })+
                    _ => Err($crate::LinearError::math_error(
                        concat!(stringify!($name), "::set"),
                        $crate::MathErrorKind::InvalidInput,
                        &format!("index {} out of bounds (valid range: 0-{})", index, $dim - 1),
                    )),
                }
            }

            /// Squared Euclidean length.
            #[inline]
            pub fn norm_squared(&self) -> f64 {
                0.0 $(+ self.$field * self.$field)+
            }

            /// Euclidean length (L2 norm).
            #[inline]
            pub fn norm(&self) -> f64 {
                libm::sqrt(self.norm_squared())
            }

            /// Largest absolute component (L∞ norm).
            #[inline]
            pub fn max_abs(&self) -> f64 {
                $crate::math::max_abs(&self.to_array())
            }

            /// Inner product.
            #[inline]
            pub fn dot(&self, other: &Self) -> f64 {
                0.0 $(+ self.$field * other.$field)+
            }

            /// Returns `true` if every component is finite.
            #[inline]
            pub fn is_finite(&self) -> bool {
                true $(&& self.$field.is_finite())+
            }

            /// Divides this vector by its norm, in place.
            ///
            /// Unchecked: the zero vector produces NaN components. Use
            /// [`try_normalized`](Self::try_normalized) when the input may be degenerate.
            #[inline]
            pub fn normalize(&mut self) -> &mut Self {
                let norm = self.norm();
                $(self.$field /= norm;)+
                self
            }

            /// Returns a unit vector in the same direction. Same precondition as
            /// [`normalize`](Self::normalize).
            #[inline]
            pub fn normalized(&self) -> Self {
                let mut v = *self;
                v.normalize();
                v
            }

            /// Checked normalization.
            ///
            /// Fails with [`ZeroLength`](crate::MathErrorKind::ZeroLength) for the
            /// zero vector and [`NotFinite`](crate::MathErrorKind::NotFinite) when a
            /// component is NaN or infinite.
            pub fn try_normalized(&self) -> $crate::LinearResult<Self> {
                let norm = self.norm();
                if !norm.is_finite() {
                    log::debug!("{}::try_normalized rejected non-finite {}", stringify!($name), self);
                    return Err($crate::LinearError::math_error(
                        concat!(stringify!($name), "::try_normalized"),
                        $crate::MathErrorKind::NotFinite,
                        "vector has a non-finite component",
                    ));
                }
                if norm == 0.0 {
                    log::debug!("{}::try_normalized rejected zero vector", stringify!($name));
                    return Err($crate::LinearError::math_error(
                        concat!(stringify!($name), "::try_normalized"),
                        $crate::MathErrorKind::ZeroLength,
                        "vector has zero length",
                    ));
                }
                Ok(*self / norm)
            }

            /// Pulls a nearly-unit vector back toward unit length using the first-order
            /// factor `1 - (|v|² - 1)/2`. Cheaper than [`normalize`](Self::normalize)
            /// and only meaningful when the vector is already close to unit length.
            #[inline]
            pub fn renormalize(&mut self) -> &mut Self {
                let factor = $crate::math::renormalize_factor(self.norm_squared());
                self.scale(factor)
            }

            /// Multiplies every component by `s`, in place.
            #[inline]
            pub fn scale(&mut self, s: f64) -> &mut Self {
                $(self.$field *= s;)+
                self
            }

            /// Adds `s * v` to this vector, in place.
            #[inline]
            pub fn add_scaled(&mut self, v: &Self, s: f64) -> &mut Self {
                $(self.$field += s * v.$field;)+
                self
            }
        }

        impl From<[f64; $dim]> for $name {
            #[inline]
            fn from(arr: [f64; $dim]) -> Self {
                Self::from_array(arr)
            }
        }

        impl From<$name> for [f64; $dim] {
            #[inline]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        /// Vector + Vector
        impl std::ops::Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        /// Vector - Vector
        impl std::ops::Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        /// Vector * scalar
        impl std::ops::Mul<f64> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, scalar: f64) -> Self {
                Self { $($field: self.$field * scalar),+ }
            }
        }

        /// scalar * Vector
        impl std::ops::Mul<$name> for f64 {
            type Output = $name;

            #[inline]
            fn mul(self, vec: $name) -> $name {
                vec * self
            }
        }

        /// Vector / scalar
        impl std::ops::Div<f64> for $name {
            type Output = Self;

            #[inline]
            fn div(self, scalar: f64) -> Self {
                Self { $($field: self.$field / scalar),+ }
            }
        }

        /// -Vector
        impl std::ops::Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl std::ops::AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl std::ops::SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl std::ops::MulAssign<f64> for $name {
            #[inline]
            fn mul_assign(&mut self, scalar: f64) {
                $(self.$field *= scalar;)+
            }
        }

        impl std::ops::DivAssign<f64> for $name {
            #[inline]
            fn div_assign(&mut self, scalar: f64) {
                $(self.$field /= scalar;)+
            }
        }

        /// v[i] indexing (panics if out of range)
        impl std::ops::Index<usize> for $name {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                match index {
                    $($idx => &self.$field,)+
                    _ => panic!(concat!(stringify!($name), " index out of bounds: {}"), index),
                }
            }
        }

        /// v[i] = value mutable indexing (panics if out of range)
        impl std::ops::IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => panic!(concat!(stringify!($name), " index out of bounds: {}"), index),
                }
            }
        }

        /// Angle-bracket notation, e.g. `<1,2,3>`.
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "<")?;
                for (i, c) in self.to_array().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, ">")
            }
        }
    };
}

mod vector2;
mod vector3;
mod vector4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
