//! Error types for the checked linear-algebra tier.
//!
//! The fast path of this crate never returns errors: inverting a singular matrix
//! or normalizing a zero vector is a documented precondition violation and simply
//! produces non-finite output. The `try_*` methods wrap those operations and report
//! failures through [`LinearError`].
//!
//! # Error Categories
//!
//! | Variant | Produced by |
//! |---------|-------------|
//! | [`MathError`](LinearError::MathError) | bad indices, zero-length vectors, degenerate look-at frames |
//! | [`Singular`](LinearError::Singular) | `try_inverse`, `try_solve` |
//! | [`NotPositiveDefinite`](LinearError::NotPositiveDefinite) | `try_inverse_positive_definite` |
//!
//! # Usage
//!
//! ```
//! use linear_core::{LinearError, Matrix3};
//!
//! let singular = Matrix3::from_array([
//!     [1.0, 2.0, 3.0],
//!     [2.0, 4.0, 6.0],
//!     [0.0, 1.0, 1.0],
//! ]);
//! match singular.try_inverse() {
//!     Err(LinearError::Singular { determinant, .. }) => assert_eq!(determinant, 0.0),
//!     other => panic!("expected singular error, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
///
/// Used with [`LinearError::MathError`] to distinguish between different
/// numerical failure modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Input value is invalid for the operation (e.g. index out of range).
    InvalidInput,
    /// Input or result is NaN or infinity.
    NotFinite,
    /// A vector that must be normalized has zero length.
    ZeroLength,
    /// Inputs do not span the required space (e.g. parallel look-at vectors).
    Degenerate,
}

/// Unified error type for the checked operations.
///
/// Use the constructor methods ([`math_error`](Self::math_error),
/// [`singular`](Self::singular), [`not_positive_definite`](Self::not_positive_definite))
/// for consistent error creation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearError {
    /// Generic numerical failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Matrix is singular or too ill-conditioned to invert.
    #[error("Singular matrix in {operation}: determinant={determinant:.6e}")]
    Singular { operation: String, determinant: f64 },

    /// An LDLᵗ pivot was not strictly positive.
    #[error("Matrix not positive definite in {operation}: pivot {pivot_index} = {pivot:.6e}")]
    NotPositiveDefinite {
        operation: String,
        pivot_index: usize,
        pivot: f64,
    },
}

/// Convenience alias for `Result<T, LinearError>`.
pub type LinearResult<T> = Result<T, LinearError>;

impl LinearError {
    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    /// Creates a [`Singular`](Self::Singular) error.
    pub fn singular(operation: &str, determinant: f64) -> Self {
        Self::Singular {
            operation: operation.to_string(),
            determinant,
        }
    }

    /// Creates a [`NotPositiveDefinite`](Self::NotPositiveDefinite) error.
    pub fn not_positive_definite(operation: &str, pivot_index: usize, pivot: f64) -> Self {
        Self::NotPositiveDefinite {
            operation: operation.to_string(),
            pivot_index,
            pivot,
        }
    }

    /// Returns the [`MathErrorKind`] for generic math errors, `None` otherwise.
    pub fn kind(&self) -> Option<MathErrorKind> {
        match self {
            Self::MathError { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_with_kind() {
        let err = LinearError::math_error(
            "Vector3::try_normalized",
            MathErrorKind::ZeroLength,
            "vector has zero length",
        );
        assert!(err.to_string().contains("Math error"));
        assert!(err.to_string().contains("ZeroLength"));
        assert_eq!(err.kind(), Some(MathErrorKind::ZeroLength));
    }

    #[test]
    fn test_singular_error() {
        let err = LinearError::singular("Matrix4::try_inverse", 0.0);
        assert_eq!(
            err.to_string(),
            "Singular matrix in Matrix4::try_inverse: determinant=0.000000e0"
        );
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_not_positive_definite_error() {
        let err = LinearError::not_positive_definite("Matrix3::try_inverse_positive_definite", 2, -1.5);
        let msg = err.to_string();
        assert!(msg.contains("pivot 2"));
        assert!(msg.contains("-1.5"));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<LinearError>();
        _assert_sync::<LinearError>();
    }
}
