//! Error types for xform-math operations.
//!
//! Almost nothing in the kernel fails: degenerate numeric input (singular
//! matrices, zero-length vectors) resolves to a defined fallback value instead
//! of an error. The variants here cover the few hard failures that remain:
//!
//! - component access by an index outside the vector's dimension
//! - parsing a rotation order name that is not one of the six Tait-Bryan orders
//! - reading a value from a slice that is too short
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{MathError, Vector3};
//!
//! let v = Vector3::new(1.0, 2.0, 3.0);
//! assert_eq!(v.get_component(1).unwrap(), 2.0);
//!
//! let err = v.get_component(3).unwrap_err();
//! assert!(matches!(err, MathError::ComponentIndex { index: 3, len: 3 }));
//! ```

use thiserror::Error;

/// Result type alias using [`MathError`] as the error type.
pub type Result<T> = std::result::Result<T, MathError>;

/// Hard failures raised by the math kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// Component index outside `0..len`.
    #[error("index is out of range: {index} (expected 0..{len})")]
    ComponentIndex {
        /// Index that was requested
        index: usize,
        /// Number of components of the type
        len: usize,
    },

    /// Rotation order name that is not one of XYZ, XZY, YXZ, YZX, ZXY, ZYX.
    #[error("unknown rotation order: {order}")]
    UnknownRotationOrder {
        /// The rejected name
        order: String,
    },

    /// Slice too short to read or write a value at the given offset.
    #[error("array too short: need {needed} elements at offset {offset}, have {len}")]
    ArrayTooShort {
        /// Number of elements the type occupies
        needed: usize,
        /// Offset the access started at
        offset: usize,
        /// Actual slice length
        len: usize,
    },
}

impl MathError {
    /// Creates a [`MathError::ComponentIndex`] error.
    #[inline]
    pub fn component_index(index: usize, len: usize) -> Self {
        Self::ComponentIndex { index, len }
    }

    /// Creates a [`MathError::UnknownRotationOrder`] error.
    #[inline]
    pub fn unknown_rotation_order(order: impl Into<String>) -> Self {
        Self::UnknownRotationOrder {
            order: order.into(),
        }
    }

    /// Creates a [`MathError::ArrayTooShort`] error.
    #[inline]
    pub fn array_too_short(needed: usize, offset: usize, len: usize) -> Self {
        Self::ArrayTooShort {
            needed,
            offset,
            len,
        }
    }

    /// Returns `true` if this is an index-related error.
    #[inline]
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::ComponentIndex { .. } | Self::ArrayTooShort { .. })
    }
}

/// Checks that `len` elements starting at `offset` fit in a slice of `available` elements.
#[inline]
pub(crate) fn check_slice(needed: usize, offset: usize, available: usize) -> Result<()> {
    match offset.checked_add(needed) {
        Some(end) if end <= available => Ok(()),
        _ => Err(MathError::array_too_short(needed, offset, available)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_index_message() {
        let err = MathError::component_index(5, 3);
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("0..3"));
        assert!(err.is_index_error());
    }

    #[test]
    fn test_unknown_order_message() {
        let err = MathError::unknown_rotation_order("XXY");
        assert!(err.to_string().contains("XXY"));
        assert!(!err.is_index_error());
    }

    #[test]
    fn test_check_slice() {
        assert!(check_slice(3, 0, 3).is_ok());
        assert!(check_slice(3, 1, 4).is_ok());
        assert_eq!(
            check_slice(3, 2, 4),
            Err(MathError::array_too_short(3, 2, 4))
        );
        assert!(check_slice(3, usize::MAX, 4).is_err());
    }
}
