//! Error types for scene graph operations.
//!
//! Numeric degeneracies never fail (see `xform-math`); what fails here is
//! structural misuse of the tree:
//!
//! - addressing a node that is not in the scene
//! - parenting a node under itself or under one of its descendants
//! - packing matrices into a buffer that is too short
//!
//! # Usage
//!
//! ```rust
//! use xform_scene::{Object3D, Scene, SceneError};
//!
//! let mut scene = Scene::new();
//! let a = scene.add_node(Object3D::new());
//!
//! let err = scene.add_child(a, a).unwrap_err();
//! assert!(matches!(err, SceneError::SelfParent { .. }));
//! ```

use crate::NodeId;
use thiserror::Error;
use xform_math::MathError;

/// Result type alias using [`SceneError`] as the error type.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors raised by [`crate::Scene`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No node with this id is in the scene.
    #[error("node {id} not found in scene")]
    NodeNotFound {
        /// The missing id
        id: NodeId,
    },

    /// Parenting would create a cycle: `parent` is a descendant of `child`.
    #[error("cannot add node {child} under {parent}: {parent} is a descendant of {child}")]
    Cycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// A node cannot be its own parent.
    #[error("node {id} cannot be its own parent")]
    SelfParent {
        /// The node
        id: NodeId,
    },

    /// Error from the math kernel.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl SceneError {
    /// Creates a [`SceneError::NodeNotFound`] error.
    #[inline]
    pub fn not_found(id: NodeId) -> Self {
        Self::NodeNotFound { id }
    }

    /// Returns true for [`SceneError::NodeNotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }

    /// Returns true for parenting errors ([`SceneError::Cycle`] and
    /// [`SceneError::SelfParent`]).
    #[inline]
    pub fn is_hierarchy_error(&self) -> bool {
        matches!(self, Self::Cycle { .. } | Self::SelfParent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let id = NodeId::from_raw(7);
        assert!(SceneError::not_found(id).is_not_found());
        assert!(SceneError::SelfParent { id }.is_hierarchy_error());
        assert!(!SceneError::not_found(id).is_hierarchy_error());
    }

    #[test]
    fn test_math_error_converts() {
        let err: SceneError = MathError::array_too_short(16, 0, 4).into();
        assert!(matches!(err, SceneError::Math(MathError::ArrayTooShort { .. })));
        assert!(err.to_string().contains("array too short"));
    }

    #[test]
    fn test_display_mentions_ids() {
        let err = SceneError::Cycle {
            parent: NodeId::from_raw(3),
            child: NodeId::from_raw(1),
        };
        let msg = err.to_string();
        assert!(msg.contains('3') && msg.contains('1'));
    }
}
