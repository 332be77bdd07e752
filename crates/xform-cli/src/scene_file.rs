//! YAML scene description files.
//!
//! A scene file is a list of root nodes, each with an optional subtree:
//!
//! ```yaml
//! nodes:
//!   - name: arm
//!     position: [1, 0, 0]
//!     rotation: { x: 0, y: 1.5708, z: 0, order: XYZ }
//!     children:
//!       - name: hand
//!         position: [0, 2, 0]
//!         quaternion: [0, 0, 0, 1]
//!         scale: [0.5, 0.5, 0.5]
//! ```
//!
//! Angles are radians. Every field except `name` has a default; a node may
//! give `rotation` or `quaternion` but not both.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use xform_math::{Euler, Quaternion, Vector3};
use xform_scene::{NodeId, Object3D, Scene, SceneError};

/// Errors loading a scene file.
#[derive(Debug, Error)]
pub enum SceneFileError {
    /// File does not exist.
    #[error("scene file not found: {path}")]
    NotFound {
        /// Requested path
        path: PathBuf,
    },

    /// Read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML or unknown fields.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Both `rotation` and `quaternion` given.
    #[error("node '{node}' sets both rotation and quaternion")]
    ConflictingRotation {
        /// Node name
        node: String,
    },

    /// Scene construction failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for scene file operations.
pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Parsed scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Root nodes
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

/// One node and its subtree.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: Option<Euler>,
    /// `[x, y, z, w]`
    #[serde(default)]
    pub quaternion: Option<[f64; 4]>,
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default = "yes")]
    pub matrix_auto_update: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn unit_scale() -> [f64; 3] {
    [1.0; 3]
}

fn yes() -> bool {
    true
}

impl SceneFile {
    /// Loads a scene file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SceneFileResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SceneFileError::NotFound { path: path.to_path_buf() });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses a scene file from YAML text.
    pub fn from_yaml_str(yaml: &str) -> SceneFileResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Total number of nodes, children included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&NodeSpec> = self.nodes.iter().collect();
        while let Some(spec) = stack.pop() {
            count += 1;
            stack.extend(spec.children.iter());
        }
        count
    }

    /// Builds a scene. Returns it with the root ids in file order.
    pub fn build(&self) -> SceneFileResult<(Scene, Vec<NodeId>)> {
        let mut scene = Scene::new();
        let mut roots = Vec::with_capacity(self.nodes.len());
        for spec in &self.nodes {
            roots.push(spec.add_to(&mut scene, None)?);
        }
        debug!(nodes = scene.len(), roots = roots.len(), "scene built");
        Ok((scene, roots))
    }
}

impl NodeSpec {
    /// Node with this spec's transform and flags, no children.
    pub fn to_object(&self) -> SceneFileResult<Object3D> {
        let mut node = Object3D::named(self.name.clone())
            .with_position(Vector3::from_array(self.position))
            .with_scale(Vector3::from_array(self.scale));

        match (self.rotation, self.quaternion) {
            (Some(_), Some(_)) => {
                return Err(SceneFileError::ConflictingRotation { node: self.name.clone() });
            }
            (Some(euler), None) => {
                node.set_rotation(euler);
            }
            (None, Some(q)) => {
                node.set_quaternion(Quaternion::from_array(q).normalize());
            }
            (None, None) => {}
        }

        node.visible = self.visible;
        node.matrix_auto_update = self.matrix_auto_update;
        if !self.matrix_auto_update {
            node.update_matrix();
        }
        Ok(node)
    }

    fn add_to(&self, scene: &mut Scene, parent: Option<NodeId>) -> SceneFileResult<NodeId> {
        let id = scene.add(parent, self.to_object()?)?;
        for child in &self.children {
            child.add_to(scene, Some(id))?;
        }
        Ok(id)
    }
}
