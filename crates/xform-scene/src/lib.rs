//! # xform-scene
//!
//! Scene graph of transformable nodes for the `xform` workspace.
//!
//! - [`Object3D`] - a node: position, rotation (Euler and quaternion kept in
//!   sync), scale, and the matrices derived from them
//! - [`Scene`] - arena that owns nodes and their parent/child links, and
//!   propagates world matrices down the tree
//! - [`Camera`] - a node plus a [`Projection`] ([`OrthographicProjection`],
//!   [`PerspectiveProjection`])
//! - [`Binding`] - change-detecting two-way sync used for the rotation pair
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Euler, RotationOrder, Vector3};
//! use xform_scene::{Object3D, Scene};
//!
//! let mut scene = Scene::new();
//! let body = scene.add_node(Object3D::named("body"));
//! let head = scene.add(Some(body), Object3D::named("head").with_position(Vector3::new(0.0, 2.0, 0.0)))?;
//!
//! scene.get_mut(body).unwrap().set_rotation(Euler::new(0.0, 0.0, std::f64::consts::FRAC_PI_2, RotationOrder::XYZ));
//! let p = scene.world_position(head)?;
//! assert!((p - Vector3::new(-2.0, 0.0, 0.0)).length() < 1e-12);
//! # Ok::<(), xform_scene::SceneError>(())
//! ```
//!
//! # Dependencies
//!
//! - `xform-math` - vectors, matrices, rotations
//! - [`thiserror`] - [`SceneError`]
//! - [`tracing`] - propagation tracing and misuse warnings
//! - [`uuid`] - per-node UUIDs
//!
//! # Used By
//!
//! - `xform-cli` - builds scenes from YAML and prints world matrices

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod binding;
mod camera;
mod error;
mod object3d;
mod scene;

pub use binding::Binding;
pub use camera::{Camera, OrthographicProjection, PerspectiveProjection, Projection, ViewOffset};
pub use error::{Result, SceneError};
pub use object3d::{LookAtMode, NodeId, Object3D};
pub use scene::Scene;
