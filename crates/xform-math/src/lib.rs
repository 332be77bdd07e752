//! # xform-math
//!
//! Affine transform math for scene graphs.
//!
//! This crate provides the value types a transform hierarchy is built from:
//!
//! - [`Vector2`], [`Vector3`] - points, directions, UVs
//! - [`Matrix3`], [`Matrix4`] - linear and affine transforms
//! - [`Quaternion`] - unit rotations, slerp
//! - [`Euler`] with [`RotationOrder`] - human-readable rotations
//! - [`Spherical`] - polar coordinates
//! - [`Ray`], [`Sphere`] - picking and bounding volume queries
//! - Scalar helpers (lerp, smoothstep, clamp, angle conversion)
//!
//! # Design
//!
//! Every type is a small `Copy` value in `f64`. Operations return new values
//! rather than mutating through shared temporaries. Matrices are stored
//! **column-major** and multiply **column vectors**:
//!
//! ```text
//! world = parent_world * local
//! p'    = world * p
//! ```
//!
//! Degenerate input never fails: inverting a singular matrix yields the zero
//! matrix, normalizing a zero vector yields zero, and a zero quaternion
//! normalizes to the identity. The only errors ([`MathError`]) are bad
//! component indices, unknown rotation order names and short slices.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Euler, Matrix4, Quaternion, RotationOrder, Vector3};
//!
//! let rotation = Euler::new(0.0, std::f64::consts::FRAC_PI_2, 0.0, RotationOrder::XYZ);
//! let local = Matrix4::compose(
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Quaternion::from_euler(rotation),
//!     Vector3::ONE,
//! );
//! let world = Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0)).multiply(&local);
//!
//! let p = world * Vector3::X;
//! assert!((p - Vector3::new(5.0, 1.0, -1.0)).length() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `From` conversions for DVec3/DQuat/DMat3/DMat4
//! - [`approx`] - approximate comparison of every vector, matrix and quaternion
//! - `serde` (optional feature) - serialization of all value types
//!
//! # Used By
//!
//! - `xform-scene` - node transforms and world matrix propagation
//! - `xform-cli` - scene evaluation and compose/decompose commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod approx_impl;
mod error;
mod euler;
mod interp;
mod matrix3;
mod matrix4;
mod quaternion;
mod ray;
mod sphere;
mod spherical;
mod vector2;
mod vector3;

pub use error::*;
pub use euler::*;
pub use interp::*;
pub use matrix3::*;
pub use matrix4::*;
pub use quaternion::*;
pub use ray::*;
pub use sphere::*;
pub use spherical::*;
pub use vector2::*;
pub use vector3::*;

/// Re-export glam types used by the `From` conversions
pub mod glam {
    pub use ::glam::{DMat3, DMat4, DQuat, DVec3};
}
