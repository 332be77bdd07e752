//! Bounding spheres.

use crate::{Matrix4, Vector3};

/// A sphere given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// Center point
    pub center: Vector3,
    /// Radius; negative marks an empty sphere
    pub radius: f64,
}

impl Sphere {
    /// Creates a sphere.
    #[inline]
    pub const fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Returns true if the radius is negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Returns true if `point` is inside or on the surface.
    #[inline]
    pub fn contains_point(&self, point: Vector3) -> bool {
        point.distance_to_squared(self.center) <= self.radius * self.radius
    }

    /// Signed distance from the surface; negative inside.
    #[inline]
    pub fn distance_to_point(&self, point: Vector3) -> f64 {
        point.distance_to(self.center) - self.radius
    }

    /// Moves the center by `offset`.
    #[inline]
    pub fn translate(self, offset: Vector3) -> Self {
        Self::new(self.center + offset, self.radius)
    }

    /// Transforms the sphere by an affine matrix.
    ///
    /// The radius grows by the largest axis scale, so the result bounds the
    /// transformed sphere even under non-uniform scale.
    pub fn apply_matrix4(self, m: &Matrix4) -> Self {
        Self::new(self.center.apply_matrix4(m), self.radius * m.max_scale_on_axis())
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vector3::ZERO, 0.0)
    }
}
