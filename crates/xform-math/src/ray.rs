//! Rays for picking and proximity queries.
//!
//! A ray starts at `origin` and extends along `direction`, which is expected
//! to be unit length. Distances and parameters `t` are measured in units of
//! `direction`.

use crate::{Matrix4, Sphere, Vector3};

/// A half-line from `origin` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// Start point
    pub origin: Vector3,
    /// Unit direction
    pub direction: Vector3,
}

/// Result of [`Ray::distance_sq_to_segment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance {
    /// Squared distance between the closest points
    pub distance_sq: f64,
    /// Closest point on the ray
    pub point_on_ray: Vector3,
    /// Closest point on the segment
    pub point_on_segment: Vector3,
}

impl Ray {
    /// Creates a ray. `direction` is used as given.
    #[inline]
    pub const fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Vector3 {
        self.origin.add_scaled_vector(self.direction, t)
    }

    /// Points the ray at `target`.
    #[inline]
    pub fn look_at(self, target: Vector3) -> Self {
        Self::new(self.origin, (target - self.origin).normalize())
    }

    /// Moves the origin to the point at `t`.
    #[inline]
    pub fn recast(self, t: f64) -> Self {
        Self::new(self.at(t), self.direction)
    }

    /// Closest point on the ray to `point`. Points behind the origin map to
    /// the origin.
    pub fn closest_point_to_point(&self, point: Vector3) -> Vector3 {
        let t = (point - self.origin).dot(self.direction);
        if t < 0.0 {
            return self.origin;
        }
        self.at(t)
    }

    /// Distance from the ray to `point`.
    #[inline]
    pub fn distance_to_point(&self, point: Vector3) -> f64 {
        self.distance_sq_to_point(point).sqrt()
    }

    /// Squared distance from the ray to `point`.
    #[inline]
    pub fn distance_sq_to_point(&self, point: Vector3) -> f64 {
        self.closest_point_to_point(point).distance_to_squared(point)
    }

    /// Squared distance between the ray and the segment `v0..v1`, with the
    /// closest point on each.
    pub fn distance_sq_to_segment(&self, v0: Vector3, v1: Vector3) -> SegmentDistance {
        let seg_center = (v0 + v1) * 0.5;
        let seg_dir = (v1 - v0).normalize();
        let diff = self.origin - seg_center;

        let seg_extent = v0.distance_to(v1) * 0.5;
        let a01 = -self.direction.dot(seg_dir);
        let b0 = diff.dot(self.direction);
        let b1 = -diff.dot(seg_dir);
        let c = diff.length_squared();
        let det = (1.0 - a01 * a01).abs();

        // s0 runs along the ray, s1 along the segment from its center.
        let (s0, s1, distance_sq) = if det > 0.0 {
            let mut s0 = a01 * b1 - b0;
            let mut s1 = a01 * b0 - b1;
            let ext_det = seg_extent * det;

            if s0 >= 0.0 {
                if s1 >= -ext_det {
                    if s1 <= ext_det {
                        // Interior of both.
                        let inv_det = 1.0 / det;
                        s0 *= inv_det;
                        s1 *= inv_det;
                        let d = s0 * (s0 + a01 * s1 + 2.0 * b0) + s1 * (a01 * s0 + s1 + 2.0 * b1) + c;
                        (s0, s1, d)
                    } else {
                        let s1 = seg_extent;
                        let s0 = (-(a01 * s1 + b0)).max(0.0);
                        (s0, s1, -s0 * s0 + s1 * (s1 + 2.0 * b1) + c)
                    }
                } else {
                    let s1 = -seg_extent;
                    let s0 = (-(a01 * s1 + b0)).max(0.0);
                    (s0, s1, -s0 * s0 + s1 * (s1 + 2.0 * b1) + c)
                }
            } else if s1 <= -ext_det {
                let s0 = (-(-a01 * seg_extent + b0)).max(0.0);
                let s1 = if s0 > 0.0 { -seg_extent } else { (-b1).clamp(-seg_extent, seg_extent) };
                (s0, s1, -s0 * s0 + s1 * (s1 + 2.0 * b1) + c)
            } else if s1 <= ext_det {
                let s1 = (-b1).clamp(-seg_extent, seg_extent);
                (0.0, s1, s1 * (s1 + 2.0 * b1) + c)
            } else {
                let s0 = (-(a01 * seg_extent + b0)).max(0.0);
                let s1 = if s0 > 0.0 { seg_extent } else { (-b1).clamp(-seg_extent, seg_extent) };
                (s0, s1, -s0 * s0 + s1 * (s1 + 2.0 * b1) + c)
            }
        } else {
            // Parallel.
            let s1 = if a01 > 0.0 { -seg_extent } else { seg_extent };
            let s0 = (-(a01 * s1 + b0)).max(0.0);
            (s0, s1, -s0 * s0 + s1 * (s1 + 2.0 * b1) + c)
        };

        SegmentDistance {
            distance_sq,
            point_on_ray: self.at(s0),
            point_on_segment: seg_center.add_scaled_vector(seg_dir, s1),
        }
    }

    /// First point where the ray meets `sphere`, or `None` on a miss.
    ///
    /// From inside the sphere this is the exit point. A sphere entirely
    /// behind the origin is a miss.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<Vector3> {
        let to_center = sphere.center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.dot(to_center) - tca * tca;
        let radius2 = sphere.radius * sphere.radius;

        if d2 > radius2 {
            return None;
        }

        let thc = (radius2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        if t1 < 0.0 {
            return None;
        }
        Some(self.at(if t0 < 0.0 { t1 } else { t0 }))
    }

    /// Returns true if the ray meets `sphere`.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.distance_sq_to_point(sphere.center) <= sphere.radius * sphere.radius
    }

    /// Transforms origin as a point and direction as a direction.
    pub fn apply_matrix4(self, m: &Matrix4) -> Self {
        Self::new(self.origin.apply_matrix4(m), self.direction.transform_direction(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn along_z(z: f64) -> Ray {
        Ray::new(Vector3::new(0.0, 0.0, z), Vector3::Z)
    }

    #[test]
    fn test_at_and_recast() {
        let ray = Ray::new(Vector3::X, Vector3::X);
        assert_eq!(ray.at(2.0), Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vector3::ZERO);

        let moved = ray.recast(4.0);
        assert_eq!(moved.origin, Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.direction, Vector3::X);
    }

    #[test]
    fn test_look_at_normalizes() {
        let ray = Ray::new(Vector3::new(1.0, 1.0, 0.0), Vector3::X).look_at(Vector3::new(1.0, 5.0, 0.0));
        assert_eq!(ray.direction, Vector3::Y);
    }

    #[test]
    fn test_closest_point() {
        let ray = Ray::new(Vector3::ZERO, Vector3::X);
        assert_eq!(ray.closest_point_to_point(Vector3::new(5.0, 3.0, 0.0)), Vector3::new(5.0, 0.0, 0.0));
        // Behind the origin.
        assert_eq!(ray.closest_point_to_point(Vector3::new(-4.0, 3.0, 0.0)), Vector3::ZERO);

        assert_eq!(ray.distance_to_point(Vector3::new(5.0, 3.0, 0.0)), 3.0);
        assert_eq!(ray.distance_to_point(Vector3::new(-4.0, 3.0, 0.0)), 5.0);
        assert_eq!(ray.distance_sq_to_point(Vector3::new(2.0, 0.0, 2.0)), 4.0);
    }

    #[test]
    fn test_intersect_sphere_hit() {
        let sphere = Sphere::new(Vector3::ZERO, 2.0);
        let hit = along_z(-10.0).intersect_sphere(&sphere);
        assert_eq!(hit, Some(Vector3::new(0.0, 0.0, -2.0)));
        assert!(along_z(-10.0).intersects_sphere(&sphere));
    }

    #[test]
    fn test_intersect_sphere_miss() {
        let off_axis = Sphere::new(Vector3::new(5.0, 0.0, 0.0), 1.0);
        assert_eq!(along_z(0.0).intersect_sphere(&off_axis), None);
        assert!(!along_z(0.0).intersects_sphere(&off_axis));

        let behind = Sphere::new(Vector3::new(0.0, 0.0, -5.0), 1.0);
        assert_eq!(along_z(0.0).intersect_sphere(&behind), None);
    }

    #[test]
    fn test_intersect_sphere_from_inside() {
        let sphere = Sphere::new(Vector3::ZERO, 2.0);
        let exit = along_z(0.0).intersect_sphere(&sphere);
        assert_eq!(exit, Some(Vector3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_distance_to_segment() {
        let ray = Ray::new(Vector3::ZERO, Vector3::X);
        let d = ray.distance_sq_to_segment(Vector3::new(2.0, 1.0, 0.0), Vector3::new(2.0, 3.0, 0.0));
        assert_abs_diff_eq!(d.distance_sq, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.point_on_ray, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(d.point_on_segment, Vector3::new(2.0, 1.0, 0.0), epsilon = 1e-12);

        // Crossing segment above the ray.
        let d = ray.distance_sq_to_segment(Vector3::new(3.0, 2.0, -1.0), Vector3::new(3.0, 2.0, 1.0));
        assert_abs_diff_eq!(d.distance_sq, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.point_on_ray, Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(d.point_on_segment, Vector3::new(3.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to_parallel_segment() {
        let ray = Ray::new(Vector3::ZERO, Vector3::X);
        let d = ray.distance_sq_to_segment(Vector3::new(1.0, 1.0, 0.0), Vector3::new(4.0, 1.0, 0.0));
        assert_abs_diff_eq!(d.distance_sq, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_matrix4() {
        let m = Matrix4::make_translation(1.0, 0.0, 0.0).multiply(&Matrix4::make_rotation_y(FRAC_PI_2));
        let ray = along_z(0.0).apply_matrix4(&m);
        assert_abs_diff_eq!(ray.origin, Vector3::X, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction, Vector3::X, epsilon = 1e-12);
    }
}
