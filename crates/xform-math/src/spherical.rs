//! Spherical coordinates.
//!
//! `phi` is the polar angle measured from the +Y axis and `theta` the
//! azimuth around +Y measured from +Z, matching
//! [`Vector3::from_spherical`].

use crate::interp::clamp;
use crate::Vector3;
use std::f64::consts::PI;

/// Smallest distance of `phi` from either pole after [`Spherical::make_safe`].
const POLE_EPSILON: f64 = 0.000001;

/// A point in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spherical {
    /// Distance from the origin
    pub radius: f64,
    /// Polar angle from +Y, in `[0, π]`
    pub phi: f64,
    /// Azimuth around +Y from +Z
    pub theta: f64,
}

impl Spherical {
    /// Creates spherical coordinates.
    #[inline]
    pub const fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    /// Overwrites all three coordinates.
    #[inline]
    pub fn set(&mut self, radius: f64, phi: f64, theta: f64) -> &mut Self {
        *self = Self::new(radius, phi, theta);
        self
    }

    /// Keeps `phi` strictly away from the poles, where `theta` is undefined.
    pub fn make_safe(self) -> Self {
        Self {
            phi: self.phi.min(PI - POLE_EPSILON).max(POLE_EPSILON),
            ..self
        }
    }

    /// Spherical coordinates of a cartesian point.
    #[inline]
    pub fn from_vector3(v: Vector3) -> Self {
        Self::from_cartesian_coords(v.x, v.y, v.z)
    }

    /// Spherical coordinates of `(x, y, z)`. The origin maps to all zeros.
    pub fn from_cartesian_coords(x: f64, y: f64, z: f64) -> Self {
        let radius = (x * x + y * y + z * z).sqrt();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self::new(radius, clamp(y / radius, -1.0, 1.0).acos(), x.atan2(z))
    }

    /// Cartesian point for these coordinates.
    #[inline]
    pub fn to_vector3(self) -> Vector3 {
        Vector3::from_spherical(self)
    }
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_from_cartesian() {
        let s = Spherical::from_vector3(Vector3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(s.radius, 1.0);
        assert_abs_diff_eq!(s.phi, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(s.theta, FRAC_PI_2, epsilon = 1e-12);

        let up = Spherical::from_cartesian_coords(0.0, 3.0, 0.0);
        assert_eq!(up.phi, 0.0);
        assert_eq!(up.radius, 3.0);
    }

    #[test]
    fn test_origin() {
        assert_eq!(Spherical::from_vector3(Vector3::ZERO), Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_round_trip() {
        let v = Vector3::new(-2.0, 1.5, 0.5);
        assert_abs_diff_eq!(Spherical::from_vector3(v).to_vector3(), v, epsilon = 1e-12);
    }

    #[test]
    fn test_make_safe() {
        assert_eq!(Spherical::new(1.0, 0.0, 0.0).make_safe().phi, POLE_EPSILON);
        assert_eq!(Spherical::new(1.0, PI, 0.0).make_safe().phi, PI - POLE_EPSILON);
        assert_eq!(Spherical::new(1.0, 1.0, 0.5).make_safe(), Spherical::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn test_set() {
        let mut s = Spherical::default();
        s.set(2.0, 0.5, 0.25);
        assert_eq!(s, Spherical::new(2.0, 0.5, 0.25));
    }
}
