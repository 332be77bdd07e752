//! 3D vector type for points and directions.
//!
//! [`Vector3`] is a plain `Copy` value: every operation returns a new vector
//! instead of mutating in place, so intermediate values live on the stack of
//! the caller and no temporary is ever shared between calls.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Quaternion, Vector3};
//!
//! let p = Vector3::new(1.0, 2.0, 3.0);
//! let moved = p + Vector3::X * 2.0;
//! assert_eq!(moved, Vector3::new(3.0, 2.0, 3.0));
//!
//! // Rotate a direction by 90 degrees around Y
//! let q = Quaternion::from_axis_angle(Vector3::Y, std::f64::consts::FRAC_PI_2);
//! let d = Vector3::X.apply_quaternion(q);
//! assert!((d - Vector3::new(0.0, 0.0, -1.0)).length() < 1e-12);
//! ```

use crate::error::{check_slice, MathError, Result};
use crate::{Euler, Matrix3, Matrix4, Quaternion, Spherical};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 3-component vector used for positions, directions and scale factors.
///
/// # Components
///
/// Access via `.x`, `.y`, `.z`, by `[0]`, `[1]`, `[2]` (panics when out of
/// range), or through [`Vector3::get_component`] which reports a bad index
/// as an error instead.
///
/// # Example
///
/// ```rust
/// use xform_math::Vector3;
///
/// let v = Vector3::new(3.0, 4.0, 0.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v[1], 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// One vector (1, 1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit X vector (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Number of components.
    pub const LEN: usize = 3;

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Overwrites all three components.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Sets all components to `scalar`.
    #[inline]
    pub fn set_scalar(&mut self, scalar: f64) -> &mut Self {
        self.set(scalar, scalar, scalar)
    }

    /// Sets the x component.
    #[inline]
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.x = x;
        self
    }

    /// Sets the y component.
    #[inline]
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.y = y;
        self
    }

    /// Sets the z component.
    #[inline]
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        self.z = z;
        self
    }

    /// Sets the component at `index` (0 = x, 1 = y, 2 = z).
    ///
    /// # Errors
    ///
    /// [`MathError::ComponentIndex`] if `index > 2`.
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(MathError::component_index(index, Self::LEN)),
        }
        Ok(())
    }

    /// Returns the component at `index` (0 = x, 1 = y, 2 = z).
    ///
    /// # Errors
    ///
    /// [`MathError::ComponentIndex`] if `index > 2`.
    pub fn get_component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::component_index(index, Self::LEN)),
        }
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Reads three values from `array` starting at `offset`.
    pub fn from_slice(array: &[f64], offset: usize) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        Ok(Self::new(array[offset], array[offset + 1], array[offset + 2]))
    }

    /// Writes the three components into `array` starting at `offset`.
    pub fn write_to_slice(self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset] = self.x;
        array[offset + 1] = self.y;
        array[offset + 2] = self.z;
        Ok(())
    }

    /// Adds `s` to every component.
    #[inline]
    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s, self.z + s)
    }

    /// Returns `self + v * s`.
    #[inline]
    pub fn add_scaled_vector(self, v: Self, s: f64) -> Self {
        Self::new(self.x + v.x * s, self.y + v.y * s, self.z + v.z * s)
    }

    /// Subtracts `s` from every component.
    #[inline]
    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s, self.z - s)
    }

    /// Flips the sign of every component.
    #[inline]
    pub fn negate(self) -> Self {
        -self
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Sum of absolute components.
    #[inline]
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Normalizes the vector to unit length.
    ///
    /// A zero-length vector stays zero: callers that need a direction must
    /// guard against it themselves.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        self / if len == 0.0 { 1.0 } else { len }
    }

    /// Rescales the vector to `length`, keeping its direction.
    #[inline]
    pub fn set_length(self, length: f64) -> Self {
        self.normalize() * length
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamps each component to `[min, max]` of the matching component.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Clamps each component to `[min, max]`.
    #[inline]
    pub fn clamp_scalar(self, min: f64, max: f64) -> Self {
        self.clamp(Self::splat(min), Self::splat(max))
    }

    /// Clamps the length to `[min, max]`, keeping direction.
    pub fn clamp_length(self, min: f64, max: f64) -> Self {
        let len = self.length();
        (self / if len == 0.0 { 1.0 } else { len }) * len.max(min).min(max)
    }

    /// Component-wise floor.
    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Component-wise ceiling.
    #[inline]
    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil(), self.z.ceil())
    }

    /// Component-wise rounding (half away from zero).
    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.z.round())
    }

    /// Component-wise truncation towards zero.
    #[inline]
    pub fn round_to_zero(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc(), self.z.trunc())
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Linear interpolation: `self + (target - self) * t`.
    #[inline]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }

    /// Linear interpolation between two vectors.
    #[inline]
    pub fn lerp_vectors(a: Self, b: Self, t: f64) -> Self {
        a.lerp(b, t)
    }

    /// Projects this vector onto `v`. Projecting onto a zero vector gives zero.
    pub fn project_on_vector(self, v: Self) -> Self {
        let denominator = v.length_squared();
        if denominator == 0.0 {
            return Self::ZERO;
        }
        v * (v.dot(self) / denominator)
    }

    /// Projects this vector onto the plane with the given normal.
    #[inline]
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project_on_vector(plane_normal)
    }

    /// Reflects off a plane orthogonal to `normal` (which must be unit length).
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Angle between two vectors in radians.
    ///
    /// Returns `π/2` when either vector has zero length.
    pub fn angle_to(self, v: Self) -> f64 {
        let denominator = (self.length_squared() * v.length_squared()).sqrt();
        if denominator == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }
        let theta = self.dot(v) / denominator;
        theta.clamp(-1.0, 1.0).acos()
    }

    /// Euclidean distance to `v`.
    #[inline]
    pub fn distance_to(self, v: Self) -> f64 {
        self.distance_to_squared(v).sqrt()
    }

    /// Squared distance to `v`.
    #[inline]
    pub fn distance_to_squared(self, v: Self) -> f64 {
        (self - v).length_squared()
    }

    /// Manhattan distance to `v`.
    #[inline]
    pub fn manhattan_distance_to(self, v: Self) -> f64 {
        (self - v).manhattan_length()
    }

    /// Rotates by an Euler rotation.
    #[inline]
    pub fn apply_euler(self, euler: Euler) -> Self {
        self.apply_quaternion(Quaternion::from_euler(euler))
    }

    /// Rotates by `angle` radians around the normalized `axis`.
    #[inline]
    pub fn apply_axis_angle(self, axis: Self, angle: f64) -> Self {
        self.apply_quaternion(Quaternion::from_axis_angle(axis, angle))
    }

    /// Multiplies by a 3x3 matrix.
    pub fn apply_matrix3(self, m: &Matrix3) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[3] * self.y + e[6] * self.z,
            e[1] * self.x + e[4] * self.y + e[7] * self.z,
            e[2] * self.x + e[5] * self.y + e[8] * self.z,
        )
    }

    /// Transforms a normal by a normal matrix and renormalizes.
    #[inline]
    pub fn apply_normal_matrix(self, m: &Matrix3) -> Self {
        self.apply_matrix3(m).normalize()
    }

    /// Transforms this point by a 4x4 matrix, including the perspective divide.
    pub fn apply_matrix4(self, m: &Matrix4) -> Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        let w = 1.0 / (e[3] * x + e[7] * y + e[11] * z + e[15]);
        Self::new(
            (e[0] * x + e[4] * y + e[8] * z + e[12]) * w,
            (e[1] * x + e[5] * y + e[9] * z + e[13]) * w,
            (e[2] * x + e[6] * y + e[10] * z + e[14]) * w,
        )
    }

    /// Rotates by a quaternion.
    pub fn apply_quaternion(self, q: Quaternion) -> Self {
        let (vx, vy, vz) = (self.x, self.y, self.z);
        let (qx, qy, qz, qw) = (q.x, q.y, q.z, q.w);

        // t = 2 * cross(q.xyz, v)
        let tx = 2.0 * (qy * vz - qz * vy);
        let ty = 2.0 * (qz * vx - qx * vz);
        let tz = 2.0 * (qx * vy - qy * vx);

        // v + q.w * t + cross(q.xyz, t)
        Self::new(
            vx + qw * tx + qy * tz - qz * ty,
            vy + qw * ty + qz * tx - qx * tz,
            vz + qw * tz + qx * ty - qy * tx,
        )
    }

    /// Transforms a direction by the upper 3x3 of `m` and normalizes.
    ///
    /// Translation is ignored.
    pub fn transform_direction(self, m: &Matrix4) -> Self {
        let e = &m.elements;
        let (x, y, z) = (self.x, self.y, self.z);
        Self::new(
            e[0] * x + e[4] * y + e[8] * z,
            e[1] * x + e[5] * y + e[9] * z,
            e[2] * x + e[6] * y + e[10] * z,
        )
        .normalize()
    }

    /// Cartesian coordinates of a spherical coordinate.
    #[inline]
    pub fn from_spherical(s: Spherical) -> Self {
        Self::from_spherical_coords(s.radius, s.phi, s.theta)
    }

    /// Cartesian coordinates from radius, polar angle `phi` (from +Y) and
    /// azimuth `theta` (around +Y, from +Z).
    pub fn from_spherical_coords(radius: f64, phi: f64, theta: f64) -> Self {
        let sin_phi_radius = phi.sin() * radius;
        Self::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        )
    }

    /// Translation column of a 4x4 matrix.
    #[inline]
    pub fn from_matrix_position(m: &Matrix4) -> Self {
        Self::new(m.elements[12], m.elements[13], m.elements[14])
    }

    /// Lengths of the three basis columns of a 4x4 matrix.
    pub fn from_matrix_scale(m: &Matrix4) -> Self {
        Self::new(
            Self::from_matrix_column(m, 0).length(),
            Self::from_matrix_column(m, 1).length(),
            Self::from_matrix_column(m, 2).length(),
        )
    }

    /// First three entries of column `index` of a 4x4 matrix.
    ///
    /// # Panics
    ///
    /// If `index > 3`.
    #[inline]
    pub fn from_matrix_column(m: &Matrix4, index: usize) -> Self {
        let e = &m.elements[index * 4..index * 4 + 3];
        Self::new(e[0], e[1], e[2])
    }

    /// Column `index` of a 3x3 matrix.
    ///
    /// # Panics
    ///
    /// If `index > 2`.
    #[inline]
    pub fn from_matrix3_column(m: &Matrix3, index: usize) -> Self {
        let e = &m.elements[index * 3..index * 3 + 3];
        Self::new(e[0], e[1], e[2])
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns true if any component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Exact component-wise equality.
    #[inline]
    pub fn equals(self, v: Self) -> bool {
        self == v
    }

    /// Iterates over `x, y, z` in order.
    #[inline]
    pub fn iter(self) -> std::array::IntoIter<f64, 3> {
        self.to_array().into_iter()
    }

    /// Converts to glam DVec3.
    #[inline]
    pub fn to_glam(self) -> glam::DVec3 {
        glam::DVec3::new(self.x, self.y, self.z)
    }

    /// Creates from glam DVec3.
    #[inline]
    pub fn from_glam(v: glam::DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index out of bounds: {}", i),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Component-wise
impl Mul for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

// Component-wise
impl Div for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vector3 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl IntoIterator for Vector3 {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 3>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3> for [f64; 3] {
    #[inline]
    fn from(v: Vector3) -> [f64; 3] {
        v.to_array()
    }
}

impl From<glam::DVec3> for Vector3 {
    #[inline]
    fn from(v: glam::DVec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vector3> for glam::DVec3 {
    #[inline]
    fn from(v: Vector3) -> glam::DVec3 {
        v.to_glam()
    }
}

crate::approx_impl::impl_approx_fields!(Vector3, x, y, z);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vector3_new() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(Vector3::default(), Vector3::ZERO);
    }

    #[test]
    fn test_vector3_components() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get_component(2).unwrap(), 3.0);
        v.set_component(0, 9.0).unwrap();
        assert_eq!(v.x, 9.0);
    }

    #[test]
    fn test_vector3_component_out_of_range() {
        let mut v = Vector3::ZERO;
        assert_eq!(
            v.get_component(3),
            Err(MathError::ComponentIndex { index: 3, len: 3 })
        );
        assert!(v.set_component(7, 1.0).is_err());
        assert_eq!(v, Vector3::ZERO);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: 3")]
    fn test_vector3_index_panics() {
        let v = Vector3::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_vector3_dot_cross() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    }

    #[test]
    fn test_vector3_normalize_zero() {
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
        assert_eq!(Vector3::new(0.0, 3.0, 4.0).normalize(), Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_vector3_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));

        let mut c = a;
        c += b;
        c -= a;
        c *= 2.0;
        assert_eq!(c, Vector3::new(8.0, 10.0, 12.0));
    }

    #[test]
    fn test_vector3_clamp() {
        let v = Vector3::new(-0.5, 0.5, 1.5);
        assert_eq!(v.clamp_scalar(0.0, 1.0), Vector3::new(0.0, 0.5, 1.0));
        assert_eq!(
            v.clamp(Vector3::new(0.0, 0.6, 0.0), Vector3::ONE),
            Vector3::new(0.0, 0.6, 1.0)
        );
        assert_abs_diff_eq!(Vector3::new(10.0, 0.0, 0.0).clamp_length(1.0, 2.0).length(), 2.0);
        assert_eq!(Vector3::ZERO.clamp_length(1.0, 2.0), Vector3::ZERO);
    }

    #[test]
    fn test_vector3_lerp() {
        let a = Vector3::ZERO;
        let b = Vector3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.5), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_vector3_rounding() {
        let v = Vector3::new(-1.5, 0.4, 2.6);
        assert_eq!(v.floor(), Vector3::new(-2.0, 0.0, 2.0));
        assert_eq!(v.ceil(), Vector3::new(-1.0, 1.0, 3.0));
        assert_eq!(v.round_to_zero(), Vector3::new(-1.0, 0.0, 2.0));
    }

    #[test]
    fn test_vector3_projection() {
        let v = Vector3::new(1.0, 1.0, 0.0);
        assert_eq!(v.project_on_vector(Vector3::X * 5.0), Vector3::X);
        assert_eq!(v.project_on_vector(Vector3::ZERO), Vector3::ZERO);
        assert_eq!(v.project_on_plane(Vector3::Y), Vector3::X);
        assert_eq!(v.reflect(Vector3::Y), Vector3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn test_vector3_angle_to() {
        assert_abs_diff_eq!(Vector3::X.angle_to(Vector3::Y), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(Vector3::X.angle_to(-Vector3::X), PI, epsilon = 1e-12);
        assert_eq!(Vector3::ZERO.angle_to(Vector3::X), FRAC_PI_2);
    }

    #[test]
    fn test_vector3_distance() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = Vector3::new(4.0, 5.0, 1.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.distance_to_squared(b), 25.0);
        assert_eq!(a.manhattan_distance_to(b), 7.0);
    }

    #[test]
    fn test_vector3_apply_quaternion() {
        let q = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
        assert_abs_diff_eq!(Vector3::X.apply_quaternion(q), Vector3::Y, epsilon = 1e-12);
        assert_abs_diff_eq!(
            Vector3::X.apply_axis_angle(Vector3::Z, FRAC_PI_2),
            Vector3::Y,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_vector3_apply_matrix4() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3::ONE.apply_matrix4(&m), Vector3::new(2.0, 3.0, 4.0));
        // Directions ignore translation
        assert_eq!(Vector3::X.transform_direction(&m), Vector3::X);
    }

    #[test]
    fn test_vector3_spherical() {
        let v = Vector3::from_spherical_coords(2.0, FRAC_PI_2, 0.0);
        assert_abs_diff_eq!(v, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_vector3_matrix_extraction() {
        let m = Matrix4::from_scale(Vector3::new(2.0, 3.0, 4.0))
            .premultiply(&Matrix4::from_translation(Vector3::new(5.0, 6.0, 7.0)));
        assert_eq!(Vector3::from_matrix_position(&m), Vector3::new(5.0, 6.0, 7.0));
        assert_eq!(Vector3::from_matrix_scale(&m), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(Vector3::from_matrix_column(&m, 1), Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_vector3_slice() {
        let mut out = [0.0; 5];
        Vector3::new(1.0, 2.0, 3.0).write_to_slice(&mut out, 2).unwrap();
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(Vector3::from_slice(&out, 2).unwrap(), Vector3::new(1.0, 2.0, 3.0));
        assert!(Vector3::from_slice(&out, 3).is_err());
    }

    #[test]
    fn test_vector3_iteration_is_restartable() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let first: Vec<f64> = v.into_iter().collect();
        let second: Vec<f64> = v.into_iter().collect();
        assert_eq!(first, vec![1.0, 2.0, 3.0]);
        assert_eq!(first, second);
        let [x, y, z]: [f64; 3] = v.into();
        assert_eq!((x, y, z), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vector3_glam_roundtrip() {
        let v = Vector3::new(1.0, -2.0, 3.5);
        let g: glam::DVec3 = v.into();
        assert_eq!(Vector3::from(g), v);
        assert_eq!(v.cross(Vector3::Y).to_glam(), g.cross(glam::DVec3::Y));
    }
}
