//! Quaternion rotations.
//!
//! [`Quaternion`] is the canonical rotation of a scene node: it is what
//! [`crate::Matrix4::compose`] consumes and [`crate::Matrix4::decompose`]
//! produces. Conversions exist from axis-angle, Euler angles (all six
//! Tait-Bryan orders plus the six proper Euler orders) and rotation matrices.
//!
//! Components are stored as `(x, y, z, w)`, which is also the array order.
//! A quaternion is only a rotation when it has unit length; operations that
//! can leave it non-unit say so.

use crate::error::{check_slice, MathError, Result};
use crate::interp::clamp;
use crate::{Euler, Matrix4, RotationOrder, Vector3};
use std::fmt;
use std::ops::{Mul, MulAssign, Neg};
use std::str::FromStr;
use tracing::debug;

/// A quaternion `x*i + y*j + z*k + w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quaternion {
    /// X (i) component
    pub x: f64,
    /// Y (j) component
    pub y: f64,
    /// Z (k) component
    pub z: f64,
    /// Scalar component
    pub w: f64,
}

/// Axis sequences for proper Euler angles, where the first and last axis
/// are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum ProperEulerOrder {
    /// X, then Y, then X.
    XYX,
    /// Y, then Z, then Y.
    YZY,
    /// Z, then X, then Z.
    ZXZ,
    /// X, then Z, then X.
    XZX,
    /// Y, then X, then Y.
    YXY,
    /// Z, then Y, then Z.
    ZYZ,
}

impl ProperEulerOrder {
    /// All six orders.
    pub const ALL: [Self; 6] = [Self::XYX, Self::YZY, Self::ZXZ, Self::XZX, Self::YXY, Self::ZYZ];

    /// Name of the order, e.g. `"ZXZ"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XYX => "XYX",
            Self::YZY => "YZY",
            Self::ZXZ => "ZXZ",
            Self::XZX => "XZX",
            Self::YXY => "YXY",
            Self::ZYZ => "ZYZ",
        }
    }
}

impl fmt::Display for ProperEulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProperEulerOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MathError::unknown_rotation_order(s))
    }
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Number of components.
    pub const LEN: usize = 4;

    /// Creates a quaternion from raw components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Overwrites all four components.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        *self = Self::new(x, y, z, w);
        self
    }

    /// Resets to the identity rotation.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Rotation of `angle` radians around the normalized `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Rotation equivalent to an Euler rotation, honoring its order.
    pub fn from_euler(euler: Euler) -> Self {
        let (s1, c1) = (euler.x / 2.0).sin_cos();
        let (s2, c2) = (euler.y / 2.0).sin_cos();
        let (s3, c3) = (euler.z / 2.0).sin_cos();

        match euler.order {
            RotationOrder::XYZ => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::YXZ => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::ZXY => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::ZYX => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::YZX => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::XZY => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        }
    }

    /// Rotation from proper Euler angles `(a, b, c)` applied intrinsically
    /// about the axes named by `order`.
    pub fn from_proper_euler(a: f64, b: f64, c: f64, order: ProperEulerOrder) -> Self {
        let (s2, c2) = (b / 2.0).sin_cos();
        let (s13, c13) = ((a + c) / 2.0).sin_cos();
        let (s1_3, c1_3) = ((a - c) / 2.0).sin_cos();
        let (s3_1, c3_1) = ((c - a) / 2.0).sin_cos();

        match order {
            ProperEulerOrder::XYX => Self::new(c2 * s13, s2 * c1_3, s2 * s1_3, c2 * c13),
            ProperEulerOrder::YZY => Self::new(s2 * s1_3, c2 * s13, s2 * c1_3, c2 * c13),
            ProperEulerOrder::ZXZ => Self::new(s2 * c1_3, s2 * s1_3, c2 * s13, c2 * c13),
            ProperEulerOrder::XZX => Self::new(c2 * s13, s2 * s3_1, s2 * c3_1, c2 * c13),
            ProperEulerOrder::YXY => Self::new(s2 * c3_1, c2 * s13, s2 * s3_1, c2 * c13),
            ProperEulerOrder::ZYZ => Self::new(s2 * s3_1, s2 * c3_1, c2 * s13, c2 * c13),
        }
    }

    /// Rotation held in the upper 3x3 of `m`, which must be unscaled.
    ///
    /// Picks the numerically safest of four formulas: the trace form when
    /// the trace is positive, otherwise the form keyed on the largest
    /// diagonal element.
    pub fn from_rotation_matrix(m: &Matrix4) -> Self {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);
        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Self::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Self::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Self::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }

    /// Shortest rotation taking unit vector `from` to unit vector `to`.
    ///
    /// Opposite vectors have no unique shortest arc; a half turn around an
    /// axis perpendicular to `from` is returned.
    pub fn from_unit_vectors(from: Vector3, to: Vector3) -> Self {
        let r = from.dot(to) + 1.0;

        let q = if r < f64::EPSILON {
            debug!("Quaternion::from_unit_vectors with opposite vectors, picking perpendicular axis");
            if from.x.abs() > from.z.abs() {
                Self::new(-from.y, from.x, 0.0, 0.0)
            } else {
                Self::new(0.0, -from.z, from.y, 0.0)
            }
        } else {
            let axis = from.cross(to);
            Self::new(axis.x, axis.y, axis.z, r)
        };

        q.normalize()
    }

    /// Angle in radians between two rotations.
    #[inline]
    pub fn angle_to(self, q: Self) -> f64 {
        2.0 * clamp(self.dot(q), -1.0, 1.0).abs().acos()
    }

    /// Rotates towards `q` by at most `step` radians.
    pub fn rotate_towards(self, q: Self, step: f64) -> Self {
        let angle = self.angle_to(q);
        if angle == 0.0 {
            return self;
        }
        self.slerp(q, (step / angle).min(1.0))
    }

    /// Inverse rotation. Equal to the conjugate for unit quaternions.
    #[inline]
    pub fn invert(self) -> Self {
        self.conjugate()
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(self, q: Self) -> f64 {
        self.x * q.x + self.y * q.y + self.z * q.z + self.w * q.w
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scales to unit length; a zero quaternion becomes the identity.
    pub fn normalize(self) -> Self {
        let l = self.length();
        if l == 0.0 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / l;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Post-multiplies: returns `self * q`.
    #[inline]
    pub fn multiply(self, q: Self) -> Self {
        Self::multiply_quaternions(self, q)
    }

    /// Pre-multiplies: returns `q * self`.
    #[inline]
    pub fn premultiply(self, q: Self) -> Self {
        Self::multiply_quaternions(q, self)
    }

    /// Hamilton product `a * b`: the rotation `b` followed by `a`.
    pub fn multiply_quaternions(a: Self, b: Self) -> Self {
        let Self { x: ax, y: ay, z: az, w: aw } = a;
        let Self { x: bx, y: by, z: bz, w: bw } = b;

        Self::new(
            ax * bw + aw * bx + ay * bz - az * by,
            ay * bw + aw * by + az * bx - ax * bz,
            az * bw + aw * bz + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Spherical linear interpolation from `self` towards `qb`.
    ///
    /// Always takes the shorter arc. `t == 0` returns `self` and `t == 1`
    /// returns `qb` exactly. Nearly coincident inputs fall back to a
    /// normalized linear blend.
    pub fn slerp(self, qb: Self, t: f64) -> Self {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return qb;
        }

        let mut cos_half_theta = self.dot(qb);
        let target = if cos_half_theta < 0.0 {
            cos_half_theta = -cos_half_theta;
            -qb
        } else {
            qb
        };

        if cos_half_theta >= 1.0 {
            return self;
        }

        let sqr_sin_half_theta = 1.0 - cos_half_theta * cos_half_theta;

        if sqr_sin_half_theta <= f64::EPSILON {
            let s = 1.0 - t;
            return Self::new(
                s * self.x + t * target.x,
                s * self.y + t * target.y,
                s * self.z + t * target.z,
                s * self.w + t * target.w,
            )
            .normalize();
        }

        let sin_half_theta = sqr_sin_half_theta.sqrt();
        let half_theta = sin_half_theta.atan2(cos_half_theta);
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            self.x * ratio_a + target.x * ratio_b,
            self.y * ratio_a + target.y * ratio_b,
            self.z * ratio_a + target.z * ratio_b,
            self.w * ratio_a + target.w * ratio_b,
        )
    }

    /// Slerp between two quaternions.
    #[inline]
    pub fn slerp_quaternions(qa: Self, qb: Self, t: f64) -> Self {
        qa.slerp(qb, t)
    }

    /// Exact component equality.
    #[inline]
    pub fn equals(self, q: Self) -> bool {
        self == q
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Creates from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Converts to `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Reads `x, y, z, w` from `array` at `offset`.
    pub fn from_slice(array: &[f64], offset: usize) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        let a = &array[offset..offset + Self::LEN];
        Ok(Self::new(a[0], a[1], a[2], a[3]))
    }

    /// Writes `x, y, z, w` into `array` at `offset`.
    pub fn write_to_slice(self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset..offset + Self::LEN].copy_from_slice(&self.to_array());
        Ok(())
    }

    /// Converts to glam DQuat.
    #[inline]
    pub fn to_glam(self) -> glam::DQuat {
        glam::DQuat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates from glam DQuat.
    #[inline]
    pub fn from_glam(q: glam::DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs.apply_quaternion(self)
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl Neg for Quaternion {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<[f64; 4]> for Quaternion {
    #[inline]
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<Quaternion> for [f64; 4] {
    #[inline]
    fn from(q: Quaternion) -> [f64; 4] {
        q.to_array()
    }
}

impl From<glam::DQuat> for Quaternion {
    #[inline]
    fn from(q: glam::DQuat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quaternion> for glam::DQuat {
    #[inline]
    fn from(q: Quaternion) -> glam::DQuat {
        q.to_glam()
    }
}

crate::approx_impl::impl_approx_fields!(Quaternion, x, y, z, w);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    /// Equal as rotations: `a == b` or `a == -b`.
    fn same_rotation(a: Quaternion, b: Quaternion) -> bool {
        a.dot(b).abs() > 1.0 - 1e-9
    }

    #[test]
    fn test_axis_angle_matches_glam() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
        let q = Quaternion::from_axis_angle(axis, 1.3);
        let g = glam::DQuat::from_axis_angle(axis.to_glam(), 1.3);
        assert_abs_diff_eq!(q, Quaternion::from(g), epsilon = 1e-12);
    }

    #[test]
    fn test_multiply_matches_glam() {
        let a = Quaternion::from_axis_angle(Vector3::X, 0.4);
        let b = Quaternion::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), -1.1);
        let expected = Quaternion::from(a.to_glam() * b.to_glam());
        assert_abs_diff_eq!(a.multiply(b), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(b.premultiply(a), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(a * b, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_rotates_vector() {
        let q = Quaternion::from_axis_angle(Vector3::Y, FRAC_PI_2);
        assert_abs_diff_eq!(q * Vector3::X, -Vector3::Z, epsilon = 1e-12);
    }

    #[test]
    fn test_from_euler_single_axis() {
        let q = Quaternion::from_euler(Euler::new(FRAC_PI_2, 0.0, 0.0, RotationOrder::XYZ));
        let half = FRAC_PI_4;
        assert_abs_diff_eq!(q, Quaternion::new(half.sin(), 0.0, 0.0, half.cos()), epsilon = 1e-12);
    }

    #[test]
    fn test_from_euler_order_matters() {
        let xyz = Quaternion::from_euler(Euler::new(0.5, 0.5, 0.0, RotationOrder::XYZ));
        let yxz = Quaternion::from_euler(Euler::new(0.5, 0.5, 0.0, RotationOrder::YXZ));
        assert!(!same_rotation(xyz, yxz));

        // XYZ is intrinsic: X first, then Y, then Z.
        let qx = Quaternion::from_axis_angle(Vector3::X, 0.5);
        let qy = Quaternion::from_axis_angle(Vector3::Y, 0.5);
        assert_abs_diff_eq!(xyz, qx * qy, epsilon = 1e-12);
        assert_abs_diff_eq!(yxz, qy * qx, epsilon = 1e-12);
    }

    #[test]
    fn test_from_rotation_matrix_all_branches() {
        let cases = [
            Quaternion::from_axis_angle(Vector3::new(0.3, 0.4, 0.5).normalize(), 0.8),
            Quaternion::from_axis_angle(Vector3::X, PI),
            Quaternion::from_axis_angle(Vector3::Y, PI),
            Quaternion::from_axis_angle(Vector3::Z, PI),
            Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0).normalize(), 3.0),
        ];
        for q in cases {
            let m = Matrix4::make_rotation_from_quaternion(q);
            let back = Quaternion::from_rotation_matrix(&m);
            assert!(same_rotation(back, q), "{back:?} vs {q:?}");
        }
    }

    #[test]
    fn test_from_unit_vectors() {
        let q = Quaternion::from_unit_vectors(Vector3::X, Vector3::Y);
        assert_abs_diff_eq!(q * Vector3::X, Vector3::Y, epsilon = 1e-12);

        let flip = Quaternion::from_unit_vectors(Vector3::X, -Vector3::X);
        assert_abs_diff_eq!(flip.length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(flip * Vector3::X, -Vector3::X, epsilon = 1e-12);

        let flip_z = Quaternion::from_unit_vectors(Vector3::Z, -Vector3::Z);
        assert_abs_diff_eq!(flip_z * Vector3::Z, -Vector3::Z, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_identity() {
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(), Quaternion::IDENTITY);
        assert_abs_diff_eq!(Quaternion::new(0.0, 0.0, 3.0, 4.0).normalize().length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quaternion::from_axis_angle(Vector3::X, 0.3);
        let b = Quaternion::from_axis_angle(Vector3::Y, 1.2);
        assert_eq!(a.slerp(b, 0.0), a);
        assert_eq!(a.slerp(b, 1.0), b);
        assert_abs_diff_eq!(a.slerp(a, 0.5), a, epsilon = 1e-12);
    }

    #[test]
    fn test_slerp_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
        let mid = Quaternion::slerp_quaternions(a, b, 0.5);
        assert_abs_diff_eq!(mid, Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_4), epsilon = 1e-12);
        assert_abs_diff_eq!(mid, Quaternion::from(a.to_glam().slerp(b.to_glam(), 0.5)), epsilon = 1e-12);
    }

    #[test]
    fn test_slerp_takes_short_arc() {
        let a = Quaternion::IDENTITY;
        let b = -Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
        let mid = a.slerp(b, 0.5);
        assert!(mid.w > 0.0);
        assert!(same_rotation(mid, Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_4)));
    }

    #[test]
    fn test_slerp_nearly_coincident_stays_unit() {
        let a = Quaternion::from_axis_angle(Vector3::X, 1.0);
        let b = Quaternion::from_axis_angle(Vector3::X, 1.0 + 1e-9);
        let mid = a.slerp(b, 0.5);
        assert_abs_diff_eq!(mid.length(), 1.0, epsilon = 1e-12);
        assert!(same_rotation(mid, a));
    }

    #[test]
    fn test_angle_and_rotate_towards() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vector3::Y, FRAC_PI_2);
        assert_abs_diff_eq!(a.angle_to(b), FRAC_PI_2, epsilon = 1e-12);

        let step = a.rotate_towards(b, FRAC_PI_4);
        assert_abs_diff_eq!(a.angle_to(step), FRAC_PI_4, epsilon = 1e-9);
        assert_eq!(a.rotate_towards(b, 10.0), b);
        assert_eq!(b.rotate_towards(b, 1.0), b);
    }

    #[test]
    fn test_invert() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 0.9);
        assert_abs_diff_eq!(q * q.invert(), Quaternion::IDENTITY, epsilon = 1e-12);
        assert_eq!(q.conjugate(), q.invert());
    }

    #[test]
    fn test_proper_euler_matches_axis_products() {
        let (a, b, c) = (0.4, -0.9, 1.3);
        let rx = |t| Quaternion::from_axis_angle(Vector3::X, t);
        let ry = |t| Quaternion::from_axis_angle(Vector3::Y, t);
        let rz = |t| Quaternion::from_axis_angle(Vector3::Z, t);

        assert_abs_diff_eq!(
            Quaternion::from_proper_euler(a, b, c, ProperEulerOrder::ZXZ),
            rz(a) * rx(b) * rz(c),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Quaternion::from_proper_euler(a, b, c, ProperEulerOrder::XYX),
            rx(a) * ry(b) * rx(c),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Quaternion::from_proper_euler(a, b, c, ProperEulerOrder::YZY),
            ry(a) * rz(b) * ry(c),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_proper_euler_order_parse() {
        assert_eq!("zyz".parse::<ProperEulerOrder>().unwrap(), ProperEulerOrder::ZYZ);
        assert_eq!(ProperEulerOrder::XZX.to_string(), "XZX");
        assert!("XYZ".parse::<ProperEulerOrder>().is_err());
    }

    #[test]
    fn test_slices() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let mut buf = [0.0; 6];
        q.write_to_slice(&mut buf, 2).unwrap();
        assert_eq!(buf, [0.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Quaternion::from_slice(&buf, 2).unwrap(), q);
        assert!(Quaternion::from_slice(&buf, 3).is_err());
    }
}
