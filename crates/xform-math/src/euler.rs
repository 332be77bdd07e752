//! Euler angle rotations.
//!
//! An [`Euler`] is three angles in radians plus a [`RotationOrder`] naming
//! the axis sequence. Angles are applied intrinsically: for
//! [`RotationOrder::XYZ`] the object turns around its X axis, then its new
//! Y axis, then its new Z axis, so the matrix is `Rx * Ry * Rz`.
//!
//! Several angle triples describe the same rotation, and at the poles of
//! the middle axis (gimbal lock) one degree of freedom disappears;
//! [`Euler::from_rotation_matrix`] then picks the solution with one angle
//! zeroed.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Euler, Quaternion, RotationOrder};
//!
//! let e = Euler::new(0.1, 0.2, 0.3, RotationOrder::ZYX);
//! let q: Quaternion = e.to_quaternion();
//! let back = Euler::from_quaternion(q, RotationOrder::ZYX);
//! assert!((back.y - 0.2).abs() < 1e-12);
//!
//! let order: RotationOrder = "YXZ".parse().unwrap();
//! assert_eq!(order.to_string(), "YXZ");
//! ```

use crate::error::{check_slice, MathError, Result};
use crate::interp::clamp;
use crate::{Matrix4, Quaternion, Vector3};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Threshold on the middle-axis sine above which the rotation is treated
/// as gimbal locked.
const GIMBAL_LOCK_THRESHOLD: f64 = 0.99999;

/// Axis sequence of an [`Euler`] rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum RotationOrder {
    /// X, then Y, then Z.
    #[default]
    XYZ,
    /// X, then Z, then Y.
    XZY,
    /// Y, then X, then Z.
    YXZ,
    /// Y, then Z, then X.
    YZX,
    /// Z, then X, then Y.
    ZXY,
    /// Z, then Y, then X.
    ZYX,
}

impl RotationOrder {
    /// All six orders.
    pub const ALL: [Self; 6] = [Self::XYZ, Self::XZY, Self::YXZ, Self::YZX, Self::ZXY, Self::ZYX];

    /// Name of the order, e.g. `"XYZ"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XYZ => "XYZ",
            Self::XZY => "XZY",
            Self::YXZ => "YXZ",
            Self::YZX => "YZX",
            Self::ZXY => "ZXY",
            Self::ZYX => "ZYX",
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationOrder {
    type Err = MathError;

    /// Parses an order name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MathError::unknown_rotation_order(s))
    }
}

/// One item of the [`Euler`] component sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EulerComponent {
    /// An angle in radians (x, y, then z).
    Angle(f64),
    /// The rotation order, always last.
    Order(RotationOrder),
}

/// Three angles in radians and the order they are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    /// Angle around X
    pub x: f64,
    /// Angle around Y
    pub y: f64,
    /// Angle around Z
    pub z: f64,
    /// Axis sequence
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: RotationOrder,
}

impl Euler {
    /// Number of angle components.
    pub const LEN: usize = 3;

    /// Creates an Euler rotation.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, order: RotationOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Overwrites the angles and the order.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, order: RotationOrder) -> &mut Self {
        *self = Self::new(x, y, z, order);
        self
    }

    /// Extracts angles in `order` from the upper 3x3 of a pure rotation
    /// matrix.
    ///
    /// When the sine of the middle angle is within `1e-5` of ±1 the first or
    /// last angle is forced to zero and the other absorbs the whole
    /// remaining rotation.
    pub fn from_rotation_matrix(m: &Matrix4, order: RotationOrder) -> Self {
        let te = &m.elements;
        let (m11, m12, m13) = (te[0], te[4], te[8]);
        let (m21, m22, m23) = (te[1], te[5], te[9]);
        let (m31, m32, m33) = (te[2], te[6], te[10]);

        let locked = |s: f64| {
            let locked = s.abs() >= GIMBAL_LOCK_THRESHOLD;
            if locked {
                debug!(%order, "Euler::from_rotation_matrix hit gimbal lock");
            }
            locked
        };

        let (x, y, z) = match order {
            RotationOrder::XYZ => {
                let y = clamp(m13, -1.0, 1.0).asin();
                if !locked(m13) {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            RotationOrder::YXZ => {
                let x = (-clamp(m23, -1.0, 1.0)).asin();
                if !locked(m23) {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            RotationOrder::ZXY => {
                let x = clamp(m32, -1.0, 1.0).asin();
                if !locked(m32) {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            RotationOrder::ZYX => {
                let y = (-clamp(m31, -1.0, 1.0)).asin();
                if !locked(m31) {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            RotationOrder::YZX => {
                let z = clamp(m21, -1.0, 1.0).asin();
                if !locked(m21) {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            RotationOrder::XZY => {
                let z = (-clamp(m12, -1.0, 1.0)).asin();
                if !locked(m12) {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self::new(x, y, z, order)
    }

    /// Angles in `order` for a unit quaternion.
    #[inline]
    pub fn from_quaternion(q: Quaternion, order: RotationOrder) -> Self {
        Self::from_rotation_matrix(&Matrix4::make_rotation_from_quaternion(q), order)
    }

    /// Angles taken from the components of `v`.
    #[inline]
    pub const fn from_vector3(v: Vector3, order: RotationOrder) -> Self {
        Self::new(v.x, v.y, v.z, order)
    }

    /// The same rotation expressed in another order.
    ///
    /// Goes through a quaternion, so the angles may wrap differently from
    /// the input even when `order` is unchanged.
    #[inline]
    pub fn reorder(self, order: RotationOrder) -> Self {
        Self::from_quaternion(self.to_quaternion(), order)
    }

    /// Equivalent quaternion.
    #[inline]
    pub fn to_quaternion(self) -> Quaternion {
        Quaternion::from_euler(self)
    }

    /// Equivalent rotation matrix.
    #[inline]
    pub fn to_matrix4(self) -> Matrix4 {
        Matrix4::make_rotation_from_euler(self)
    }

    /// The angles as a vector.
    #[inline]
    pub const fn to_vector3(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Exact equality of angles and order.
    #[inline]
    pub fn equals(self, e: Self) -> bool {
        self == e
    }

    /// Creates from `[x, y, z]` and an order.
    #[inline]
    pub const fn from_array(a: [f64; 3], order: RotationOrder) -> Self {
        Self::new(a[0], a[1], a[2], order)
    }

    /// The angles as `[x, y, z]`. The order is read from [`Euler::order`].
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Reads three angles from `array` at `offset`.
    pub fn from_slice(array: &[f64], offset: usize, order: RotationOrder) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        Ok(Self::new(array[offset], array[offset + 1], array[offset + 2], order))
    }

    /// Writes the three angles into `array` at `offset`.
    pub fn write_to_slice(self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset..offset + Self::LEN].copy_from_slice(&self.to_array());
        Ok(())
    }

    /// Iterates over `x, y, z` and then the order.
    #[inline]
    pub fn iter(self) -> std::array::IntoIter<EulerComponent, 4> {
        [
            EulerComponent::Angle(self.x),
            EulerComponent::Angle(self.y),
            EulerComponent::Angle(self.z),
            EulerComponent::Order(self.order),
        ]
        .into_iter()
    }
}

impl IntoIterator for Euler {
    type Item = EulerComponent;
    type IntoIter = std::array::IntoIter<EulerComponent, 4>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Quaternion> for Euler {
    /// Converts using the default [`RotationOrder::XYZ`].
    #[inline]
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(q, RotationOrder::default())
    }
}

impl From<Euler> for Quaternion {
    #[inline]
    fn from(e: Euler) -> Self {
        e.to_quaternion()
    }
}
