//! 2D vector type.
//!
//! Used for UV coordinates and screen-space values alongside [`crate::Matrix3`]
//! UV transforms.

use crate::error::{check_slice, MathError, Result};
use crate::Matrix3;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// One vector (1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Unit X vector (1, 0).
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit Y vector (0, 1).
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Number of components.
    pub const LEN: usize = 2;

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    /// Sets the component at `index` (0 = x, 1 = y).
    ///
    /// # Errors
    ///
    /// [`MathError::ComponentIndex`] if `index > 1`.
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => return Err(MathError::component_index(index, Self::LEN)),
        }
        Ok(())
    }

    /// Returns the component at `index` (0 = x, 1 = y).
    ///
    /// # Errors
    ///
    /// [`MathError::ComponentIndex`] if `index > 1`.
    pub fn get_component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(MathError::component_index(index, Self::LEN)),
        }
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f64; 2]) -> Self {
        Self::new(a[0], a[1])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Reads two values from `array` starting at `offset`.
    pub fn from_slice(array: &[f64], offset: usize) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        Ok(Self::new(array[offset], array[offset + 1]))
    }

    /// Writes both components into `array` starting at `offset`.
    pub fn write_to_slice(self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset] = self.x;
        array[offset + 1] = self.y;
        Ok(())
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, v: Self) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// Z component of the 3D cross product (signed parallelogram area).
    #[inline]
    pub fn cross(self, v: Self) -> f64 {
        self.x * v.y - self.y * v.x
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Sum of absolute components.
    #[inline]
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Normalizes to unit length; a zero vector stays zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        self / if len == 0.0 { 1.0 } else { len }
    }

    /// Angle of the vector relative to the positive x axis, in `[0, 2π)`.
    #[inline]
    pub fn angle(self) -> f64 {
        (-self.y).atan2(-self.x) + std::f64::consts::PI
    }

    /// Angle between two vectors in radians, `π/2` if either is zero.
    pub fn angle_to(self, v: Self) -> f64 {
        let denominator = (self.length_squared() * v.length_squared()).sqrt();
        if denominator == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }
        (self.dot(v) / denominator).clamp(-1.0, 1.0).acos()
    }

    /// Euclidean distance to `v`.
    #[inline]
    pub fn distance_to(self, v: Self) -> f64 {
        (self - v).length()
    }

    /// Squared distance to `v`.
    #[inline]
    pub fn distance_to_squared(self, v: Self) -> f64 {
        (self - v).length_squared()
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, v: Self) -> Self {
        Self::new(self.x.min(v.x), self.y.min(v.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, v: Self) -> Self {
        Self::new(self.x.max(v.x), self.y.max(v.y))
    }

    /// Clamps each component between the matching components of `min` and `max`.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Linear interpolation: `self + (target - self) * t`.
    #[inline]
    pub fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }

    /// Rotates around `center` by `angle` radians.
    pub fn rotate_around(self, center: Self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let x = self.x - center.x;
        let y = self.y - center.y;
        Self::new(x * c - y * s + center.x, x * s + y * c + center.y)
    }

    /// Transforms by a 3x3 matrix in homogeneous 2D form.
    pub fn apply_matrix3(self, m: &Matrix3) -> Self {
        let e = &m.elements;
        Self::new(
            e[0] * self.x + e[3] * self.y + e[6],
            e[1] * self.x + e[4] * self.y + e[7],
        )
    }

    /// Iterates over `x, y` in order.
    #[inline]
    pub fn iter(self) -> std::array::IntoIter<f64, 2> {
        self.to_array().into_iter()
    }
}

impl Index<usize> for Vector2 {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index out of bounds: {}", i),
        }
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl IntoIterator for Vector2 {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<[f64; 2]> for Vector2 {
    #[inline]
    fn from(a: [f64; 2]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector2> for [f64; 2] {
    #[inline]
    fn from(v: Vector2) -> [f64; 2] {
        v.to_array()
    }
}

crate::approx_impl::impl_approx_fields!(Vector2, x, y);
