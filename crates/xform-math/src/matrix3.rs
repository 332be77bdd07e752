//! 3x3 matrix type.
//!
//! [`Matrix3`] holds linear maps: the rotation/scale block of a
//! [`Matrix4`], normal matrices, and 2D homogeneous UV transforms.
//!
//! # Convention
//!
//! Elements are stored **column-major** (the layout GPU uniforms expect),
//! while [`Matrix3::new`] takes its arguments in reading (row-major) order:
//!
//! ```text
//! new(n11, n12, n13,       | n11 n12 n13 |      elements = [n11, n21, n31,
//!     n21, n22, n23,   =>  | n21 n22 n23 |  =>              n12, n22, n32,
//!     n31, n32, n33)       | n31 n32 n33 |                  n13, n23, n33]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Matrix3, Vector3};
//!
//! let m = Matrix3::new(
//!     2.0, 0.0, 0.0,
//!     0.0, 3.0, 0.0,
//!     0.0, 0.0, 4.0,
//! );
//! assert_eq!(m * Vector3::ONE, Vector3::new(2.0, 3.0, 4.0));
//! assert_eq!(m.determinant(), 24.0);
//! ```

use crate::error::{check_slice, Result};
use crate::{Matrix4, Vector3};
use std::ops::{Mul, MulAssign};
use tracing::debug;

/// A 3x3 matrix stored column-major.
///
/// # Example
///
/// ```rust
/// use xform_math::{Matrix3, Vector3};
///
/// let identity = Matrix3::IDENTITY;
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(identity * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix3 {
    /// Matrix elements in column-major order.
    pub elements: [f64; 9],
}

impl Matrix3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 9] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Number of elements.
    pub const LEN: usize = 9;

    /// Creates a matrix from elements given in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        n11: f64, n12: f64, n13: f64,
        n21: f64, n22: f64, n23: f64,
        n31: f64, n32: f64, n33: f64,
    ) -> Self {
        Self {
            elements: [n11, n21, n31, n12, n22, n32, n13, n23, n33],
        }
    }

    /// Overwrites every element, arguments in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        n11: f64, n12: f64, n13: f64,
        n21: f64, n22: f64, n23: f64,
        n31: f64, n32: f64, n33: f64,
    ) -> &mut Self {
        *self = Self::new(n11, n12, n13, n21, n22, n23, n31, n32, n33);
        self
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self::new(
            rows[0][0], rows[0][1], rows[0][2],
            rows[1][0], rows[1][1], rows[1][2],
            rows[2][0], rows[2][1], rows[2][2],
        )
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f64; 3]; 3]) -> Self {
        Self {
            elements: [
                cols[0][0], cols[0][1], cols[0][2],
                cols[1][0], cols[1][1], cols[1][2],
                cols[2][0], cols[2][1], cols[2][2],
            ],
        }
    }

    /// Creates a matrix from basis vectors placed in the columns.
    #[inline]
    pub fn from_col_vecs(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array()])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self::new(d0, 0.0, 0.0, 0.0, d1, 0.0, 0.0, 0.0, d2)
    }

    /// Resets to identity.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Upper-left 3x3 block of a 4x4 matrix.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let me = &m.elements;
        Self::new(
            me[0], me[4], me[8],
            me[1], me[5], me[9],
            me[2], me[6], me[10],
        )
    }

    /// Returns element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 3 + row]
    }

    /// Returns a column as Vector3.
    #[inline]
    pub fn col(&self, i: usize) -> Vector3 {
        Vector3::from_matrix3_column(self, i)
    }

    /// Returns a row as Vector3.
    #[inline]
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.elements[i], self.elements[i + 3], self.elements[i + 6])
    }

    /// The three basis vectors (columns).
    #[inline]
    pub fn extract_basis(&self) -> (Vector3, Vector3, Vector3) {
        (self.col(0), self.col(1), self.col(2))
    }

    /// Post-multiplies: returns `self * m`.
    #[inline]
    pub fn multiply(&self, m: &Self) -> Self {
        Self::multiply_matrices(self, m)
    }

    /// Pre-multiplies: returns `m * self`.
    #[inline]
    pub fn premultiply(&self, m: &Self) -> Self {
        Self::multiply_matrices(m, self)
    }

    /// Returns `a * b`.
    pub fn multiply_matrices(a: &Self, b: &Self) -> Self {
        let ae = &a.elements;
        let be = &b.elements;

        let (a11, a12, a13) = (ae[0], ae[3], ae[6]);
        let (a21, a22, a23) = (ae[1], ae[4], ae[7]);
        let (a31, a32, a33) = (ae[2], ae[5], ae[8]);

        let (b11, b12, b13) = (be[0], be[3], be[6]);
        let (b21, b22, b23) = (be[1], be[4], be[7]);
        let (b31, b32, b33) = (be[2], be[5], be[8]);

        Self::new(
            a11 * b11 + a12 * b21 + a13 * b31,
            a11 * b12 + a12 * b22 + a13 * b32,
            a11 * b13 + a12 * b23 + a13 * b33,
            a21 * b11 + a22 * b21 + a23 * b31,
            a21 * b12 + a22 * b22 + a23 * b32,
            a21 * b13 + a22 * b23 + a23 * b33,
            a31 * b11 + a32 * b21 + a33 * b31,
            a31 * b12 + a32 * b22 + a33 * b32,
            a31 * b13 + a32 * b23 + a33 * b33,
        )
    }

    /// Multiplies every element by `s`.
    #[inline]
    pub fn multiply_scalar(&self, s: f64) -> Self {
        Self {
            elements: self.elements.map(|e| e * s),
        }
    }

    /// Computes the determinant.
    pub fn determinant(&self) -> f64 {
        let te = &self.elements;
        let (a, b, c) = (te[0], te[1], te[2]);
        let (d, e, f) = (te[3], te[4], te[5]);
        let (g, h, i) = (te[6], te[7], te[8]);

        a * e * i - a * f * h - b * d * i + b * f * g + c * d * h - c * e * g
    }

    /// Computes the inverse via the adjugate.
    ///
    /// A singular matrix (determinant exactly zero) inverts to [`Matrix3::ZERO`]
    /// rather than failing; callers that care must check the determinant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xform_math::Matrix3;
    ///
    /// assert_eq!(Matrix3::ZERO.invert(), Matrix3::ZERO);
    /// assert_eq!(Matrix3::diagonal(2.0, 4.0, 8.0).invert(), Matrix3::diagonal(0.5, 0.25, 0.125));
    /// ```
    pub fn invert(&self) -> Self {
        let te = &self.elements;
        let (n11, n21, n31) = (te[0], te[1], te[2]);
        let (n12, n22, n32) = (te[3], te[4], te[5]);
        let (n13, n23, n33) = (te[6], te[7], te[8]);

        let t11 = n33 * n22 - n32 * n23;
        let t12 = n32 * n13 - n33 * n12;
        let t13 = n23 * n12 - n22 * n13;

        let det = n11 * t11 + n21 * t12 + n31 * t13;

        if det == 0.0 {
            debug!("Matrix3::invert on singular matrix, returning zero matrix");
            return Self::ZERO;
        }

        let det_inv = 1.0 / det;

        Self {
            elements: [
                t11 * det_inv,
                (n31 * n23 - n33 * n21) * det_inv,
                (n32 * n21 - n31 * n22) * det_inv,
                t12 * det_inv,
                (n33 * n11 - n31 * n13) * det_inv,
                (n31 * n12 - n32 * n11) * det_inv,
                t13 * det_inv,
                (n21 * n13 - n23 * n11) * det_inv,
                (n22 * n11 - n21 * n12) * det_inv,
            ],
        }
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self {
            elements: [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]],
        }
    }

    /// Normal matrix of a 4x4 transform: inverse-transpose of its upper 3x3.
    #[inline]
    pub fn normal_matrix(m: &Matrix4) -> Self {
        Self::from_matrix4(m).invert().transpose()
    }

    /// Writes the transpose into a 9-element array (row-major readout).
    pub fn transpose_into_array(&self, r: &mut [f64; 9]) {
        *r = self.transpose().elements;
    }

    /// Builds a 2D UV transform: offset, repeat, rotation around a center.
    #[allow(clippy::too_many_arguments)]
    pub fn uv_transform(tx: f64, ty: f64, sx: f64, sy: f64, rotation: f64, cx: f64, cy: f64) -> Self {
        let (s, c) = rotation.sin_cos();
        Self::new(
            sx * c, sx * s, -sx * (c * cx + s * cy) + cx + tx,
            -sy * s, sy * c, -sy * (-s * cx + c * cy) + cy + ty,
            0.0, 0.0, 1.0,
        )
    }

    /// 2D scale in homogeneous form.
    #[inline]
    pub const fn make_scale(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, 1.0)
    }

    /// 2D rotation by `theta` radians in homogeneous form.
    pub fn make_rotation(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// 2D translation in homogeneous form.
    #[inline]
    pub const fn make_translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0)
    }

    /// Applies a 2D scale after this transform.
    #[inline]
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        self.premultiply(&Self::make_scale(sx, sy))
    }

    /// Applies a 2D rotation by `-theta` after this transform (UV space is y-down).
    #[inline]
    pub fn rotate(&self, theta: f64) -> Self {
        self.premultiply(&Self::make_rotation(-theta))
    }

    /// Applies a 2D translation after this transform.
    #[inline]
    pub fn translate(&self, tx: f64, ty: f64) -> Self {
        self.premultiply(&Self::make_translation(tx, ty))
    }

    /// Transforms a Vector3.
    #[inline]
    pub fn transform(&self, v: Vector3) -> Vector3 {
        v.apply_matrix3(self)
    }

    /// Exact element-wise equality.
    #[inline]
    pub fn equals(&self, m: &Self) -> bool {
        self == m
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|x| x.is_finite())
    }

    /// Creates from a column-major array.
    #[inline]
    pub const fn from_array(elements: [f64; 9]) -> Self {
        Self { elements }
    }

    /// Column-major copy of the elements.
    #[inline]
    pub const fn to_array(&self) -> [f64; 9] {
        self.elements
    }

    /// Column-major elements narrowed to `f32` for uniform upload.
    #[inline]
    pub fn to_f32_array(&self) -> [f32; 9] {
        self.elements.map(|e| e as f32)
    }

    /// Reads nine column-major values from `array` at `offset`.
    pub fn from_slice(array: &[f64], offset: usize) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        let mut elements = [0.0; 9];
        elements.copy_from_slice(&array[offset..offset + Self::LEN]);
        Ok(Self { elements })
    }

    /// Writes the nine column-major values into `array` at `offset`.
    pub fn write_to_slice(&self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset..offset + Self::LEN].copy_from_slice(&self.elements);
        Ok(())
    }

    /// Converts to glam DMat3 (same column-major layout).
    #[inline]
    pub fn to_glam(&self) -> glam::DMat3 {
        glam::DMat3::from_cols_array(&self.elements)
    }

    /// Creates from glam DMat3.
    #[inline]
    pub fn from_glam(m: glam::DMat3) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform(rhs)
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<f64> for Matrix3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.multiply_scalar(rhs)
    }
}

impl MulAssign for Matrix3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl From<glam::DMat3> for Matrix3 {
    #[inline]
    fn from(m: glam::DMat3) -> Self {
        Self::from_glam(m)
    }
}

impl From<Matrix3> for glam::DMat3 {
    #[inline]
    fn from(m: Matrix3) -> glam::DMat3 {
        m.to_glam()
    }
}

crate::approx_impl::impl_approx_elements!(Matrix3);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Matrix3 {
        Matrix3::new(
            1.0, 2.0, 3.0,
            0.0, 1.0, 4.0,
            5.0, 6.0, 0.0,
        )
    }

    #[test]
    fn test_matrix3_layout() {
        let m = sample();
        assert_eq!(m.elements, [1.0, 0.0, 5.0, 2.0, 1.0, 6.0, 3.0, 4.0, 0.0]);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.row(2), Vector3::new(5.0, 6.0, 0.0));
        assert_eq!(m.col(2), Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(Matrix3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]), m);
    }

    #[test]
    fn test_matrix3_identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix3::IDENTITY * v, v);
        assert_eq!(Matrix3::default(), Matrix3::IDENTITY);
    }

    #[test]
    fn test_matrix3_transpose() {
        let t = sample().transpose();
        assert_eq!(t.get(1, 0), 2.0);
        assert_eq!(t.get(0, 1), 0.0);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn test_matrix3_determinant() {
        assert_abs_diff_eq!(sample().determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix3_inverse() {
        let m = sample();
        let result = m * m.invert();
        assert_abs_diff_eq!(result, Matrix3::IDENTITY, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix3_singular_inverts_to_zero() {
        assert_eq!(Matrix3::ZERO.invert(), Matrix3::ZERO);

        let m = Matrix3::new(
            1.0, 2.0, 3.0,
            2.0, 4.0, 6.0, // Row 2 = 2 * Row 1
            1.0, 1.0, 1.0,
        );
        let inv = m.invert();
        assert_eq!(inv, Matrix3::ZERO);
        assert!(inv.is_finite());
    }

    #[test]
    fn test_matrix3_multiply_order() {
        let a = Matrix3::make_translation(1.0, 0.0);
        let b = Matrix3::make_scale(2.0, 2.0);
        // a * b scales first, then translates
        assert_eq!(a.multiply(&b).elements[6], 1.0);
        assert_eq!(a.premultiply(&b).elements[6], 2.0);
        assert_eq!(a.scale(2.0, 2.0), a.premultiply(&b));
    }

    #[test]
    fn test_matrix3_matches_glam() {
        let a = sample();
        let b = Matrix3::make_rotation(0.3);
        let ours = a * b;
        let theirs = Matrix3::from_glam(a.to_glam() * b.to_glam());
        assert_abs_diff_eq!(ours, theirs, epsilon = 1e-12);
        assert_abs_diff_eq!(
            a.invert(),
            Matrix3::from_glam(a.to_glam().inverse()),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_matrix3_normal_matrix() {
        let m = Matrix4::from_scale(Vector3::new(2.0, 4.0, 8.0));
        let n = Matrix3::normal_matrix(&m);
        assert_abs_diff_eq!(n, Matrix3::diagonal(0.5, 0.25, 0.125), epsilon = 1e-15);
    }

    #[test]
    fn test_matrix3_slice() {
        let m = sample();
        let mut buf = [0.0; 10];
        m.write_to_slice(&mut buf, 1).unwrap();
        assert_eq!(Matrix3::from_slice(&buf, 1).unwrap(), m);
        assert!(Matrix3::from_slice(&buf, 2).is_err());
        assert_eq!(m.to_f32_array()[2], 5.0_f32);
        let mut r = [0.0; 9];
        m.transpose_into_array(&mut r);
        assert_eq!(r[1], 2.0);
    }

    #[test]
    fn test_matrix3_rotate_uv() {
        let m = Matrix3::IDENTITY.rotate(std::f64::consts::FRAC_PI_2);
        let v = crate::Vector2::X.apply_matrix3(&m);
        assert_abs_diff_eq!(v, crate::Vector2::new(0.0, -1.0), epsilon = 1e-12);
    }
}
