//! 4x4 matrix type for affine and projective transforms.
//!
//! [`Matrix4`] is the local and world transform of every scene node. It
//! composes from and decomposes into translation, rotation and scale
//! ([`Matrix4::compose`], [`Matrix4::decompose`]), converts to and from the
//! rotation representations, and builds view and projection matrices.
//!
//! # Convention
//!
//! Storage is **column-major**, matching GPU uniform layout, so
//! [`Matrix4::to_f32_array`] can be uploaded without transposition. The
//! translation lives in `elements[12..15]`. [`Matrix4::new`] and
//! [`Matrix4::set`] take their sixteen arguments in reading (row-major) order.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{Matrix4, Quaternion, Vector3};
//!
//! let m = Matrix4::compose(
//!     Vector3::new(1.0, 2.0, 3.0),
//!     Quaternion::IDENTITY,
//!     Vector3::splat(2.0),
//! );
//! assert_eq!(m * Vector3::ONE, Vector3::new(3.0, 4.0, 5.0));
//!
//! let (position, _, scale) = m.decompose();
//! assert_eq!(position, Vector3::new(1.0, 2.0, 3.0));
//! assert_eq!(scale, Vector3::splat(2.0));
//! ```

use crate::error::{check_slice, Result};
use crate::{Euler, Matrix3, Quaternion, RotationOrder, Vector3};
use std::ops::{Mul, MulAssign};
use tracing::debug;

/// A 4x4 matrix stored column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    pub elements: [f64; 16],
}

impl Matrix4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Number of elements.
    pub const LEN: usize = 16;

    /// Creates a matrix from elements given in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        n11: f64, n12: f64, n13: f64, n14: f64,
        n21: f64, n22: f64, n23: f64, n24: f64,
        n31: f64, n32: f64, n33: f64, n34: f64,
        n41: f64, n42: f64, n43: f64, n44: f64,
    ) -> Self {
        Self {
            elements: [
                n11, n21, n31, n41, //
                n12, n22, n32, n42, //
                n13, n23, n33, n43, //
                n14, n24, n34, n44,
            ],
        }
    }

    /// Overwrites every element, arguments in row-major reading order.
    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        n11: f64, n12: f64, n13: f64, n14: f64,
        n21: f64, n22: f64, n23: f64, n24: f64,
        n31: f64, n32: f64, n33: f64, n34: f64,
        n41: f64, n42: f64, n43: f64, n44: f64,
    ) -> &mut Self {
        *self = Self::new(
            n11, n12, n13, n14, n21, n22, n23, n24, n31, n32, n33, n34, n41, n42, n43, n44,
        );
        self
    }

    /// Resets to the identity.
    #[inline]
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Embeds a 3x3 matrix as the upper-left block of an otherwise identity matrix.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let me = &m.elements;
        Self::new(
            me[0], me[3], me[6], 0.0,
            me[1], me[4], me[7], 0.0,
            me[2], me[5], me[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Pure translation by `v`.
    #[inline]
    pub const fn from_translation(v: Vector3) -> Self {
        Self::make_translation(v.x, v.y, v.z)
    }

    /// Pure scale by `v`.
    #[inline]
    pub const fn from_scale(v: Vector3) -> Self {
        Self::make_scale(v.x, v.y, v.z)
    }

    /// Element at `row`, `col`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is greater than 3.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < 4 && col < 4, "Matrix4 index out of bounds: ({row}, {col})");
        self.elements[col * 4 + row]
    }

    /// Returns a copy of this matrix with the translation of `m`.
    pub fn copy_position(&self, m: &Self) -> Self {
        let mut out = *self;
        out.elements[12..15].copy_from_slice(&m.elements[12..15]);
        out
    }

    /// Sets the translation column.
    pub fn set_position(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.elements[12] = x;
        self.elements[13] = y;
        self.elements[14] = z;
        self
    }

    /// Translation column as a vector.
    #[inline]
    pub fn position(&self) -> Vector3 {
        Vector3::from_matrix_position(self)
    }

    /// The three basis vectors (first three columns).
    pub fn extract_basis(&self) -> (Vector3, Vector3, Vector3) {
        (
            Vector3::from_matrix_column(self, 0),
            Vector3::from_matrix_column(self, 1),
            Vector3::from_matrix_column(self, 2),
        )
    }

    /// Builds a rotation/scale matrix whose columns are the given axes.
    pub fn make_basis(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        Self::new(
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation part of this matrix: each basis column divided by its length,
    /// translation cleared.
    pub fn extract_rotation(&self) -> Self {
        let me = &self.elements;
        let scale_x = 1.0 / Vector3::from_matrix_column(self, 0).length();
        let scale_y = 1.0 / Vector3::from_matrix_column(self, 1).length();
        let scale_z = 1.0 / Vector3::from_matrix_column(self, 2).length();

        Self {
            elements: [
                me[0] * scale_x, me[1] * scale_x, me[2] * scale_x, 0.0,
                me[4] * scale_y, me[5] * scale_y, me[6] * scale_y, 0.0,
                me[8] * scale_z, me[9] * scale_z, me[10] * scale_z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation matrix for an Euler rotation, no translation.
    pub fn make_rotation_from_euler(euler: Euler) -> Self {
        let (b, a) = euler.x.sin_cos();
        let (d, c) = euler.y.sin_cos();
        let (f, e) = euler.z.sin_cos();

        let mut te = Self::IDENTITY.elements;

        match euler.order {
            RotationOrder::XYZ => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);

                te[0] = c * e;
                te[4] = -c * f;
                te[8] = d;

                te[1] = af + be * d;
                te[5] = ae - bf * d;
                te[9] = -b * c;

                te[2] = bf - ae * d;
                te[6] = be + af * d;
                te[10] = a * c;
            }
            RotationOrder::YXZ => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);

                te[0] = ce + df * b;
                te[4] = de * b - cf;
                te[8] = a * d;

                te[1] = a * f;
                te[5] = a * e;
                te[9] = -b;

                te[2] = cf * b - de;
                te[6] = df + ce * b;
                te[10] = a * c;
            }
            RotationOrder::ZXY => {
                let (ce, cf, de, df) = (c * e, c * f, d * e, d * f);

                te[0] = ce - df * b;
                te[4] = -a * f;
                te[8] = de + cf * b;

                te[1] = cf + de * b;
                te[5] = a * e;
                te[9] = df - ce * b;

                te[2] = -a * d;
                te[6] = b;
                te[10] = a * c;
            }
            RotationOrder::ZYX => {
                let (ae, af, be, bf) = (a * e, a * f, b * e, b * f);

                te[0] = c * e;
                te[4] = be * d - af;
                te[8] = ae * d + bf;

                te[1] = c * f;
                te[5] = bf * d + ae;
                te[9] = af * d - be;

                te[2] = -d;
                te[6] = b * c;
                te[10] = a * c;
            }
            RotationOrder::YZX => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);

                te[0] = c * e;
                te[4] = bd - ac * f;
                te[8] = bc * f + ad;

                te[1] = f;
                te[5] = a * e;
                te[9] = -b * e;

                te[2] = -d * e;
                te[6] = ad * f + bc;
                te[10] = ac - bd * f;
            }
            RotationOrder::XZY => {
                let (ac, ad, bc, bd) = (a * c, a * d, b * c, b * d);

                te[0] = c * e;
                te[4] = -f;
                te[8] = d * e;

                te[1] = ac * f + bd;
                te[5] = a * e;
                te[9] = ad * f - bc;

                te[2] = bc * f - ad;
                te[6] = b * e;
                te[10] = bd * f + ac;
            }
        }

        Self { elements: te }
    }

    /// Rotation matrix for a unit quaternion, no translation.
    #[inline]
    pub fn make_rotation_from_quaternion(q: Quaternion) -> Self {
        Self::compose(Vector3::ZERO, q, Vector3::ONE)
    }

    /// Replaces the rotation block with a basis looking from `eye` towards
    /// `target`.
    ///
    /// The resulting `+Z` axis points from `target` to `eye`, so a camera
    /// using this matrix looks down its `-Z`. Translation is left untouched.
    /// If `eye == target` the forward axis falls back to `+Z`; if `up` is
    /// parallel to the forward axis, the forward axis is nudged by `1e-4`
    /// so a basis can still be built.
    pub fn look_at(&self, eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let mut z = eye - target;

        if z.length_squared() == 0.0 {
            debug!("Matrix4::look_at with eye == target, facing +Z");
            z.z = 1.0;
        }

        z = z.normalize();
        let mut x = up.cross(z);

        if x.length_squared() == 0.0 {
            debug!("Matrix4::look_at with up parallel to view direction, nudging");
            if up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalize();
            x = up.cross(z);
        }

        x = x.normalize();
        let y = z.cross(x);

        let mut out = *self;
        let te = &mut out.elements;
        te[0] = x.x;
        te[4] = y.x;
        te[8] = z.x;
        te[1] = x.y;
        te[5] = y.y;
        te[9] = z.y;
        te[2] = x.z;
        te[6] = y.z;
        te[10] = z.z;
        out
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
        let mut te = [0.0; 16];

        for col in 0..4 {
            for row in 0..4 {
                te[col * 4 + row] = ae[row] * be[col * 4]
                    + ae[4 + row] * be[col * 4 + 1]
                    + ae[8 + row] * be[col * 4 + 2]
                    + ae[12 + row] * be[col * 4 + 3];
            }
        }

        Self { elements: te }
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

        let (n11, n12, n13, n14) = (te[0], te[4], te[8], te[12]);
        let (n21, n22, n23, n24) = (te[1], te[5], te[9], te[13]);
        let (n31, n32, n33, n34) = (te[2], te[6], te[10], te[14]);
        let (n41, n42, n43, n44) = (te[3], te[7], te[11], te[15]);

        n41 * (n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33
            + n12 * n24 * n33
            + n13 * n22 * n34
            - n12 * n23 * n34)
            + n42
                * (n11 * n23 * n34 - n11 * n24 * n33 + n14 * n21 * n33 - n13 * n21 * n34
                    + n13 * n24 * n31
                    - n14 * n23 * n31)
            + n43
                * (n11 * n24 * n32 - n11 * n22 * n34 - n14 * n21 * n32
                    + n12 * n21 * n34
                    + n14 * n22 * n31
                    - n12 * n24 * n31)
            + n44
                * (-n13 * n22 * n31 - n11 * n23 * n32 + n11 * n22 * n33 + n13 * n21 * n32
                    - n12 * n21 * n33
                    + n12 * n23 * n31)
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self {
            elements: [
                m[0], m[4], m[8], m[12], //
                m[1], m[5], m[9], m[13], //
                m[2], m[6], m[10], m[14], //
                m[3], m[7], m[11], m[15],
            ],
        }
    }

    /// Computes the inverse via cofactor expansion.
    ///
    /// A singular matrix (determinant exactly zero) inverts to
    /// [`Matrix4::ZERO`] instead of failing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xform_math::{Matrix4, Vector3};
    ///
    /// let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    /// assert_eq!(m.invert(), Matrix4::from_translation(Vector3::new(-1.0, -2.0, -3.0)));
    /// assert_eq!(Matrix4::ZERO.invert(), Matrix4::ZERO);
    /// ```
    pub fn invert(&self) -> Self {
        let te = &self.elements;

        let (n11, n21, n31, n41) = (te[0], te[1], te[2], te[3]);
        let (n12, n22, n32, n42) = (te[4], te[5], te[6], te[7]);
        let (n13, n23, n33, n43) = (te[8], te[9], te[10], te[11]);
        let (n14, n24, n34, n44) = (te[12], te[13], te[14], te[15]);

        let t11 = n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43
            - n23 * n32 * n44
            + n22 * n33 * n44;
        let t12 = n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43
            + n13 * n32 * n44
            - n12 * n33 * n44;
        let t13 = n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43
            - n13 * n22 * n44
            + n12 * n23 * n44;
        let t14 = n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33
            + n13 * n22 * n34
            - n12 * n23 * n34;

        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;

        if det == 0.0 {
            debug!("Matrix4::invert on singular matrix, returning zero matrix");
            return Self::ZERO;
        }

        let det_inv = 1.0 / det;

        Self {
            elements: [
                t11 * det_inv,
                (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43
                    + n23 * n31 * n44
                    - n21 * n33 * n44)
                    * det_inv,
                (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42
                    - n22 * n31 * n44
                    + n21 * n32 * n44)
                    * det_inv,
                (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42
                    + n21 * n33 * n42
                    + n22 * n31 * n43
                    - n21 * n32 * n43)
                    * det_inv,
                t12 * det_inv,
                (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43
                    - n13 * n31 * n44
                    + n11 * n33 * n44)
                    * det_inv,
                (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42
                    + n11 * n34 * n42
                    + n12 * n31 * n44
                    - n11 * n32 * n44)
                    * det_inv,
                (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42
                    - n12 * n31 * n43
                    + n11 * n32 * n43)
                    * det_inv,
                t13 * det_inv,
                (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43
                    + n11 * n24 * n43
                    + n13 * n21 * n44
                    - n11 * n23 * n44)
                    * det_inv,
                (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42
                    - n12 * n21 * n44
                    + n11 * n22 * n44)
                    * det_inv,
                (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42
                    + n11 * n23 * n42
                    + n12 * n21 * n43
                    - n11 * n22 * n43)
                    * det_inv,
                t14 * det_inv,
                (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33
                    - n13 * n21 * n34
                    + n11 * n23 * n34)
                    * det_inv,
                (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32
                    + n11 * n24 * n32
                    + n12 * n21 * n34
                    - n11 * n22 * n34)
                    * det_inv,
                (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32
                    - n12 * n21 * n33
                    + n11 * n22 * n33)
                    * det_inv,
            ],
        }
    }

    /// Scales the first three columns by the components of `v`.
    pub fn scale(&self, v: Vector3) -> Self {
        let mut te = self.elements;
        for (col, s) in [v.x, v.y, v.z].into_iter().enumerate() {
            for e in &mut te[col * 4..col * 4 + 4] {
                *e *= s;
            }
        }
        Self { elements: te }
    }

    /// Largest basis column length.
    pub fn max_scale_on_axis(&self) -> f64 {
        let (x, y, z) = self.extract_basis();
        x.length_squared()
            .max(y.length_squared())
            .max(z.length_squared())
            .sqrt()
    }

    /// Translation by `(x, y, z)`.
    #[inline]
    pub const fn make_translation(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            1.0, 0.0, 0.0, x,
            0.0, 1.0, 0.0, y,
            0.0, 0.0, 1.0, z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation by `theta` radians around X.
    pub fn make_rotation_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation by `theta` radians around Y.
    pub fn make_rotation_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation by `theta` radians around Z.
    pub fn make_rotation_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation by `angle` radians around the normalized `axis`.
    pub fn make_rotation_axis(axis: Vector3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (tx, ty) = (t * x, t * y);

        Self::new(
            tx * x + c, tx * y - s * z, tx * z + s * y, 0.0,
            tx * y + s * z, ty * y + c, ty * z - s * x, 0.0,
            tx * z - s * y, ty * z + s * x, t * z * z + c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Scale by `(x, y, z)`.
    #[inline]
    pub const fn make_scale(x: f64, y: f64, z: f64) -> Self {
        Self::new(
            x, 0.0, 0.0, 0.0,
            0.0, y, 0.0, 0.0,
            0.0, 0.0, z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Shear matrix. `xy` shears x by y, and so on.
    pub const fn make_shear(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        Self::new(
            1.0, yx, zx, 0.0,
            xy, 1.0, zy, 0.0,
            xz, yz, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Builds `T * R * S` from a position, a unit quaternion and a scale.
    pub fn compose(position: Vector3, quaternion: Quaternion, scale: Vector3) -> Self {
        let Quaternion { x, y, z, w } = quaternion;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Self {
            elements: [
                (1.0 - (yy + zz)) * sx,
                (xy + wz) * sx,
                (xz - wy) * sx,
                0.0,
                (xy - wz) * sy,
                (1.0 - (xx + zz)) * sy,
                (yz + wx) * sy,
                0.0,
                (xz + wy) * sz,
                (yz - wx) * sz,
                (1.0 - (xx + yy)) * sz,
                0.0,
                position.x,
                position.y,
                position.z,
                1.0,
            ],
        }
    }

    /// Splits an affine matrix into position, rotation and scale.
    ///
    /// Scale is the length of each basis column. When the determinant is
    /// negative the x scale is negated, so a single reflection is always
    /// attributed to the x axis whichever axis it was applied to. Zero scale
    /// on any axis leaves no rotation to recover, so the quaternion is
    /// identity.
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let te = &self.elements;

        let mut sx = Vector3::new(te[0], te[1], te[2]).length();
        let sy = Vector3::new(te[4], te[5], te[6]).length();
        let sz = Vector3::new(te[8], te[9], te[10]).length();

        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let position = Vector3::new(te[12], te[13], te[14]);

        let quaternion = if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            debug!("Matrix4::decompose with zero scale, rotation is identity");
            Quaternion::IDENTITY
        } else {
            let rotation = self.scale(Vector3::new(1.0 / sx, 1.0 / sy, 1.0 / sz));
            Quaternion::from_rotation_matrix(&rotation)
        };

        (position, quaternion, Vector3::new(sx, sy, sz))
    }

    /// Off-center perspective frustum projection.
    pub fn make_perspective(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);

        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        Self::new(
            x, 0.0, a, 0.0,
            0.0, y, b, 0.0,
            0.0, 0.0, c, d,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Symmetric perspective projection from a vertical field of view in
    /// radians and an aspect ratio.
    pub fn perspective(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = (std::f64::consts::FRAC_PI_2 - fov * 0.5).tan();
        let range_inv = 1.0 / (near - far);

        Self::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (near + far) * range_inv, near * far * range_inv * 2.0,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Orthographic projection of the given box.
    pub fn make_orthographic(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let p = 1.0 / (far - near);

        let x = (right + left) * w;
        let y = (top + bottom) * h;
        let z = (far + near) * p;

        Self::new(
            2.0 * w, 0.0, 0.0, -x,
            0.0, 2.0 * h, 0.0, -y,
            0.0, 0.0, -2.0 * p, -z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Transforms a point, including the perspective divide.
    #[inline]
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        v.apply_matrix4(self)
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
    pub const fn from_array(elements: [f64; 16]) -> Self {
        Self { elements }
    }

    /// Column-major copy of the elements.
    #[inline]
    pub const fn to_array(&self) -> [f64; 16] {
        self.elements
    }

    /// Column-major elements narrowed to `f32` for uniform upload.
    #[inline]
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.elements.map(|e| e as f32)
    }

    /// Reads sixteen column-major values from `array` at `offset`.
    pub fn from_slice(array: &[f64], offset: usize) -> Result<Self> {
        check_slice(Self::LEN, offset, array.len())?;
        let mut elements = [0.0; 16];
        elements.copy_from_slice(&array[offset..offset + Self::LEN]);
        Ok(Self { elements })
    }

    /// Writes the sixteen column-major values into `array` at `offset`.
    pub fn write_to_slice(&self, array: &mut [f64], offset: usize) -> Result<()> {
        check_slice(Self::LEN, offset, array.len())?;
        array[offset..offset + Self::LEN].copy_from_slice(&self.elements);
        Ok(())
    }

    /// Converts to glam DMat4 (same column-major layout).
    #[inline]
    pub fn to_glam(&self) -> glam::DMat4 {
        glam::DMat4::from_cols_array(&self.elements)
    }

    /// Creates from glam DMat4.
    #[inline]
    pub fn from_glam(m: glam::DMat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(rhs)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<f64> for Matrix4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.multiply_scalar(rhs)
    }
}

impl MulAssign for Matrix4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl From<glam::DMat4> for Matrix4 {
    #[inline]
    fn from(m: glam::DMat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Matrix4> for glam::DMat4 {
    #[inline]
    fn from(m: Matrix4) -> glam::DMat4 {
        m.to_glam()
    }
}

crate::approx_impl::impl_approx_elements!(Matrix4);
