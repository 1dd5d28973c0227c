//! 4x4 matrix for 3D transforms and projections
//!
//! Storage is column-major, `m[col][row]`, and matrices multiply column
//! vectors. Each column is handled as one [`F32x4`], so products, sums and
//! the transpose run four lanes at a time.
//!
//! Builders follow OpenGL conventions: right-handed view space looking down
//! -Z, clip-space depth in `[-1, 1]`.

use bytemuck::{Pod, Zeroable};
use quickmath_simd::{shuffle_mask, F32x4};
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{deg_to_rad, BufferSizeError, Mat3, MathBackend, StdMath, Vec3, Vec4};

const XXXX: i32 = shuffle_mask(0, 0, 0, 0);
const YYYY: i32 = shuffle_mask(1, 1, 1, 1);
const ZZZZ: i32 = shuffle_mask(2, 2, 2, 2);
const WWWW: i32 = shuffle_mask(3, 3, 3, 3);

/// 4x4 column-major matrix
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Identity matrix
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from four columns
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            m: [c0.to_array(), c1.to_array(), c2.to_array(), c3.to_array()],
        }
    }

    #[inline]
    fn cols(&self) -> [F32x4; 4] {
        self.m.map(F32x4::from_array)
    }

    #[inline]
    fn from_lanes(cols: [F32x4; 4]) -> Self {
        Self {
            m: cols.map(F32x4::to_array),
        }
    }

    /// Column `i`
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::from(self.m[i])
    }

    /// Row `i`
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i])
    }

    /// Load 16 floats in column-major order
    #[inline]
    pub fn load(buf: &[f32; 16]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Load 16 floats in row-major order
    #[inline]
    pub fn load_row_major(buf: &[f32; 16]) -> Self {
        Self::load(buf).transpose()
    }

    /// Store as 16 floats in column-major order
    #[inline]
    pub fn store(&self, out: &mut [f32; 16]) {
        *out = self.to_cols_array();
    }

    /// Store as 16 floats in row-major order
    #[inline]
    pub fn store_row_major(&self, out: &mut [f32; 16]) {
        *out = self.to_rows_array();
    }

    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    pub fn try_load_row_major(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load_row_major)
    }

    pub fn try_store(&self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    pub fn try_store_row_major(&self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store_row_major(as_fixed_mut(out)?);
        Ok(())
    }

    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }

    #[inline]
    pub fn to_rows_array(&self) -> [f32; 16] {
        self.transpose().to_cols_array()
    }

    /// `self * c` for a single column
    #[inline]
    fn mul_column(&self, c: F32x4) -> F32x4 {
        let [c0, c1, c2, c3] = self.cols();
        c0 * c.shuffle::<XXXX>()
            + c1 * c.shuffle::<YYYY>()
            + c2 * c.shuffle::<ZZZZ>()
            + c3 * c.shuffle::<WWWW>()
    }

    /// Matrix-vector product (column vector on the right)
    #[inline]
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        Vec4::from_lanes(self.mul_column(v.lanes()))
    }

    /// Transform a point: applies the matrix to `(x, y, z, 1)` and drops w
    ///
    /// No perspective divide is performed.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(p.extend(1.0)).truncate()
    }

    /// Swap rows and columns
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_lanes(F32x4::transpose4(self.cols()))
    }

    /// Cofactor inverse
    ///
    /// A singular matrix produces infinities or NaNs.
    pub fn inverse(&self) -> Self {
        let [[a, b, c, d], [e, f, g, h], [i, j, k, l], [m, n, o, p]] = self.m;
        let mut r = [[0.0f32; 4]; 4];

        let t = [
            k * p - o * l,
            j * p - n * l,
            j * o - n * k,
            i * p - m * l,
            i * o - m * k,
            i * n - m * j,
        ];
        r[0][0] = f * t[0] - g * t[1] + h * t[2];
        r[1][0] = -(e * t[0] - g * t[3] + h * t[4]);
        r[2][0] = e * t[1] - f * t[3] + h * t[5];
        r[3][0] = -(e * t[2] - f * t[4] + g * t[5]);

        r[0][1] = -(b * t[0] - c * t[1] + d * t[2]);
        r[1][1] = a * t[0] - c * t[3] + d * t[4];
        r[2][1] = -(a * t[1] - b * t[3] + d * t[5]);
        r[3][1] = a * t[2] - b * t[4] + c * t[5];

        let t = [
            g * p - o * h,
            f * p - n * h,
            f * o - n * g,
            e * p - m * h,
            e * o - m * g,
            e * n - m * f,
        ];
        r[0][2] = b * t[0] - c * t[1] + d * t[2];
        r[1][2] = -(a * t[0] - c * t[3] + d * t[4]);
        r[2][2] = a * t[1] - b * t[3] + d * t[5];
        r[3][2] = -(a * t[2] - b * t[4] + c * t[5]);

        let t = [
            g * l - k * h,
            f * l - j * h,
            f * k - j * g,
            e * l - i * h,
            e * k - i * g,
            e * j - i * f,
        ];
        r[0][3] = -(b * t[0] - c * t[1] + d * t[2]);
        r[1][3] = a * t[0] - c * t[3] + d * t[4];
        r[2][3] = -(a * t[1] - b * t[3] + d * t[5]);
        r[3][3] = a * t[2] - b * t[4] + c * t[5];

        let det = 1.0 / (a * r[0][0] + b * r[1][0] + c * r[2][0] + d * r[3][0]);
        let adj = Self { m: r };
        Self::from_lanes(adj.cols().map(|col| col * det))
    }

    /// Translation by `t`
    pub fn translate(t: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[3][0] = t.x;
        r.m[3][1] = t.y;
        r.m[3][2] = t.z;
        r
    }

    /// Non-uniform scale along the axes
    pub fn scale(s: Vec3) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = s.x;
        r.m[1][1] = s.y;
        r.m[2][2] = s.z;
        r
    }

    /// Rotation of `angle` degrees around `axis` (normalized here)
    ///
    /// Counter-clockwise when looking down the axis toward the origin.
    #[inline]
    pub fn rotate(axis: Vec3, angle: f32) -> Self {
        Self::rotate_with::<StdMath>(axis, angle)
    }

    pub fn rotate_with<B: MathBackend>(axis: Vec3, angle: f32) -> Self {
        let rad = deg_to_rad(angle);
        let (s, c) = (B::sin(rad), B::cos(rad));
        let c2 = 1.0 - c;
        let Vec3 { x, y, z } = axis.normalize_with::<B>();

        let mut r = Self::IDENTITY;
        r.m[0][0] = x * x * c2 + c;
        r.m[0][1] = x * y * c2 + z * s;
        r.m[0][2] = x * z * c2 - y * s;

        r.m[1][0] = y * x * c2 - z * s;
        r.m[1][1] = y * y * c2 + c;
        r.m[1][2] = y * z * c2 + x * s;

        r.m[2][0] = z * x * c2 + y * s;
        r.m[2][1] = z * y * c2 - x * s;
        r.m[2][2] = z * z * c2 + c;
        r
    }

    /// Rotation from Euler angles in degrees, `Rz * Ry * Rx`
    ///
    /// X is applied first, Z last.
    #[inline]
    pub fn rotate_euler(angles: Vec3) -> Self {
        Self::rotate_euler_with::<StdMath>(angles)
    }

    pub fn rotate_euler_with<B: MathBackend>(angles: Vec3) -> Self {
        let (rx, ry, rz) = (
            deg_to_rad(angles.x),
            deg_to_rad(angles.y),
            deg_to_rad(angles.z),
        );
        let (sx, cx) = (B::sin(rx), B::cos(rx));
        let (sy, cy) = (B::sin(ry), B::cos(ry));
        let (sz, cz) = (B::sin(rz), B::cos(rz));

        let mut r = Self::IDENTITY;
        r.m[0][0] = cy * cz;
        r.m[0][1] = cy * sz;
        r.m[0][2] = -sy;

        r.m[1][0] = sx * sy * cz - cx * sz;
        r.m[1][1] = sx * sy * sz + cx * cz;
        r.m[1][2] = sx * cy;

        r.m[2][0] = cx * sy * cz + sx * sz;
        r.m[2][1] = cx * sy * sz - sx * cz;
        r.m[2][2] = cx * cy;
        r
    }

    /// The upper-left 3x3 block (rotation and scale part)
    pub fn top_left(&self) -> Mat3 {
        let m = &self.m;
        Mat3 {
            m: [
                [m[0][0], m[0][1], m[0][2]],
                [m[1][0], m[1][1], m[1][2]],
                [m[2][0], m[2][1], m[2][2]],
            ],
        }
    }

    /// Perspective projection
    ///
    /// `fov` is the full vertical field of view in degrees.
    #[inline]
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::perspective_with::<StdMath>(fov, aspect, near, far)
    }

    pub fn perspective_with<B: MathBackend>(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let scale = B::tan(deg_to_rad(fov * 0.5)) * near;
        let right = aspect * scale;
        let top = scale;

        let mut r = Self::ZERO;
        r.m[0][0] = near / right;
        r.m[1][1] = near / top;
        r.m[2][2] = -(far + near) / (far - near);
        r.m[3][2] = -2.0 * far * near / (far - near);
        r.m[2][3] = -1.0;
        r
    }

    /// Orthographic projection of the given view box
    pub fn orthographic(left: f32, right: f32, bot: f32, top: f32, near: f32, far: f32) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = 2.0 / (right - left);
        r.m[1][1] = 2.0 / (top - bot);
        r.m[2][2] = 2.0 / (near - far);

        r.m[3][0] = (left + right) / (left - right);
        r.m[3][1] = (bot + top) / (bot - top);
        r.m[3][2] = (near + far) / (near - far);
        r
    }

    /// View matrix for a camera at `pos` facing along `dir`
    ///
    /// `dir` is expected to be unit length. The basis rows are
    /// `r = normalize(up x dir)`, `u = dir x r` and `-dir`.
    #[inline]
    pub fn look(pos: Vec3, dir: Vec3, up: Vec3) -> Self {
        Self::look_with::<StdMath>(pos, dir, up)
    }

    pub fn look_with<B: MathBackend>(pos: Vec3, dir: Vec3, up: Vec3) -> Self {
        let r = up.cross(dir).normalize_with::<B>();
        let u = dir.cross(r);

        let mut rud = Self::IDENTITY;
        rud.m[0][0] = r.x;
        rud.m[1][0] = r.y;
        rud.m[2][0] = r.z;

        rud.m[0][1] = u.x;
        rud.m[1][1] = u.y;
        rud.m[2][1] = u.z;

        rud.m[0][2] = -dir.x;
        rud.m[1][2] = -dir.y;
        rud.m[2][2] = -dir.z;

        rud * Self::translate(-pos)
    }

    /// View matrix for a camera at `pos`, built with
    /// `dir = normalize(pos - target)`
    #[inline]
    pub fn lookat(pos: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::lookat_with::<StdMath>(pos, target, up)
    }

    pub fn lookat_with<B: MathBackend>(pos: Vec3, target: Vec3, up: Vec3) -> Self {
        let dir = (pos - target).normalize_with::<B>();
        Self::look_with::<B>(pos, dir, up)
    }
}

impl std::ops::Index<usize> for Mat4 {
    type Output = [f32; 4];
    #[inline]
    fn index(&self, col: usize) -> &[f32; 4] {
        &self.m[col]
    }
}

impl std::ops::IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, col: usize) -> &mut [f32; 4] {
        &mut self.m[col]
    }
}

impl std::ops::Add for Mat4 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let (a, b) = (self.cols(), other.cols());
        Self::from_lanes([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
    }
}

impl std::ops::Sub for Mat4 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        let (a, b) = (self.cols(), other.cols());
        Self::from_lanes([a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]])
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;
    /// `self · other`: applies `other` first
    fn mul(self, other: Self) -> Self {
        Self::from_lanes(other.cols().map(|c| self.mul_column(c)))
    }
}

impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.mul_vec4(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.m.iter()
            .flatten()
            .zip(b.m.iter().flatten())
            .all(|(x, y)| approx_eq(*x, *y))
    }

    fn sample() -> Mat4 {
        Mat4::translate(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::rotate(Vec3::new(1.0, 1.0, 0.0), 40.0)
            * Mat4::scale(Vec3::new(2.0, 0.5, 1.5))
    }

    #[test]
    fn test_identity() {
        let id = Mat4::identity();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(id[i][j], expected);
            }
        }
        assert_eq!(Mat4::default(), id);
    }

    #[test]
    fn test_identity_row_major_layout() {
        let mut out = [0.0; 16];
        Mat4::IDENTITY.store_row_major(&mut out);
        assert_eq!(
            out,
            [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_row_major_is_transpose() {
        let m = sample();
        let mut rows = [0.0; 16];
        m.store_row_major(&mut rows);
        assert_eq!(Mat4::load_row_major(&rows), m);
        assert_eq!(Mat4::load(&rows), m.transpose());
    }

    #[test]
    fn test_try_store_wrong_length() {
        let mut buf = [0.0; 9];
        let err = Mat4::IDENTITY.try_store(&mut buf).unwrap_err();
        assert_eq!(err.expected, 16);
        assert_eq!(err.actual, 9);
    }

    #[test]
    fn test_get_column() {
        let m = Mat4::translate(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.col(3), Vec4::new(4.0, 5.0, 6.0, 1.0));
        assert_eq!(m.row(0), Vec4::new(1.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_mul_identity() {
        let m = sample();
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn test_mul_composition() {
        let a = Mat4::rotate(Vec3::Z, 90.0);
        let b = Mat4::translate(Vec3::new(1.0, 0.0, 0.0));
        let v = Vec4::new(1.0, 0.0, 0.0, 1.0);

        let composed = (a * b) * v;
        let sequential = a * (b * v);
        assert!(approx_eq(composed.x, sequential.x));
        assert!(approx_eq(composed.y, sequential.y));
        // translate to (2,0,0), then rotate to (0,2,0)
        assert!(approx_eq(composed.x, 0.0));
        assert!(approx_eq(composed.y, 2.0));
    }

    #[test]
    fn test_mul_matches_scalar_formula() {
        let a = sample();
        let b = Mat4::rotate_euler(Vec3::new(10.0, 20.0, 30.0));
        let c = a * b;
        for col in 0..4 {
            for row in 0..4 {
                let expected: f32 = (0..4).map(|k| a.m[k][row] * b.m[col][k]).sum();
                assert!(approx_eq(c.m[col][row], expected));
            }
        }
    }

    #[test]
    fn test_add_sub() {
        let m = sample();
        assert_eq!(m + Mat4::ZERO, m);
        assert_eq!(m - m, Mat4::ZERO);
        assert_eq!((m + m).m[3][0], 2.0 * m.m[3][0]);
    }

    #[test]
    fn test_transpose_involution() {
        let m = sample();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m[1][3], m.m[3][1]);
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        assert!(mat_approx_eq(&(m * m.inverse()), &Mat4::IDENTITY));
        assert!(mat_approx_eq(&(m.inverse() * m), &Mat4::IDENTITY));
    }

    #[test]
    fn test_inverse_of_singular_is_not_finite() {
        let inv = Mat4::ZERO.inverse();
        assert!(inv.m.iter().flatten().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_translate_origin() {
        let t = Mat4::translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_scale() {
        let s = Mat4::scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s.transform_point(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotate_z_90() {
        let r = Mat4::rotate(Vec3::Z, 90.0);
        assert!(vec_approx_eq(r.transform_point(Vec3::X), Vec3::Y));
        assert!(vec_approx_eq(r.transform_point(Vec3::Y), -Vec3::X));
    }

    #[test]
    fn test_rotate_normalizes_axis() {
        let a = Mat4::rotate(Vec3::new(0.0, 5.0, 0.0), 30.0);
        let b = Mat4::rotate(Vec3::Y, 30.0);
        assert!(mat_approx_eq(&a, &b));
    }

    #[test]
    fn test_rotate_euler_matches_composition() {
        let angles = Vec3::new(15.0, -40.0, 70.0);
        let expected = Mat4::rotate(Vec3::Z, angles.z)
            * Mat4::rotate(Vec3::Y, angles.y)
            * Mat4::rotate(Vec3::X, angles.x);
        assert!(mat_approx_eq(&Mat4::rotate_euler(angles), &expected));
    }

    #[test]
    fn test_top_left() {
        let m = Mat4::rotate(Vec3::X, 25.0) * Mat4::translate(Vec3::new(9.0, 9.0, 9.0));
        let t = m.top_left();
        for c in 0..3 {
            for r in 0..3 {
                assert_eq!(t.m[c][r], m.m[c][r]);
            }
        }
    }

    #[test]
    fn test_perspective() {
        let p = Mat4::perspective(90.0, 2.0, 1.0, 10.0);
        assert!(approx_eq(p.m[0][0], 0.5));
        assert!(approx_eq(p.m[1][1], 1.0));
        assert!(approx_eq(p.m[2][2], -11.0 / 9.0));
        assert!(approx_eq(p.m[3][2], -20.0 / 9.0));
        assert_eq!(p.m[2][3], -1.0);
        assert_eq!(p.m[3][3], 0.0);

        // near plane maps to -1, far plane to +1 after the divide
        let near = p * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!(approx_eq(near.z / near.w, -1.0));
        assert!(approx_eq(far.z / far.w, 1.0));
    }

    #[test]
    fn test_orthographic() {
        let o = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 100.0);
        assert!(vec_approx_eq(
            o.transform_point(Vec3::new(2.0, 1.0, -0.1)),
            Vec3::new(1.0, 1.0, -1.0)
        ));
        assert!(vec_approx_eq(
            o.transform_point(Vec3::new(-2.0, -1.0, -100.0)),
            Vec3::new(-1.0, -1.0, 1.0)
        ));
    }

    #[test]
    fn test_look_moves_eye_to_origin() {
        let pos = Vec3::new(3.0, 4.0, 5.0);
        let view = Mat4::look(pos, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        assert!(vec_approx_eq(view.transform_point(pos), Vec3::ZERO));
    }

    #[test]
    fn test_look_basis_is_orthonormal() {
        let dir = Vec3::new(1.0, -0.5, 0.25).normalize();
        let view = Mat4::look(Vec3::ZERO, dir, Vec3::Y);
        let basis = view.top_left();
        let gram = basis * basis.transpose();
        for c in 0..3 {
            for r in 0..3 {
                let expected = if c == r { 1.0 } else { 0.0 };
                assert!(approx_eq(gram.m[c][r], expected));
            }
        }
        // the dir axis maps onto -Z
        assert!(vec_approx_eq(basis * dir, -Vec3::Z));
    }

    #[test]
    fn test_lookat_uses_pos_minus_target() {
        let pos = Vec3::new(0.0, 0.0, 5.0);
        let target = Vec3::ZERO;
        let a = Mat4::lookat(pos, target, Vec3::Y);
        let b = Mat4::look(pos, Vec3::Z, Vec3::Y);
        assert!(mat_approx_eq(&a, &b));
        assert!(vec_approx_eq(a.transform_point(pos), Vec3::ZERO));
    }
}
