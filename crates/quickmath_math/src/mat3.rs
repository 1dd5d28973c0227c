//! 3x3 matrix for 2D affine transforms
//!
//! Storage is column-major, `m[col][row]`. A Mat3 acting on `(x, y, 1)`
//! carries its translation in column 2.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{deg_to_rad, BufferSizeError, MathBackend, StdMath, Vec2, Vec3};

/// 3x3 column-major matrix
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Identity matrix
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from three columns
    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self {
            m: [[c0.x, c0.y, c0.z], [c1.x, c1.y, c1.z], [c2.x, c2.y, c2.z]],
        }
    }

    /// Column `i`
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::from(self.m[i])
    }

    /// Row `i`
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Load 9 floats in column-major order
    #[inline]
    pub fn load(buf: &[f32; 9]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Load 9 floats in row-major order
    #[inline]
    pub fn load_row_major(buf: &[f32; 9]) -> Self {
        Self::load(buf).transpose()
    }

    /// Store as 9 floats in column-major order
    #[inline]
    pub fn store(&self, out: &mut [f32; 9]) {
        *out = self.to_cols_array();
    }

    /// Store as 9 floats in row-major order
    #[inline]
    pub fn store_row_major(&self, out: &mut [f32; 9]) {
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
    pub fn to_cols_array(&self) -> [f32; 9] {
        bytemuck::cast(*self)
    }

    #[inline]
    pub fn to_rows_array(&self) -> [f32; 9] {
        self.transpose().to_cols_array()
    }

    /// Matrix-vector product (column vector on the right)
    #[inline]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        self.col(0) * v.x + self.col(1) * v.y + self.col(2) * v.z
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self {
            m: [
                [m[0][0], m[1][0], m[2][0]],
                [m[0][1], m[1][1], m[2][1]],
                [m[0][2], m[1][2], m[2][2]],
            ],
        }
    }

    /// Cofactor inverse
    ///
    /// A singular matrix produces infinities or NaNs.
    pub fn inverse(&self) -> Self {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.m;

        let mut r = [
            [e * i - f * h, -(b * i - h * c), b * f - e * c],
            [-(d * i - g * f), a * i - c * g, -(a * f - d * c)],
            [d * h - g * e, -(a * h - g * b), a * e - b * d],
        ];

        let det = 1.0 / (a * r[0][0] + b * r[1][0] + c * r[2][0]);
        for col in r.iter_mut() {
            for v in col.iter_mut() {
                *v *= det;
            }
        }
        Self { m: r }
    }

    /// 2D translation
    pub fn translate(t: Vec2) -> Self {
        let mut r = Self::IDENTITY;
        r.m[2][0] = t.x;
        r.m[2][1] = t.y;
        r
    }

    /// 2D scale
    pub fn scale(s: Vec2) -> Self {
        let mut r = Self::IDENTITY;
        r.m[0][0] = s.x;
        r.m[1][1] = s.y;
        r
    }

    /// 2D rotation by `angle` degrees
    ///
    /// Column 0 is `(cos, -sin)`, so positive angles turn +X toward -Y.
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        Self::rotate_with::<StdMath>(angle)
    }

    pub fn rotate_with<B: MathBackend>(angle: f32) -> Self {
        let rad = deg_to_rad(angle);
        let (s, c) = (B::sin(rad), B::cos(rad));

        let mut r = Self::IDENTITY;
        r.m[0][0] = c;
        r.m[1][0] = s;
        r.m[0][1] = -s;
        r.m[1][1] = c;
        r
    }
}

impl std::ops::Index<usize> for Mat3 {
    type Output = [f32; 3];
    #[inline]
    fn index(&self, col: usize) -> &[f32; 3] {
        &self.m[col]
    }
}

impl std::ops::IndexMut<usize> for Mat3 {
    #[inline]
    fn index_mut(&mut self, col: usize) -> &mut [f32; 3] {
        &mut self.m[col]
    }
}

impl std::ops::Add for Mat3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_cols(
            self.col(0) + other.col(0),
            self.col(1) + other.col(1),
            self.col(2) + other.col(2),
        )
    }
}

impl std::ops::Sub for Mat3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::from_cols(
            self.col(0) - other.col(0),
            self.col(1) - other.col(1),
            self.col(2) - other.col(2),
        )
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Self;
    /// `self · other`: applies `other` first
    fn mul(self, other: Self) -> Self {
        Self::from_cols(
            self.mul_vec3(other.col(0)),
            self.mul_vec3(other.col(1)),
            self.mul_vec3(other.col(2)),
        )
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.mul_vec3(v)
    }
}
