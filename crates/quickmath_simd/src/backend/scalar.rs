//! Scalar fallback lanes

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Four f32 lanes stored as a plain array
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct F32x4([f32; 4]);

impl F32x4 {
    /// Name of this implementation
    pub const BACKEND: &'static str = "scalar";

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// All lanes set to `v`
    #[inline]
    pub fn splat(v: f32) -> Self {
        Self([v; 4])
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        Self(a)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        self.0
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let (a, b) = (self.0, other.0);
        Self([f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])])
    }

    /// Lane-wise `a < b ? a : b` (returns `other` when either lane is NaN, like MINPS)
    #[inline]
    pub fn min(self, other: Self) -> Self {
        self.zip_with(other, |a, b| if a < b { a } else { b })
    }

    /// Lane-wise `a > b ? a : b` (returns `other` when either lane is NaN, like MAXPS)
    #[inline]
    pub fn max(self, other: Self) -> Self {
        self.zip_with(other, |a, b| if a > b { a } else { b })
    }

    /// Horizontal sum, `(l0 + l1) + (l2 + l3)`
    #[inline]
    pub fn hsum(self) -> f32 {
        let a = self.0;
        (a[0] + a[1]) + (a[2] + a[3])
    }

    /// Lane-wise product followed by [`hsum`](Self::hsum)
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        (self * other).hsum()
    }

    /// Rearrange lanes according to a mask built with [`crate::shuffle_mask`]
    #[inline]
    pub fn shuffle<const MASK: i32>(self) -> Self {
        let m = MASK as usize;
        let a = self.0;
        Self([a[m & 3], a[(m >> 2) & 3], a[(m >> 4) & 3], a[(m >> 6) & 3]])
    }

    /// Transpose four lane vectors treated as the rows of a 4x4 block
    #[allow(clippy::needless_range_loop)]
    pub fn transpose4(rows: [Self; 4]) -> [Self; 4] {
        let mut out = [[0.0f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                out[j][i] = rows[i].0[j];
            }
        }
        out.map(Self)
    }
}

impl Add for F32x4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl Sub for F32x4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl Mul for F32x4 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a * b)
    }
}

impl Mul<f32> for F32x4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        self * Self::splat(scalar)
    }
}

impl Div for F32x4 {
    type Output = Self;
    #[inline]
    fn div(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a / b)
    }
}

impl Neg for F32x4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(|a| -a))
    }
}
