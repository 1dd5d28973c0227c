//! 4D Vector type
//!
//! Lane-wise operations run through [`F32x4`], so they take the SSE path
//! when it is compiled in.

use bytemuck::{Pod, Zeroable};
use quickmath_simd::F32x4;
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{BufferSizeError, MathBackend, StdMath, Vec3};

/// 4D Vector with x, y, z, w components
///
/// Also used as an RGBA color through `r()`, `g()`, `b()`, `a()`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Vector with every component set to `val`
    #[inline]
    pub const fn splat(val: f32) -> Self {
        Self { x: val, y: val, z: val, w: val }
    }

    #[inline]
    pub(crate) fn lanes(self) -> F32x4 {
        F32x4::new(self.x, self.y, self.z, self.w)
    }

    #[inline]
    pub(crate) fn from_lanes(l: F32x4) -> Self {
        Self::from(l.to_array())
    }

    /// Copy from a flat buffer in x, y, z, w order
    #[inline]
    pub fn load(buf: &[f32; 4]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Copy into a flat buffer in x, y, z, w order
    #[inline]
    pub fn store(self, out: &mut [f32; 4]) {
        *out = bytemuck::cast(self);
    }

    /// [`load`](Self::load) from a slice that must hold exactly 4 floats
    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    /// [`store`](Self::store) into a slice that must hold exactly 4 floats
    pub fn try_store(self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    /// View the components as an array
    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Drop the w component
    #[inline]
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn r(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn g(self) -> f32 {
        self.y
    }

    #[inline]
    pub fn b(self) -> f32 {
        self.z
    }

    #[inline]
    pub fn a(self) -> f32 {
        self.w
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.lanes().dot(other.lanes())
    }

    /// Length squared (no square root)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_with::<StdMath>()
    }

    #[inline]
    pub fn length_with<B: MathBackend>(self) -> f32 {
        B::sqrt(self.dot(self))
    }

    /// Normalize to unit length, or zero if the length is exactly zero
    #[inline]
    pub fn normalize(self) -> Self {
        self.normalize_with::<StdMath>()
    }

    pub fn normalize_with<B: MathBackend>(self) -> Self {
        let l = self.lanes();
        let len = B::sqrt(l.dot(l));
        if len != 0.0 {
            Self::from_lanes(l * (1.0 / len))
        } else {
            Self::ZERO
        }
    }

    /// Distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_with::<StdMath>(other)
    }

    #[inline]
    pub fn distance_with<B: MathBackend>(self, other: Self) -> f32 {
        (self - other).length_with::<B>()
    }

    /// Multiply every component by `s`
    #[inline]
    pub fn scale(self, s: f32) -> Self {
        self * s
    }

    /// Component-wise multiplication
    #[inline]
    pub fn component_mul(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() * other.lanes())
    }

    /// Component-wise division (unguarded)
    #[inline]
    pub fn component_div(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() / other.lanes())
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::from_lanes(self.lanes().min(other.lanes()))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::from_lanes(self.lanes().max(other.lanes()))
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl From<Vec4> for [f32; 4] {
    #[inline]
    fn from(v: Vec4) -> Self {
        v.to_array()
    }
}

impl std::ops::Index<usize> for Vec4 {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.as_array()[i]
    }
}

impl std::ops::IndexMut<usize> for Vec4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut bytemuck::cast_mut::<Self, [f32; 4]>(self)[i]
    }
}

// Operator overloads

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() + other.lanes())
    }
}

impl std::ops::AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() - other.lanes())
    }
}

impl std::ops::SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Mul for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.component_mul(other)
    }
}

impl std::ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::from_lanes(self.lanes() * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vec4 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl std::ops::Div for Vec4 {
    type Output = Self;
    #[inline]
    fn div(self, other: Self) -> Self {
        self.component_div(other)
    }
}

impl std::ops::Div<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::from_lanes(self.lanes() / F32x4::splat(scalar))
    }
}

impl std::ops::Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(-self.lanes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_lane_arithmetic() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(8.0, 7.0, 6.0, 5.0);
        assert_eq!(a + b, Vec4::splat(9.0));
        assert_eq!(b - a, Vec4::new(7.0, 5.0, 3.0, 1.0));
        assert_eq!(a * b, Vec4::new(8.0, 14.0, 18.0, 20.0));
        assert_eq!(b / a, Vec4::new(8.0, 3.5, 2.0, 1.25));
        assert_eq!(a * 2.0, Vec4::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(b / 2.0, Vec4::new(4.0, 3.5, 3.0, 2.5));
        assert_eq!(-a, Vec4::new(-1.0, -2.0, -3.0, -4.0));
    }

    #[test]
    fn test_dot() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a.dot(Vec4::ONE), 10.0);
        assert_eq!(a.dot(a), 30.0);
    }

    #[test]
    fn test_length() {
        let v = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(v.length(), 2.0);
    }

    #[test]
    fn test_normalize() {
        let v = Vec4::new(3.0, 0.0, 4.0, 0.0);
        let n = v.normalize();
        assert!(approx_eq(n.length(), 1.0));
        assert!(approx_eq(n.x, 0.6));
        assert!(approx_eq(n.z, 0.8));
        assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);
    }

    #[test]
    fn test_min_max_components() {
        let a = Vec4::new(1.0, 5.0, -2.0, 0.0);
        let b = Vec4::new(3.0, 2.0, -1.0, 0.0);
        assert_eq!(a.min_components(b), Vec4::new(1.0, 2.0, -2.0, 0.0));
        assert_eq!(a.max_components(b), Vec4::new(3.0, 5.0, -1.0, 0.0));
    }

    #[test]
    fn test_truncate_extend() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.truncate().extend(4.0), v);
    }

    #[test]
    fn test_color_aliases() {
        let c = Vec4::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0.1, 0.2, 0.3, 1.0));
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_lerp() {
        let a = Vec4::ZERO;
        let b = Vec4::new(2.0, 4.0, 6.0, 8.0);
        assert_eq!(a.lerp(b, 0.5), Vec4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_store_slice_length() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let mut buf = vec![0.0; 4];
        v.try_store(&mut buf).unwrap();
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            Vec4::try_load(&buf[..3]),
            Err(BufferSizeError { expected: 4, actual: 3 })
        );
    }
}
