//! 2D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{max_lane, min_lane, BufferSizeError, MathBackend, StdMath};

/// 2D Vector with x, y components
///
/// `w()`/`h()` read the same storage as width/height.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Create a new Vec2
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector with every component set to `val`
    #[inline]
    pub const fn splat(val: f32) -> Self {
        Self { x: val, y: val }
    }

    /// Copy from a flat buffer in x, y order
    #[inline]
    pub fn load(buf: &[f32; 2]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Copy into a flat buffer in x, y order
    #[inline]
    pub fn store(self, out: &mut [f32; 2]) {
        *out = bytemuck::cast(self);
    }

    /// [`load`](Self::load) from a slice that must hold exactly 2 floats
    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    /// [`store`](Self::store) into a slice that must hold exactly 2 floats
    pub fn try_store(self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    /// View the components as an array
    #[inline]
    pub fn as_array(&self) -> &[f32; 2] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Width (same storage as `x`)
    #[inline]
    pub fn w(self) -> f32 {
        self.x
    }

    /// Height (same storage as `y`)
    #[inline]
    pub fn h(self) -> f32 {
        self.y
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
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
        let len = self.length_with::<B>();
        if len != 0.0 {
            self * (1.0 / len)
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
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise division (unguarded)
    #[inline]
    pub fn component_div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(min_lane(self.x, other.x), min_lane(self.y, other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(max_lane(self.x, other.x), max_lane(self.y, other.y))
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from(a: [f32; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

impl From<Vec2> for [f32; 2] {
    #[inline]
    fn from(v: Vec2) -> Self {
        v.to_array()
    }
}

impl std::ops::Index<usize> for Vec2 {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.as_array()[i]
    }
}

impl std::ops::IndexMut<usize> for Vec2 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut bytemuck::cast_mut::<Self, [f32; 2]>(self)[i]
    }
}

// Operator overloads

impl std::ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl std::ops::Mul for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.component_mul(other)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl std::ops::Div for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, other: Self) -> Self {
        self.component_div(other)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
