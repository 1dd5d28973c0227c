//! Axis-aligned bounding boxes
//!
//! A box starts out as [`BBox3::EMPTY`] (`min = +inf`, `max = -inf`) and grows
//! through unions. The sentinel is absorbed by the first union, so a box is
//! only meaningful once at least one point or box has been added.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{BufferSizeError, Vec2, Vec3};

/// 2D axis-aligned bounding box
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct BBox2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for BBox2 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BBox2 {
    /// The box that contains nothing
    pub const EMPTY: Self = Self {
        min: Vec2::splat(f32::INFINITY),
        max: Vec2::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Same as [`BBox2::EMPTY`]
    #[inline]
    pub const fn initialized() -> Self {
        Self::EMPTY
    }

    /// Load 4 floats: min then max
    #[inline]
    pub fn load(buf: &[f32; 4]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Store as 4 floats: min then max
    #[inline]
    pub fn store(&self, out: &mut [f32; 4]) {
        *out = bytemuck::cast(*self);
    }

    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    pub fn try_store(&self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    /// Smallest box holding both boxes
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min_components(other.min),
            max: self.max.max_components(other.max),
        }
    }

    #[inline]
    pub fn union_in_place(&mut self, other: Self) {
        *self = self.union(other);
    }

    /// Smallest box holding this box and a point
    #[inline]
    pub fn union_point(self, p: Vec2) -> Self {
        Self {
            min: self.min.min_components(p),
            max: self.max.max_components(p),
        }
    }

    #[inline]
    pub fn union_point_in_place(&mut self, p: Vec2) {
        *self = self.union_point(p);
    }

    /// `max - min`
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn centroid(&self) -> Vec2 {
        (self.max + self.min) * 0.5
    }

    /// Position of `p` relative to the box, `(0, 0)` at min and `(1, 1)` at max
    ///
    /// Unguarded: a zero-extent axis divides by zero.
    #[inline]
    pub fn offset(&self, p: Vec2) -> Vec2 {
        (p - self.min) / self.extent()
    }

    #[inline]
    pub fn perimeter(&self) -> f32 {
        let e = self.extent();
        2.0 * (e.x + e.y)
    }
}

/// 3D axis-aligned bounding box
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct BBox3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BBox3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BBox3 {
    /// The box that contains nothing
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Same as [`BBox3::EMPTY`]
    #[inline]
    pub const fn initialized() -> Self {
        Self::EMPTY
    }

    /// Load 6 floats: min then max
    #[inline]
    pub fn load(buf: &[f32; 6]) -> Self {
        bytemuck::cast(*buf)
    }

    /// Store as 6 floats: min then max
    #[inline]
    pub fn store(&self, out: &mut [f32; 6]) {
        *out = bytemuck::cast(*self);
    }

    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    pub fn try_store(&self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    /// Smallest box holding both boxes
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min_components(other.min),
            max: self.max.max_components(other.max),
        }
    }

    #[inline]
    pub fn union_in_place(&mut self, other: Self) {
        *self = self.union(other);
    }

    /// Smallest box holding this box and a point
    #[inline]
    pub fn union_point(self, p: Vec3) -> Self {
        Self {
            min: self.min.min_components(p),
            max: self.max.max_components(p),
        }
    }

    #[inline]
    pub fn union_point_in_place(&mut self, p: Vec3) {
        *self = self.union_point(p);
    }

    /// `max - min`
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.max + self.min) * 0.5
    }

    /// Position of `p` relative to the box, zero at min and one at max
    ///
    /// Unguarded: a zero-extent axis divides by zero.
    #[inline]
    pub fn offset(&self, p: Vec3) -> Vec3 {
        (p - self.min) / self.extent()
    }

    #[inline]
    pub fn surface_area(&self) -> f32 {
        let e = self.extent();
        2.0 * (e.x * e.y + e.x * e.z + e.y * e.z)
    }
}

impl FromIterator<Vec3> for BBox3 {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::union_point)
    }
}

impl FromIterator<Vec2> for BBox2 {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::union_point)
    }
}
