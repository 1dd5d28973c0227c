//! Linear algebra kernel for games and graphics
//!
//! Small fixed-size value types with pure, value-in/value-out operations.
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - float vectors
//! - [`Mat3`], [`Mat4`] - column-major matrices (`m[col][row]`)
//! - [`Quat`] - rotation quaternion, `w` is the scalar part
//! - [`BBox2`], [`BBox3`] - axis-aligned bounding boxes
//!
//! ## Conventions
//!
//! - Matrices multiply column vectors: `(a * b) * v == a * (b * v)`.
//! - Angles passed to rotation and projection builders are in degrees.
//! - Degenerate inputs (singular matrices, zero-extent boxes, coincident
//!   slerp endpoints) propagate IEEE infinities and NaNs. The only guard is
//!   `normalize`, which returns zero for an exactly zero-length input.
//! - Functions that need `sqrt`/`sin`/`cos`/`tan`/`acos` have a `*_with`
//!   variant generic over [`MathBackend`]; the plain variant uses [`StdMath`].
//!
//! 4-wide operations on [`Vec4`], [`Mat4`] and [`Quat`] go through
//! [`quickmath_simd::F32x4`], which is SSE-backed when available.

mod backend;
mod error;
mod vec2;
mod vec3;
mod vec4;
pub mod mat3;
pub mod mat4;
mod quat;
pub mod bbox;

pub use backend::{deg_to_rad, rad_to_deg, MathBackend, StdMath};
pub use error::BufferSizeError;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use bbox::{BBox2, BBox3};

/// Name of the lane implementation the 4-wide operations compiled against
pub const SIMD_BACKEND: &str = quickmath_simd::F32x4::BACKEND;

/// `a < b ? a : b`, the same selection MINPS makes
#[inline]
pub(crate) fn min_lane(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

/// `a > b ? a : b`, the same selection MAXPS makes
#[inline]
pub(crate) fn max_lane(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}
