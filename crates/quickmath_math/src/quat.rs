//! Rotation quaternion
//!
//! Stored as `(x, y, z, w)` with `w` the scalar part. Rotations compose with
//! the Hamilton product: `a * b` applies `b` first, then `a`.

use bytemuck::{Pod, Zeroable};
use quickmath_simd::{shuffle_mask, F32x4};
use serde::{Deserialize, Serialize};

use crate::error::{as_fixed, as_fixed_mut};
use crate::{deg_to_rad, BufferSizeError, Mat4, MathBackend, StdMath, Vec3};

const WWWW: i32 = shuffle_mask(3, 3, 3, 3);
const XXXX: i32 = shuffle_mask(0, 0, 0, 0);
const YYYY: i32 = shuffle_mask(1, 1, 1, 1);
const ZZZZ: i32 = shuffle_mask(2, 2, 2, 2);
const WZYX: i32 = shuffle_mask(3, 2, 1, 0);
const ZWXY: i32 = shuffle_mask(2, 3, 0, 1);
const YXWZ: i32 = shuffle_mask(1, 0, 3, 2);

/// Above this `|dot|` the endpoints are treated as coincident
const SLERP_LERP_THRESHOLD: f32 = 1.0 - 1e-6;

/// Quaternion with vector part `(x, y, z)` and scalar part `w`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The no-op rotation `(0, 0, 0, 1)`
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    fn lanes(self) -> F32x4 {
        F32x4::new(self.x, self.y, self.z, self.w)
    }

    #[inline]
    fn from_lanes(l: F32x4) -> Self {
        let [x, y, z, w] = l.to_array();
        Self { x, y, z, w }
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

    pub fn try_load(buf: &[f32]) -> Result<Self, BufferSizeError> {
        as_fixed(buf).map(Self::load)
    }

    pub fn try_store(self, out: &mut [f32]) -> Result<(), BufferSizeError> {
        self.store(as_fixed_mut(out)?);
        Ok(())
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// 4D dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.lanes().dot(other.lanes())
    }

    /// Multiply every component by `s`
    #[inline]
    pub fn scale(self, s: f32) -> Self {
        self * s
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_with::<StdMath>()
    }

    #[inline]
    pub fn length_with<B: MathBackend>(self) -> f32 {
        B::sqrt(self.dot(self))
    }

    /// Scale to unit length, or zero if the length is exactly zero
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
            Self::new(0.0, 0.0, 0.0, 0.0)
        }
    }

    /// Negate the vector part
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, `conjugate / |q|^2`
    #[inline]
    pub fn inverse(self) -> Self {
        self.conjugate() * (1.0 / self.dot(self))
    }

    /// Spherical interpolation from `self` (`a = 0`) to `other` (`a = 1`)
    ///
    /// Takes whichever arc the raw dot product describes, so it may go the
    /// long way round. Identical endpoints divide by `sin(0)` and give NaN.
    /// See [`slerp_shortest`](Self::slerp_shortest).
    #[inline]
    pub fn slerp(self, other: Self, a: f32) -> Self {
        self.slerp_with::<StdMath>(other, a)
    }

    pub fn slerp_with<B: MathBackend>(self, other: Self, a: f32) -> Self {
        let angle = B::acos(self.dot(other));
        let s = 1.0 / B::sin(angle);
        (self * B::sin((1.0 - a) * angle) + other * B::sin(a * angle)) * s
    }

    /// Spherical interpolation along the shorter arc
    ///
    /// Flips `self` when the endpoints lie in opposite hemispheres and falls
    /// back to a normalized lerp when they nearly coincide.
    #[inline]
    pub fn slerp_shortest(self, other: Self, a: f32) -> Self {
        self.slerp_shortest_with::<StdMath>(other, a)
    }

    pub fn slerp_shortest_with<B: MathBackend>(self, other: Self, a: f32) -> Self {
        let mut from = self;
        let mut d = from.dot(other);
        if d < 0.0 {
            from = -from;
            d = -d;
        }

        if d > SLERP_LERP_THRESHOLD {
            return (from * (1.0 - a) + other * a).normalize_with::<B>();
        }

        let angle = B::acos(d);
        let s = 1.0 / B::sin(angle);
        (from * B::sin((1.0 - a) * angle) + other * B::sin(a * angle)) * s
    }

    /// Rotation of `angle` degrees around `axis` (normalized here)
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_axis_angle_with::<StdMath>(axis, angle)
    }

    pub fn from_axis_angle_with<B: MathBackend>(axis: Vec3, angle: f32) -> Self {
        let half = deg_to_rad(angle * 0.5);
        let s = B::sin(half);
        let axis = axis.normalize_with::<B>();
        Self::new(axis.x * s, axis.y * s, axis.z * s, B::cos(half))
    }

    /// Rotation from Euler angles in degrees, `Rz * Ry * Rx`
    ///
    /// Converts to the same rotation as [`Mat4::rotate_euler`].
    #[inline]
    pub fn from_euler(angles: Vec3) -> Self {
        Self::from_euler_with::<StdMath>(angles)
    }

    pub fn from_euler_with<B: MathBackend>(angles: Vec3) -> Self {
        let (hx, hy, hz) = (
            deg_to_rad(angles.x) * 0.5,
            deg_to_rad(angles.y) * 0.5,
            deg_to_rad(angles.z) * 0.5,
        );
        let (sx, cx) = (B::sin(hx), B::cos(hx));
        let (sy, cy) = (B::sin(hy), B::cos(hy));
        let (sz, cz) = (B::sin(hz), B::cos(hz));

        let p = F32x4::new(sx, cx, cx, cx) * F32x4::new(cy, sy, cy, cy) * F32x4::new(cz, cz, sz, cz);
        let q = F32x4::new(cx, sx, sx, sx) * F32x4::new(sy, cy, sy, sy) * F32x4::new(sz, sz, cz, sz);

        Self::from_lanes(p + q * F32x4::new(-1.0, 1.0, -1.0, 1.0))
    }

    /// Rotation matrix of a unit quaternion
    ///
    /// The input is not normalized first.
    pub fn to_mat4(self) -> Mat4 {
        let (x2, y2, z2) = (self.x + self.x, self.y + self.y, self.z + self.z);
        let (xx2, yy2, zz2) = (self.x * x2, self.y * y2, self.z * z2);
        let (xy2, xz2, yz2) = (self.x * y2, self.x * z2, self.y * z2);
        let (sx2, sy2, sz2) = (self.w * x2, self.w * y2, self.w * z2);

        let mut r = Mat4::IDENTITY;
        r.m[0][0] = 1.0 - (yy2 + zz2);
        r.m[0][1] = xy2 + sz2;
        r.m[0][2] = xz2 - sy2;

        r.m[1][0] = xy2 - sz2;
        r.m[1][1] = 1.0 - (xx2 + zz2);
        r.m[1][2] = yz2 + sx2;

        r.m[2][0] = xz2 + sy2;
        r.m[2][1] = yz2 - sx2;
        r.m[2][2] = 1.0 - (xx2 + yy2);
        r
    }
}

impl From<Quat> for Mat4 {
    #[inline]
    fn from(q: Quat) -> Self {
        q.to_mat4()
    }
}

impl From<[f32; 4]> for Quat {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl std::ops::Add for Quat {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() + other.lanes())
    }
}

impl std::ops::Sub for Quat {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_lanes(self.lanes() - other.lanes())
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    /// Hamilton product `self ⊗ other`
    #[inline]
    fn mul(self, other: Self) -> Self {
        let (a, b) = (self.lanes(), other.lanes());

        let r = a.shuffle::<WWWW>() * b
            + a.shuffle::<XXXX>() * F32x4::new(1.0, -1.0, 1.0, -1.0) * b.shuffle::<WZYX>()
            + a.shuffle::<YYYY>() * F32x4::new(1.0, 1.0, -1.0, -1.0) * b.shuffle::<ZWXY>()
            + a.shuffle::<ZZZZ>() * F32x4::new(-1.0, 1.0, 1.0, -1.0) * b.shuffle::<YXWZ>();
        Self::from_lanes(r)
    }
}

impl std::ops::Mul<f32> for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::from_lanes(self.lanes() * s)
    }
}

impl std::ops::Neg for Quat {
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

    fn quat_approx_eq(a: Quat, b: Quat) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat_approx_eq(a: &Mat4, b: &Mat4) -> bool {
        a.m.iter()
            .flatten()
            .zip(b.m.iter().flatten())
            .all(|(x, y)| approx_eq(*x, *y))
    }

    /// Hamilton product written out per component
    fn hamilton(a: Quat, b: Quat) -> Quat {
        Quat::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    #[test]
    fn test_identity_mul() {
        let q = Quat::new(0.1, -0.2, 0.3, 0.9);
        assert_eq!(q * Quat::IDENTITY, q);
        assert_eq!(Quat::IDENTITY * q, q);
    }

    #[test]
    fn test_mul_matches_component_formula() {
        let a = Quat::new(0.5, -1.0, 2.0, 0.25);
        let b = Quat::new(-0.75, 0.3, 1.5, -2.0);
        assert!(quat_approx_eq(a * b, hamilton(a, b)));
        assert!(quat_approx_eq(b * a, hamilton(b, a)));
    }

    #[test]
    fn test_basis_products() {
        let i = Quat::new(1.0, 0.0, 0.0, 0.0);
        let j = Quat::new(0.0, 1.0, 0.0, 0.0);
        let k = Quat::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quat::new(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn test_inverse() {
        let q = Quat::new(1.0, 2.0, -1.0, 3.0);
        assert!(quat_approx_eq(q * q.inverse(), Quat::IDENTITY));
        assert!(quat_approx_eq(q.inverse() * q, Quat::IDENTITY));
    }

    #[test]
    fn test_conjugate_of_unit_is_inverse() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 75.0);
        assert!(quat_approx_eq(q.conjugate(), q.inverse()));
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(0.0, 3.0, 0.0, 4.0).normalize();
        assert!(approx_eq(q.length(), 1.0));
        assert!(approx_eq(q.y, 0.6));
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize().length(), 0.0);
    }

    #[test]
    fn test_from_axis_angle() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 2.0), 180.0);
        assert!(quat_approx_eq(q, Quat::new(0.0, 0.0, 1.0, 0.0)));
        assert!(approx_eq(q.length(), 1.0));
    }

    #[test]
    fn test_to_mat4_matches_rotate() {
        let axis = Vec3::new(-1.0, 2.0, 0.5);
        for angle in [0.0, 30.0, 90.0, 135.0, -60.0] {
            let q = Quat::from_axis_angle(axis, angle);
            assert!(mat_approx_eq(&q.to_mat4(), &Mat4::rotate(axis, angle)));
        }
    }

    #[test]
    fn test_identity_to_mat4() {
        assert_eq!(Quat::IDENTITY.to_mat4(), Mat4::IDENTITY);
        assert_eq!(Mat4::from(Quat::IDENTITY), Mat4::IDENTITY);
    }

    #[test]
    fn test_mul_composes_like_matrices() {
        let a = Quat::from_axis_angle(Vec3::X, 40.0);
        let b = Quat::from_axis_angle(Vec3::Y, -25.0);
        assert!(mat_approx_eq(&(a * b).to_mat4(), &(a.to_mat4() * b.to_mat4())));
    }

    #[test]
    fn test_from_euler_matches_rotate_euler() {
        let angles = Vec3::new(20.0, -35.0, 110.0);
        let q = Quat::from_euler(angles);
        assert!(approx_eq(q.length(), 1.0));
        assert!(mat_approx_eq(&q.to_mat4(), &Mat4::rotate_euler(angles)));
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Z, 90.0);
        assert!(quat_approx_eq(a.slerp(b, 0.0), a));
        assert!(quat_approx_eq(a.slerp(b, 1.0), b));
        assert!(quat_approx_eq(a.slerp(b, 0.5), Quat::from_axis_angle(Vec3::Z, 45.0)));
    }

    #[test]
    fn test_slerp_same_endpoints_is_nan() {
        let r = Quat::IDENTITY.slerp(Quat::IDENTITY, 0.5);
        assert!(r.to_array().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_slerp_shortest_flips_hemisphere() {
        let a = Quat::from_axis_angle(Vec3::Z, 10.0);
        let b = Quat::from_axis_angle(Vec3::Z, 30.0);
        let mid = (-a).slerp_shortest(b, 0.5);
        assert!(quat_approx_eq(mid, Quat::from_axis_angle(Vec3::Z, 20.0)));
    }

    #[test]
    fn test_slerp_shortest_coincident() {
        let q = Quat::from_axis_angle(Vec3::Y, 10.0);
        let r = q.slerp_shortest(q, 0.3);
        assert!(quat_approx_eq(r, q));
    }

    #[test]
    fn test_load_store() {
        let q = Quat::load(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q.w, 4.0);
        let mut out = [0.0; 4];
        q.store(&mut out);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
        assert!(Quat::try_load(&out[..2]).is_err());
    }
}
