//! SSE lanes
//!
//! Only compiled when `target_feature = "sse"` is enabled at build time, so the
//! intrinsics below are always available on the running CPU.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Four f32 lanes in an `__m128`
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl F32x4 {
    /// Name of this implementation
    pub const BACKEND: &'static str = "sse";

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        unsafe { Self(_mm_setr_ps(x, y, z, w)) }
    }

    /// All lanes set to `v`
    #[inline]
    pub fn splat(v: f32) -> Self {
        unsafe { Self(_mm_set1_ps(v)) }
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        unsafe { Self(_mm_loadu_ps(a.as_ptr())) }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    /// Lane-wise `a < b ? a : b` (MINPS)
    #[inline]
    pub fn min(self, other: Self) -> Self {
        unsafe { Self(_mm_min_ps(self.0, other.0)) }
    }

    /// Lane-wise `a > b ? a : b` (MAXPS)
    #[inline]
    pub fn max(self, other: Self) -> Self {
        unsafe { Self(_mm_max_ps(self.0, other.0)) }
    }

    /// Horizontal sum, `(l0 + l1) + (l2 + l3)`
    #[inline]
    pub fn hsum(self) -> f32 {
        unsafe {
            // (l1, l0, l3, l2)
            let swapped = _mm_shuffle_ps::<0b10_11_00_01>(self.0, self.0);
            let pairs = _mm_add_ps(self.0, swapped);
            let high = _mm_movehl_ps(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(pairs, high))
        }
    }

    /// Lane-wise product followed by [`hsum`](Self::hsum)
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        (self * other).hsum()
    }

    /// Rearrange lanes according to a mask built with [`crate::shuffle_mask`]
    #[inline]
    pub fn shuffle<const MASK: i32>(self) -> Self {
        unsafe { Self(_mm_shuffle_ps::<MASK>(self.0, self.0)) }
    }

    /// Transpose four lane vectors treated as the rows of a 4x4 block
    #[inline]
    pub fn transpose4(rows: [Self; 4]) -> [Self; 4] {
        unsafe {
            let t0 = _mm_unpacklo_ps(rows[0].0, rows[1].0);
            let t1 = _mm_unpackhi_ps(rows[0].0, rows[1].0);
            let t2 = _mm_unpacklo_ps(rows[2].0, rows[3].0);
            let t3 = _mm_unpackhi_ps(rows[2].0, rows[3].0);
            [
                Self(_mm_movelh_ps(t0, t2)),
                Self(_mm_movehl_ps(t2, t0)),
                Self(_mm_movelh_ps(t1, t3)),
                Self(_mm_movehl_ps(t3, t1)),
            ]
        }
    }
}

impl Default for F32x4 {
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
    }
}

impl PartialEq for F32x4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F32x4").field(&self.to_array()).finish()
    }
}

impl Add for F32x4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        unsafe { Self(_mm_add_ps(self.0, other.0)) }
    }
}

impl Sub for F32x4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        unsafe { Self(_mm_sub_ps(self.0, other.0)) }
    }
}

impl Mul for F32x4 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        unsafe { Self(_mm_mul_ps(self.0, other.0)) }
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
        unsafe { Self(_mm_div_ps(self.0, other.0)) }
    }
}

impl Neg for F32x4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        // flip the sign bit so that -(+0.0) is -0.0
        unsafe { Self(_mm_xor_ps(self.0, _mm_set1_ps(-0.0))) }
    }
}
