//! 4-wide f32 lanes for the quickmath kernel
//!
//! Every vectorized formula in the kernel is written once against [`F32x4`].
//! Two implementations of that type exist:
//!
//! - [`backend::scalar::F32x4`] - plain `[f32; 4]`, always compiled
//! - `backend::sse::F32x4` - `__m128` intrinsics, compiled when the `simd`
//!   feature is on and the target has SSE
//!
//! The crate root re-exports whichever one is active. Both produce
//! bit-identical results for every operation, including the horizontal sum,
//! which always adds `(l0 + l1) + (l2 + l3)`.

pub mod backend;

#[cfg(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
))]
pub use backend::sse::F32x4;

#[cfg(not(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
)))]
pub use backend::scalar::F32x4;

/// Build a lane selector for [`F32x4::shuffle`].
///
/// Output lane `i` takes input lane `li`. The encoding is the one used by
/// `_mm_shuffle_ps`, so `shuffle_mask(3, 2, 1, 0)` reverses the lanes.
#[inline]
pub const fn shuffle_mask(l0: u32, l1: u32, l2: u32, l3: u32) -> i32 {
    ((l0 & 3) | ((l1 & 3) << 2) | ((l2 & 3) << 4) | ((l3 & 3) << 6)) as i32
}
