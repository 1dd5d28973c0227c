//! Lane implementations
//!
//! Each module provides a type named `F32x4` with the same inherent methods
//! and operator impls, so kernel code compiles against either one.

pub mod scalar;

#[cfg(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
))]
pub mod sse;
