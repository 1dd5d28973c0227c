//! Numeric function provider
//!
//! The kernel never calls `f32::sqrt` and friends directly. It goes through a
//! [`MathBackend`] chosen at compile time, so callers can plug in their own
//! implementations (a `no_std` math library, a deterministic software
//! implementation, ...) without touching the formulas.

use std::f32::consts::PI;

/// Source of the transcendental functions used by the kernel
pub trait MathBackend {
    fn sqrt(x: f32) -> f32;
    fn sin(x: f32) -> f32;
    fn cos(x: f32) -> f32;
    fn tan(x: f32) -> f32;
    fn acos(x: f32) -> f32;
}

/// The standard library's float functions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StdMath;

impl MathBackend for StdMath {
    #[inline]
    fn sqrt(x: f32) -> f32 {
        x.sqrt()
    }

    #[inline]
    fn sin(x: f32) -> f32 {
        x.sin()
    }

    #[inline]
    fn cos(x: f32) -> f32 {
        x.cos()
    }

    #[inline]
    fn tan(x: f32) -> f32 {
        x.tan()
    }

    #[inline]
    fn acos(x: f32) -> f32 {
        x.acos()
    }
}

const DEG_TO_RAD: f32 = PI / 180.0;
const RAD_TO_DEG: f32 = 180.0 / PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    /// Evaluates everything in f64 and rounds back
    struct WideMath;

    impl MathBackend for WideMath {
        fn sqrt(x: f32) -> f32 {
            (x as f64).sqrt() as f32
        }
        fn sin(x: f32) -> f32 {
            (x as f64).sin() as f32
        }
        fn cos(x: f32) -> f32 {
            (x as f64).cos() as f32
        }
        fn tan(x: f32) -> f32 {
            (x as f64).tan() as f32
        }
        fn acos(x: f32) -> f32 {
            (x as f64).acos() as f32
        }
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_deg_rad_round_trip() {
        assert!(approx_eq(deg_to_rad(180.0), PI));
        assert!(approx_eq(deg_to_rad(90.0), PI / 2.0));
        assert!(approx_eq(rad_to_deg(PI), 180.0));
        assert!(approx_eq(rad_to_deg(deg_to_rad(37.5)), 37.5));
    }

    #[test]
    fn test_backends_agree() {
        for x in [0.0f32, 0.25, 0.5, 0.9, 1.0] {
            assert!(approx_eq(StdMath::sqrt(x), WideMath::sqrt(x)));
            assert!(approx_eq(StdMath::sin(x), WideMath::sin(x)));
            assert!(approx_eq(StdMath::cos(x), WideMath::cos(x)));
            assert!(approx_eq(StdMath::tan(x), WideMath::tan(x)));
            assert!(approx_eq(StdMath::acos(x), WideMath::acos(x)));
        }
    }

    #[test]
    fn test_custom_backend_drives_kernel() {
        use crate::Vec3;

        let v = Vec3::new(3.0, 4.0, 12.0);
        assert!(approx_eq(v.length_with::<WideMath>(), 13.0));
        assert!(approx_eq(v.normalize_with::<WideMath>().length(), 1.0));
    }
}
