//! quickmath - vector, matrix, quaternion and bounding-box math
//!
//! The numeric kernel lives in [`quickmath_math`] and is re-exported here.
//! On top of it this crate adds:
//!
//! - [`cli`] - command-line arguments for the export binary
//! - [`config`] - layered TOML/environment configuration
//! - [`camera`] - a yaw/pitch camera producing view and projection matrices
//! - [`export`] - flattening matrices for shaders and other tools

pub mod camera;
pub mod cli;
pub mod config;
pub mod export;

pub use quickmath_math::*;
