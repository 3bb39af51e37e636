//! Core math and geometry primitives for `boxdim`.
//!
//! This crate provides the building blocks shared by the other workspace
//! crates:
//!
//! - linear algebra type aliases (`Real`, `Vec2`, `Pt3`, and friends),
//! - a distortion-free pinhole camera ([`CameraIntrinsics`]),
//! - the data model of a single-image box reconstruction
//!   ([`ClassifiedVertices`], [`PixelDimensions`], [`Pose`], ...),
//! - deterministic synthetic box views for tests.
//!
//! # Example
//!
//! ```
//! use boxdim_core::{CameraIntrinsics, ImageSize, Pt2};
//!
//! let k = CameraIntrinsics::centered(4777.7, 4777.7, ImageSize::new(1920, 1080));
//! let n = k.pixel_to_normalized(&Pt2::new(960.0, 540.0));
//! assert_eq!(n.norm(), 0.0);
//! ```

/// Pinhole camera model.
mod camera;
/// Linear algebra type aliases and helpers.
mod math;
/// Deterministic synthetic data generation helpers.
pub mod synthetic;
/// Reconstruction data model.
mod types;

pub use camera::*;
pub use math::*;
pub use types::*;
