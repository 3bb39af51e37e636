//! Deterministic synthetic scenes.
//!
//! Helpers for building a box of known size, placing a pinhole camera at a
//! known pose and projecting the silhouette vertices. Used by workspace tests
//! to exercise the reconstruction without real photographs.
//!
//! # Example
//!
//! ```
//! use boxdim_core::{synthetic::box_view::{self, SyntheticBox}, CameraIntrinsics};
//!
//! let k = CameraIntrinsics::new(4777.7, 4777.7, 960.0, 540.0);
//! let cuboid = SyntheticBox::new(200.0, 150.0, 100.0);
//! let pose = box_view::corner_view_pose(&cuboid, 2000.0).unwrap();
//! let hexagon = box_view::project_box(&k, &pose, &cuboid).unwrap();
//! assert!(hexagon.top.y < hexagon.bottom.y);
//! ```

pub mod box_view;
