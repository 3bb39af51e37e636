//! Single-image box dimension estimation.
//!
//! Given a binary edge mask of a cropped box, the crop's position in the
//! original photograph, and the camera focal length, the pipeline
//!
//! 1. extracts the silhouette hexagon ([`extract_vertices`]),
//! 2. tags its six vertices with roles ([`classify_vertices`]),
//! 3. moves them into original-image pixels ([`adjust_to_original`]),
//! 4. measures the apparent extents ([`pixel_dimensions`]),
//! 5. solves the camera pose against a box model ([`PoseEstimator`]),
//! 6. intersects the bottom-vertex ray with the ground ([`ground_distance`]),
//! 7. scales the pixel extents by distance over focal length
//!    ([`metric_dimensions`]).
//!
//! # Example
//!
//! ```no_run
//! use boxdim_core::{BoundingBoxOffset, ImageSize};
//! use boxdim_pipeline::reconstruct;
//!
//! let mask = image::open("crop_edges.png").unwrap().to_luma8();
//! let dims = reconstruct(
//!     &mask,
//!     ImageSize::new(4032, 3024),
//!     BoundingBoxOffset::new(1210.0, 845.0),
//!     3094.0,
//!     3094.0,
//! )
//! .unwrap();
//! println!("{} x {} x {}", dims.width, dims.height, dims.tall);
//! ```

mod config;
mod error;
mod ground;
mod pixel_geometry;
mod pose;
mod reconstruct;
mod scale;
pub mod vertices;

pub use config::*;
pub use error::ReconstructError;
pub use ground::{ground_distance, GroundIntersection};
pub use pixel_geometry::pixel_dimensions;
pub use pose::{PoseEstimate, PoseEstimator};
pub use reconstruct::*;
pub use scale::{metric_dimensions, scale_dimensions};
pub use vertices::{adjust_to_original, classify_vertices, extract_vertices};
