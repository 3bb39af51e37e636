//! From edge mask to role-tagged vertices in original-image pixels.
//!
//! - [`extract_vertices`]: polygon corners of the outer shapes in a mask.
//! - [`classify_vertices`]: positional role assignment of exactly six points.
//! - [`adjust_to_original`]: crop-local to original-image translation.

mod adjust;
mod classify;
mod extract;
pub mod polygon;

pub use adjust::adjust_to_original;
pub use classify::{classify_vertices, HEXAGON_VERTICES};
pub use extract::extract_vertices;
