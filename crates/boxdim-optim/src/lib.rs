//! Non-linear pose refinement for `boxdim`.
//!
//! The crate separates the least-squares problem ([`NllsProblem`]) from the
//! solver backend ([`NllsSolverBackend`]); [`LmBackend`] drives
//! `levenberg-marquardt`. [`problems::pose_refine`] minimises the pixel
//! reprojection error of a single camera pose.

mod backend_lm;
pub mod params;
pub mod problems;
mod traits;

pub use backend_lm::LmBackend;
pub use problems::pose_refine::{refine_pose, PoseRefineProblem};
pub use traits::*;
