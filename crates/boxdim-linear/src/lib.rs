//! Closed-form pose initialisation for `boxdim`.
//!
//! The solvers here estimate a camera pose `T_C_W` from 2D-3D
//! correspondences without iteration. They are used to seed the non-linear
//! refinement in `boxdim-optim`.
//!
//! - [`PnpSolver::dlt`]: normalized Direct Linear Transform, 6+ points.
//! - [`PnpSolver::epnp`]: control-point EPnP, 4+ points.

pub mod math;
pub mod pnp;

pub use pnp::*;
