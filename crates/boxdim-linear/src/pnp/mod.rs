//! Perspective-n-Point (PnP) solvers for camera pose estimation.
//!
//! Includes:
//! - DLT (linear) pose estimation with normalization.
//! - EPnP (control-point formulation) for 4+ points.
//!
//! All methods estimate a pose `T_C_W`: transform from world coordinates into
//! the camera frame.

use anyhow::Result;
use boxdim_core::{CameraIntrinsics, Iso3, Pt2, Pt3};

mod dlt;
mod epnp;
mod pose_utils;

pub use dlt::dlt;
pub use epnp::epnp;
pub use pose_utils::{all_in_front, reprojection_rms};

/// Closed-form PnP solvers.
#[derive(Debug, Clone, Copy)]
pub struct PnpSolver;

impl PnpSolver {
    /// Direct linear PnP on all points.
    ///
    /// `world` are 3D points in world coordinates, `image` are their pixel
    /// positions, and `k` are the camera intrinsics. Uses a normalized DLT
    /// solve and projects the rotation onto SO(3).
    pub fn dlt(world: &[Pt3], image: &[Pt2], k: &CameraIntrinsics) -> Result<Iso3> {
        dlt::dlt(world, image, k)
    }

    /// EPnP pose estimation for 4+ points.
    ///
    /// Uses a control-point formulation derived from the covariance of the
    /// 3D points. Returns a single pose estimate in `T_C_W` form.
    pub fn epnp(world: &[Pt3], image: &[Pt2], k: &CameraIntrinsics) -> Result<Iso3> {
        epnp::epnp(world, image, k)
    }

    /// Every closed-form candidate that could be computed, tagged with the
    /// solver name. Solver failures are logged and skipped.
    pub fn candidates(
        world: &[Pt3],
        image: &[Pt2],
        k: &CameraIntrinsics,
    ) -> Vec<(&'static str, Iso3)> {
        let solvers: [(&'static str, fn(&[Pt3], &[Pt2], &CameraIntrinsics) -> Result<Iso3>); 2] =
            [("dlt", dlt::dlt), ("epnp", epnp::epnp)];

        let mut out = Vec::with_capacity(solvers.len());
        for (name, solve) in solvers {
            match solve(world, image, k) {
                Ok(pose) => out.push((name, pose)),
                Err(err) => log::debug!("{name} failed: {err}"),
            }
        }
        out
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use boxdim_core::rotation_angle_between;

    #[test]
    fn candidates_contain_both_solvers() {
        let (world, image, gt) = test_scene::box_scene();
        let k = test_scene::intrinsics();
        let cands = PnpSolver::candidates(&world, &image, &k);
        let names: Vec<&str> = cands.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["dlt", "epnp"]);
        for (name, pose) in &cands {
            let dt = (pose.translation.vector - gt.translation.vector).norm();
            assert!(dt < 1e-3 * 2000.0, "{name}: translation error {dt}");
            assert!(rotation_angle_between(pose, &gt) < 1e-3);
        }
    }

    #[test]
    fn candidates_skip_failed_solvers() {
        let k = test_scene::intrinsics();
        let world = vec![Pt3::origin(); 3];
        let image = vec![Pt2::origin(); 3];
        assert!(PnpSolver::candidates(&world, &image, &k).is_empty());
    }
}
