//! Single-camera pose refinement by pixel reprojection error.
//!
//! The parameter vector is a packed pose (see [`crate::params::pose_se3`]);
//! intrinsics and 3D points are fixed. Residuals are `projected - observed`
//! for every correspondence, `u` then `v`.

use crate::params::pose_se3::{iso3_to_se3_dvec, se3_dvec_to_iso3, POSE_DIM};
use crate::{NllsProblem, NllsSolverBackend, SolveOptions, SolveReport};
use anyhow::{ensure, Result};
use boxdim_core::{CameraIntrinsics, Iso3, Pt2, Pt3, Real};
use nalgebra::{DVector, Translation3, UnitQuaternion, Vector3};

/// Observations for a single view: 3D model points and their pixels.
#[derive(Debug, Clone)]
pub struct PoseRefineProblem {
    intrinsics: CameraIntrinsics,
    world: Vec<Pt3>,
    image: Vec<Pt2>,
}

impl PoseRefineProblem {
    pub fn new(intrinsics: CameraIntrinsics, world: Vec<Pt3>, image: Vec<Pt2>) -> Result<Self> {
        ensure!(
            world.len() == image.len(),
            "3D / 2D point counts must match ({} vs {})",
            world.len(),
            image.len()
        );
        ensure!(
            world.len() >= 3,
            "pose refinement needs at least 3 points, got {}",
            world.len()
        );
        intrinsics.validate()?;
        Ok(Self {
            intrinsics,
            world,
            image,
        })
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

impl NllsProblem for PoseRefineProblem {
    fn num_params(&self) -> usize {
        POSE_DIM
    }

    fn num_residuals(&self) -> usize {
        2 * self.world.len()
    }

    fn residuals(&self, x: &DVector<Real>) -> DVector<Real> {
        let rot = UnitQuaternion::from_scaled_axis(Vector3::new(x[0], x[1], x[2]));
        let pose = Iso3::from_parts(Translation3::new(x[3], x[4], x[5]), rot);
        let k = &self.intrinsics;

        let mut r = DVector::zeros(self.num_residuals());
        for (i, (pw, uv)) in self.world.iter().zip(&self.image).enumerate() {
            // No depth check: a point on the camera plane yields a non-finite
            // residual, which the backend treats as a failed evaluation.
            let pc = pose.transform_point(pw);
            r[2 * i] = k.fx * pc.x / pc.z + k.cx - uv.x;
            r[2 * i + 1] = k.fy * pc.y / pc.z + k.cy - uv.y;
        }
        r
    }
}

/// Refine `initial` (`T_C_W`) by minimising pixel reprojection error.
///
/// Returns the refined pose together with the backend report; the caller
/// decides what to do with a non-converged result.
pub fn refine_pose<B: NllsSolverBackend>(
    backend: &B,
    problem: &PoseRefineProblem,
    initial: &Iso3,
    opts: &SolveOptions,
) -> Result<(Iso3, SolveReport)> {
    let (x_opt, report) = backend.solve(problem, iso3_to_se3_dvec(initial), opts);
    let pose = se3_dvec_to_iso3(x_opt.as_view())?;
    Ok((pose, report))
}
