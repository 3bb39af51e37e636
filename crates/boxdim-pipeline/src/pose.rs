//! Camera pose from the six classified vertices.
//!
//! The 3D model is a box with the measured pixel extents, origin at the
//! bottom vertex (see [`boxdim_core::VertexRole::model_point`]). Only the
//! ratios of the extents matter; the absolute scale of the recovered
//! translation follows the model units.

use crate::ReconstructError;
use boxdim_core::{CameraIntrinsics, ClassifiedVertices, Iso3, PixelDimensions, Pose, Pt2, Real};
use boxdim_linear::{all_in_front, reprojection_rms, PnpSolver};
use boxdim_optim::{refine_pose, LmBackend, PoseRefineProblem, SolveOptions, SolveReport};
use nalgebra::{linalg::SymmetricEigen, Matrix2};
use serde::{Deserialize, Serialize};

/// Image scatter below this fraction of its principal spread counts as a line.
const COLLINEAR_RATIO: Real = 1e-9;

/// Refined pose with diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseEstimate {
    pub pose: Pose,
    /// Closed-form solver that seeded the refinement.
    pub initializer: String,
    /// Pixel reprojection RMS of the refined pose.
    pub reprojection_rms: Real,
    pub solver: SolveReport,
}

/// Iterative PnP: closed-form initialisation, then Levenberg-Marquardt.
#[derive(Debug, Clone)]
pub struct PoseEstimator {
    intrinsics: CameraIntrinsics,
    options: SolveOptions,
}

fn failed(msg: impl Into<String>) -> ReconstructError {
    ReconstructError::PoseEstimationFailed(msg.into())
}

/// True if the points spread in one direction only (or not at all).
fn is_collinear(points: &[Pt2]) -> bool {
    let n = points.len() as Real;
    let mean = points.iter().fold(Pt2::origin().coords, |acc, p| acc + p.coords) / n;
    let cov = points.iter().fold(Matrix2::zeros(), |acc, p| {
        let d = p.coords - mean;
        acc + d * d.transpose()
    }) / n;
    let vals = SymmetricEigen::new(cov).eigenvalues;
    let max = vals.x.abs().max(vals.y.abs());
    let min = vals.x.abs().min(vals.y.abs());
    max <= Real::EPSILON || min <= COLLINEAR_RATIO * max
}

impl PoseEstimator {
    pub fn new(intrinsics: CameraIntrinsics, options: SolveOptions) -> Self {
        Self {
            intrinsics,
            options,
        }
    }

    pub fn estimate(
        &self,
        vertices: &ClassifiedVertices,
        dims: &PixelDimensions,
    ) -> Result<PoseEstimate, ReconstructError> {
        for (name, value) in [
            ("width", dims.width),
            ("height", dims.height),
            ("tall", dims.tall),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(failed(format!(
                    "box model {name} must be positive and finite, got {value}"
                )));
            }
        }

        let image = vertices.in_model_order();
        if is_collinear(&image) {
            return Err(failed("image points are collinear"));
        }
        let world = dims.model_points();
        let k = &self.intrinsics;

        let (initializer, init, init_rms) = PnpSolver::candidates(&world, &image, k)
            .into_iter()
            .filter_map(|(name, pose)| {
                if !all_in_front(&pose, &world) {
                    log::warn!("{name} initial pose puts the box behind the camera");
                    return None;
                }
                reprojection_rms(k, &pose, &world, &image).map(|rms| (name, pose, rms))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .ok_or_else(|| failed("no closed-form initial pose keeps the box in front"))?;
        log::debug!("initial pose from {initializer}, reprojection rms {init_rms:.3}px");

        let problem = PoseRefineProblem::new(*k, world.to_vec(), image.to_vec())
            .map_err(|e| failed(format!("{e:#}")))?;
        let (refined, report): (Iso3, SolveReport) =
            refine_pose(&LmBackend, &problem, &init, &self.options)
                .map_err(|e| failed(format!("{e:#}")))?;

        let pose = Pose::from_isometry(&refined);
        if !pose.is_finite() {
            return Err(failed("refined pose is not finite"));
        }
        if !report.converged {
            return Err(failed(format!(
                "refinement did not converge ({})",
                report.termination
            )));
        }
        if !all_in_front(&refined, &world) {
            return Err(failed("refined pose puts the box behind the camera"));
        }
        let rms = reprojection_rms(k, &refined, &world, &image)
            .ok_or_else(|| failed("refined pose does not project every vertex"))?;
        log::debug!(
            "refined pose after {} evaluations, reprojection rms {rms:.3}px",
            report.iterations
        );

        Ok(PoseEstimate {
            pose,
            initializer: initializer.to_string(),
            reprojection_rms: rms,
            solver: report,
        })
    }
}
