use crate::ReconstructError;
use boxdim_core::{CameraIntrinsics, Pose, Pt2, Pt3, Real, Vec3};
use serde::{Deserialize, Serialize};

/// Relative tolerance below which the bottom ray counts as parallel to the
/// ground plane.
const PARALLEL_TOLERANCE: Real = 1e-9;

/// Where the camera ray through the bottom vertex meets the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundIntersection {
    /// Camera center in the box-local frame.
    pub camera_center: Pt3,
    /// Intersection with the `z = 0` plane, box-local frame.
    pub ground_point: Pt3,
    /// Camera-to-ground-point distance, in model units.
    pub distance: Real,
}

/// Intersect the ray through `bottom` (original-image pixels) with the
/// ground plane `z = 0` of the box-local frame and measure its length.
pub fn ground_distance(
    pose: &Pose,
    bottom: &Pt2,
    intrinsics: &CameraIntrinsics,
) -> Result<GroundIntersection, ReconstructError> {
    let r_t = pose.rotation_matrix().transpose();
    let n = intrinsics.pixel_to_normalized(bottom);
    let p_c = Vec3::new(n.x, n.y, 1.0);

    let p_w = r_t * (p_c - pose.tvec);
    let c_w = r_t * (Vec3::zeros() - pose.tvec);
    let dir = p_w - c_w;

    if !dir.iter().chain(c_w.iter()).all(|v| v.is_finite()) {
        return Err(ReconstructError::DegenerateGeometry(
            "bottom ray is not finite".into(),
        ));
    }
    if dir.z.abs() <= PARALLEL_TOLERANCE * dir.norm() {
        return Err(ReconstructError::DegenerateGeometry(
            "bottom ray is parallel to the ground plane".into(),
        ));
    }

    let k = -c_w.z / dir.z;
    if !k.is_finite() || k <= 0.0 {
        return Err(ReconstructError::DegenerateGeometry(format!(
            "bottom ray meets the ground plane behind the camera (k={k})"
        )));
    }

    let ground = c_w + dir * k;
    let distance = Vec3::new(c_w.x - ground.x, c_w.y - ground.y, c_w.z).norm();
    log::debug!("ground hit at k={k:.4}, distance {distance:.4}");

    Ok(GroundIntersection {
        camera_center: Pt3::from(c_w),
        ground_point: Pt3::from(ground),
        distance,
    })
}
