//! Pose recovery and scoring utilities for PnP solvers.

use anyhow::{anyhow, bail, Result};
use boxdim_core::{CameraIntrinsics, Iso3, Mat3, Pt2, Pt3, Real, Vec3};
use nalgebra::{Isometry3, Rotation3, Translation3, UnitQuaternion};

/// Recover camera pose from corresponding world and camera-frame points.
///
/// Uses the Kabsch algorithm (SVD-based rotation alignment followed by
/// translation computation). Returns `T_C_W`: the transform from world
/// coordinates to camera coordinates.
pub(super) fn pose_from_points(world: &[Pt3], camera: &[Vec3]) -> Result<Iso3> {
    if world.len() != camera.len() || world.len() < 3 {
        bail!("need at least 3 matched world/camera points");
    }

    let n = world.len() as Real;
    let mut c_w = Vec3::zeros();
    let mut c_c = Vec3::zeros();
    for (pw, pc) in world.iter().zip(camera.iter()) {
        c_w += pw.coords;
        c_c += pc;
    }
    c_w /= n;
    c_c /= n;

    let mut h = Mat3::zeros();
    for (pw, pc) in world.iter().zip(camera.iter()) {
        h += (pc - c_c) * (pw.coords - c_w).transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.ok_or_else(|| anyhow!("svd failed in pose alignment"))?;
    let v_t = svd.v_t.ok_or_else(|| anyhow!("svd failed in pose alignment"))?;
    let mut r = u * v_t;
    if r.determinant() < 0.0 {
        let mut u_fix = u;
        u_fix.column_mut(2).neg_mut();
        r = u_fix * v_t;
    }

    let t = c_c - r * c_w;
    let rot = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r));
    Ok(Isometry3::from_parts(Translation3::from(t), rot))
}

/// True if every world point has positive depth under `camera_se3_world`.
pub fn all_in_front(camera_se3_world: &Iso3, world: &[Pt3]) -> bool {
    world
        .iter()
        .all(|pw| camera_se3_world.transform_point(pw).z > 0.0)
}

/// Root-mean-square pixel reprojection error.
///
/// Returns `None` if the inputs are empty, mismatched, or any point fails to
/// project.
pub fn reprojection_rms(
    k: &CameraIntrinsics,
    camera_se3_world: &Iso3,
    world: &[Pt3],
    image: &[Pt2],
) -> Option<Real> {
    if world.is_empty() || world.len() != image.len() {
        return None;
    }
    let mut sum_sq = 0.0;
    for (pw, uv) in world.iter().zip(image) {
        let proj = k.project_world(camera_se3_world, pw)?;
        sum_sq += (proj - uv).norm_squared();
    }
    Some((sum_sq / world.len() as Real).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnp::test_scene;

    #[test]
    fn kabsch_recovers_rigid_motion() {
        let gt = Iso3::from_parts(
            Translation3::new(1.0, -2.0, 5.0),
            Rotation3::from_euler_angles(0.3, -0.2, 0.9).into(),
        );
        let world = vec![
            Pt3::new(0.0, 0.0, 0.0),
            Pt3::new(1.0, 0.0, 0.0),
            Pt3::new(0.0, 2.0, 0.0),
            Pt3::new(0.0, 0.0, 3.0),
        ];
        let camera: Vec<Vec3> = world.iter().map(|p| gt.transform_point(p).coords).collect();
        let est = pose_from_points(&world, &camera).unwrap();
        assert!((est.translation.vector - gt.translation.vector).norm() < 1e-9);
        assert!(est.rotation.angle_to(&gt.rotation) < 1e-9);
    }

    #[test]
    fn reprojection_rms_is_zero_for_exact_pose() {
        let (world, image, pose) = test_scene::box_scene();
        let k = test_scene::intrinsics();
        let rms = reprojection_rms(&k, &pose, &world, &image).unwrap();
        assert!(rms < 1e-6, "rms={rms}");
        assert!(all_in_front(&pose, &world));
    }

    #[test]
    fn reprojection_rms_rejects_points_behind() {
        let (world, image, pose) = test_scene::box_scene();
        let k = test_scene::intrinsics();
        let flipped = Iso3::from_parts(
            Translation3::from(-pose.translation.vector),
            pose.rotation,
        );
        assert!(!all_in_front(&flipped, &world));
        assert!(reprojection_rms(&k, &flipped, &world, &image).is_none());
        assert!(reprojection_rms(&k, &pose, &world[..2], &image).is_none());
    }
}
