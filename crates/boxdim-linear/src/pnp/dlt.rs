//! Direct Linear Transform (DLT) solver for camera pose estimation.
//!
//! Provides a linear least-squares solution to the PnP problem using
//! homogeneous equations. The rotation matrix is projected onto SO(3)
//! via SVD decomposition.

use crate::math::{mat34_from_svd_row, normalize_points_3d, smallest_singular_index};
use anyhow::{anyhow, bail, Result};
use boxdim_core::{CameraIntrinsics, Iso3, Pt2, Pt3, Real};
use nalgebra::{DMatrix, Isometry3, Rotation3, Translation3, UnitQuaternion};

/// Direct linear PnP on all input points.
///
/// `world` are 3D points in world coordinates, `image` are their pixel
/// positions, and `k` are the camera intrinsics. Uses a normalized DLT
/// solve and projects the rotation onto SO(3).
///
/// Returns `T_C_W`: the transform from world to camera coordinates.
pub fn dlt(world: &[Pt3], image: &[Pt2], k: &CameraIntrinsics) -> Result<Iso3> {
    let n = world.len();
    if n < 6 || image.len() != n {
        bail!("need at least 6 point correspondences, got {}", n);
    }
    k.validate()?;

    let (world_norm, t_world) = normalize_points_3d(world)
        .ok_or_else(|| anyhow!("degenerate 3d point configuration for normalization"))?;

    // Build 2n x 12 DLT matrix for camera matrix P = [R | t] in normalized coords.
    let mut a = DMatrix::<Real>::zeros(2 * n, 12);

    for (i, (pw, pi)) in world_norm.iter().zip(image.iter()).enumerate() {
        let (x, y, z) = (pw.x, pw.y, pw.z);
        let uv = k.pixel_to_normalized(pi);
        let (u, v) = (uv.x, uv.y);

        let r0 = 2 * i;
        let r1 = 2 * i + 1;

        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = z;
        a[(r0, 3)] = 1.0;
        a[(r0, 8)] = -u * x;
        a[(r0, 9)] = -u * y;
        a[(r0, 10)] = -u * z;
        a[(r0, 11)] = -u;

        a[(r1, 4)] = x;
        a[(r1, 5)] = y;
        a[(r1, 6)] = z;
        a[(r1, 7)] = 1.0;
        a[(r1, 8)] = -v * x;
        a[(r1, 9)] = -v * y;
        a[(r1, 10)] = -v * z;
        a[(r1, 11)] = -v;
    }

    // Solve A p = 0 via SVD: take the singular vector for the smallest singular value.
    let svd = a.svd(false, true);
    let v_t = svd.v_t.ok_or_else(|| anyhow!("svd failed in PnP DLT"))?;
    let row = smallest_singular_index(&svd.singular_values);
    let p_mtx =
        mat34_from_svd_row(&v_t, row).ok_or_else(|| anyhow!("unexpected svd shape in PnP DLT"))?;

    // De-normalize 3D points: P = P_norm * T_world.
    let p_mtx = p_mtx * t_world;

    let mut r_approx = p_mtx.fixed_view::<3, 3>(0, 0).into_owned();

    // Normalise scale using average row norm; the sign makes det(R) positive.
    let mut s = (r_approx.row(0).norm() + r_approx.row(1).norm() + r_approx.row(2).norm()) / 3.0;
    if r_approx.determinant() < 0.0 {
        s = -s;
    }
    if s.abs() <= Real::EPSILON {
        bail!("degenerate camera matrix in PnP DLT");
    }
    r_approx /= s;

    // Project onto SO(3).
    let svd = r_approx.svd(true, true);
    let u = svd.u.ok_or_else(|| anyhow!("svd failed in PnP DLT"))?;
    let v_t = svd.v_t.ok_or_else(|| anyhow!("svd failed in PnP DLT"))?;
    let mut r_orth = u * v_t;
    if r_orth.determinant() < 0.0 {
        let mut u_flipped = u;
        u_flipped.column_mut(2).neg_mut();
        r_orth = u_flipped * v_t;
    }

    // Translation is the last column, scaled consistently with rotation.
    let t = p_mtx.column(3).into_owned() / s;

    let rot = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r_orth));
    Ok(Isometry3::from_parts(Translation3::from(t), rot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnp::test_scene;
    use boxdim_core::rotation_angle_between;

    #[test]
    fn dlt_recovers_pose_synthetic() {
        let (world, image, iso_gt) = test_scene::grid_scene();
        let k = CameraIntrinsics::new(800.0, 780.0, 640.0, 360.0);

        let est = dlt(&world, &image, &k).unwrap();

        let dt = (est.translation.vector - iso_gt.translation.vector).norm();
        let ang = rotation_angle_between(&est, &iso_gt);
        assert!(dt < 1e-3, "translation error too large: {}", dt);
        assert!(ang < 1e-3, "rotation error too large: {}", ang);
    }

    #[test]
    fn dlt_recovers_box_corner_view() {
        let (world, image, iso_gt) = test_scene::box_scene();
        let k = test_scene::intrinsics();

        // The six silhouette corners alone are enough.
        let est = dlt(&world[..6], &image[..6], &k).unwrap();

        let center_gt = iso_gt.inverse().translation.vector;
        let center = est.inverse().translation.vector;
        assert!(
            (center - center_gt).norm() < 1e-3,
            "camera center {center} vs {center_gt}"
        );
        assert!(rotation_angle_between(&est, &iso_gt) < 1e-5);
    }

    #[test]
    fn dlt_rejects_too_few_points() {
        let (world, image, _) = test_scene::box_scene();
        let k = test_scene::intrinsics();
        assert!(dlt(&world[..5], &image[..5], &k).is_err());
        assert!(dlt(&world[..6], &image[..5], &k).is_err());
    }
}
