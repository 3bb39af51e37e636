//! EPnP (Efficient Perspective-n-Point) solver for camera pose estimation.
//!
//! Implements Lepetit's control-point formulation for 4+ points. Uses
//! eigen decomposition of the world point covariance to define a minimal
//! basis, then solves for control point positions in the camera frame.

use super::pose_utils::pose_from_points;
use crate::math::smallest_singular_index;
use anyhow::{anyhow, bail, Result};
use boxdim_core::{CameraIntrinsics, Iso3, Mat3, Pt2, Pt3, Real, Vec3};
use nalgebra::{linalg::SymmetricEigen, DMatrix};

/// EPnP pose estimation for 4+ points.
///
/// Uses a control-point formulation derived from the covariance of the
/// 3D points. Returns a single pose estimate in `T_C_W` form.
pub fn epnp(world: &[Pt3], image: &[Pt2], k: &CameraIntrinsics) -> Result<Iso3> {
    let n = world.len();
    if n < 4 || image.len() != n {
        bail!("need at least 4 point correspondences, got {}", n);
    }
    k.validate()?;

    let img_norm: Vec<_> = image.iter().map(|p| k.pixel_to_normalized(p)).collect();

    let centroid = world.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords) / n as Real;

    let mut cov = Mat3::zeros();
    for p in world {
        let d = p.coords - centroid;
        cov += d * d.transpose();
    }
    cov /= n as Real;

    let eig = SymmetricEigen::new(cov);
    let axes = eig.eigenvectors;
    let vals = eig.eigenvalues;

    let max_val = vals.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()));
    let min_val = vals.iter().fold(Real::INFINITY, |acc: Real, v| acc.min(v.abs()));
    if max_val <= Real::EPSILON || min_val <= 1e-12 * max_val {
        bail!("EPnP needs non-coplanar 3d points");
    }

    let mut control_w = [Vec3::zeros(); 4];
    control_w[0] = centroid;
    for i in 0..3 {
        let scale = vals[i].abs().sqrt();
        control_w[i + 1] = centroid + axes.column(i).into_owned() * scale;
    }

    let basis = Mat3::from_columns(&[
        control_w[1] - control_w[0],
        control_w[2] - control_w[0],
        control_w[3] - control_w[0],
    ]);
    let basis_inv = basis
        .try_inverse()
        .ok_or_else(|| anyhow!("degenerate control point configuration for EPnP"))?;

    let alphas: Vec<[Real; 4]> = world
        .iter()
        .map(|p| {
            let coeff = basis_inv * (p.coords - control_w[0]);
            [1.0 - coeff.x - coeff.y - coeff.z, coeff.x, coeff.y, coeff.z]
        })
        .collect();

    let mut m = DMatrix::<Real>::zeros(2 * n, 12);
    for (i, (a, uv)) in alphas.iter().zip(img_norm.iter()).enumerate() {
        let r0 = 2 * i;
        let r1 = 2 * i + 1;
        for (j, &alpha) in a.iter().enumerate() {
            let c = 3 * j;
            m[(r0, c)] = alpha;
            m[(r0, c + 2)] = -uv.x * alpha;
            m[(r1, c + 1)] = alpha;
            m[(r1, c + 2)] = -uv.y * alpha;
        }
    }

    // M^T M is 12x12 regardless of n, so its SVD always yields the full basis.
    let mtm = m.transpose() * &m;
    let svd = mtm.svd(false, true);
    let v_t = svd.v_t.ok_or_else(|| anyhow!("svd failed in EPnP"))?;
    let sol = v_t.row(smallest_singular_index(&svd.singular_values));

    let mut control_c = [Vec3::zeros(); 4];
    for (j, cc) in control_c.iter_mut().enumerate() {
        *cc = Vec3::new(sol[3 * j], sol[3 * j + 1], sol[3 * j + 2]);
    }

    let mut sum_w = 0.0;
    let mut sum_c = 0.0;
    for i in 0..4 {
        for j in (i + 1)..4 {
            sum_w += (control_w[i] - control_w[j]).norm_squared();
            sum_c += (control_c[i] - control_c[j]).norm_squared();
        }
    }

    if sum_c <= Real::EPSILON {
        bail!("degenerate control point configuration for EPnP");
    }

    let mut scale = (sum_w / sum_c).sqrt();

    let camera_pts = |scale: Real| -> Vec<Vec3> {
        alphas
            .iter()
            .map(|a| {
                a.iter()
                    .zip(control_c.iter())
                    .fold(Vec3::zeros(), |acc, (&alpha, cc)| acc + cc * (alpha * scale))
            })
            .collect()
    };

    // The null vector is defined up to sign; the scene must lie in front.
    let mean_z = camera_pts(scale).iter().map(|p| p.z).sum::<Real>() / n as Real;
    if mean_z < 0.0 {
        scale = -scale;
    }

    pose_from_points(world, &camera_pts(scale))
}
