//! Synthetic box views.
//!
//! The box-local frame has its origin at the bottom silhouette vertex, `x`
//! along the left bottom edge, `y` along the right bottom edge and `z` up the
//! vertical edges (see [`VertexRole::model_point`]). Because `x × y` points
//! along `+z` while the left edge is seen on the left, the camera that
//! reproduces the hexagon layout lies on the `z < 0` side of the ground
//! plane, looking back at the bottom vertex.

use crate::{CameraIntrinsics, ClassifiedVertices, Iso3, Mat3, Pt2, Pt3, Real, Vec3, VertexRole};
use anyhow::{ensure, Result};
use nalgebra::{Rotation3, Translation3, UnitQuaternion};

/// A box of known metric size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticBox {
    pub width: Real,
    pub height: Real,
    pub tall: Real,
}

impl SyntheticBox {
    pub fn new(width: Real, height: Real, tall: Real) -> Self {
        Self {
            width,
            height,
            tall,
        }
    }

    /// Silhouette corners in [`VertexRole::MODEL_ORDER`].
    pub fn corners(&self) -> [Pt3; 6] {
        VertexRole::MODEL_ORDER.map(|role| role.model_point(self.width, self.height, self.tall))
    }

    pub fn center(&self) -> Pt3 {
        Pt3::new(self.width * 0.5, self.height * 0.5, self.tall * 0.5)
    }
}

/// Camera pose `T_C_W` for a camera at `eye` looking at `target`.
///
/// `up` is the world direction that should point up in the image; image `y`
/// grows downwards, so the camera `y` axis is `-up` projected onto the image
/// plane.
pub fn look_at(eye: &Pt3, target: &Pt3, up: &Vec3) -> Result<Iso3> {
    let forward = target - eye;
    ensure!(forward.norm() > Real::EPSILON, "eye and target coincide");
    let z = forward.normalize();

    let up_perp = up - z * up.dot(&z);
    ensure!(
        up_perp.norm() > Real::EPSILON,
        "up vector is parallel to the viewing direction"
    );
    let y = -up_perp.normalize();
    let x = y.cross(&z);

    let r = Mat3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]);
    let rot = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r));
    let t = -(rot * eye.coords);
    Ok(Iso3::from_parts(Translation3::from(t), rot))
}

/// Pose for a camera `distance` away from the bottom vertex, along the
/// `(1, 1, -1)` diagonal, looking at the box center with the far top corner
/// up in the image.
///
/// From this viewpoint the projected hexagon satisfies the positional role
/// rules: `top` highest, `bottom` lowest, the `x` edge on the left.
pub fn corner_view_pose(cuboid: &SyntheticBox, distance: Real) -> Result<Iso3> {
    ensure!(distance > 0.0, "distance must be positive, got {distance}");
    let eye = Pt3::from(Vec3::new(1.0, 1.0, -1.0).normalize() * distance);
    let up = Vec3::new(cuboid.width, cuboid.height, cuboid.tall);
    look_at(&eye, &cuboid.center(), &up)
}

/// Project world points, failing if any lands behind the camera.
pub fn project_points(
    k: &CameraIntrinsics,
    camera_se3_world: &Iso3,
    points: &[Pt3],
) -> Result<Vec<Pt2>> {
    points
        .iter()
        .enumerate()
        .map(|(idx, pw)| {
            k.project_world(camera_se3_world, pw).ok_or_else(|| {
                let pc = camera_se3_world.transform_point(pw);
                anyhow::anyhow!("point {idx} not projectable (z={:.6})", pc.z)
            })
        })
        .collect()
}

/// Project the six silhouette corners of `cuboid`.
pub fn project_box(
    k: &CameraIntrinsics,
    camera_se3_world: &Iso3,
    cuboid: &SyntheticBox,
) -> Result<ClassifiedVertices> {
    let pixels = project_points(k, camera_se3_world, &cuboid.corners())?;
    Ok(ClassifiedVertices::from_model_order([
        pixels[0], pixels[1], pixels[2], pixels[3], pixels[4], pixels[5],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_centers_target() {
        let k = CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0);
        let eye = Pt3::new(3.0, -2.0, 5.0);
        let target = Pt3::new(0.5, 0.5, 0.0);
        let pose = look_at(&eye, &target, &Vec3::z()).unwrap();

        let px = k.project_world(&pose, &target).unwrap();
        assert!((px - Pt2::new(320.0, 240.0)).norm() < 1e-9, "px={px}");

        let eye_c = pose.transform_point(&eye);
        assert!(eye_c.coords.norm() < 1e-9);
    }

    #[test]
    fn look_at_keeps_up_upwards() {
        let k = CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0);
        let eye = Pt3::new(-5.0, 0.0, 0.0);
        let pose = look_at(&eye, &Pt3::origin(), &Vec3::z()).unwrap();
        let above = k.project_world(&pose, &Pt3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(above.y < 240.0, "a point above the target must be higher in the image");
    }

    #[test]
    fn look_at_rejects_degenerate_up() {
        let eye = Pt3::new(0.0, 0.0, 5.0);
        assert!(look_at(&eye, &Pt3::origin(), &Vec3::z()).is_err());
        assert!(look_at(&eye, &eye, &Vec3::x()).is_err());
    }

    #[test]
    fn corner_view_matches_role_layout() {
        let k = CameraIntrinsics::new(4777.7, 4777.7, 960.0, 540.0);
        let cuboid = SyntheticBox::new(200.0, 150.0, 100.0);
        let pose = corner_view_pose(&cuboid, 2000.0).unwrap();
        let hex = project_box(&k, &pose, &cuboid).unwrap();

        let pts = hex.in_model_order();
        let min_y = pts.iter().map(|p| p.y).fold(Real::INFINITY, Real::min);
        let max_y = pts.iter().map(|p| p.y).fold(Real::NEG_INFINITY, Real::max);
        assert_eq!(hex.top.y, min_y);
        assert_eq!(hex.bottom.y, max_y);
        assert!(hex.left_top.x < hex.right_top.x);
        assert!(hex.left_bottom.x < hex.right_bottom.x);
        assert!(hex.left_top.y < hex.left_bottom.y);
        assert!(hex.right_top.y < hex.right_bottom.y);

        let center = pose.inverse().translation.vector;
        assert!((center.norm() - 2000.0).abs() < 1e-6);
    }
}
