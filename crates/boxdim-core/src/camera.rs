//! Distortion-free pinhole camera model.
//!
//! Pixels are related to camera-frame points by
//! `u = fx * x / z + cx`, `v = fy * y / z + cy`.

use crate::{Iso3, Mat3, Pt2, Pt3, Real, Vec2, Vec3};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Pinhole intrinsics: focal lengths and principal point, all in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in pixels along X.
    pub fx: Real,
    /// Focal length in pixels along Y.
    pub fy: Real,
    /// Principal point X coordinate in pixels.
    pub cx: Real,
    /// Principal point Y coordinate in pixels.
    pub cy: Real,
}

impl CameraIntrinsics {
    pub fn new(fx: Real, fy: Real, cx: Real, cy: Real) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Intrinsics with the principal point at the center of `size`.
    pub fn centered(fx: Real, fy: Real, size: ImageSize) -> Self {
        let (cx, cy) = size.center();
        Self { fx, fy, cx, cy }
    }

    /// Check that focal lengths are positive and every value is finite.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.fx.is_finite() && self.fx > 0.0,
            "fx must be positive and finite, got {}",
            self.fx
        );
        ensure!(
            self.fy.is_finite() && self.fy > 0.0,
            "fy must be positive and finite, got {}",
            self.fy
        );
        ensure!(
            self.cx.is_finite() && self.cy.is_finite(),
            "principal point must be finite, got ({}, {})",
            self.cx,
            self.cy
        );
        Ok(())
    }

    /// Return the 3x3 camera intrinsics matrix K.
    pub fn k_matrix(&self) -> Mat3 {
        Mat3::new(
            self.fx, 0.0, self.cx, //
            0.0, self.fy, self.cy, //
            0.0, 0.0, 1.0,
        )
    }

    /// Map a pixel onto the normalized image plane (Z = 1 in the camera frame).
    pub fn pixel_to_normalized(&self, pixel: &Pt2) -> Vec2 {
        Vec2::new((pixel.x - self.cx) / self.fx, (pixel.y - self.cy) / self.fy)
    }

    /// Map a normalized image-plane point back to pixels.
    pub fn normalized_to_pixel(&self, n: &Vec2) -> Pt2 {
        Pt2::new(self.fx * n.x + self.cx, self.fy * n.y + self.cy)
    }

    /// Project a camera-frame point. Returns `None` for points at or behind
    /// the camera plane.
    pub fn project_point_c(&self, p_c: &Vec3) -> Option<Pt2> {
        if p_c.z <= 0.0 {
            return None;
        }
        Some(self.normalized_to_pixel(&Vec2::new(p_c.x / p_c.z, p_c.y / p_c.z)))
    }

    /// Project a world point through the `T_C_W` pose `camera_se3_world`.
    pub fn project_world(&self, camera_se3_world: &Iso3, p_w: &Pt3) -> Option<Pt2> {
        let p_c = camera_se3_world.transform_point(p_w);
        self.project_point_c(&p_c.coords)
    }
}

/// Image size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Geometric center `(width / 2, height / 2)`.
    pub fn center(&self) -> (Real, Real) {
        (self.width as Real / 2.0, self.height as Real / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Translation3};

    #[test]
    fn normalized_roundtrip() {
        let k = CameraIntrinsics::new(800.0, 780.0, 640.0, 360.0);
        let px = Pt2::new(1000.0, 200.0);
        let n = k.pixel_to_normalized(&px);
        let back = k.normalized_to_pixel(&n);
        assert!((back - px).norm() < 1e-12, "err={}", (back - px).norm());
    }

    #[test]
    fn k_matrix_matches_projection() {
        let k = CameraIntrinsics::new(800.0, 780.0, 640.0, 360.0);
        let p_c = Vec3::new(0.1, -0.2, 2.0);
        let via_k = crate::from_homogeneous(&(k.k_matrix() * p_c));
        let direct = k.project_point_c(&p_c).unwrap();
        assert!((via_k - direct).norm() < 1e-12);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let k = CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0);
        assert!(k.project_point_c(&Vec3::new(0.0, 0.0, -1.0)).is_none());
        assert!(k.project_point_c(&Vec3::new(0.0, 0.0, 0.0)).is_none());

        let pose = Iso3::from_parts(
            Translation3::new(0.0, 0.0, 1.0),
            Rotation3::from_euler_angles(0.0, 0.0, 0.0).into(),
        );
        let px = k.project_world(&pose, &Pt3::origin()).unwrap();
        assert!((px - Pt2::new(320.0, 240.0)).norm() < 1e-12);
    }

    #[test]
    fn centered_uses_half_image_size() {
        let k = CameraIntrinsics::centered(4777.7, 4777.7, ImageSize::new(1920, 1080));
        assert_eq!(k.cx, 960.0);
        assert_eq!(k.cy, 540.0);
        assert!(k.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_focal_length() {
        assert!(CameraIntrinsics::new(0.0, 800.0, 0.0, 0.0).validate().is_err());
        assert!(CameraIntrinsics::new(800.0, -1.0, 0.0, 0.0).validate().is_err());
        assert!(CameraIntrinsics::new(800.0, 800.0, Real::NAN, 0.0)
            .validate()
            .is_err());
    }
}
