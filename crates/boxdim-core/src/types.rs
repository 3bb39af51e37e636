//! Data model shared by every stage of the reconstruction.
//!
//! All types are plain values: they are created per reconstruction and never
//! mutated after construction.

use crate::{Iso3, Pt2, Pt3, Real, Vec3};
use nalgebra::{Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Semantic role of one silhouette vertex of the box.
///
/// The silhouette of a box seen from above one of its vertical edges is a
/// hexagon: the far top corner (`Top`), the near bottom corner (`Bottom`) and
/// the top/bottom corners of the left and right vertical edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexRole {
    Top,
    Bottom,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl VertexRole {
    /// Roles in the order used for 2D/3D correspondences.
    pub const MODEL_ORDER: [VertexRole; 6] = [
        VertexRole::Bottom,
        VertexRole::LeftBottom,
        VertexRole::RightBottom,
        VertexRole::LeftTop,
        VertexRole::RightTop,
        VertexRole::Top,
    ];

    /// Corner of a `width × height × tall` box in the box-local frame.
    ///
    /// The frame has its origin at the bottom vertex; `x` runs along the
    /// left bottom edge, `y` along the right bottom edge and `z` up the
    /// vertical edges.
    pub fn model_point(self, width: Real, height: Real, tall: Real) -> Pt3 {
        match self {
            VertexRole::Bottom => Pt3::new(0.0, 0.0, 0.0),
            VertexRole::LeftBottom => Pt3::new(width, 0.0, 0.0),
            VertexRole::RightBottom => Pt3::new(0.0, height, 0.0),
            VertexRole::LeftTop => Pt3::new(width, 0.0, tall),
            VertexRole::RightTop => Pt3::new(0.0, height, tall),
            VertexRole::Top => Pt3::new(width, height, tall),
        }
    }
}

/// The six silhouette vertices, each tagged with its role.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedVertices {
    pub top: Pt2,
    pub bottom: Pt2,
    pub left_top: Pt2,
    pub left_bottom: Pt2,
    pub right_top: Pt2,
    pub right_bottom: Pt2,
}

impl ClassifiedVertices {
    pub fn get(&self, role: VertexRole) -> Pt2 {
        match role {
            VertexRole::Top => self.top,
            VertexRole::Bottom => self.bottom,
            VertexRole::LeftTop => self.left_top,
            VertexRole::LeftBottom => self.left_bottom,
            VertexRole::RightTop => self.right_top,
            VertexRole::RightBottom => self.right_bottom,
        }
    }

    /// Build from a role lookup.
    pub fn from_fn(mut f: impl FnMut(VertexRole) -> Pt2) -> Self {
        Self {
            top: f(VertexRole::Top),
            bottom: f(VertexRole::Bottom),
            left_top: f(VertexRole::LeftTop),
            left_bottom: f(VertexRole::LeftBottom),
            right_top: f(VertexRole::RightTop),
            right_bottom: f(VertexRole::RightBottom),
        }
    }

    /// Inverse of [`Self::in_model_order`].
    pub fn from_model_order(points: [Pt2; 6]) -> Self {
        let [bottom, left_bottom, right_bottom, left_top, right_top, top] = points;
        Self {
            top,
            bottom,
            left_top,
            left_bottom,
            right_top,
            right_bottom,
        }
    }

    /// Apply `f` to every vertex, keeping roles.
    pub fn map(&self, mut f: impl FnMut(Pt2) -> Pt2) -> Self {
        Self::from_fn(|role| f(self.get(role)))
    }

    /// Image points in [`VertexRole::MODEL_ORDER`].
    pub fn in_model_order(&self) -> [Pt2; 6] {
        VertexRole::MODEL_ORDER.map(|role| self.get(role))
    }
}

/// Top-left corner of an externally detected bounding box, in original-image
/// pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxOffset {
    pub x0: Real,
    pub y0: Real,
}

impl BoundingBoxOffset {
    pub fn new(x0: Real, y0: Real) -> Self {
        Self { x0, y0 }
    }
}

/// Apparent box extents in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: Real,
    pub height: Real,
    pub tall: Real,
}

impl PixelDimensions {
    /// Corners of a box with these extents, in [`VertexRole::MODEL_ORDER`].
    pub fn model_points(&self) -> [Pt3; 6] {
        VertexRole::MODEL_ORDER.map(|role| role.model_point(self.width, self.height, self.tall))
    }
}

/// Final metric box dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealDimensions {
    pub width: Real,
    pub height: Real,
    pub tall: Real,
}

/// Camera extrinsics relative to the box-local frame.
///
/// `rvec` is an axis-angle rotation and `tvec` a translation; together they
/// map box-local points into the camera frame: `p_c = R(rvec) p_w + tvec`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub rvec: Vec3,
    pub tvec: Vec3,
}

impl Pose {
    /// Build from a `T_C_W` isometry.
    pub fn from_isometry(camera_se3_world: &Iso3) -> Self {
        Self {
            rvec: camera_se3_world.rotation.scaled_axis(),
            tvec: camera_se3_world.translation.vector,
        }
    }

    /// The `T_C_W` isometry described by this pose.
    pub fn to_isometry(&self) -> Iso3 {
        Iso3::from_parts(
            Translation3::from(self.tvec),
            UnitQuaternion::from_scaled_axis(self.rvec),
        )
    }

    /// Rotation matrix `R` (Rodrigues formula applied to `rvec`).
    pub fn rotation_matrix(&self) -> Rotation3<Real> {
        Rotation3::from_scaled_axis(self.rvec)
    }

    /// Camera center expressed in the box-local frame: `-Rᵗ t`.
    pub fn camera_center(&self) -> Pt3 {
        Pt3::from(-(self.rotation_matrix().transpose() * self.tvec))
    }

    pub fn is_finite(&self) -> bool {
        self.rvec.iter().chain(self.tvec.iter()).all(|v| v.is_finite())
    }
}
