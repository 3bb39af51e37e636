//! Linear algebra type aliases and small geometric helpers.

use nalgebra::{Isometry3, Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};

/// Scalar type used throughout the workspace (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 2D point with [`Real`] coordinates (pixels unless stated otherwise).
pub type Pt2 = Point2<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;

/// Convert a 2D point in Euclidean coordinates into homogeneous coordinates.
///
/// Given a point `p = (x, y)`, returns the homogeneous vector `(x, y, 1)`.
pub fn to_homogeneous(p: &Pt2) -> Vec3 {
    Vec3::new(p.x, p.y, 1.0)
}

/// Convert a 3D homogeneous vector back to a 2D point.
///
/// The caller is responsible for ensuring that `w != 0`.
pub fn from_homogeneous(v: &Vec3) -> Pt2 {
    Pt2::new(v.x / v.z, v.y / v.z)
}

/// Planar Euclidean distance between two points.
pub fn distance_2d(a: &Pt2, b: &Pt2) -> Real {
    (a - b).norm()
}

/// Round `value` to `decimals` fractional digits, halves away from zero.
pub fn round_to(value: Real, decimals: u32) -> Real {
    let scale = (10.0 as Real).powi(decimals as i32);
    (value * scale).round() / scale
}

/// Angle in radians between two rotations, via the trace of `R_a^T R_b`.
pub fn rotation_angle_between(a: &Iso3, b: &Iso3) -> Real {
    let r_diff = a.rotation.to_rotation_matrix().transpose() * b.rotation.to_rotation_matrix();
    let cos_theta = ((r_diff.matrix().trace() - 1.0) * 0.5).clamp(-1.0, 1.0);
    cos_theta.acos()
}
