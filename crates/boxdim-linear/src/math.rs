//! Numerical helpers shared by the linear solvers.
//!
//! - **Hartley normalization** of 3D points, used to condition the DLT system.
//! - **Null-space extraction** from an SVD: locating the right singular
//!   vector of the smallest singular value and reshaping it into a matrix.
//!
//! # Example
//!
//! ```
//! use boxdim_linear::math::normalize_points_3d;
//! use boxdim_core::Pt3;
//!
//! let points = vec![
//!     Pt3::new(0.0, 0.0, 0.0),
//!     Pt3::new(200.0, 0.0, 0.0),
//!     Pt3::new(0.0, 150.0, 100.0),
//! ];
//! let (normalized, transform) = normalize_points_3d(&points).unwrap();
//! assert_eq!(normalized.len(), 3);
//! assert_eq!(transform[(3, 3)], 1.0);
//! ```

use boxdim_core::{Mat4, Pt3, Real};
use nalgebra::{DMatrix, DVector, Matrix3x4};

/// Hartley normalization for 3D points.
///
/// Centers points at the origin and scales so that the mean distance from
/// the origin is `√3`.
///
/// Returns the normalized points and the 4x4 transform `T` with
/// `p_norm = T * p_homogeneous`, or `None` if the input is empty or all points
/// coincide.
///
/// # References
///
/// Hartley & Zisserman, "Multiple View Geometry in Computer Vision", 2nd ed.,
/// Algorithm 4.2 (Normalized DLT)
pub fn normalize_points_3d(points: &[Pt3]) -> Option<(Vec<Pt3>, Mat4)> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as Real;
    let centroid = points
        .iter()
        .fold(Pt3::origin().coords, |acc, p| acc + p.coords)
        / n;

    let mean_dist = points
        .iter()
        .map(|p| (p.coords - centroid).norm())
        .sum::<Real>()
        / n;

    if mean_dist <= Real::EPSILON {
        return None;
    }

    let scale = (3.0_f64).sqrt() / mean_dist;
    #[rustfmt::skip]
    let t = Mat4::new(
        scale, 0.0, 0.0, -scale * centroid.x,
        0.0, scale, 0.0, -scale * centroid.y,
        0.0, 0.0, scale, -scale * centroid.z,
        0.0, 0.0, 0.0, 1.0,
    );

    let norm = points
        .iter()
        .map(|p| Pt3::from((p.coords - centroid) * scale))
        .collect();

    Some((norm, t))
}

/// Index of the smallest singular value.
///
/// Does not assume any ordering of `singular_values`.
pub fn smallest_singular_index(singular_values: &DVector<Real>) -> usize {
    singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Reshape a 12-element row of `V^T` into a row-major 3x4 matrix.
///
/// Returns `None` if `v_t` does not have 12 columns or `row_idx` is out of
/// range.
pub fn mat34_from_svd_row(v_t: &DMatrix<Real>, row_idx: usize) -> Option<Matrix3x4<Real>> {
    if v_t.ncols() != 12 || row_idx >= v_t.nrows() {
        return None;
    }
    Some(Matrix3x4::from_fn(|r, c| v_t[(row_idx, 4 * r + c)]))
}
