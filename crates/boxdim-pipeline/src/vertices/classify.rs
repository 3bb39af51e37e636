use crate::ReconstructError;
use boxdim_core::{ClassifiedVertices, Pt2};
use std::cmp::Ordering;

/// Number of silhouette vertices of a box seen from above one vertical edge.
pub const HEXAGON_VERTICES: usize = 6;

/// Remove and return the first point that is minimal under `cmp`.
fn take_first_min(points: &mut Vec<Pt2>, cmp: impl Fn(&Pt2, &Pt2) -> Ordering) -> Pt2 {
    let idx = points
        .iter()
        .enumerate()
        .min_by(|a, b| cmp(a.1, b.1))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    points.remove(idx)
}

/// Split a pair into `(upper, lower)`; on equal `y` the first point is upper.
fn upper_lower(a: Pt2, b: Pt2) -> (Pt2, Pt2) {
    if b.y < a.y {
        (b, a)
    } else {
        (a, b)
    }
}

/// Assign roles to the six hexagon vertices by position.
///
/// `top` is the highest point (minimum `y`), `bottom` the lowest of the rest;
/// of the remaining four, the two with the smallest `x` form the left edge
/// and the others the right edge, each split into upper and lower by `y`.
/// Ties go to the point that comes first in `points`.
pub fn classify_vertices(points: &[Pt2]) -> Result<ClassifiedVertices, ReconstructError> {
    if points.len() != HEXAGON_VERTICES {
        return Err(ReconstructError::InvalidVertexCount {
            expected: HEXAGON_VERTICES,
            found: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(ReconstructError::NonFiniteVertex { index });
    }

    let mut rest = points.to_vec();
    let top = take_first_min(&mut rest, |a, b| a.y.total_cmp(&b.y));
    let bottom = take_first_min(&mut rest, |a, b| b.y.total_cmp(&a.y));

    // Stable, so equal x keeps input order.
    rest.sort_by(|a, b| a.x.total_cmp(&b.x));
    let (left_top, left_bottom) = upper_lower(rest[0], rest[1]);
    let (right_top, right_bottom) = upper_lower(rest[2], rest[3]);

    Ok(ClassifiedVertices {
        top,
        bottom,
        left_top,
        left_bottom,
        right_top,
        right_bottom,
    })
}
