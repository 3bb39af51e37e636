//! Closed-curve polygon approximation (Douglas-Peucker).

use boxdim_core::{distance_2d, Pt2, Real};

/// Length of the closed polyline through `points`.
pub fn closed_perimeter(points: &[Pt2]) -> Real {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| distance_2d(a, b))
        .sum()
}

/// Distance from `p` to the line through `a` and `b` (or to `a` if the two
/// coincide).
fn point_to_line_distance(p: &Pt2, a: &Pt2, b: &Pt2) -> Real {
    let ab = b - a;
    let len = ab.norm();
    if len <= Real::EPSILON {
        return distance_2d(p, a);
    }
    let ap = p - a;
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

/// Douglas-Peucker on an open chain; both endpoints are always kept.
pub fn simplify_open(points: &[Pt2], epsilon: Real) -> Vec<Pt2> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0, last)];
    while let Some((start, end)) = stack.pop() {
        if end - start <= 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_index = start;
        for i in (start + 1)..end {
            let dist = point_to_line_distance(&points[i], &points[start], &points[end]);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        if max_dist > epsilon {
            keep[max_index] = true;
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn farthest_from(points: &[Pt2], origin: &Pt2) -> usize {
    let mut best = 0;
    let mut best_dist = -1.0;
    for (i, p) in points.iter().enumerate() {
        let d = (p - origin).norm_squared();
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Approximate a closed curve by a polygon whose edges stay within
/// `epsilon` of the curve.
///
/// The curve is split at two mutually distant points, `a` (farthest from the
/// first point) and `b` (farthest from `a`); each half is simplified as an
/// open chain. The result starts at `a` and follows the curve direction.
pub fn approx_closed_polygon(points: &[Pt2], epsilon: Real) -> Vec<Pt2> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let a = farthest_from(points, &points[0]);
    let b = farthest_from(points, &points[a]);
    if a == b {
        return vec![points[a]];
    }

    let n = points.len();
    let chain = |from: usize, to: usize| -> Vec<Pt2> {
        let len = (to + n - from) % n + 1;
        (0..len).map(|i| points[(from + i) % n]).collect()
    };

    let mut first = simplify_open(&chain(a, b), epsilon);
    let mut second = simplify_open(&chain(b, a), epsilon);
    // Drop the shared endpoints so `a` and `b` appear once.
    first.pop();
    second.pop();
    first.extend(second);
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square outline sampled at every integer step, starting mid-edge.
    fn square_outline() -> Vec<Pt2> {
        let mut pts = Vec::new();
        for x in 5..10 {
            pts.push(Pt2::new(x as Real, 0.0));
        }
        for y in 0..10 {
            pts.push(Pt2::new(10.0, y as Real));
        }
        for x in (1..=10).rev() {
            pts.push(Pt2::new(x as Real, 10.0));
        }
        for y in (1..=10).rev() {
            pts.push(Pt2::new(0.0, y as Real));
        }
        for x in 0..5 {
            pts.push(Pt2::new(x as Real, 0.0));
        }
        pts
    }

    #[test]
    fn perimeter_of_square() {
        let sq = [
            Pt2::new(0.0, 0.0),
            Pt2::new(2.0, 0.0),
            Pt2::new(2.0, 2.0),
            Pt2::new(0.0, 2.0),
        ];
        assert_eq!(closed_perimeter(&sq), 8.0);
        assert_eq!(closed_perimeter(&sq[..1]), 0.0);
    }

    #[test]
    fn open_chain_keeps_endpoints_and_corner() {
        let pts: Vec<Pt2> = (0..=10)
            .map(|i| Pt2::new(i as Real, 0.0))
            .chain((1..=10).map(|i| Pt2::new(10.0, i as Real)))
            .collect();
        let out = simplify_open(&pts, 0.5);
        assert_eq!(
            out,
            vec![Pt2::new(0.0, 0.0), Pt2::new(10.0, 0.0), Pt2::new(10.0, 10.0)]
        );
    }

    #[test]
    fn closed_square_reduces_to_corners() {
        let outline = square_outline();
        let eps = 0.02 * closed_perimeter(&outline);
        let poly = approx_closed_polygon(&outline, eps);
        assert_eq!(poly.len(), 4, "{poly:?}");
        for corner in [
            Pt2::new(0.0, 0.0),
            Pt2::new(10.0, 0.0),
            Pt2::new(10.0, 10.0),
            Pt2::new(0.0, 10.0),
        ] {
            assert!(poly.contains(&corner), "missing {corner}");
        }
    }

    #[test]
    fn closed_result_independent_of_start() {
        let outline = square_outline();
        let mut rotated = outline.clone();
        rotated.rotate_left(13);
        let mut a = approx_closed_polygon(&outline, 0.8);
        let mut b = approx_closed_polygon(&rotated, 0.8);
        let key = |p: &Pt2| (p.x as i64, p.y as i64);
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_curves() {
        assert!(approx_closed_polygon(&[], 1.0).is_empty());
        let single = [Pt2::new(3.0, 4.0)];
        assert_eq!(approx_closed_polygon(&single, 1.0), vec![single[0]]);
        let same = [Pt2::new(1.0, 1.0); 4];
        assert_eq!(approx_closed_polygon(&same, 1.0), vec![same[0]]);
    }
}
