use super::polygon::{approx_closed_polygon, closed_perimeter};
use crate::ExtractionParams;
use boxdim_core::{Pt2, Real};
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

/// Polygon vertices of every outermost shape in `mask`.
///
/// Any non-zero pixel is foreground. Each outer contour without a parent is
/// approximated by a closed polygon with tolerance
/// `epsilon_ratio * perimeter`; polygons with more than `max_vertices`
/// corners are dropped. The vertices of the remaining polygons are returned
/// as one flat list, polygon by polygon.
pub fn extract_vertices(mask: &GrayImage, params: &ExtractionParams) -> Vec<Pt2> {
    let contours = find_contours::<u32>(mask);
    let mut vertices = Vec::new();
    let mut kept = 0usize;

    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
    {
        let points: Vec<Pt2> = contour
            .points
            .iter()
            .map(|p| Pt2::new(p.x as Real, p.y as Real))
            .collect();
        let epsilon = params.epsilon_ratio * closed_perimeter(&points);
        let polygon = approx_closed_polygon(&points, epsilon);
        if polygon.len() <= params.max_vertices {
            kept += 1;
            vertices.extend(polygon);
        } else {
            log::trace!("dropping contour approximated by {} vertices", polygon.len());
        }
    }

    log::debug!(
        "extracted {} vertices from {kept} of {} contours",
        vertices.len(),
        contours.len()
    );
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
    use imageproc::point::Point;
    use imageproc::rect::Rect;

    const HEXAGON: [(i32, i32); 6] = [
        (200, 40),
        (330, 110),
        (320, 250),
        (190, 320),
        (70, 240),
        (80, 100),
    ];

    fn hexagon_mask() -> GrayImage {
        let mut mask = GrayImage::new(400, 360);
        let poly: Vec<Point<i32>> = HEXAGON.iter().map(|&(x, y)| Point::new(x, y)).collect();
        draw_polygon_mut(&mut mask, &poly, Luma([255u8]));
        mask
    }

    fn assert_near_all(found: &[Pt2], expected: &[(i32, i32)], tol: Real) {
        for &(x, y) in expected {
            let target = Pt2::new(x as Real, y as Real);
            let best = found
                .iter()
                .map(|p| (p - target).norm())
                .fold(Real::INFINITY, Real::min);
            assert!(best <= tol, "no vertex within {tol}px of {target}: {found:?}");
        }
    }

    #[test]
    fn filled_hexagon_yields_its_six_corners() {
        let vertices = extract_vertices(&hexagon_mask(), &ExtractionParams::default());
        assert_eq!(vertices.len(), 6, "{vertices:?}");
        assert_near_all(&vertices, &HEXAGON, 4.0);
    }

    #[test]
    fn empty_mask_yields_nothing() {
        let mask = GrayImage::new(64, 64);
        assert!(extract_vertices(&mask, &ExtractionParams::default()).is_empty());
    }

    #[test]
    fn holes_are_ignored() {
        let mut mask = GrayImage::new(200, 200);
        draw_filled_rect_mut(&mut mask, Rect::at(20, 20).of_size(150, 120), Luma([255u8]));
        draw_filled_rect_mut(&mut mask, Rect::at(60, 50).of_size(40, 30), Luma([0u8]));
        let vertices = extract_vertices(&mask, &ExtractionParams::default());
        assert_eq!(vertices.len(), 4, "{vertices:?}");
        assert_near_all(&vertices, &[(20, 20), (169, 20), (169, 139), (20, 139)], 1.5);
    }

    #[test]
    fn polygons_over_the_vertex_limit_are_dropped() {
        let mut mask = hexagon_mask();
        draw_filled_rect_mut(&mut mask, Rect::at(360, 300).of_size(30, 40), Luma([255u8]));

        let all = extract_vertices(&mask, &ExtractionParams::default());
        assert_eq!(all.len(), 10, "{all:?}");

        let squares_only = ExtractionParams {
            max_vertices: 4,
            ..ExtractionParams::default()
        };
        let vertices = extract_vertices(&mask, &squares_only);
        assert_eq!(vertices.len(), 4, "{vertices:?}");
        assert_near_all(&vertices, &[(360, 300), (389, 339)], 1.5);
    }
}
