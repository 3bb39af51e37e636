use boxdim_core::{BoundingBoxOffset, ClassifiedVertices, Vec2};

/// Move crop-local vertices into original-image pixels by adding the
/// detector's bounding-box origin.
pub fn adjust_to_original(
    vertices: &ClassifiedVertices,
    offset: &BoundingBoxOffset,
) -> ClassifiedVertices {
    let shift = Vec2::new(offset.x0, offset.y0);
    vertices.map(|p| p + shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxdim_core::{Pt2, VertexRole};

    #[test]
    fn translates_every_role() {
        let v = ClassifiedVertices::from_fn(|role| {
            let i = VertexRole::MODEL_ORDER
                .iter()
                .position(|r| *r == role)
                .unwrap_or_default() as f64;
            Pt2::new(i, 10.0 * i)
        });
        let moved = adjust_to_original(&v, &BoundingBoxOffset::new(100.0, -5.5));
        for role in VertexRole::MODEL_ORDER {
            let d = moved.get(role) - v.get(role);
            assert_eq!(d, Vec2::new(100.0, -5.5), "{role:?}");
        }
    }

    #[test]
    fn zero_offset_is_identity() {
        let v = ClassifiedVertices::from_fn(|_| Pt2::new(3.0, 4.0));
        assert_eq!(adjust_to_original(&v, &BoundingBoxOffset::default()), v);
    }
}
