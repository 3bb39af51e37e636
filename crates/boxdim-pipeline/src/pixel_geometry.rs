use boxdim_core::{distance_2d, ClassifiedVertices, PixelDimensions};

/// Apparent box extents in pixels.
///
/// Each extent averages the two silhouette edges that are parallel to it in
/// the box: `width` over `top-left_top` and `bottom-right_bottom`, `height`
/// over `top-right_top` and `bottom-left_bottom`, `tall` over the two
/// vertical edges.
pub fn pixel_dimensions(v: &ClassifiedVertices) -> PixelDimensions {
    let mean = |a: f64, b: f64| (a + b) * 0.5;
    PixelDimensions {
        width: mean(
            distance_2d(&v.top, &v.left_top),
            distance_2d(&v.bottom, &v.right_bottom),
        ),
        height: mean(
            distance_2d(&v.top, &v.right_top),
            distance_2d(&v.bottom, &v.left_bottom),
        ),
        tall: mean(
            distance_2d(&v.left_top, &v.left_bottom),
            distance_2d(&v.right_top, &v.right_bottom),
        ),
    }
}
