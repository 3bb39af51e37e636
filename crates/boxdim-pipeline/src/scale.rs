use boxdim_core::{round_to, PixelDimensions, Real, RealDimensions};

/// Similar triangles: `real = pixel * distance / fx`, unrounded.
pub fn scale_dimensions(pixel: &PixelDimensions, distance: Real, fx: Real) -> RealDimensions {
    let factor = distance / fx;
    RealDimensions {
        width: pixel.width * factor,
        height: pixel.height * factor,
        tall: pixel.tall * factor,
    }
}

/// [`scale_dimensions`] rounded to `decimals` fractional digits.
pub fn metric_dimensions(
    pixel: &PixelDimensions,
    distance: Real,
    fx: Real,
    decimals: u32,
) -> RealDimensions {
    let real = scale_dimensions(pixel, distance, fx);
    RealDimensions {
        width: round_to(real.width, decimals),
        height: round_to(real.height, decimals),
        tall: round_to(real.tall, decimals),
    }
}
