use crate::{
    adjust_to_original, classify_vertices, extract_vertices, ground_distance, metric_dimensions,
    pixel_dimensions, PoseEstimator, ReconstructError, ReconstructionConfig,
};
use boxdim_core::{
    BoundingBoxOffset, CameraIntrinsics, ClassifiedVertices, ImageSize, PixelDimensions, Pose,
    Pt2, Pt3, Real, RealDimensions,
};
use boxdim_optim::SolveReport;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Where the principal point comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalPoint {
    /// Half the original image width and height.
    #[default]
    ImageCenter,
    Explicit { cx: Real, cy: Real },
}

/// Per-image inputs of one reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionRequest {
    /// Size of the original (uncropped) image.
    pub image_size: ImageSize,
    /// Origin of the crop the mask was taken from.
    #[serde(default)]
    pub offset: BoundingBoxOffset,
    pub fx: Real,
    pub fy: Real,
    #[serde(default)]
    pub principal_point: PrincipalPoint,
}

impl ReconstructionRequest {
    pub fn new(image_size: ImageSize, offset: BoundingBoxOffset, fx: Real, fy: Real) -> Self {
        Self {
            image_size,
            offset,
            fx,
            fy,
            principal_point: PrincipalPoint::ImageCenter,
        }
    }

    pub fn with_principal_point(mut self, cx: Real, cy: Real) -> Self {
        self.principal_point = PrincipalPoint::Explicit { cx, cy };
        self
    }

    /// Intrinsics implied by this request.
    pub fn intrinsics(&self) -> CameraIntrinsics {
        match self.principal_point {
            PrincipalPoint::ImageCenter => {
                CameraIntrinsics::centered(self.fx, self.fy, self.image_size)
            }
            PrincipalPoint::Explicit { cx, cy } => CameraIntrinsics::new(self.fx, self.fy, cx, cy),
        }
    }
}

/// Every intermediate value of one reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionReport {
    /// Vertices found in the mask, crop-local pixels.
    pub raw_points: Vec<Pt2>,
    /// Role-tagged vertices, crop-local pixels.
    pub classified: ClassifiedVertices,
    /// Role-tagged vertices, original-image pixels.
    pub adjusted: ClassifiedVertices,
    pub pixel_dimensions: PixelDimensions,
    pub intrinsics: CameraIntrinsics,
    pub initializer: String,
    pub pose: Pose,
    /// Camera center in the box-local frame.
    pub camera_position: Pt3,
    /// Ground-plane hit of the ray through the bottom vertex.
    pub ground_point: Pt3,
    pub reprojection_rms: Real,
    pub solver: SolveReport,
    /// Camera to ground point distance.
    pub distance: Real,
    pub dimensions: RealDimensions,
}

/// Estimate the box dimensions from a crop's edge mask with default settings
/// and the principal point at the image center.
pub fn reconstruct(
    mask: &GrayImage,
    image_size: ImageSize,
    offset: BoundingBoxOffset,
    fx: Real,
    fy: Real,
) -> Result<RealDimensions, ReconstructError> {
    let request = ReconstructionRequest::new(image_size, offset, fx, fy);
    reconstruct_with_config(mask, &request, &ReconstructionConfig::default())
        .map(|report| report.dimensions)
}

/// Full pipeline from an edge mask, returning every intermediate value.
pub fn reconstruct_with_config(
    mask: &GrayImage,
    request: &ReconstructionRequest,
    config: &ReconstructionConfig,
) -> Result<ReconstructionReport, ReconstructError> {
    config.validate()?;
    let points = extract_vertices(mask, &config.extraction);
    reconstruct_from_points(&points, request, config)
}

/// Pipeline from already extracted crop-local vertices.
pub fn reconstruct_from_points(
    points: &[Pt2],
    request: &ReconstructionRequest,
    config: &ReconstructionConfig,
) -> Result<ReconstructionReport, ReconstructError> {
    config.validate()?;
    let intrinsics = request.intrinsics();
    intrinsics
        .validate()
        .map_err(|e| ReconstructError::InvalidIntrinsics(e.to_string()))?;

    let classified = classify_vertices(points)?;
    let adjusted = adjust_to_original(&classified, &request.offset);
    let pixel = pixel_dimensions(&adjusted);
    log::debug!(
        "pixel dimensions: width {:.2}, height {:.2}, tall {:.2}",
        pixel.width,
        pixel.height,
        pixel.tall
    );

    let estimate = PoseEstimator::new(intrinsics, config.solver.solve_options())
        .estimate(&adjusted, &pixel)?;
    let hit = ground_distance(&estimate.pose, &adjusted.bottom, &intrinsics)?;
    let dimensions = metric_dimensions(&pixel, hit.distance, intrinsics.fx, config.rounding_decimals);
    log::info!(
        "box {:.2} x {:.2} x {:.2} at distance {:.2}",
        dimensions.width,
        dimensions.height,
        dimensions.tall,
        hit.distance
    );

    Ok(ReconstructionReport {
        raw_points: points.to_vec(),
        classified,
        adjusted,
        pixel_dimensions: pixel,
        intrinsics,
        initializer: estimate.initializer,
        pose: estimate.pose,
        camera_position: hit.camera_center,
        ground_point: hit.ground_point,
        reprojection_rms: estimate.reprojection_rms,
        solver: estimate.solver,
        distance: hit.distance,
        dimensions,
    })
}
