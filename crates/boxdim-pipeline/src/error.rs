/// Errors returned by the reconstruction pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReconstructError {
    #[error("expected exactly {expected} hexagon vertices, found {found}")]
    InvalidVertexCount { expected: usize, found: usize },
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },
    #[error("invalid camera intrinsics: {0}")]
    InvalidIntrinsics(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("pose estimation failed: {0}")]
    PoseEstimationFailed(String),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
