use thiserror::Error;

use crate::detection::infrastructure::detection_request::DetectionError;
use crate::segmentation::domain::matte_aligner::AlignmentError;

/// Failures surfaced by the analysis use cases.
///
/// Finding no face or no eyes is a normal outcome and never lands here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no hair segmentation is available for this photo")]
    NoSegmentation,
    #[error("failed to read segmentation: {0}")]
    Segmentation(String),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
    /// A request is still in flight, or a crashed worker took the detector.
    #[error("no landmark detector is available")]
    DetectorUnavailable,
}
