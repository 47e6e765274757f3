use super::face_observation::FaceObservation;
use crate::shared::frame::Frame;

/// Domain interface for face-landmark detection.
///
/// Implementations may hold model or session state, hence `&mut self`.
/// An empty result means no face was found, which is not an error.
pub trait FaceLandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>>;
}
