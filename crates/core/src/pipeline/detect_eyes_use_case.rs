use crate::detection::domain::eye_detection::EyeDetectionResult;
use crate::detection::domain::face_landmark_detector::FaceLandmarkDetector;
use crate::detection::domain::landmark_projector::LandmarkProjector;
use crate::detection::infrastructure::detection_request::{
    detector_slot, DetectionRequest, DetectorSlot,
};
use crate::pipeline::analysis_error::AnalysisError;
use crate::shared::frame::Frame;
use crate::shared::geometry::Extent;

/// An eye detection running in the background, started by
/// [`DetectEyesUseCase::submit`].
///
/// Dropping it without [`DetectEyesUseCase::finish`] abandons the result;
/// the detector still returns to the use case once the worker is done.
pub struct PendingEyeDetection {
    request: DetectionRequest,
    extent: Extent,
}

impl PendingEyeDetection {
    pub fn cancel(&self) {
        self.request.cancel();
    }
}

/// Runs the landmark detector on a photo and projects the first face's
/// eyes into pixel space.
///
/// The detector is lent to one request at a time.
pub struct DetectEyesUseCase {
    detector: DetectorSlot,
    projector: LandmarkProjector,
}

impl DetectEyesUseCase {
    pub fn new(detector: Box<dyn FaceLandmarkDetector>, projector: LandmarkProjector) -> Self {
        Self {
            detector: detector_slot(detector),
            projector,
        }
    }

    pub fn submit(&self, frame: &Frame) -> Result<PendingEyeDetection, AnalysisError> {
        let request = DetectionRequest::submit(&self.detector, frame.clone())
            .ok_or(AnalysisError::DetectorUnavailable)?;
        Ok(PendingEyeDetection {
            request,
            extent: frame.extent(),
        })
    }

    pub fn finish(&self, pending: PendingEyeDetection) -> Result<EyeDetectionResult, AnalysisError> {
        let observations = pending.request.wait()?;
        Ok(self.projector.project(&observations, pending.extent))
    }

    pub fn execute(&self, frame: &Frame) -> Result<EyeDetectionResult, AnalysisError> {
        let pending = self.submit(frame)?;
        self.finish(pending)
    }
}
