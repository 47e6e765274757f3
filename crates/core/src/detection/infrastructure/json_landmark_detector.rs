use std::fs;
use std::path::PathBuf;

use crate::detection::domain::face_landmark_detector::FaceLandmarkDetector;
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::frame::Frame;

/// Replays face observations exported by an external vision framework.
///
/// The sidecar is a JSON array of observations; coordinates are validated
/// while parsing, so out-of-range boxes or points are rejected here.
pub struct JsonLandmarkDetector {
    path: PathBuf,
}

impl JsonLandmarkDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FaceLandmarkDetector for JsonLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?;
        let observations: Vec<FaceObservation> = serde_json::from_str(&text)
            .map_err(|e| format!("invalid landmark file {}: {e}", self.path.display()))?;
        log::debug!(
            "Loaded {} face observation(s) for {}x{} frame",
            observations.len(),
            frame.width(),
            frame.height()
        );
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_observation::LandmarkRegion;
    use crate::shared::orientation::Orientation;
    use std::path::Path;

    fn frame() -> Frame {
        Frame::new(vec![0; 4 * 4 * 3], 4, 4, 3, Orientation::Up)
    }

    fn write(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("faces.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_reads_observations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"[{"bounding_box": {"x": 0.2, "y": 0.3, "width": 0.4, "height": 0.4},
                 "landmarks": {"left_pupil": [{"x": 0.25, "y": 0.5}]}}]"#,
        );
        let faces = JsonLandmarkDetector::new(path).detect(&frame()).unwrap();
        assert_eq!(faces.len(), 1);
        let lm = faces[0].landmarks.as_ref().unwrap();
        assert!(lm.region(LandmarkRegion::LeftPupil).is_some());
    }

    #[test]
    fn test_empty_array_is_no_faces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[]");
        assert!(JsonLandmarkDetector::new(path).detect(&frame()).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_box_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"[{"bounding_box": {"x": 0.9, "y": 0.3, "width": 0.4, "height": 0.4}}]"#,
        );
        let err = JsonLandmarkDetector::new(path).detect(&frame()).unwrap_err();
        assert!(err.to_string().contains("invalid landmark file"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = JsonLandmarkDetector::new("/nonexistent/faces.json")
            .detect(&frame())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
