//! Projection of normalized face landmarks into top-left pixel space.
//!
//! Face boxes arrive with a bottom-left origin and are flipped once when
//! denormalized. Landmark points are relative to the already-flipped box
//! and are mapped without a second flip; flipping them again mirrors the
//! eyes vertically.

use super::eye_detection::{DetectionOutcome, EyeDetectionResult, EyeSide};
use super::face_observation::{FaceObservation, LandmarkRegion};
use super::normalized::{NormalizedCoordinateError, NormalizedPointSet, NormalizedRect};
use crate::shared::geometry::{Extent, PixelPoint, PixelRect};

/// Which landmark clusters stand in for the eye positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EyeAnchor {
    #[default]
    Pupil,
    EyeContour,
}

impl EyeAnchor {
    pub fn regions(self) -> (LandmarkRegion, LandmarkRegion) {
        match self {
            EyeAnchor::Pupil => (LandmarkRegion::LeftPupil, LandmarkRegion::RightPupil),
            EyeAnchor::EyeContour => (LandmarkRegion::LeftEye, LandmarkRegion::RightEye),
        }
    }
}

impl std::str::FromStr for EyeAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pupil" => Ok(EyeAnchor::Pupil),
            "eye-contour" => Ok(EyeAnchor::EyeContour),
            other => Err(format!(
                "unknown eye anchor '{other}' (expected pupil or eye-contour)"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LandmarkProjector {
    anchor: EyeAnchor,
}

impl LandmarkProjector {
    pub fn new(anchor: EyeAnchor) -> Self {
        Self { anchor }
    }

    /// Bottom-left normalized box to top-left pixel rect.
    pub fn denormalize_rect(rect: &NormalizedRect, extent: Extent) -> PixelRect {
        let (w, h) = (extent.width as f64, extent.height as f64);
        PixelRect::new(
            rect.x() * w,
            (1.0 - rect.y() - rect.height()) * h,
            rect.width() * w,
            rect.height() * h,
        )
    }

    /// Inverse of [`Self::denormalize_rect`].
    pub fn renormalize_rect(
        rect: &PixelRect,
        extent: Extent,
    ) -> Result<NormalizedRect, NormalizedCoordinateError> {
        let (w, h) = (extent.width as f64, extent.height as f64);
        let height = rect.height / h;
        NormalizedRect::new(rect.x / w, 1.0 - rect.y / h - height, rect.width / w, height)
    }

    /// Mean of the cluster, placed inside `face_box`. Empty clusters are absent.
    pub fn centroid(points: &NormalizedPointSet, face_box: &PixelRect) -> Option<PixelPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sum_x, sum_y) = points
            .points()
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x(), sy + p.y()));
        let (cx, cy) = (sum_x / n, sum_y / n);

        Some(PixelPoint::new(
            face_box.x + cx * face_box.width,
            face_box.y + cy * face_box.height,
        ))
    }

    pub fn classify(left: Option<PixelPoint>, right: Option<PixelPoint>) -> DetectionOutcome {
        match (left, right) {
            (Some(left), Some(right)) => DetectionOutcome::BothDetected {
                left,
                right,
                distance: left.distance_to(&right),
            },
            (Some(position), None) => DetectionOutcome::OnePresent {
                side: EyeSide::Left,
                position,
            },
            (None, Some(position)) => DetectionOutcome::OnePresent {
                side: EyeSide::Right,
                position,
            },
            (None, None) => DetectionOutcome::NoneDetected,
        }
    }

    /// Eye result for the first observed face.
    pub fn project(&self, observations: &[FaceObservation], extent: Extent) -> EyeDetectionResult {
        let Some(face) = observations.first() else {
            log::debug!("No face observations");
            return EyeDetectionResult::none();
        };
        if observations.len() > 1 {
            log::debug!(
                "{} faces observed, projecting the first",
                observations.len()
            );
        }

        let face_rect = Self::denormalize_rect(&face.bounding_box, extent);
        let Some(landmarks) = &face.landmarks else {
            return EyeDetectionResult {
                outcome: DetectionOutcome::NoneDetected,
                face_rect: Some(face_rect),
            };
        };

        let (left_region, right_region) = self.anchor.regions();
        let eye = |region| {
            landmarks
                .region(region)
                .and_then(|points| Self::centroid(points, &face_rect))
        };
        let outcome = Self::classify(eye(left_region), eye(right_region));
        log::debug!("Eye projection: {outcome:?}");

        EyeDetectionResult {
            outcome,
            face_rect: Some(face_rect),
        }
    }
}
