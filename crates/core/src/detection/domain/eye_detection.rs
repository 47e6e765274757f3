use serde::{Deserialize, Serialize};

use crate::shared::geometry::{PixelPoint, PixelRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeSide {
    Left,
    Right,
}

/// What the eye search found, in pixel space.
///
/// Distance is only carried when both eyes are present.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    BothDetected {
        left: PixelPoint,
        right: PixelPoint,
        distance: f64,
    },
    OnePresent {
        side: EyeSide,
        position: PixelPoint,
    },
    NoneDetected,
}

impl DetectionOutcome {
    pub fn distance(&self) -> Option<f64> {
        match self {
            DetectionOutcome::BothDetected { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    pub fn eye(&self, side: EyeSide) -> Option<PixelPoint> {
        match (self, side) {
            (DetectionOutcome::BothDetected { left, .. }, EyeSide::Left) => Some(*left),
            (DetectionOutcome::BothDetected { right, .. }, EyeSide::Right) => Some(*right),
            (DetectionOutcome::OnePresent { side: s, position }, side) if *s == side => {
                Some(*position)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EyeDetectionResult {
    pub outcome: DetectionOutcome,
    pub face_rect: Option<PixelRect>,
}

impl EyeDetectionResult {
    pub fn none() -> Self {
        Self {
            outcome: DetectionOutcome::NoneDetected,
            face_rect: None,
        }
    }

    pub fn status_message(&self) -> &'static str {
        match self.outcome {
            DetectionOutcome::BothDetected { .. } => "Both eyes detected",
            DetectionOutcome::OnePresent { .. } => "Only one eye detected",
            DetectionOutcome::NoneDetected => "No eyes detected",
        }
    }

    pub fn formatted_distance(&self) -> Option<String> {
        self.outcome.distance().map(|d| format!("{d:.1} pixels"))
    }
}
