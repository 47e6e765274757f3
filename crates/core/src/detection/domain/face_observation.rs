use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::normalized::{NormalizedPointSet, NormalizedRect};

/// Named landmark clusters reported by the face-landmark detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkRegion {
    FaceContour,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    NoseCrest,
    MedianLine,
    OuterLips,
    InnerLips,
    LeftPupil,
    RightPupil,
}

/// Landmark clusters of one face, each relative to the face bounding box.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceLandmarks {
    regions: BTreeMap<LandmarkRegion, NormalizedPointSet>,
}

impl FaceLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: LandmarkRegion, points: NormalizedPointSet) -> Self {
        self.regions.insert(region, points);
        self
    }

    pub fn region(&self, region: LandmarkRegion) -> Option<&NormalizedPointSet> {
        self.regions.get(&region)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// One detected face.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    #[serde(default)]
    pub landmarks: Option<FaceLandmarks>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl FaceObservation {
    pub fn new(bounding_box: NormalizedRect, landmarks: Option<FaceLandmarks>) -> Self {
        Self {
            bounding_box,
            landmarks,
            confidence: None,
        }
    }
}
