use std::time::SystemTime;

use crate::detection::domain::eye_detection::EyeDetectionResult;
use crate::segmentation::domain::matte_aligner::AlignedMask;

use super::frame::Frame;

/// A photo as delivered by the capture layer.
#[derive(Clone, Debug)]
pub struct CapturedPhoto {
    pub frame: Frame,
    pub captured_at: SystemTime,
}

impl CapturedPhoto {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            captured_at: SystemTime::now(),
        }
    }
}

/// Hair mask aligned to the photo it was extracted from.
#[derive(Clone, Debug)]
pub struct HairMask {
    pub mask: AlignedMask,
    pub processed_at: SystemTime,
}

impl HairMask {
    pub fn new(mask: AlignedMask) -> Self {
        Self {
            mask,
            processed_at: SystemTime::now(),
        }
    }
}

/// Display-ready result of one capture.
#[derive(Clone, Debug)]
pub struct AnalyzedPhoto {
    pub photo: CapturedPhoto,
    pub hair_mask: HairMask,
    pub eye_detection: Option<EyeDetectionResult>,
    pub processed_at: SystemTime,
}
