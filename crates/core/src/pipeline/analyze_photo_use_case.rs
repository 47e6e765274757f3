use std::time::SystemTime;

use crate::pipeline::analysis_error::AnalysisError;
use crate::pipeline::detect_eyes_use_case::DetectEyesUseCase;
use crate::pipeline::extract_hair_mask_use_case::ExtractHairMaskUseCase;
use crate::shared::photo::{AnalyzedPhoto, CapturedPhoto};

/// Full analysis of one capture: hair mask plus eye measurement.
///
/// Eye detection runs in the background while the mask is aligned on the
/// calling thread. The mask is required; a failed eye detection is logged
/// and leaves `eye_detection` empty.
pub struct AnalyzePhotoUseCase {
    extract_hair_mask: ExtractHairMaskUseCase,
    detect_eyes: DetectEyesUseCase,
}

impl AnalyzePhotoUseCase {
    pub fn new(extract_hair_mask: ExtractHairMaskUseCase, detect_eyes: DetectEyesUseCase) -> Self {
        Self {
            extract_hair_mask,
            detect_eyes,
        }
    }

    pub fn execute(&mut self, photo: CapturedPhoto) -> Result<AnalyzedPhoto, AnalysisError> {
        let pending = match self.detect_eyes.submit(&photo.frame) {
            Ok(pending) => Some(pending),
            Err(e) => {
                log::warn!("Eye detection not started: {e}");
                None
            }
        };

        let hair_mask = match self.extract_hair_mask.execute(&photo) {
            Ok(mask) => mask,
            Err(e) => {
                if let Some(pending) = pending {
                    pending.cancel();
                    let _ = self.detect_eyes.finish(pending);
                }
                return Err(e);
            }
        };

        let eye_detection = pending.and_then(|pending| match self.detect_eyes.finish(pending) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Eye detection failed: {e}");
                None
            }
        });

        log::info!(
            "Analyzed {}x{} photo: hair coverage {:.1}%, {}",
            photo.frame.width(),
            photo.frame.height(),
            hair_mask.mask.coverage(127) * 100.0,
            eye_detection
                .as_ref()
                .map_or("eye detection unavailable", |r| r.status_message())
        );

        Ok(AnalyzedPhoto {
            photo,
            hair_mask,
            eye_detection,
            processed_at: SystemTime::now(),
        })
    }
}
