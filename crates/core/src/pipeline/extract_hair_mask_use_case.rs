use crate::pipeline::analysis_error::AnalysisError;
use crate::segmentation::domain::matte_aligner::MatteAligner;
use crate::segmentation::domain::segmentation_source::SegmentationSource;
use crate::shared::photo::{CapturedPhoto, HairMask};

/// Fetches the hair matte for a photo and aligns it to the photo's grid.
pub struct ExtractHairMaskUseCase {
    source: Box<dyn SegmentationSource>,
    aligner: MatteAligner,
}

impl ExtractHairMaskUseCase {
    pub fn new(source: Box<dyn SegmentationSource>, aligner: MatteAligner) -> Self {
        Self { source, aligner }
    }

    pub fn execute(&mut self, photo: &CapturedPhoto) -> Result<HairMask, AnalysisError> {
        let matte = self
            .source
            .hair_matte(&photo.frame)
            .map_err(|e| AnalysisError::Segmentation(e.to_string()))?
            .ok_or(AnalysisError::NoSegmentation)?;

        let aligned = self.aligner.align_to(&matte, &photo.frame)?;
        Ok(HairMask::new(aligned))
    }
}
