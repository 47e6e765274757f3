use image::imageops::FilterType;
use image::GrayImage;

use crate::segmentation::domain::matte::Matte;
use crate::segmentation::domain::matte_aligner::{check_matte_buffer, AlignmentError, MatteResampler};
use crate::shared::geometry::Extent;

/// Resamples through `image::imageops::resize` with a fixed filter.
pub struct ImageMatteResampler {
    filter: FilterType,
}

impl ImageMatteResampler {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl MatteResampler for ImageMatteResampler {
    fn resample(&self, matte: &Matte, target: Extent) -> Result<Vec<u8>, AlignmentError> {
        let src = matte.extent();
        if src.is_empty() {
            return Err(AlignmentError::EmptyMatte {
                width: src.width,
                height: src.height,
            });
        }
        check_matte_buffer(matte)?;
        let img = GrayImage::from_raw(src.width, src.height, matte.data().to_vec()).ok_or_else(
            || AlignmentError::Resample(format!("no image over {}x{} matte", src.width, src.height)),
        )?;

        let resized = image::imageops::resize(&img, target.width, target.height, self.filter);
        Ok(resized.into_raw())
    }
}
