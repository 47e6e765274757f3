use std::path::Path;

use image::metadata::Orientation as ExifOrientation;
use image::{DynamicImage, ImageDecoder};

use crate::media::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;
use crate::shared::orientation::Orientation;

/// Reads photos with the `image` crate, keeping pixels in stored order and
/// carrying the EXIF orientation on the frame.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps through the EXIF tag value both enums share.
fn from_exif_orientation(o: ExifOrientation) -> Orientation {
    let tag = o.to_exif();
    Orientation::from_exif(tag).unwrap_or_else(|| {
        log::debug!("Unknown EXIF orientation {tag}, treating as upright");
        Orientation::Up
    })
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let mut decoder = image::ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;

        let orientation = match decoder.orientation() {
            Ok(o) => from_exif_orientation(o),
            Err(e) => {
                log::debug!("No usable orientation in {}: {e}", path.display());
                Orientation::Up
            }
        };

        let rgb = DynamicImage::from_decoder(decoder)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        log::debug!(
            "Read {width}x{height} photo from {} ({orientation:?})",
            path.display()
        );
        Ok(Frame::new(rgb.into_raw(), width, height, 3, orientation))
    }
}
