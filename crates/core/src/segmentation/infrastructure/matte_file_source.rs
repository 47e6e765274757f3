use std::path::{Path, PathBuf};

use crate::segmentation::domain::matte::Matte;
use crate::segmentation::domain::segmentation_source::SegmentationSource;
use crate::shared::frame::Frame;
use crate::shared::orientation::Orientation;

/// Reads the hair matte from an image file exported alongside the photo.
///
/// Multi-channel files contribute their first channel. Without a configured
/// path the source reports that the capture has no segmentation.
pub struct MatteFileSource {
    path: Option<PathBuf>,
}

impl MatteFileSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

/// Decodes at 8 bits per sample, keeping the file's channel layout.
fn decode_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)?;
    let (width, height) = (img.width(), img.height());
    let (data, channels) = match img.color().channel_count() {
        1 => (img.into_luma8().into_raw(), 1),
        2 => (img.into_luma_alpha8().into_raw(), 2),
        3 => (img.into_rgb8().into_raw(), 3),
        _ => (img.into_rgba8().into_raw(), 4),
    };
    Ok(Frame::new(data, width, height, channels, Orientation::Up))
}

impl SegmentationSource for MatteFileSource {
    fn hair_matte(&mut self, _photo: &Frame) -> Result<Option<Matte>, Box<dyn std::error::Error>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let frame = decode_frame(path)?;
        log::debug!(
            "Loaded {}x{} matte ({} channel(s)) from {}",
            frame.width(),
            frame.height(),
            frame.channels(),
            path.display()
        );
        Ok(Some(Matte::from_frame(&frame)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Extent;

    fn photo() -> Frame {
        Frame::new(vec![0; 12], 2, 2, 3, Orientation::Up)
    }

    #[test]
    fn test_no_path_means_no_segmentation() {
        let mut source = MatteFileSource::new(None);
        assert!(source.hair_matte(&photo()).unwrap().is_none());
    }

    #[test]
    fn test_reads_grayscale_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matte.png");
        let mut img = image::GrayImage::new(6, 4);
        img.put_pixel(1, 2, image::Luma([200]));
        img.save(&path).unwrap();

        let mut source = MatteFileSource::new(Some(path));
        let matte = source.hair_matte(&photo()).unwrap().unwrap();
        assert_eq!(matte.extent(), Extent::new(6, 4));
        assert_eq!(matte.data()[2 * 6 + 1], 200);
        assert_eq!(matte.data()[0], 0);
    }

    #[test]
    fn test_rgb_file_uses_first_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matte.png");
        let img = image::RgbImage::from_pixel(3, 3, image::Rgb([200, 0, 0]));
        img.save(&path).unwrap();

        let mut source = MatteFileSource::new(Some(path));
        let matte = source.hair_matte(&photo()).unwrap().unwrap();
        assert_eq!(matte.extent(), Extent::new(3, 3));
        assert!(matte.has_consistent_buffer());
        assert!(matte.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_rgba_file_uses_first_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matte.png");
        let mut img = image::RgbaImage::from_pixel(4, 2, image::Rgba([0, 90, 90, 255]));
        img.put_pixel(3, 1, image::Rgba([170, 0, 0, 10]));
        img.save(&path).unwrap();

        let mut source = MatteFileSource::new(Some(path));
        let matte = source.hair_matte(&photo()).unwrap().unwrap();
        assert_eq!(matte.data().len(), 8);
        assert_eq!(matte.data()[0], 0);
        assert_eq!(matte.data()[7], 170);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut source = MatteFileSource::new(Some(PathBuf::from("/nonexistent/matte.png")));
        assert!(source.hair_matte(&photo()).is_err());
    }
}
