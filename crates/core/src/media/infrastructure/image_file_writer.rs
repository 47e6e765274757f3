use std::path::Path;

use image::{GrayImage, RgbImage, RgbaImage};

use crate::media::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Writes 1-, 3- or 4-channel frames with the `image` crate.
///
/// Output files carry no orientation tag. With `bake_orientation` the
/// frame's orientation is applied to the pixels first, so the file displays
/// upright; otherwise pixels are written in stored order.
pub struct ImageFileWriter {
    bake_orientation: bool,
}

impl ImageFileWriter {
    pub fn new(bake_orientation: bool) -> Self {
        Self { bake_orientation }
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let baked;
        let frame = if self.bake_orientation {
            baked = frame.orientation().apply(frame);
            &baked
        } else {
            frame
        };

        let (w, h) = (frame.width(), frame.height());
        let data = frame.data().to_vec();
        match frame.channels() {
            1 => GrayImage::from_raw(w, h, data)
                .ok_or("Failed to create grayscale image from frame data")?
                .save(path)?,
            3 => RgbImage::from_raw(w, h, data)
                .ok_or("Failed to create RGB image from frame data")?
                .save(path)?,
            4 => RgbaImage::from_raw(w, h, data)
                .ok_or("Failed to create RGBA image from frame data")?
                .save(path)?,
            n => return Err(format!("Unsupported channel count: {n}").into()),
        }
        Ok(())
    }
}
