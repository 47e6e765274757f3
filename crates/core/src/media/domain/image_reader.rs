use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes a still photo into a [`Frame`] in stored pixel order, tagged
/// with the orientation recorded by the camera.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
