use super::matte::Matte;
use crate::shared::frame::Frame;

/// Supplies the hair segmentation matte that accompanies a captured photo.
///
/// `Ok(None)` means the capture carries no segmentation; callers report that
/// as a missing-segmentation condition instead of aligning anything.
pub trait SegmentationSource: Send {
    fn hair_matte(&mut self, photo: &Frame) -> Result<Option<Matte>, Box<dyn std::error::Error>>;
}
