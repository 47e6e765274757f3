use ndarray::ArrayView2;

use crate::shared::frame::Frame;
use crate::shared::geometry::Extent;

/// Single-channel segmentation matte in its native, unrotated extent.
///
/// Mattes come straight from the sensor pipeline, so they carry no
/// orientation. A buffer that does not match the extent is kept as-is and
/// rejected when it is viewed or resampled.
#[derive(Clone, Debug, PartialEq)]
pub struct Matte {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Matte {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Takes the first channel of `frame`; orientation is discarded.
    pub fn from_frame(frame: &Frame) -> Self {
        let c = frame.channels().max(1) as usize;
        let data = frame.data().iter().step_by(c).copied().collect();
        Self::new(data, frame.width(), frame.height())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    pub fn has_consistent_buffer(&self) -> bool {
        self.data.len() == (self.width as usize) * (self.height as usize)
    }

    /// `(rows, cols)` view, or `None` when the buffer does not match the extent.
    pub fn as_ndarray(&self) -> Option<ArrayView2<'_, u8>> {
        if !self.has_consistent_buffer() {
            return None;
        }
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data).ok()
    }
}
