//! The eight EXIF orientation states and how to bake them into pixels.

use serde::{Deserialize, Serialize};

use super::frame::Frame;
use super::geometry::Extent;

/// How stored (sensor-order) pixels must be transformed for upright display.
///
/// Discriminants are the EXIF `Orientation` tag values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Up = 1,
    UpMirrored = 2,
    Down = 3,
    DownMirrored = 4,
    LeftMirrored = 5,
    Right = 6,
    RightMirrored = 7,
    Left = 8,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    pub fn from_exif(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.exif() == value)
    }

    pub fn exif(self) -> u8 {
        self as u8
    }

    /// Quarter-turn states display with width and height exchanged.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
                | Orientation::Left
        )
    }

    pub fn display_extent(self, stored: Extent) -> Extent {
        if self.swaps_axes() {
            stored.transposed()
        } else {
            stored
        }
    }

    /// Maps a display-space pixel to the stored pixel it is read from.
    fn source_of(self, dx: usize, dy: usize, w: usize, h: usize) -> (usize, usize) {
        match self {
            Orientation::Up => (dx, dy),
            Orientation::UpMirrored => (w - 1 - dx, dy),
            Orientation::Down => (w - 1 - dx, h - 1 - dy),
            Orientation::DownMirrored => (dx, h - 1 - dy),
            Orientation::LeftMirrored => (dy, dx),
            Orientation::Right => (dy, h - 1 - dx),
            Orientation::RightMirrored => (w - 1 - dy, h - 1 - dx),
            Orientation::Left => (w - 1 - dy, dx),
        }
    }

    /// Bakes this orientation into the frame's pixels.
    ///
    /// The returned frame is upright and tagged [`Orientation::Up`].
    pub fn apply(self, frame: &Frame) -> Frame {
        let stored = frame.extent();
        let display = self.display_extent(stored);
        if self == Orientation::Up || stored.is_empty() {
            return frame.clone().with_orientation(Orientation::Up);
        }

        let (w, h) = (stored.width as usize, stored.height as usize);
        let (dw, dh) = (display.width as usize, display.height as usize);
        let c = frame.channels() as usize;
        let src = frame.data();
        let mut out = vec![0u8; dw * dh * c];

        for dy in 0..dh {
            for dx in 0..dw {
                let (sx, sy) = self.source_of(dx, dy, w, h);
                let s = (sy * w + sx) * c;
                let d = (dy * dw + dx) * c;
                out[d..d + c].copy_from_slice(&src[s..s + c]);
            }
        }

        Frame::new(
            out,
            display.width,
            display.height,
            frame.channels(),
            Orientation::Up,
        )
    }
}
