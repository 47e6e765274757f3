//! Preview compositing: tinted hair mask over the photo, plus eye markers.

use ndarray::{Axis, Zip};
use thiserror::Error;

use crate::detection::domain::eye_detection::{EyeDetectionResult, EyeSide};
use crate::segmentation::domain::matte_aligner::AlignedMask;
use crate::shared::constants::{
    DEFAULT_MASK_OPACITY, DEFAULT_MASK_TINT, EYE_MARKER_COLOR, EYE_MARKER_RADIUS_RATIO,
    MIN_EYE_MARKER_RADIUS,
};
use crate::shared::frame::Frame;
use crate::shared::geometry::{Extent, PixelPoint};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error("mask extent {mask:?} does not match photo extent {photo:?}")]
    ExtentMismatch { photo: Extent, mask: Extent },
    #[error("overlay needs an RGB photo, got {0} channel(s)")]
    UnsupportedChannels(u8),
    #[error("opacity must lie in [0, 1], got {0}")]
    InvalidOpacity(f64),
}

/// Screen-blends a tinted mask onto a photo.
#[derive(Clone, Copy, Debug)]
pub struct MaskOverlay {
    tint: [u8; 3],
    opacity: f64,
}

impl Default for MaskOverlay {
    fn default() -> Self {
        Self {
            tint: DEFAULT_MASK_TINT,
            opacity: DEFAULT_MASK_OPACITY,
        }
    }
}

impl MaskOverlay {
    pub fn new(tint: [u8; 3], opacity: f64) -> Result<Self, OverlayError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(OverlayError::InvalidOpacity(opacity));
        }
        Ok(Self { tint, opacity })
    }

    /// `out = 1 - (1 - photo) * (1 - tint * mask * opacity)` per channel.
    ///
    /// Works in stored pixel order; the result keeps the photo orientation.
    pub fn compose(&self, photo: &Frame, mask: &AlignedMask) -> Result<Frame, OverlayError> {
        if photo.channels() != 3 {
            return Err(OverlayError::UnsupportedChannels(photo.channels()));
        }
        if photo.extent() != mask.extent() {
            return Err(OverlayError::ExtentMismatch {
                photo: photo.extent(),
                mask: mask.extent(),
            });
        }

        let mut out = photo.clone();
        let weights = mask.mask().as_ndarray();
        Zip::from(out.as_ndarray_mut().lanes_mut(Axis(2)))
            .and(weights.lanes(Axis(2)))
            .for_each(|mut pixel, m| {
                let weight = m[0] as f64 / 255.0 * self.opacity;
                for (c, value) in pixel.iter_mut().enumerate() {
                    let base = *value as f64 / 255.0;
                    let over = self.tint[c] as f64 / 255.0 * weight;
                    let blended = 1.0 - (1.0 - base) * (1.0 - over);
                    *value = (blended * 255.0).round() as u8;
                }
            });
        Ok(out)
    }
}

/// Marker radius scaled to the face size.
pub fn eye_marker_radius(result: &EyeDetectionResult) -> f64 {
    result
        .face_rect
        .map_or(MIN_EYE_MARKER_RADIUS, |r| r.width * EYE_MARKER_RADIUS_RATIO)
        .max(MIN_EYE_MARKER_RADIUS)
}

/// Draws a filled disc at each detected eye. Discs are clipped to the frame.
pub fn mark_eyes(frame: &mut Frame, result: &EyeDetectionResult) {
    let radius = eye_marker_radius(result);
    for side in [EyeSide::Left, EyeSide::Right] {
        if let Some(eye) = result.outcome.eye(side) {
            fill_disc(frame, eye, radius, EYE_MARKER_COLOR);
        }
    }
}

fn fill_disc(frame: &mut Frame, center: PixelPoint, radius: f64, color: [u8; 3]) {
    if frame.channels() < 3 {
        return;
    }
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    let x0 = ((center.x - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64).min(w - 1);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let y1 = ((center.y + radius).ceil() as i64).min(h - 1);

    let r2 = radius * radius;
    let mut pixels = frame.as_ndarray_mut();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                for (c, &value) in color.iter().enumerate() {
                    pixels[[y as usize, x as usize, c]] = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::eye_detection::DetectionOutcome;
    use crate::segmentation::domain::matte::Matte;
    use crate::segmentation::domain::matte_aligner::MatteAligner;
    use crate::segmentation::infrastructure::bilinear_matte_resampler::BilinearMatteResampler;
    use crate::shared::geometry::PixelRect;
    use crate::shared::orientation::Orientation;
    use rstest::rstest;

    fn photo(w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 3, Orientation::Left)
    }

    fn mask(w: u32, h: u32, value: u8) -> AlignedMask {
        MatteAligner::new(Box::new(BilinearMatteResampler::new()))
            .align(
                &Matte::new(vec![value; (w * h) as usize], w, h),
                Extent::new(w, h),
                Orientation::Left,
            )
            .unwrap()
    }

    #[test]
    fn test_zero_mask_leaves_photo_unchanged() {
        let p = photo(4, 4, 77);
        let out = MaskOverlay::default().compose(&p, &mask(4, 4, 0)).unwrap();
        assert_eq!(out, p);
    }

    #[test]
    fn test_full_mask_full_opacity_screens_tint() {
        let overlay = MaskOverlay::new([0, 255, 255], 1.0).unwrap();
        let out = overlay.compose(&photo(2, 2, 100), &mask(2, 2, 255)).unwrap();
        // Red untouched, green/blue saturate.
        assert_eq!(&out.data()[..3], &[100, 255, 255]);
        assert_eq!(out.orientation(), Orientation::Left);
    }

    #[test]
    fn test_screen_never_darkens() {
        let p = photo(3, 3, 180);
        let out = MaskOverlay::default().compose(&p, &mask(3, 3, 128)).unwrap();
        assert!(out.data().iter().all(|&v| v >= 180));
    }

    #[test]
    fn test_extent_mismatch() {
        let err = MaskOverlay::default()
            .compose(&photo(4, 4, 0), &mask(2, 2, 0))
            .unwrap_err();
        assert!(matches!(err, OverlayError::ExtentMismatch { .. }));
    }

    #[test]
    fn test_requires_rgb_photo() {
        let gray = Frame::new(vec![0; 4], 2, 2, 1, Orientation::Up);
        assert_eq!(
            MaskOverlay::default().compose(&gray, &mask(2, 2, 0)).unwrap_err(),
            OverlayError::UnsupportedChannels(1)
        );
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    fn test_invalid_opacity(#[case] opacity: f64) {
        assert!(MaskOverlay::new([0, 0, 0], opacity).is_err());
    }

    #[test]
    fn test_mark_eyes_draws_both_discs() {
        let mut frame = photo(100, 100, 0);
        let result = EyeDetectionResult {
            outcome: DetectionOutcome::BothDetected {
                left: PixelPoint::new(20.5, 50.5),
                right: PixelPoint::new(80.5, 50.5),
                distance: 60.0,
            },
            face_rect: Some(PixelRect::new(0.0, 0.0, 100.0, 100.0)),
        };
        mark_eyes(&mut frame, &result);
        let at = |x: usize, y: usize| frame.data()[(y * 100 + x) * 3 + 1];
        assert_eq!(at(20, 50), EYE_MARKER_COLOR[1]);
        assert_eq!(at(80, 50), EYE_MARKER_COLOR[1]);
        assert_eq!(at(50, 50), 0);
    }

    #[test]
    fn test_mark_eyes_clips_at_frame_edge() {
        let mut frame = photo(10, 10, 0);
        let result = EyeDetectionResult {
            outcome: DetectionOutcome::OnePresent {
                side: EyeSide::Left,
                position: PixelPoint::new(0.0, 0.0),
            },
            face_rect: None,
        };
        mark_eyes(&mut frame, &result);
        assert_eq!(frame.data()[1], EYE_MARKER_COLOR[1]);
    }

    #[test]
    fn test_marker_radius_has_floor() {
        let r = EyeDetectionResult {
            outcome: DetectionOutcome::NoneDetected,
            face_rect: Some(PixelRect::new(0.0, 0.0, 10.0, 10.0)),
        };
        assert_eq!(eye_marker_radius(&r), MIN_EYE_MARKER_RADIUS);
    }
}
