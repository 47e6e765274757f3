//! Anisotropic rescale of a segmentation matte onto a reference image grid.
//!
//! The matte is stretched independently along each axis so that it covers
//! exactly the reference extent, whatever the relative aspect ratios.
//! No rotation or translation is applied; the result only inherits the
//! reference orientation tag.

use thiserror::Error;

use super::matte::Matte;
use crate::shared::frame::Frame;
use crate::shared::geometry::Extent;
use crate::shared::orientation::Orientation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    #[error("reference image has no pixel extent ({width}x{height})")]
    EmptyReference { width: u32, height: u32 },
    #[error("matte has no pixel extent ({width}x{height})")]
    EmptyMatte { width: u32, height: u32 },
    #[error("matte buffer holds {actual} samples, expected {expected}")]
    InvalidMatteBuffer { expected: usize, actual: usize },
    #[error("failed to resample matte: {0}")]
    Resample(String),
}

/// Resamples a matte onto a target pixel grid.
pub trait MatteResampler: Send + Sync {
    /// Returns `target.width * target.height` single-channel samples.
    fn resample(&self, matte: &Matte, target: Extent) -> Result<Vec<u8>, AlignmentError>;
}

/// Per-axis factors mapping matte coordinates onto reference coordinates.
pub fn scale_factors(matte: Extent, reference: Extent) -> Result<(f64, f64), AlignmentError> {
    if reference.is_empty() {
        return Err(AlignmentError::EmptyReference {
            width: reference.width,
            height: reference.height,
        });
    }
    if matte.is_empty() {
        return Err(AlignmentError::EmptyMatte {
            width: matte.width,
            height: matte.height,
        });
    }
    Ok((
        reference.width as f64 / matte.width as f64,
        reference.height as f64 / matte.height as f64,
    ))
}

/// A matte resampled to a reference image's extent and orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedMask {
    mask: Frame,
    scale_x: f64,
    scale_y: f64,
}

impl AlignedMask {
    pub fn mask(&self) -> &Frame {
        &self.mask
    }

    pub fn extent(&self) -> Extent {
        self.mask.extent()
    }

    pub fn orientation(&self) -> Orientation {
        self.mask.orientation()
    }

    pub fn scale_factors(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Fraction of mask samples strictly above `threshold`.
    pub fn coverage(&self, threshold: u8) -> f64 {
        let data = self.mask.data();
        if data.is_empty() {
            return 0.0;
        }
        let hits = data.iter().filter(|&&v| v > threshold).count();
        hits as f64 / data.len() as f64
    }
}

/// Rejects a matte whose buffer length disagrees with its extent.
pub fn check_matte_buffer(matte: &Matte) -> Result<(), AlignmentError> {
    if matte.has_consistent_buffer() {
        return Ok(());
    }
    let extent = matte.extent();
    Err(AlignmentError::InvalidMatteBuffer {
        expected: (extent.width as usize) * (extent.height as usize),
        actual: matte.data().len(),
    })
}

pub struct MatteAligner {
    resampler: Box<dyn MatteResampler>,
}

impl MatteAligner {
    pub fn new(resampler: Box<dyn MatteResampler>) -> Self {
        Self { resampler }
    }

    pub fn align(
        &self,
        matte: &Matte,
        reference: Extent,
        orientation: Orientation,
    ) -> Result<AlignedMask, AlignmentError> {
        let (scale_x, scale_y) = scale_factors(matte.extent(), reference)?;
        check_matte_buffer(matte)?;

        log::debug!(
            "Aligning {}x{} matte to {}x{} (scale {scale_x:.3} x {scale_y:.3})",
            matte.extent().width,
            matte.extent().height,
            reference.width,
            reference.height
        );

        let data = self.resampler.resample(matte, reference)?;
        let expected = (reference.width as usize) * (reference.height as usize);
        if data.len() != expected {
            return Err(AlignmentError::Resample(format!(
                "resampler returned {} samples for a {}x{} grid",
                data.len(),
                reference.width,
                reference.height
            )));
        }

        Ok(AlignedMask {
            mask: Frame::new(data, reference.width, reference.height, 1, orientation),
            scale_x,
            scale_y,
        })
    }

    /// Aligns to the stored extent and orientation of `reference`.
    pub fn align_to(&self, matte: &Matte, reference: &Frame) -> Result<AlignedMask, AlignmentError> {
        self.align(matte, reference.extent(), reference.orientation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    /// Nearest-sample stand-in so these tests only exercise the aligner.
    struct NearestStub;

    impl MatteResampler for NearestStub {
        fn resample(&self, matte: &Matte, target: Extent) -> Result<Vec<u8>, AlignmentError> {
            let src = matte.extent();
            let mut out = Vec::with_capacity((target.width * target.height) as usize);
            for y in 0..target.height {
                let sy = (y as u64 * src.height as u64 / target.height as u64) as usize;
                for x in 0..target.width {
                    let sx = (x as u64 * src.width as u64 / target.width as u64) as usize;
                    out.push(matte.data()[sy * src.width as usize + sx]);
                }
            }
            Ok(out)
        }
    }

    struct ShortStub;

    impl MatteResampler for ShortStub {
        fn resample(&self, _matte: &Matte, _target: Extent) -> Result<Vec<u8>, AlignmentError> {
            Ok(vec![0; 3])
        }
    }

    fn aligner() -> MatteAligner {
        MatteAligner::new(Box::new(NearestStub))
    }

    fn matte(w: u32, h: u32) -> Matte {
        Matte::new(vec![200; (w * h) as usize], w, h)
    }

    #[test]
    fn test_non_uniform_scale_factors() {
        let (sx, sy) = scale_factors(Extent::new(100, 200), Extent::new(400, 400)).unwrap();
        assert_relative_eq!(sx, 4.0);
        assert_relative_eq!(sy, 2.0);
    }

    #[test]
    fn test_align_non_uniform_covers_reference_exactly() {
        let aligned = aligner()
            .align(&matte(100, 200), Extent::new(400, 400), Orientation::Up)
            .unwrap();
        assert_eq!(aligned.extent(), Extent::new(400, 400));
        assert_eq!(aligned.mask().channels(), 1);
        let (sx, sy) = aligned.scale_factors();
        assert_relative_eq!(sx, 4.0);
        assert_relative_eq!(sy, 2.0);
    }

    #[rstest]
    #[case::upscale((64, 48), (640, 480))]
    #[case::downscale((640, 480), (64, 48))]
    #[case::non_square((7, 3), (1000, 2000))]
    #[case::portrait_sensor((576, 768), (3024, 4032))]
    #[case::identity((32, 32), (32, 32))]
    #[case::one_pixel((1, 1), (5, 9))]
    fn test_output_extent_equals_reference(#[case] m: (u32, u32), #[case] r: (u32, u32)) {
        let aligned = aligner()
            .align(&matte(m.0, m.1), Extent::new(r.0, r.1), Orientation::Up)
            .unwrap();
        assert_eq!(aligned.extent(), Extent::new(r.0, r.1));
        assert_eq!(aligned.mask().data().len(), (r.0 * r.1) as usize);
    }

    #[rstest]
    #[case(Orientation::Right)]
    #[case(Orientation::LeftMirrored)]
    #[case(Orientation::Down)]
    fn test_result_carries_reference_orientation(#[case] orientation: Orientation) {
        let aligned = aligner()
            .align(&matte(10, 10), Extent::new(20, 30), orientation)
            .unwrap();
        assert_eq!(aligned.orientation(), orientation);
    }

    #[test]
    fn test_align_to_uses_frame_extent_and_orientation() {
        let reference = Frame::new(vec![0; 40 * 30 * 3], 40, 30, 3, Orientation::Left);
        let aligned = aligner().align_to(&matte(4, 3), &reference).unwrap();
        assert_eq!(aligned.extent(), Extent::new(40, 30));
        assert_eq!(aligned.orientation(), Orientation::Left);
    }

    #[rstest]
    #[case::zero_width(0, 10)]
    #[case::zero_height(10, 0)]
    fn test_empty_reference_fails(#[case] w: u32, #[case] h: u32) {
        let err = aligner()
            .align(&matte(4, 4), Extent::new(w, h), Orientation::Up)
            .unwrap_err();
        assert_eq!(err, AlignmentError::EmptyReference { width: w, height: h });
    }

    #[test]
    fn test_empty_matte_fails() {
        let err = aligner()
            .align(&Matte::new(vec![], 0, 4), Extent::new(10, 10), Orientation::Up)
            .unwrap_err();
        assert!(matches!(err, AlignmentError::EmptyMatte { .. }));
    }

    #[test]
    fn test_inconsistent_matte_buffer_fails() {
        let err = aligner()
            .align(&Matte::new(vec![0; 3], 2, 2), Extent::new(10, 10), Orientation::Up)
            .unwrap_err();
        assert_eq!(
            err,
            AlignmentError::InvalidMatteBuffer {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_short_resampler_output_is_rejected() {
        let err = MatteAligner::new(Box::new(ShortStub))
            .align(&matte(2, 2), Extent::new(10, 10), Orientation::Up)
            .unwrap_err();
        assert!(matches!(err, AlignmentError::Resample(_)));
    }

    #[test]
    fn test_coverage() {
        let matte = Matte::new(vec![0, 255, 255, 0], 2, 2);
        let aligned = aligner()
            .align(&matte, Extent::new(2, 2), Orientation::Up)
            .unwrap();
        assert_relative_eq!(aligned.coverage(127), 0.5);
    }
}
