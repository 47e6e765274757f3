use crate::segmentation::domain::matte::Matte;
use crate::segmentation::domain::matte_aligner::{check_matte_buffer, AlignmentError, MatteResampler};
use crate::shared::geometry::Extent;

/// Bilinear resampler over an ndarray view of the matte.
///
/// Each destination pixel centre is mapped back through the per-axis scale
/// (`src = (dst + 0.5) / scale - 0.5`) and clamped to the matte border.
pub struct BilinearMatteResampler;

impl BilinearMatteResampler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BilinearMatteResampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample taps along one axis: `(lower index, upper index, upper weight)`.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = dst_len as f32 / src_len as f32;
    let max = (src_len - 1) as f32;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f32 + 0.5) / scale - 0.5).clamp(0.0, max);
            let i0 = s.floor() as usize;
            let i1 = (i0 + 1).min(src_len - 1);
            (i0, i1, s - i0 as f32)
        })
        .collect()
}

impl MatteResampler for BilinearMatteResampler {
    fn resample(&self, matte: &Matte, target: Extent) -> Result<Vec<u8>, AlignmentError> {
        let src = matte.extent();
        if src.is_empty() {
            return Err(AlignmentError::EmptyMatte {
                width: src.width,
                height: src.height,
            });
        }
        check_matte_buffer(matte)?;
        let view = matte.as_ndarray().ok_or_else(|| {
            AlignmentError::Resample(format!("no view over {}x{} matte", src.width, src.height))
        })?;

        let cols = axis_taps(src.width as usize, target.width as usize);
        let rows = axis_taps(src.height as usize, target.height as usize);

        let mut out = Vec::with_capacity(cols.len() * rows.len());
        for &(y0, y1, fy) in &rows {
            for &(x0, x1, fx) in &cols {
                let top = view[[y0, x0]] as f32 * (1.0 - fx) + view[[y0, x1]] as f32 * fx;
                let bottom = view[[y1, x0]] as f32 * (1.0 - fx) + view[[y1, x1]] as f32 * fx;
                let v = top * (1.0 - fy) + bottom * fy;
                out.push(v.round().clamp(0.0, 255.0) as u8);
            }
        }
        Ok(out)
    }
}
