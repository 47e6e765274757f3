pub mod matte;
pub mod matte_aligner;
pub mod segmentation_source;
