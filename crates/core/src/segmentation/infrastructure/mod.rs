pub mod bilinear_matte_resampler;
pub mod image_matte_resampler;
pub mod matte_file_source;
pub mod resampler_factory;
