use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

use crate::segmentation::domain::matte_aligner::MatteResampler;

use super::bilinear_matte_resampler::BilinearMatteResampler;
use super::image_matte_resampler::ImageMatteResampler;

/// Resampling filter used when stretching a matte onto the photo grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResampleFilter {
    #[default]
    Bilinear,
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub const NAMES: &'static [&'static str] = &[
        "bilinear",
        "nearest",
        "triangle",
        "catmull-rom",
        "gaussian",
        "lanczos3",
    ];

    fn image_filter(self) -> Option<FilterType> {
        match self {
            ResampleFilter::Bilinear => None,
            ResampleFilter::Nearest => Some(FilterType::Nearest),
            ResampleFilter::Triangle => Some(FilterType::Triangle),
            ResampleFilter::CatmullRom => Some(FilterType::CatmullRom),
            ResampleFilter::Gaussian => Some(FilterType::Gaussian),
            ResampleFilter::Lanczos3 => Some(FilterType::Lanczos3),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResampleFilter::Bilinear => "bilinear",
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Triangle => "triangle",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Gaussian => "gaussian",
            ResampleFilter::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bilinear" => Ok(ResampleFilter::Bilinear),
            "nearest" => Ok(ResampleFilter::Nearest),
            "triangle" => Ok(ResampleFilter::Triangle),
            "catmull-rom" | "catmullrom" => Ok(ResampleFilter::CatmullRom),
            "gaussian" => Ok(ResampleFilter::Gaussian),
            "lanczos3" => Ok(ResampleFilter::Lanczos3),
            other => Err(format!(
                "unknown resample filter '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Bilinear uses the in-crate resampler; every other filter goes through
/// the `image` crate.
pub fn create_resampler(filter: ResampleFilter) -> Box<dyn MatteResampler> {
    log::debug!("Using {filter} matte resampler");
    match filter.image_filter() {
        None => Box::new(BilinearMatteResampler::new()),
        Some(f) => Box::new(ImageMatteResampler::new(f)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::domain::matte::Matte;
    use crate::shared::geometry::Extent;
    use rstest::rstest;

    #[rstest]
    #[case("bilinear", ResampleFilter::Bilinear)]
    #[case("Nearest", ResampleFilter::Nearest)]
    #[case("triangle", ResampleFilter::Triangle)]
    #[case("catmull-rom", ResampleFilter::CatmullRom)]
    #[case("catmullrom", ResampleFilter::CatmullRom)]
    #[case("gaussian", ResampleFilter::Gaussian)]
    #[case("LANCZOS3", ResampleFilter::Lanczos3)]
    fn test_parse(#[case] name: &str, #[case] expected: ResampleFilter) {
        assert_eq!(name.parse::<ResampleFilter>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_lists_choices() {
        let err = "cubic".parse::<ResampleFilter>().unwrap_err();
        assert!(err.contains("cubic"));
        assert!(err.contains("lanczos3"));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for name in ResampleFilter::NAMES {
            let filter: ResampleFilter = name.parse().unwrap();
            assert_eq!(filter.to_string(), *name);
        }
    }

    #[test]
    fn test_every_factory_resampler_fills_target() {
        let matte = Matte::new(vec![50; 12], 4, 3);
        for name in ResampleFilter::NAMES {
            let resampler = create_resampler(name.parse().unwrap());
            let out = resampler.resample(&matte, Extent::new(9, 7)).unwrap();
            assert_eq!(out.len(), 63, "filter {name}");
        }
    }
}
