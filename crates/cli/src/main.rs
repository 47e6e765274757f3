use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;

use hairline_core::detection::domain::eye_detection::EyeDetectionResult;
use hairline_core::detection::domain::landmark_projector::{EyeAnchor, LandmarkProjector};
use hairline_core::detection::infrastructure::json_landmark_detector::JsonLandmarkDetector;
use hairline_core::media::domain::image_reader::ImageReader;
use hairline_core::media::domain::image_writer::ImageWriter;
use hairline_core::media::infrastructure::image_file_reader::ImageFileReader;
use hairline_core::media::infrastructure::image_file_writer::ImageFileWriter;
use hairline_core::pipeline::analyze_photo_use_case::AnalyzePhotoUseCase;
use hairline_core::pipeline::detect_eyes_use_case::DetectEyesUseCase;
use hairline_core::pipeline::extract_hair_mask_use_case::ExtractHairMaskUseCase;
use hairline_core::rendering::mask_overlay::{mark_eyes, MaskOverlay};
use hairline_core::segmentation::domain::matte_aligner::MatteAligner;
use hairline_core::segmentation::infrastructure::matte_file_source::MatteFileSource;
use hairline_core::segmentation::infrastructure::resampler_factory::{
    create_resampler, ResampleFilter,
};
use hairline_core::shared::constants::{
    DEFAULT_MASK_OPACITY, DEFAULT_MASK_TINT, IMAGE_EXTENSIONS,
};
use hairline_core::shared::geometry::Extent;
use hairline_core::shared::orientation::Orientation;
use hairline_core::shared::photo::{CapturedPhoto, HairMask};

/// Hair mask alignment and eye distance measurement for portrait photos.
#[derive(Parser)]
#[command(name = "hairline")]
struct Cli {
    /// Captured photo.
    input: PathBuf,

    /// Hair segmentation matte (grayscale image, any size).
    #[arg(long)]
    matte: Option<PathBuf>,

    /// Face landmark observations as JSON.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Write the aligned hair mask to this image file.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Write a preview with the tinted mask and eye markers.
    #[arg(long)]
    overlay_out: Option<PathBuf>,

    /// Write a JSON analysis report.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Matte resampling filter: bilinear, nearest, triangle, catmull-rom, gaussian, lanczos3.
    #[arg(long, default_value = "bilinear")]
    filter: ResampleFilter,

    /// Landmark cluster used as the eye position: pupil or eye-contour.
    #[arg(long, default_value = "pupil")]
    eye_anchor: EyeAnchor,

    /// Mask tint opacity in the preview (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_MASK_OPACITY)]
    mask_opacity: f64,

    /// Rotate written images upright instead of keeping the stored pixel order.
    #[arg(long)]
    bake_orientation: bool,
}

#[derive(Serialize)]
struct MaskReport {
    scale_x: f64,
    scale_y: f64,
    coverage: f64,
}

impl MaskReport {
    fn from_mask(mask: &HairMask) -> Self {
        let (scale_x, scale_y) = mask.mask.scale_factors();
        Self {
            scale_x,
            scale_y,
            coverage: mask.mask.coverage(127),
        }
    }
}

#[derive(Serialize)]
struct Report {
    input: PathBuf,
    extent: Extent,
    orientation: Orientation,
    display_extent: Extent,
    hair_mask: Option<MaskReport>,
    eye_detection: Option<EyeDetectionResult>,
    status: Option<&'static str>,
    distance: Option<String>,
}

struct Analysis {
    photo: CapturedPhoto,
    hair_mask: Option<HairMask>,
    eye_detection: Option<EyeDetectionResult>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let reader = ImageFileReader::new();
    let frame = reader.read(&cli.input)?;
    log::info!(
        "Loaded {}x{} photo ({:?})",
        frame.width(),
        frame.height(),
        frame.orientation()
    );
    let analysis = analyze(&cli, CapturedPhoto::new(frame))?;

    match &analysis.eye_detection {
        Some(eyes) => match eyes.formatted_distance() {
            Some(distance) => println!("{}: {distance}", eyes.status_message()),
            None => println!("{}", eyes.status_message()),
        },
        None if cli.landmarks.is_some() => println!("Eye detection unavailable"),
        None => {}
    }
    if let Some(mask) = &analysis.hair_mask {
        println!("Hair coverage: {:.1}%", mask.mask.coverage(127) * 100.0);
    }

    let writer = ImageFileWriter::new(cli.bake_orientation);
    if let (Some(path), Some(mask)) = (&cli.mask_out, &analysis.hair_mask) {
        writer.write(path, mask.mask.mask())?;
        log::info!("Mask written to {}", path.display());
    }
    if let Some(path) = &cli.overlay_out {
        let overlay = MaskOverlay::new(DEFAULT_MASK_TINT, cli.mask_opacity)?;
        let mut preview = match &analysis.hair_mask {
            Some(mask) => overlay.compose(&analysis.photo.frame, &mask.mask)?,
            None => analysis.photo.frame.clone(),
        };
        if let Some(eyes) = &analysis.eye_detection {
            mark_eyes(&mut preview, eyes);
        }
        writer.write(path, &preview)?;
        log::info!("Overlay written to {}", path.display());
    }
    if let Some(path) = &cli.report {
        write_report(path, &cli.input, &analysis)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}

fn analyze(cli: &Cli, photo: CapturedPhoto) -> Result<Analysis, Box<dyn std::error::Error>> {
    let extract = cli.matte.as_ref().map(|path| {
        ExtractHairMaskUseCase::new(
            Box::new(MatteFileSource::new(Some(path.clone()))),
            MatteAligner::new(create_resampler(cli.filter)),
        )
    });
    let detect = cli.landmarks.as_ref().map(|path| {
        DetectEyesUseCase::new(
            Box::new(JsonLandmarkDetector::new(path)),
            LandmarkProjector::new(cli.eye_anchor),
        )
    });

    match (extract, detect) {
        (Some(extract), Some(detect)) => {
            let analyzed = AnalyzePhotoUseCase::new(extract, detect).execute(photo)?;
            Ok(Analysis {
                photo: analyzed.photo,
                hair_mask: Some(analyzed.hair_mask),
                eye_detection: analyzed.eye_detection,
            })
        }
        (Some(mut extract), None) => {
            let hair_mask = extract.execute(&photo)?;
            Ok(Analysis {
                photo,
                hair_mask: Some(hair_mask),
                eye_detection: None,
            })
        }
        (None, Some(detect)) => {
            let eyes = detect.execute(&photo.frame)?;
            Ok(Analysis {
                photo,
                hair_mask: None,
                eye_detection: Some(eyes),
            })
        }
        (None, None) => Err("Nothing to do: pass --matte and/or --landmarks".into()),
    }
}

fn write_report(
    path: &Path,
    input: &Path,
    analysis: &Analysis,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = &analysis.photo.frame;
    let report = Report {
        input: input.to_path_buf(),
        extent: frame.extent(),
        orientation: frame.orientation(),
        display_extent: frame.orientation().display_extent(frame.extent()),
        hair_mask: analysis.hair_mask.as_ref().map(MaskReport::from_mask),
        eye_detection: analysis.eye_detection,
        status: analysis.eye_detection.as_ref().map(|e| e.status_message()),
        distance: analysis
            .eye_detection
            .as_ref()
            .and_then(|e| e.formatted_distance()),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Input must be an image ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.input.display()
        )
        .into());
    }
    for path in [&cli.matte, &cli.landmarks].into_iter().flatten() {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }
    if cli.matte.is_none() && cli.landmarks.is_none() {
        return Err("At least one of --matte or --landmarks is required".into());
    }
    if cli.mask_out.is_some() && cli.matte.is_none() {
        return Err("--mask-out requires --matte".into());
    }
    if !(0.0..=1.0).contains(&cli.mask_opacity) {
        return Err(format!(
            "Mask opacity must be between 0.0 and 1.0, got {}",
            cli.mask_opacity
        )
        .into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hairline").chain(args.iter().copied()))
    }

    #[test]
    fn test_parses_defaults() {
        let cli = cli(&["photo.jpg", "--matte", "m.png"]);
        assert_eq!(cli.filter, ResampleFilter::Bilinear);
        assert_eq!(cli.eye_anchor, EyeAnchor::Pupil);
        assert_eq!(cli.mask_opacity, DEFAULT_MASK_OPACITY);
        assert!(!cli.bake_orientation);
    }

    #[test]
    fn test_parses_filter_and_anchor() {
        let cli = cli(&[
            "photo.jpg",
            "--landmarks",
            "f.json",
            "--filter",
            "lanczos3",
            "--eye-anchor",
            "eye-contour",
        ]);
        assert_eq!(cli.filter, ResampleFilter::Lanczos3);
        assert_eq!(cli.eye_anchor, EyeAnchor::EyeContour);
    }

    #[test]
    fn test_rejects_unknown_filter() {
        let parsed = Cli::try_parse_from(["hairline", "photo.jpg", "--filter", "cubic"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a/b.JPG")));
        assert!(is_image(Path::new("x.png")));
        assert!(!is_image(Path::new("x.mp4")));
        assert!(!is_image(Path::new("noext")));
    }

    #[test]
    fn test_validate_requires_an_input_source() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        std::fs::write(&photo, b"").unwrap();
        let cli = cli(&[photo.to_str().unwrap()]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("--matte or --landmarks"));
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let cli = cli(&["/nonexistent/photo.jpg", "--matte", "m.png"]);
        assert!(validate(&cli).unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_validate_rejects_bad_opacity() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        let matte = dir.path().join("matte.png");
        std::fs::write(&photo, b"").unwrap();
        std::fs::write(&matte, b"").unwrap();
        let cli = cli(&[
            photo.to_str().unwrap(),
            "--matte",
            matte.to_str().unwrap(),
            "--mask-opacity",
            "1.5",
        ]);
        assert!(validate(&cli).unwrap_err().to_string().contains("opacity"));
    }

    #[test]
    fn test_validate_mask_out_needs_matte() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        let landmarks = dir.path().join("faces.json");
        std::fs::write(&photo, b"").unwrap();
        std::fs::write(&landmarks, b"[]").unwrap();
        let cli = cli(&[
            photo.to_str().unwrap(),
            "--landmarks",
            landmarks.to_str().unwrap(),
            "--mask-out",
            "out.png",
        ]);
        assert!(validate(&cli).unwrap_err().to_string().contains("--mask-out"));
    }
}
