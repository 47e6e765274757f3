pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Tolerance for normalized-coordinate range checks.
pub const NORMALIZED_EPSILON: f64 = 1e-9;

/// Cyan, the tint used for the hair mask overlay.
pub const DEFAULT_MASK_TINT: [u8; 3] = [0, 255, 255];

pub const DEFAULT_MASK_OPACITY: f64 = 0.8;

/// Eye marker disc radius as a fraction of the face rect width.
pub const EYE_MARKER_RADIUS_RATIO: f64 = 0.03;

/// Lower bound for the eye marker radius in pixels.
pub const MIN_EYE_MARKER_RADIUS: f64 = 3.0;

pub const EYE_MARKER_COLOR: [u8; 3] = [0, 255, 0];
