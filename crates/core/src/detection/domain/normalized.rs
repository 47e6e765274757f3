//! Unit-interval coordinates as produced by the vision collaborator.
//!
//! Face boxes are relative to the whole image with the origin at the
//! bottom-left. Landmark points are relative to their face box.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::shared::constants::NORMALIZED_EPSILON;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizedCoordinateError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("rectangle extends past the unit square along {axis}: {origin} + {size} > 1")]
    Overflow {
        axis: &'static str,
        origin: f64,
        size: f64,
    },
}

/// Accepts `value` within tolerance of [0, 1] and snaps it into the interval.
fn unit(name: &'static str, value: f64) -> Result<f64, NormalizedCoordinateError> {
    if !value.is_finite() {
        return Err(NormalizedCoordinateError::NotFinite { name, value });
    }
    if !(-NORMALIZED_EPSILON..=1.0 + NORMALIZED_EPSILON).contains(&value) {
        return Err(NormalizedCoordinateError::OutOfRange { name, value });
    }
    Ok(value.clamp(0.0, 1.0))
}

#[derive(Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NormalizedPoint {
    x: f64,
    y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Result<Self, NormalizedCoordinateError> {
        Ok(Self {
            x: unit("x", x)?,
            y: unit("y", y)?,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl<'de> Deserialize<'de> for NormalizedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPoint::deserialize(deserializer)?;
        Self::new(raw.x, raw.y).map_err(serde::de::Error::custom)
    }
}

/// Ordered points of one landmark cluster, relative to the face box.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPointSet(Vec<NormalizedPoint>);

impl NormalizedPointSet {
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, NormalizedCoordinateError> {
        pairs
            .iter()
            .map(|&(x, y)| NormalizedPoint::new(x, y))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
struct RawRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Face bounding box in image-relative units, origin at the bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NormalizedRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, NormalizedCoordinateError> {
        let x = unit("x", x)?;
        let y = unit("y", y)?;
        let width = unit("width", width)?;
        let height = unit("height", height)?;
        if x + width > 1.0 + NORMALIZED_EPSILON {
            return Err(NormalizedCoordinateError::Overflow {
                axis: "x",
                origin: x,
                size: width,
            });
        }
        if y + height > 1.0 + NORMALIZED_EPSILON {
            return Err(NormalizedCoordinateError::Overflow {
                axis: "y",
                origin: y,
                size: height,
            });
        }
        // Within tolerance of the far edge: trim so the box stays in the unit square.
        Ok(Self {
            x,
            y,
            width: width.min(1.0 - x),
            height: height.min(1.0 - y),
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl<'de> Deserialize<'de> for NormalizedRect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRect::deserialize(deserializer)?;
        Self::new(raw.x, raw.y, raw.width, raw.height).map_err(serde::de::Error::custom)
    }
}
