//! Page margins, in configuration units (inches) and layout units (points).
use crate::error::StyleError;
use quire_types::page::POINTS_PER_INCH;
use serde::{Deserialize, Serialize};

/// Smallest margin, in inches, the exporter will lay out with.
pub const MIN_MARGIN_INCHES: f32 = 0.25;
/// Largest margin, in inches, the exporter will lay out with.
pub const MAX_MARGIN_INCHES: f32 = 3.0;

/// Resolved page margins in points.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Margins as written in the export configuration, in inches.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MarginsInches {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for MarginsInches {
    fn default() -> Self {
        Self {
            top: 1.0,
            right: 1.0,
            bottom: 1.0,
            left: 1.0,
        }
    }
}

impl MarginsInches {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Clamps each side independently into the supported range.
    pub fn clamped(self) -> Self {
        Self {
            top: clamp_side("top", self.top),
            right: clamp_side("right", self.right),
            bottom: clamp_side("bottom", self.bottom),
            left: clamp_side("left", self.left),
        }
    }

    /// Converts to points after clamping.
    pub fn to_points(self) -> Margins {
        let c = self.clamped();
        Margins {
            top: c.top * POINTS_PER_INCH,
            right: c.right * POINTS_PER_INCH,
            bottom: c.bottom * POINTS_PER_INCH,
            left: c.left * POINTS_PER_INCH,
        }
    }

    /// Parses a length with an optional unit ("1in", "72pt", "2.54cm", "25mm") into inches.
    /// A bare number is taken as inches.
    pub fn parse_length(input: &str) -> Result<f32, StyleError> {
        let input = input.trim();
        let invalid = |e: std::num::ParseFloatError| StyleError::InvalidLength {
            value: input.to_string(),
            message: e.to_string(),
        };

        if let Some(val) = input.strip_suffix("in") {
            return val.trim().parse::<f32>().map_err(invalid);
        }
        if let Some(val) = input.strip_suffix("pt") {
            return val
                .trim()
                .parse::<f32>()
                .map(|v| v / POINTS_PER_INCH)
                .map_err(invalid);
        }
        if let Some(val) = input.strip_suffix("cm") {
            return val
                .trim()
                .parse::<f32>()
                .map(|v| v / 2.54)
                .map_err(invalid);
        }
        if let Some(val) = input.strip_suffix("mm") {
            return val
                .trim()
                .parse::<f32>()
                .map(|v| v / 25.4)
                .map_err(invalid);
        }
        input.parse::<f32>().map_err(invalid)
    }
}

fn clamp_side(side: &str, value: f32) -> f32 {
    let value = if value.is_finite() { value } else { 1.0 };
    let clamped = value.clamp(MIN_MARGIN_INCHES, MAX_MARGIN_INCHES);
    if (clamped - value).abs() > f32::EPSILON {
        log::debug!("Clamped {side} margin from {value}in to {clamped}in");
    }
    clamped
}
