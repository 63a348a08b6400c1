//! Palette harmony analysis
//!
//! Hue relationships are measured between consecutive entries in the order the
//! palette is given (descending frequency out of the pipeline), not on a
//! canonicalized ordering. Reversing the palette yields the same result;
//! other permutations generally do not.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PaletteEntry;
use crate::error::{PaletteError, Result};

const MONOCHROMATIC_BELOW: f64 = 30.0;
const ANALOGOUS_BELOW: f64 = 60.0;
const COMPLEMENTARY_ABOVE: f64 = 150.0;

const WARM_MEAN_HUE_BELOW: f64 = 180.0;

const HIGH_LUMINANCE: f64 = 0.7;
const LOW_LUMINANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmonyKind {
    #[serde(rename = "Monochromatic/Analogous")]
    MonochromaticAnalogous,
    Analogous,
    #[serde(rename = "Triadic/Split-Complementary")]
    TriadicSplitComplementary,
    Complementary,
}

impl HarmonyKind {
    pub fn from_average_distance(degrees: f64) -> Self {
        if degrees < MONOCHROMATIC_BELOW {
            Self::MonochromaticAnalogous
        } else if degrees < ANALOGOUS_BELOW {
            Self::Analogous
        } else if degrees > COMPLEMENTARY_ABOVE {
            Self::Complementary
        } else {
            Self::TriadicSplitComplementary
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MonochromaticAnalogous => "Monochromatic/Analogous",
            Self::Analogous => "Analogous",
            Self::TriadicSplitComplementary => "Triadic/Split-Complementary",
            Self::Complementary => "Complementary",
        }
    }
}

impl fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperature {
    #[serde(rename = "Warm-leaning")]
    Warm,
    #[serde(rename = "Cool-leaning")]
    Cool,
}

impl Temperature {
    pub fn from_mean_hue(mean_hue: f64) -> Self {
        if mean_hue < WARM_MEAN_HUE_BELOW { Self::Warm } else { Self::Cool }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Warm => "Warm-leaning",
            Self::Cool => "Cool-leaning",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastLevel {
    High,
    Medium,
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyReport {
    /// Mean circular hue distance between consecutive entries, in degrees
    pub average_hue_distance: f64,
    /// Arithmetic mean of the entry hues, in degrees
    pub mean_hue: f64,
    pub kind: HarmonyKind,
    pub temperature: Temperature,
    pub contrast: ContrastLevel,
}

/// Shortest angular distance between two hues, 0..=180
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2).abs();
    diff.min(360.0 - diff)
}

/// Analyze the hue structure of `palette` in the given order
pub fn analyze(palette: &[PaletteEntry]) -> Result<HarmonyReport> {
    if palette.len() < 2 {
        return Err(PaletteError::InsufficientPalette { entries: palette.len() });
    }

    let hues: Vec<f64> = palette.iter().map(|e| e.hsl.hue as f64).collect();

    let distances: Vec<f64> = hues.windows(2).map(|pair| hue_distance(pair[0], pair[1])).collect();
    let average_hue_distance = distances.iter().sum::<f64>() / distances.len() as f64;
    let mean_hue = hues.iter().sum::<f64>() / hues.len() as f64;

    let has_light = palette.iter().any(|e| e.luminance > HIGH_LUMINANCE);
    let has_dark = palette.iter().any(|e| e.luminance < LOW_LUMINANCE);
    let contrast = if has_light && has_dark { ContrastLevel::High } else { ContrastLevel::Medium };

    Ok(HarmonyReport {
        average_hue_distance,
        mean_hue,
        kind: HarmonyKind::from_average_distance(average_hue_distance),
        temperature: Temperature::from_mean_hue(mean_hue),
        contrast,
    })
}
