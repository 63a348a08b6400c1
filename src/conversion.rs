//! Color space conversion utilities
//!
//! Stateless helpers shared by the clusterer, the describer and the report:
//! - RGB <-> hex
//! - RGB -> HSL (integer degrees / percent)
//! - RGB -> WCAG relative luminance and contrast ratio

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// One opaque 8-bit sRGB pixel
pub type Pixel = Srgb<u8>;

/// Luminance above which dark text reads better than light text
pub const TEXT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// HSL triple rounded to whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslColor {
    /// Hue in degrees, 0..360
    pub hue: u16,
    /// Saturation in percent, 0..=100
    pub saturation: u8,
    /// Lightness in percent, 0..=100
    pub lightness: u8,
}

impl HslColor {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }
}

/// Text color that stays legible on top of a swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    /// Pick black text for light swatches and white text for dark ones
    pub fn for_luminance(luminance: f64) -> Self {
        if luminance > TEXT_LUMINANCE_THRESHOLD {
            TextColor::Black
        } else {
            TextColor::White
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            TextColor::Black => "#000000",
            TextColor::White => "#FFFFFF",
        }
    }
}

/// Format a color as `#RRGGBB` (uppercase, zero-padded)
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parse `#RRGGBB` or `RRGGBB` (either case)
pub fn hex_to_rgb(hex: &str) -> Result<Pixel> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(PaletteError::InvalidHex(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| PaletteError::InvalidHex(hex.to_string()))
    };

    Ok(Pixel::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to HSL with hue in degrees and saturation/lightness in percent.
///
/// Computed in `f64` with the usual hexcone formula (hue as a fraction of a turn,
/// scaled by 360 last) so the rounded values land on the same side of each bucket
/// edge as the reference table. Grays (max == min) come out with hue 0 and saturation 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> HslColor {
    let rgb: Srgb<f64> = Srgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let (red, green, blue) = rgb.into_components();

    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let lightness = (max + min) / 2.0;

    if max == min {
        return HslColor::new(0, 0, percent(lightness));
    }

    let chroma = max - min;
    let saturation = if lightness > 0.5 {
        chroma / (2.0 - max - min)
    } else {
        chroma / (max + min)
    };

    let sextant = if max == red {
        (green - blue) / chroma + if green < blue { 6.0 } else { 0.0 }
    } else if max == green {
        (blue - red) / chroma + 2.0
    } else {
        (red - green) / chroma + 4.0
    };

    // 359.6 rounds up to a full turn
    let hue = ((sextant / 6.0 * 360.0).round() as u16) % 360;

    HslColor::new(hue, percent(saturation), percent(lightness))
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// WCAG 2.x relative luminance, 0.0 (black) to 1.0 (white)
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// WCAG contrast ratio between two relative luminances (1.0 ..= 21.0)
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
