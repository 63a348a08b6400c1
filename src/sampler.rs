//! Pixel sampling
//!
//! Builds the bounded working set the clusterer runs on: scale the image so its
//! longest side fits the analysis canvas (nearest-neighbour), then read every
//! `sample_stride`-th pixel in row-major order, skipping fully transparent ones.

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage, imageops::FilterType};
use log::debug;

use crate::config::ExtractionConfig;
use crate::conversion::Pixel;
use crate::error::{PaletteError, Result};

/// Immutable, ordered set of opaque sample pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    pixels: Vec<Pixel>,
}

impl SampleSet {
    /// Wrap already-sampled pixels as-is
    pub fn from_pixels(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    /// Sample a raw, already decoded buffer of RGB (3 bytes/pixel) or RGBA (4 bytes/pixel) data
    pub fn from_raw(buffer: &[u8], width: u32, height: u32, config: &ExtractionConfig) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PaletteError::EmptyImage);
        }

        let invalid = || PaletteError::InvalidBuffer {
            len: buffer.len(),
            width,
            height,
        };

        // usize is 32 bits on wasm32, so large dimensions can overflow
        let pixel_count = (width as usize).checked_mul(height as usize).ok_or_else(invalid)?;
        let rgba_len = pixel_count.checked_mul(4).ok_or_else(invalid)?;
        let rgb_len = pixel_count.checked_mul(3).ok_or_else(invalid)?;

        let image = if buffer.len() == rgba_len {
            DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, buffer.to_vec()).ok_or_else(invalid)?)
        } else if buffer.len() == rgb_len {
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, buffer.to_vec()).ok_or_else(invalid)?)
        } else {
            return Err(invalid());
        };

        Self::from_image(&image, config)
    }

    /// Sample a decoded image
    pub fn from_image(image: &DynamicImage, config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        let (orig_w, orig_h) = image.dimensions();
        if orig_w == 0 || orig_h == 0 {
            return Err(PaletteError::EmptyImage);
        }

        let (w, h) = analysis_size(orig_w, orig_h, config.max_dimension);
        let canvas = if (w, h) == (orig_w, orig_h) {
            image.to_rgba8()
        } else {
            image::imageops::resize(image, w, h, FilterType::Nearest)
        };

        let pixels: Vec<Pixel> = canvas
            .pixels()
            .step_by(config.sample_stride)
            .filter(|p| p[3] != 0)
            .map(|p| Pixel::new(p[0], p[1], p[2]))
            .collect();

        if pixels.is_empty() {
            return Err(PaletteError::EmptyImage);
        }

        debug!(
            "sampled {} pixels from {orig_w}x{orig_h} (canvas {w}x{h}, stride {})",
            pixels.len(),
            config.sample_stride
        );

        Ok(Self { pixels })
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Size of the analysis canvas: longest side capped at `max_dimension`, never upscaled
fn analysis_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_side = width.max(height);
    if max_side <= max_dimension {
        return (width, height);
    }
    let ratio = max_dimension as f32 / max_side as f32;
    let w = ((width as f32) * ratio).round().max(1.0) as u32;
    let h = ((height as f32) * ratio).round().max(1.0) as u32;
    (w, h)
}
