//! # Dominant Palette
//!
//! Reduces a raster image to a small palette of representative colors and
//! describes it:
//! - samples a bounded working set of pixels from the decoded image
//! - clusters the samples with k-means in RGB space
//! - annotates each cluster with hex, HSL, WCAG luminance, a color name and a
//!   legible text color
//! - classifies the palette's hue harmony, temperature and contrast
//!
//! ## Example
//!
//! ```rust
//! use dominant_palette_wasm::{analyze_pixels, ExtractionConfig};
//!
//! let pixels = [255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255];
//! let config = ExtractionConfig { palette_size: 2, sample_stride: 1, seed: Some(1), ..Default::default() };
//! let analysis = analyze_pixels(&pixels, 2, 2, &config)?;
//! assert_eq!(analysis.entries.len(), 2);
//! # Ok::<(), dominant_palette_wasm::PaletteError>(())
//! ```
//!
//! Decoding image files and rendering the report are left to the caller.

use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod conversion;
pub mod describe;
pub mod error;
pub mod harmony;
pub mod kmeans;
pub mod sampler;

pub use config::ExtractionConfig;
pub use conversion::{HslColor, Pixel, TextColor, contrast_ratio, hex_to_rgb, luminance, rgb_to_hex, rgb_to_hsl};
pub use describe::describe;
pub use error::{PaletteError, Result};
pub use harmony::{ContrastLevel, HarmonyKind, HarmonyReport, Temperature, analyze};
pub use kmeans::{Centroid, cluster, cluster_with_rng};
pub use sampler::SampleSet;

/// One annotated palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// `#RRGGBB`
    pub hex: String,
    pub rgb: Pixel,
    pub hsl: HslColor,
    /// Share of the sample set, in percent
    pub frequency: f64,
    /// WCAG relative luminance, 0.0..=1.0
    pub luminance: f64,
    /// e.g. "Dark Vibrant Blue"
    pub description: String,
    pub text_color: TextColor,
}

impl PaletteEntry {
    pub fn from_color(rgb: Pixel, frequency: f64) -> Self {
        let (r, g, b) = (rgb.red, rgb.green, rgb.blue);
        let hsl = rgb_to_hsl(r, g, b);
        let luminance = luminance(r, g, b);
        Self {
            hex: rgb_to_hex(r, g, b),
            rgb,
            hsl,
            frequency,
            luminance,
            description: describe(hsl),
            text_color: TextColor::for_luminance(luminance),
        }
    }

    pub fn from_centroid(centroid: &Centroid) -> Self {
        Self::from_color(centroid.color(), centroid.frequency)
    }
}

/// Ordered palette plus its harmony report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteAnalysis {
    /// Sorted by descending frequency
    pub entries: Vec<PaletteEntry>,
    /// `None` when the palette has a single entry
    pub harmony: Option<HarmonyReport>,
    /// Size of the sample set the palette was clustered from
    pub sample_count: usize,
}

/// Cluster an existing sample set, seeding from `config.seed` when present
pub fn extract_palette(samples: &SampleSet, config: &ExtractionConfig) -> Result<PaletteAnalysis> {
    match config.seed {
        Some(seed) => extract_palette_with_rng(samples, config, &mut ChaCha8Rng::seed_from_u64(seed)),
        None => extract_palette_with_rng(samples, config, &mut rand::rng()),
    }
}

/// Cluster an existing sample set with a caller-supplied random source
pub fn extract_palette_with_rng<R: Rng + ?Sized>(
    samples: &SampleSet,
    config: &ExtractionConfig,
    rng: &mut R,
) -> Result<PaletteAnalysis> {
    let centroids = cluster_with_rng(samples, config.palette_size, config.iterations, rng)?;
    let entries: Vec<PaletteEntry> = centroids.iter().map(PaletteEntry::from_centroid).collect();

    let harmony = match analyze(&entries) {
        Ok(report) => Some(report),
        Err(PaletteError::InsufficientPalette { entries }) => {
            warn!("skipping harmony analysis for a palette of {entries} color(s)");
            None
        }
        Err(e) => return Err(e),
    };

    info!(
        "extracted {} colors from {} samples ({})",
        entries.len(),
        samples.len(),
        harmony.as_ref().map_or("no harmony", |h| h.kind.label())
    );

    Ok(PaletteAnalysis {
        entries,
        harmony,
        sample_count: samples.len(),
    })
}

/// Full pipeline over a raw RGB or RGBA buffer
pub fn analyze_pixels(buffer: &[u8], width: u32, height: u32, config: &ExtractionConfig) -> Result<PaletteAnalysis> {
    let samples = SampleSet::from_raw(buffer, width, height, config)?;
    extract_palette(&samples, config)
}

/// Full pipeline over an encoded image (PNG, JPEG, ...)
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(input: &[u8], config: &ExtractionConfig) -> Result<PaletteAnalysis> {
    let img = image::load_from_memory(input)?;
    let samples = SampleSet::from_image(&img, config)?;
    extract_palette(&samples, config)
}

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_log::init_with_level(log::Level::Info).map_err(js_err)?;
    log::info!("dominant palette module initialized");
    Ok(())
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> std::result::Result<(), JsValue> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn entry_to_js(entry: &PaletteEntry) -> std::result::Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();
    let rgb = js_sys::Array::of3(
        &JsValue::from(entry.rgb.red),
        &JsValue::from(entry.rgb.green),
        &JsValue::from(entry.rgb.blue),
    );
    let hsl = js_sys::Array::of3(
        &JsValue::from(entry.hsl.hue),
        &JsValue::from(entry.hsl.saturation),
        &JsValue::from(entry.hsl.lightness),
    );
    set(&obj, "hex", &JsValue::from_str(&entry.hex))?;
    set(&obj, "rgb", &rgb)?;
    set(&obj, "hsl", &hsl)?;
    set(&obj, "frequency", &JsValue::from_f64(entry.frequency))?;
    set(&obj, "luminance", &JsValue::from_f64(entry.luminance))?;
    set(&obj, "description", &JsValue::from_str(&entry.description))?;
    set(&obj, "textColor", &JsValue::from_str(entry.text_color.hex()))?;
    Ok(obj)
}

fn harmony_to_js(report: &HarmonyReport) -> std::result::Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();
    set(&obj, "averageHueDistance", &JsValue::from_f64(report.average_hue_distance))?;
    set(&obj, "meanHue", &JsValue::from_f64(report.mean_hue))?;
    set(&obj, "classification", &JsValue::from_str(report.kind.label()))?;
    set(&obj, "temperature", &JsValue::from_str(report.temperature.label()))?;
    set(&obj, "contrast", &JsValue::from_str(&report.contrast.to_string()))?;
    Ok(obj)
}

/// Extract the dominant palette of an encoded image.
///
/// Returns `{ palette: [{ hex, rgb, hsl, frequency, luminance, description, textColor }], harmony, sampleCount }`;
/// `harmony` is `null` for a single-color palette.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    input: Vec<u8>,
    n_colors: usize,
    seed: Option<u64>,
) -> std::result::Result<js_sys::Object, JsValue> {
    let config = ExtractionConfig {
        palette_size: n_colors,
        seed,
        ..ExtractionConfig::default()
    };

    let img = image::load_from_memory(&input).map_err(|e| js_err(format!("Unable to decode image: {e}")))?;
    let samples = SampleSet::from_image(&img, &config).map_err(js_err)?;
    let analysis = extract_palette(&samples, &config).map_err(js_err)?;

    let palette_js = js_sys::Array::new();
    for entry in &analysis.entries {
        let obj = entry_to_js(entry)?;
        palette_js.push(&obj);
    }
    let harmony_js = match &analysis.harmony {
        Some(report) => harmony_to_js(report)?.into(),
        None => JsValue::NULL,
    };

    let result = js_sys::Object::new();
    set(&result, "palette", &palette_js)?;
    set(&result, "harmony", &harmony_js)?;
    set(&result, "sampleCount", &JsValue::from(analysis.sample_count as u32))?;
    Ok(result)
}
