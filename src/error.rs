//! Error types for palette extraction

use thiserror::Error;

/// Result type alias for palette extraction operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Everything that can go wrong between a raw pixel buffer and a palette report
#[derive(Error, Debug)]
pub enum PaletteError {
    /// The image (after transparency filtering) has no pixels to sample
    #[error("Image contains no usable pixels")]
    EmptyImage,

    /// Requested cluster count is outside [1, sample count]
    #[error("Invalid cluster count: k = {k} (sample count {samples})")]
    InvalidK { k: usize, samples: usize },

    /// Harmony analysis needs at least two palette entries
    #[error("Harmony analysis needs at least 2 palette entries, got {entries}")]
    InsufficientPalette { entries: usize },

    /// Raw buffer length does not describe an RGB or RGBA image of the given size
    #[error("Pixel buffer of {len} bytes does not match a {width}x{height} RGB or RGBA image")]
    InvalidBuffer { len: usize, width: u32, height: u32 },

    /// Hex color string could not be parsed
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Configuration value out of range
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidConfig { parameter: String, value: String },

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoded image could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl PaletteError {
    pub(crate) fn invalid_config(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check whether the failure is a violation of the caller's input contract
    ///
    /// Decoding and file-reading failures depend on the environment; every other
    /// kind means the caller passed arguments the engine cannot work with.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, PaletteError::Decode(_) | PaletteError::Io(_))
    }
}
