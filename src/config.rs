//! Tunable parameters for palette extraction.
//!
//! Configuration can be built programmatically or loaded from JSON:
//!
//! ```no_run
//! use dominant_palette_wasm::ExtractionConfig;
//! use std::path::Path;
//!
//! let config = ExtractionConfig::from_json_file(Path::new("palette.json"))?;
//! let config = ExtractionConfig { palette_size: 8, ..config };
//! # Ok::<(), dominant_palette_wasm::PaletteError>(())
//! ```
//!
//! Missing JSON fields fall back to [`ExtractionConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// Default number of palette colors
pub const DEFAULT_PALETTE_SIZE: usize = 6;

/// Default number of k-means rounds
pub const DEFAULT_ITERATIONS: usize = 10;

/// Default longest side of the analysis canvas, in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 200;

/// Default pixel stride over the analysis canvas
pub const DEFAULT_SAMPLE_STRIDE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of clusters (k)
    pub palette_size: usize,

    /// Fixed number of assignment/update rounds; there is no early exit
    pub iterations: usize,

    /// Images larger than this on their longest side are scaled down before sampling
    pub max_dimension: u32,

    /// Read every Nth pixel of the analysis canvas in row-major order
    pub sample_stride: usize,

    /// Seed for centroid initialization. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            iterations: DEFAULT_ITERATIONS,
            max_dimension: DEFAULT_MAX_DIMENSION,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            seed: None,
        }
    }
}

impl ExtractionConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the sampler cannot work with.
    ///
    /// `palette_size` is checked against the actual sample count at clustering time.
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(PaletteError::invalid_config("max_dimension", self.max_dimension));
        }
        if self.sample_stride == 0 {
            return Err(PaletteError::invalid_config("sample_stride", self.sample_stride));
        }
        Ok(())
    }
}
