use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use dominant_palette_wasm::{ExtractionConfig, PaletteAnalysis, extract_palette_bytes};
use anyhow::{Context, Result};

/// Extract the dominant color palette of one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Base configuration (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u8).range(3..=20))]
    colors: Option<u8>,

    /// Number of k-means rounds
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Longest side of the analysis canvas
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Sample every Nth pixel of the analysis canvas
    #[arg(long)]
    stride: Option<usize>,

    /// Seed for reproducible clustering
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a JSON document instead of a text report
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn extraction_config(&self) -> Result<ExtractionConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractionConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ExtractionConfig::default(),
        };
        if let Some(k) = self.colors {
            config.palette_size = k as usize;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(max_dimension) = self.max_dimension {
            config.max_dimension = max_dimension;
        }
        if let Some(stride) = self.stride {
            config.sample_stride = stride;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_report(input: &Path, analysis: &PaletteAnalysis) {
    println!("{} ({} samples)", input.display(), analysis.sample_count);
    for entry in &analysis.entries {
        println!(
            "  {}  {:5.1}%  lum {:.3}  text {}  {}",
            entry.hex,
            entry.frequency,
            entry.luminance,
            entry.text_color.hex(),
            entry.description
        );
    }
    match &analysis.harmony {
        Some(h) => println!(
            "  harmony: {} (avg hue distance {:.1}°), {}, {} contrast",
            h.kind, h.average_hue_distance, h.temperature, h.contrast
        ),
        None => println!("  harmony: n/a"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let config = args.extraction_config()?;

    let mut results = serde_json::Map::new();
    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let analysis = extract_palette_bytes(&bytes, &config)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if args.json {
            results.insert(input.display().to_string(), serde_json::to_value(&analysis)?);
        } else {
            print_report(input, &analysis);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
