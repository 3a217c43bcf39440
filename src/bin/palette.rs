use anyhow::{Context, Result};
use clap::Parser;
use image_palette_wasm::{
    Categories, ExtractOptions, ExtractionResult, categorize, extract_palette_bytes,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Extract a color palette and its dominant color from images, printed as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors to extract (overrides the config file)
    #[arg(short = 'k', long)]
    colors: Option<usize>,

    /// TOML file with extraction options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also group the palette into dark/light/vibrant/muted colors
    #[arg(long)]
    categorize: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a Path,
    #[serde(flatten)]
    palette: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Categories>,
}

fn load_options(args: &Args) -> Result<ExtractOptions> {
    let mut options = match &args.config {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let config = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            toml::from_str(&config).context("config TOML deserialization error")?
        }
        None => ExtractOptions::default(),
    };
    if let Some(colors) = args.colors {
        options.color_count = colors;
    }
    options.validate()?;
    Ok(options)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = load_options(&args)?;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
        let palette = extract_palette_bytes(&bytes, &options)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;
        let categories = if args.categorize {
            Some(categorize(&palette.colors)?)
        } else {
            None
        };

        let report = Report {
            path: input,
            palette,
            categories,
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{json}");
    }

    Ok(())
}
