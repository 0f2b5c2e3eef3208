//! SkySense detector - turns a raw sensor capture into a detection log
//!
//! Usage: `skysense-detect <capture> [-o output.txt]`

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use skysense::detector::{Detector, DetectorConfig};
use skysense::parsers::{Parseable, RawCapture};

#[derive(Parser)]
#[command(author, version, about = "Detect device on/off periods in a raw SkySense capture")]
struct Args {
    /// Raw sensor capture to process
    input: PathBuf,
    /// Detection log to write
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,
    /// Load detector tuning from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the moving-average window (samples)
    #[arg(long)]
    sma_window: Option<usize>,
    /// Override the decision window (samples)
    #[arg(long)]
    sampling_window: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    if let Some(window) = args.sma_window {
        config.sma_window = window;
    }
    if let Some(window) = args.sampling_window {
        config.sampling_window = window;
    }
    config.validate()?;

    tracing::info!("Loading data from {:?}", args.input);
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let samples = RawCapture
        .parse(&contents)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    tracing::info!("Processing data with {:?}", config);
    let detected = Detector::run(config, &samples);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    for sample in &detected {
        writeln!(writer, "{}", sample)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} records to {:?}", detected.len(), args.output);

    Ok(())
}
