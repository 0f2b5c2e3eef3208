//! SkySense grapher - charts a SkySense detection log
//!
//! Usage: `skysense-graph <filename>`

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use skysense::app::SkySenseApp;
use skysense::parsers::SkySense;
use skysense::settings::ViewerSettings;

#[derive(Parser)]
#[command(author, version, about = "Chart temperatures and on/off results from a SkySense log")]
struct Args {
    /// Detection log to chart (17 whitespace-separated fields per line)
    filename: PathBuf,
    /// Override the saved line width for this run
    #[arg(long)]
    line_width: Option<f32>,
    /// Hide the legend for this run
    #[arg(long, default_value_t = false)]
    no_legend: bool,
    /// Use the colorblind-friendly palette for this run
    #[arg(long, default_value_t = false)]
    color_blind: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let series = SkySense
        .load(&args.filename)
        .with_context(|| format!("Failed to load {}", args.filename.display()))?;

    let mut settings = ViewerSettings::load();
    if let Some(width) = args.line_width {
        settings.line_width = width;
    }
    if args.no_legend {
        settings.show_legend = false;
    }
    if args.color_blind {
        settings.color_blind_mode = true;
    }

    let title = format!(
        "SkySense - {}",
        args.filename
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([640.0, 400.0])
            .with_title(title)
            .with_app_id("SkySense"),
        ..Default::default()
    };

    let app = SkySenseApp::new(&args.filename, series, settings, true);

    // Run the application
    eframe::run_native(
        "SkySense",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open chart window: {}", e))
}
