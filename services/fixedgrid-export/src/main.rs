//! Fixed-grid export tool
//!
//! Projects a geostationary layer and writes it as a PNG with coastline
//! overlays and a color legend.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use fixedgrid_export::{load_view_config, run_export, InputBundle, ViewOverrides};
use renderer::{LegendPosition, PaletteName};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

/// Fixed-grid export tool
#[derive(Parser, Debug)]
#[command(name = "fixedgrid-export")]
#[command(about = "Render a geostationary fixed-grid layer to PNG")]
struct Args {
    /// Input bundle (JSON with projection, layer and optional overlays)
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".", env = "FIXEDGRID_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Export scale factor relative to the native grid size
    #[arg(short, long, default_value_t = 1.0, env = "FIXEDGRID_EXPORT_SCALE")]
    scale: f64,

    /// View config file (YAML); FIXEDGRID_* variables are used otherwise
    #[arg(short, long, env = "FIXEDGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Palette name, e.g. grayscale, viridis_r
    #[arg(long)]
    palette: Option<PaletteName>,

    /// Legend corner, e.g. bottom-right
    #[arg(long)]
    legend_position: Option<LegendPosition>,

    /// Coastline color as #rrggbb or #rrggbbaa
    #[arg(long)]
    overlay_color: Option<String>,

    /// Coastline width in screen pixels
    #[arg(long)]
    overlay_width: Option<f32>,

    /// Skip coastline and boundary overlays
    #[arg(long)]
    no_overlay: bool,

    /// Skip the legend
    #[arg(long)]
    no_legend: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "json", env = "FIXEDGRID_LOG_FORMAT")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    match args.log_format {
        LogFormat::Json => fmt().with_env_filter(filter).with_target(true).json().init(),
        LogFormat::Text => fmt().with_env_filter(filter).with_target(true).init(),
    }

    if let Err(e) = run(args).await {
        error!("Export failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let overrides = ViewOverrides {
        palette: args.palette,
        overlay_color: args.overlay_color,
        overlay_width: args.overlay_width,
        legend_position: args.legend_position,
        no_overlay: args.no_overlay,
        no_legend: args.no_legend,
    };
    let config = load_view_config(args.config.as_deref(), &overrides)?;

    info!(
        input = %args.input.display(),
        scale = args.scale,
        palette = %config.palette.as_str(),
        "Starting export"
    );

    let bundle = InputBundle::load(&args.input).await?;
    let summary = run_export(bundle, &config, args.scale, &args.output_dir).await?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
