//! Mosaic command - download and stitch the tiles of a bounding box.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use forestwatch::config::ConfigFile;
use forestwatch::coord::GeoBoundingBox;
use forestwatch::grid::{AcquireProgress, TileCell};
use forestwatch::pipeline::{timestamped_output, MosaicPipeline, MosaicReport};

use super::common::{resolve_zoom, start_logging};
use crate::error::CliError;

/// Arguments for the mosaic command.
#[derive(Debug, Args)]
pub struct MosaicArgs {
    /// Southern edge in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat_min: f64,

    /// Western edge in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon_min: f64,

    /// Northern edge in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat_max: f64,

    /// Eastern edge in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon_max: f64,

    /// Zoom level (default from config)
    #[arg(long)]
    pub zoom: Option<u8>,

    /// Output file (default: <output_dir>/area_<id>_<timestamp>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Area identifier used in the default file name
    #[arg(long, default_value = "1")]
    pub area_id: String,

    /// Provider API key (overrides config)
    #[arg(long, env = "FORESTWATCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider endpoint URL (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Progress bar fed by the grid acquirer.
struct TileProgress {
    bar: ProgressBar,
    missing: usize,
}

impl TileProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} tiles {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, missing: 0 }
    }
}

impl AcquireProgress for TileProgress {
    fn on_tile(&mut self, done: usize, total: usize, cell: &TileCell) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
        if !cell.is_present() {
            self.missing += 1;
            self.bar.set_message(format!("({} missing)", self.missing));
        }
    }
}

impl Drop for TileProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Run the mosaic command.
pub fn run(args: MosaicArgs, mut config: ConfigFile) -> Result<(), CliError> {
    apply_overrides(&args, &mut config);
    let zoom = resolve_zoom(args.zoom, &config)?;
    let bbox = GeoBoundingBox::new(args.lat_min, args.lon_min, args.lat_max, args.lon_max)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| timestamped_output(&config.mosaic.output_dir, &args.area_id));

    let _guard = start_logging(&config)?;
    info!(zoom, area_id = %args.area_id, output = %output.display(), "Mosaic requested");
    let pipeline = MosaicPipeline::from_config(&config)?;

    let report = {
        let mut progress = TileProgress::new();
        pipeline.run_with_progress(&bbox, zoom, &output, &mut progress)?
    };

    print_summary(&report);
    Ok(())
}

/// CLI flags take precedence over the config file.
fn apply_overrides(args: &MosaicArgs, config: &mut ConfigFile) {
    if let Some(key) = &args.api_key {
        config.provider.api_key = Some(key.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        config.provider.endpoint = endpoint.clone();
    }
}

fn print_summary(report: &MosaicReport) {
    let range = &report.range;
    println!();
    println!("{}", style("Mosaic complete").green().bold());
    println!("  Output:  {}", report.output.display());
    println!(
        "  Tiles:   x {}..={}, y {}..={} at zoom {}",
        range.x_min(),
        range.x_max(),
        range.y_min(),
        range.y_max(),
        range.zoom()
    );
    println!("  Size:    {}x{} px", report.width, report.height);
    println!("  Present: {}", report.present);
    if report.absent > 0 {
        println!("  Missing: {}", style(report.absent).yellow());
    }
    if !report.warnings.is_empty() {
        println!(
            "  {} tile(s) placed with problems, see the log for details",
            style(report.warnings.len()).yellow()
        );
    }
}
