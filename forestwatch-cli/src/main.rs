//! ForestWatch CLI - Command-line interface
//!
//! This binary provides a command-line interface to the ForestWatch library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::load_config;
use commands::coverage::CoverageArgs;
use commands::locate::LocateArgs;
use commands::mosaic::MosaicArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "forestwatch")]
#[command(version = forestwatch::VERSION)]
#[command(about = "Satellite mosaics and vegetation coverage for geographic areas", long_about = None)]
struct Cli {
    /// Config file (default: ~/.forestwatch/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tile containing a point
    Locate(LocateArgs),
    /// Download and stitch the satellite tiles of a bounding box
    Mosaic(MosaicArgs),
    /// Measure vegetation coverage of an image
    Coverage(CoverageArgs),
    /// Create a default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Locate(args) => commands::locate::run(args),
        Commands::Mosaic(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::mosaic::run(args, config)
        }
        Commands::Coverage(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::coverage::run(args, &config)
        }
        Commands::Init => commands::init::run(cli.config.as_deref()),
    }
}
