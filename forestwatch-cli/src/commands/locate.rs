//! Locate command - tile coordinate of a point.

use clap::Args;
use forestwatch::coord::{to_tile_coords, TileCoord};

use crate::error::CliError;

/// Arguments for the locate command.
#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Zoom level (0-30)
    #[arg(long, default_value = "15")]
    pub zoom: u8,
}

/// Run the locate command.
pub fn run(args: LocateArgs) -> Result<(), CliError> {
    let tile = locate(&args)?;
    let bounds = tile.bounds()?;
    println!("{}", tile);
    println!(
        "  covers lat {:.6}..{:.6}, lon {:.6}..{:.6}",
        bounds.lat_min(),
        bounds.lat_max(),
        bounds.lon_min(),
        bounds.lon_max()
    );
    Ok(())
}

fn locate(args: &LocateArgs) -> Result<TileCoord, CliError> {
    Ok(to_tile_coords(args.lat, args.lon, args.zoom)?)
}
