//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator slippy-map tile coordinates, plus the bounding box and
//! tile rectangle types the grid acquirer works with.

mod types;

pub use types::{
    tiles_per_side, CoordError, GeoBoundingBox, GridPosition, TileCoord, TileRange,
    TileRangeIter, MAX_LAT, MAX_ZOOM, MERCATOR_MAX_LAT, MIN_LAT, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees, strictly between -90 and 90
/// * `lon` - Longitude in degrees
/// * `zoom` - Zoom level (0 to 30)
///
/// # Clamping
///
/// The poles are rejected because the projection is undefined there. Any
/// other latitude is accepted: beyond ±[`MERCATOR_MAX_LAT`] the raw row falls
/// off the square Mercator world and is clamped to the first or last row.
/// Longitudes outside [-180, 180) are clamped to the first or last column the
/// same way, so the result is always a valid tile index.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !lat.is_finite() || lat <= MIN_LAT || lat >= MAX_LAT {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !lon.is_finite() {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let last = n - 1.0;

    let x = ((lon + 180.0) / 360.0 * n).floor();

    // asinh(tan φ) == ln(tan φ + sec φ)
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();

    Ok(TileCoord {
        zoom,
        x: x.clamp(0.0, last) as u32,
        y: y.clamp(0.0, last) as u32,
    })
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.x as f64 / n * 360.0 - 180.0;

    let y = tile.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();

    (lat_rad.to_degrees(), lon)
}

impl TileCoord {
    /// Geographic extent of this tile as a bounding box.
    pub fn bounds(&self) -> Result<GeoBoundingBox, CoordError> {
        let (north, west) = tile_to_lat_lon(self);
        let (south, east) = tile_to_lat_lon(&TileCoord {
            zoom: self.zoom,
            x: self.x + 1,
            y: self.y + 1,
        });
        GeoBoundingBox::new(south, west, north, east)
    }
}
