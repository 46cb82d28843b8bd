//! Coordinate type definitions

use thiserror::Error;

/// Latitude bounds of the Mercator projection domain (poles excluded).
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Latitude beyond which Web Mercator tiles stop (the square world edge).
pub const MERCATOR_MAX_LAT: f64 = 85.05112878;

/// Zoom range supported by the tile grid.
///
/// 2^30 is the largest power of two whose tile indices still fit in `u32`.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 30;

/// Tile coordinates in the Web Mercator / slippy-map system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (west to east), 0 at the antimeridian
    pub x: u32,
    /// Y coordinate (north to south), 0 at the northern edge
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate, checking that x and y lie inside the
    /// `2^zoom × 2^zoom` grid.
    pub fn new(zoom: u8, x: u32, y: u32) -> Result<Self, CoordError> {
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        let n = tiles_per_side(zoom);
        if x >= n || y >= n {
            return Err(CoordError::TileOutOfRange { zoom, x, y });
        }
        Ok(Self { zoom, x, y })
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Number of tiles along one side of the grid at `zoom`.
#[inline]
pub fn tiles_per_side(zoom: u8) -> u32 {
    1u32 << zoom
}

/// Geographic bounding box in degrees.
///
/// Immutable once constructed; the constructor enforces
/// `lat_max > lat_min` and `lon_max > lon_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBoundingBox {
    lat_min: f64,
    lon_min: f64,
    lat_max: f64,
    lon_max: f64,
}

impl GeoBoundingBox {
    /// Creates a bounding box from its south-west and north-east corners.
    pub fn new(
        lat_min: f64,
        lon_min: f64,
        lat_max: f64,
        lon_max: f64,
    ) -> Result<Self, CoordError> {
        let all_finite = [lat_min, lon_min, lat_max, lon_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || lat_max <= lat_min || lon_max <= lon_min {
            return Err(CoordError::InvalidBoundingBox {
                lat_min,
                lon_min,
                lat_max,
                lon_max,
            });
        }
        Ok(Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        })
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// North-west corner as `(lat, lon)`.
    pub fn north_west(&self) -> (f64, f64) {
        (self.lat_max, self.lon_min)
    }

    /// South-east corner as `(lat, lon)`.
    pub fn south_east(&self) -> (f64, f64) {
        (self.lat_min, self.lon_max)
    }
}

/// Rectangle of tiles `[x_min, x_max] × [y_min, y_max]` at one zoom level.
///
/// Rows follow y and columns follow x, both ascending. Because tile y grows
/// southward, row 0 is the northernmost row of the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRange {
    zoom: u8,
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

impl TileRange {
    /// Creates a range from explicit bounds.
    pub fn new(
        zoom: u8,
        x_min: u32,
        x_max: u32,
        y_min: u32,
        y_max: u32,
    ) -> Result<Self, CoordError> {
        if x_min > x_max || y_min > y_max {
            return Err(CoordError::InvertedRange {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        // Validates zoom and the far corner in one go.
        TileCoord::new(zoom, x_max, y_max)?;
        Ok(Self {
            zoom,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Tile rectangle covering a bounding box.
    ///
    /// South is greater y: the north-west corner (`lat_max`, `lon_min`) yields
    /// the smallest x and y, the south-east corner (`lat_min`, `lon_max`) the
    /// largest. Swapping the corners stitches rows upside-down.
    pub fn from_bbox(bbox: &GeoBoundingBox, zoom: u8) -> Result<Self, CoordError> {
        let (north, west) = bbox.north_west();
        let (south, east) = bbox.south_east();
        let top_left = super::to_tile_coords(north, west, zoom)?;
        let bottom_right = super::to_tile_coords(south, east, zoom)?;
        Self::new(zoom, top_left.x, bottom_right.x, top_left.y, bottom_right.y)
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn x_min(&self) -> u32 {
        self.x_min
    }

    pub fn x_max(&self) -> u32 {
        self.x_max
    }

    pub fn y_min(&self) -> u32 {
        self.y_min
    }

    pub fn y_max(&self) -> u32 {
        self.y_max
    }

    /// Number of columns (x extent).
    #[inline]
    pub fn columns(&self) -> usize {
        (self.x_max - self.x_min) as usize + 1
    }

    /// Number of rows (y extent).
    #[inline]
    pub fn rows(&self) -> usize {
        (self.y_max - self.y_min) as usize + 1
    }

    /// Total number of tiles in the rectangle.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Always false: a range holds at least one tile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Tile at grid position `(row, col)`, if inside the rectangle.
    pub fn coord_at(&self, row: usize, col: usize) -> Option<TileCoord> {
        if row >= self.rows() || col >= self.columns() {
            return None;
        }
        Some(TileCoord {
            zoom: self.zoom,
            x: self.x_min + col as u32,
            y: self.y_min + row as u32,
        })
    }

    /// Iterates every tile in row-major order (y ascending, then x ascending).
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            next: 0,
        }
    }
}

impl IntoIterator for &TileRange {
    type Item = GridPosition;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A tile together with its `(row, col)` position in a [`TileRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
    pub coord: TileCoord,
}

/// Row-major iterator over a [`TileRange`].
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    next: usize,
}

impl Iterator for TileRangeIter {
    type Item = GridPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.range.len() {
            return None;
        }
        let columns = self.range.columns();
        let row = self.next / columns;
        let col = self.next % columns;
        self.next += 1;

        let coord = self.range.coord_at(row, col)?;
        Some(GridPosition { row, col, coord })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileRangeIter {}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude at or beyond a pole, or not a number.
    #[error("Invalid latitude: {0} (must be strictly between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude is not a finite number.
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(f64),

    #[error("Invalid zoom level: {0} (must be between 0 and 30)")]
    InvalidZoom(u8),

    #[error("Tile {x},{y} is outside the grid at zoom {zoom}")]
    TileOutOfRange { zoom: u8, x: u32, y: u32 },

    #[error(
        "Invalid bounding box ({lat_min}, {lon_min}) - ({lat_max}, {lon_max}): \
         max corner must be north-east of min corner"
    )]
    InvalidBoundingBox {
        lat_min: f64,
        lon_min: f64,
        lat_max: f64,
        lon_max: f64,
    },

    #[error("Inverted tile range x {x_min}..={x_max}, y {y_min}..={y_max}")]
    InvertedRange {
        x_min: u32,
        x_max: u32,
        y_min: u32,
        y_max: u32,
    },
}
