//! Grid acquisition: bounding box in, sparse tile grid out.

use thiserror::Error;
use tracing::{info, warn};

use super::types::{FetchedTile, TileCell, TileGrid};
use crate::coord::{CoordError, GeoBoundingBox, TileCoord, TileRange};
use crate::provider::TileProvider;

/// Default upper bound on tiles fetched in one run.
pub const DEFAULT_MAX_TILES: usize = 4096;

/// Errors that end an acquisition run.
///
/// Per-tile fetch failures are not errors; they become absent cells.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquireError {
    #[error("Coordinate error: {0}")]
    Coordinate(#[from] CoordError),

    #[error("Tile rectangle has {requested} tiles, limit is {limit}")]
    TooManyTiles { requested: usize, limit: usize },

    #[error("No tiles were downloaded ({attempted} attempted)")]
    EmptyGrid { attempted: usize },
}

/// Receives per-tile notifications while a grid is being acquired.
pub trait AcquireProgress {
    /// Called once per cell, after its fetch completed.
    ///
    /// `done` counts cells processed so far including this one.
    fn on_tile(&mut self, done: usize, total: usize, cell: &TileCell);
}

/// Progress sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl AcquireProgress for NoProgress {
    fn on_tile(&mut self, _done: usize, _total: usize, _cell: &TileCell) {}
}

/// Fetches every tile of a rectangle, one at a time, into a [`TileGrid`].
pub struct GridAcquirer<P: TileProvider> {
    provider: P,
    max_tiles: usize,
}

impl<P: TileProvider> GridAcquirer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            max_tiles: DEFAULT_MAX_TILES,
        }
    }

    /// Sets the largest rectangle accepted before any fetch is issued.
    pub fn with_max_tiles(mut self, max_tiles: usize) -> Self {
        self.max_tiles = max_tiles;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Acquires the grid covering `bbox` at `zoom`.
    pub fn acquire(&self, bbox: &GeoBoundingBox, zoom: u8) -> Result<TileGrid, AcquireError> {
        self.acquire_with_progress(bbox, zoom, &mut NoProgress)
    }

    /// Acquires the grid covering `bbox`, reporting each cell to `progress`.
    pub fn acquire_with_progress(
        &self,
        bbox: &GeoBoundingBox,
        zoom: u8,
        progress: &mut dyn AcquireProgress,
    ) -> Result<TileGrid, AcquireError> {
        let range = TileRange::from_bbox(bbox, zoom)?;
        info!(
            zoom,
            x_min = range.x_min(),
            x_max = range.x_max(),
            y_min = range.y_min(),
            y_max = range.y_max(),
            tiles = range.len(),
            "Tile range"
        );
        self.acquire_range(&range, progress)
    }

    /// Fetches every tile in `range`, y ascending then x ascending.
    ///
    /// A failed fetch leaves an absent cell and the run continues; only a
    /// rectangle where every fetch failed is an error.
    pub fn acquire_range(
        &self,
        range: &TileRange,
        progress: &mut dyn AcquireProgress,
    ) -> Result<TileGrid, AcquireError> {
        let total = range.len();
        if total > self.max_tiles {
            return Err(AcquireError::TooManyTiles {
                requested: total,
                limit: self.max_tiles,
            });
        }

        let mut cells = Vec::with_capacity(total);
        for (done, position) in range.iter().enumerate() {
            let cell = self.fetch_cell(position.coord);
            progress.on_tile(done + 1, total, &cell);
            cells.push(cell);
        }

        let grid = TileGrid::from_ordered_cells(*range, cells);

        if grid.is_empty() {
            warn!(attempted = total, "No tiles were downloaded");
            return Err(AcquireError::EmptyGrid { attempted: total });
        }

        info!(
            provider = self.provider.name(),
            present = grid.present_count(),
            absent = grid.absent_count(),
            rows = grid.rows(),
            columns = grid.columns(),
            "Tile grid acquired"
        );
        Ok(grid)
    }

    fn fetch_cell(&self, coord: TileCoord) -> TileCell {
        match self.provider.fetch_tile(&coord) {
            Ok(bytes) => TileCell::Present(FetchedTile { coord, bytes }),
            Err(reason) => {
                warn!(
                    zoom = coord.zoom,
                    x = coord.x,
                    y = coord.y,
                    error = %reason,
                    "Tile failed to download"
                );
                TileCell::Absent { coord, reason }
            }
        }
    }
}
