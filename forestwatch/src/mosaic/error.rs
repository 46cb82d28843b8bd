//! Error and warning types for mosaic assembly.

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::TileCoord;

/// Errors that prevent a mosaic from being produced or saved.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Grid has no rows or no columns.
    #[error("No tiles to stitch")]
    EmptyGrid,

    #[error("Invalid tile size: {0}")]
    InvalidTileSize(u32),

    /// Canvas dimensions overflow `u32`.
    #[error("Mosaic of {rows}×{columns} tiles at {tile_size}px is too large")]
    CanvasTooLarge {
        rows: usize,
        columns: usize,
        tile_size: u32,
    },

    #[error("Failed to encode mosaic: {0}")]
    Encode(#[source] image::ImageError),

    /// Output extension selects an encoder outside the lossless set
    /// (PNG, BMP, TIFF, TGA, PNM, QOI).
    #[error(
        "Refusing to write '{}': {format:?} output may alter pixels, use .png",
        path.display()
    )]
    LossyFormat {
        path: PathBuf,
        format: image::ImageFormat,
    },

    #[error("Failed to write mosaic to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A non-fatal problem with a single cell during stitching.
///
/// The cell is reported and compositing continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementWarning {
    /// Tile bytes could not be decoded; the cell keeps the default fill.
    #[error("Tile {coord} at ({row}, {col}) could not be decoded: {error}")]
    DecodeFailed {
        row: usize,
        col: usize,
        coord: TileCoord,
        error: String,
    },

    /// Decoded tile is not `tile_size × tile_size`; it was pasted at its
    /// nominal offset and clipped to its own cell.
    #[error(
        "Tile {coord} at ({row}, {col}) has size {width}x{height} \
         instead of expected {expected}x{expected}"
    )]
    SizeMismatch {
        row: usize,
        col: usize,
        coord: TileCoord,
        expected: u32,
        width: u32,
        height: u32,
    },

    /// Cell offset would write outside the canvas; the tile was skipped.
    #[error("Tile {coord} at ({row}, {col}) extends outside the bounds of the final image")]
    OutOfBounds {
        row: usize,
        col: usize,
        coord: TileCoord,
    },
}

impl PlacementWarning {
    /// Grid position of the affected cell.
    pub fn position(&self) -> (usize, usize) {
        match self {
            PlacementWarning::DecodeFailed { row, col, .. }
            | PlacementWarning::SizeMismatch { row, col, .. }
            | PlacementWarning::OutOfBounds { row, col, .. } => (*row, *col),
        }
    }
}
