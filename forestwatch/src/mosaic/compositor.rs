//! Stitches a sparse tile grid into one RGB raster.

use image::{imageops, Rgb, RgbImage};
use tracing::{debug, info, warn};

use super::error::{MosaicError, PlacementWarning};
use crate::grid::{FetchedTile, TileGrid};

/// Edge length of a standard slippy-map tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Canvas colour where no tile was placed.
pub const DEFAULT_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Output of [`MosaicCompositor::stitch`].
#[derive(Debug, Clone)]
pub struct StitchResult {
    /// The assembled raster, owned by the caller.
    pub mosaic: RgbImage,
    /// Number of tiles pasted onto the canvas.
    pub placed: usize,
    /// Per-cell problems encountered while placing tiles.
    pub warnings: Vec<PlacementWarning>,
}

/// Places each present tile of a [`TileGrid`] at
/// `(col × tile_size, row × tile_size)` on a fresh canvas.
///
/// Canvas size comes from the grid's shape, never from the number of tiles
/// that actually arrived, so absent cells keep their slot at the default
/// fill.
#[derive(Debug, Clone, Copy)]
pub struct MosaicCompositor {
    tile_size: u32,
}

impl Default for MosaicCompositor {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl MosaicCompositor {
    pub fn new(tile_size: u32) -> Result<Self, MosaicError> {
        if tile_size == 0 {
            return Err(MosaicError::InvalidTileSize(tile_size));
        }
        Ok(Self { tile_size })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Assembles the grid into a single mosaic.
    ///
    /// Undecodable, mis-sized or out-of-bounds tiles are reported in
    /// [`StitchResult::warnings`] and never fail the whole stitch.
    pub fn stitch(&self, grid: &TileGrid) -> Result<StitchResult, MosaicError> {
        let rows = grid.rows();
        let columns = grid.columns();
        if rows == 0 || columns == 0 {
            return Err(MosaicError::EmptyGrid);
        }

        let (width, height) = self.canvas_size(rows, columns)?;
        info!(width, height, rows, columns, "Creating stitched image");

        let mut canvas = RgbImage::from_pixel(width, height, DEFAULT_FILL);
        let mut warnings = Vec::new();
        let mut placed = 0;

        for (row, col, cell) in grid.cells() {
            let Some(tile) = cell.tile() else {
                continue;
            };
            match self.place(&mut canvas, row, col, tile) {
                Ok(mismatch) => {
                    placed += 1;
                    warnings.extend(mismatch);
                }
                Err(warning) => warnings.push(warning),
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        debug!(placed, warnings = warnings.len(), "Stitching complete");

        Ok(StitchResult {
            mosaic: canvas,
            placed,
            warnings,
        })
    }

    fn canvas_size(&self, rows: usize, columns: usize) -> Result<(u32, u32), MosaicError> {
        let too_large = || MosaicError::CanvasTooLarge {
            rows,
            columns,
            tile_size: self.tile_size,
        };
        let width = u32::try_from(columns)
            .ok()
            .and_then(|c| c.checked_mul(self.tile_size))
            .ok_or_else(too_large)?;
        let height = u32::try_from(rows)
            .ok()
            .and_then(|r| r.checked_mul(self.tile_size))
            .ok_or_else(too_large)?;
        Ok((width, height))
    }

    /// Pastes one tile into its cell.
    ///
    /// Returns `Ok(Some(_))` when the tile was placed despite a size mismatch,
    /// `Err(_)` when it was skipped.
    fn place(
        &self,
        canvas: &mut RgbImage,
        row: usize,
        col: usize,
        tile: &FetchedTile,
    ) -> Result<Option<PlacementWarning>, PlacementWarning> {
        let coord = tile.coord;
        let size = self.tile_size as u64;
        let x = col as u64 * size;
        let y = row as u64 * size;

        if x + size > canvas.width() as u64 || y + size > canvas.height() as u64 {
            return Err(PlacementWarning::OutOfBounds { row, col, coord });
        }

        let decoded = image::load_from_memory(&tile.bytes)
            .map_err(|e| PlacementWarning::DecodeFailed {
                row,
                col,
                coord,
                error: e.to_string(),
            })?
            .to_rgb8();

        let (width, height) = decoded.dimensions();
        let mismatch = (width != self.tile_size || height != self.tile_size).then(|| {
            PlacementWarning::SizeMismatch {
                row,
                col,
                coord,
                expected: self.tile_size,
                width,
                height,
            }
        });

        // Clip to the cell so an oversized tile never bleeds into its neighbours.
        let clip_w = width.min(self.tile_size);
        let clip_h = height.min(self.tile_size);
        let clipped = imageops::crop_imm(&decoded, 0, 0, clip_w, clip_h).to_image();
        imageops::replace(canvas, &clipped, x as i64, y as i64);

        Ok(mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::TileCoord;
    use crate::testing::solid_png;

    fn tile(x: u32, y: u32, color: Rgb<u8>) -> FetchedTile {
        FetchedTile {
            coord: TileCoord { zoom: 10, x, y },
            bytes: solid_png(8, 8, color),
        }
    }

    #[test]
    fn test_place_outside_undersized_canvas_is_skipped() {
        let compositor = MosaicCompositor::new(8).unwrap();
        let mut canvas = RgbImage::from_pixel(8, 8, DEFAULT_FILL);

        let below = compositor.place(&mut canvas, 1, 0, &tile(100, 201, Rgb([9, 9, 9])));
        let beside = compositor.place(&mut canvas, 0, 1, &tile(101, 200, Rgb([9, 9, 9])));

        assert!(matches!(
            below,
            Err(PlacementWarning::OutOfBounds { row: 1, col: 0, .. })
        ));
        assert!(matches!(
            beside,
            Err(PlacementWarning::OutOfBounds { row: 0, col: 1, .. })
        ));
        assert!(canvas.pixels().all(|p| *p == DEFAULT_FILL));
    }

    #[test]
    fn test_place_partially_covered_cell_is_skipped() {
        // A 12px canvas holds one full 8px cell and half of the next.
        let compositor = MosaicCompositor::new(8).unwrap();
        let mut canvas = RgbImage::from_pixel(12, 8, DEFAULT_FILL);

        let first = compositor.place(&mut canvas, 0, 0, &tile(100, 200, Rgb([1, 2, 3])));
        let second = compositor.place(&mut canvas, 0, 1, &tile(101, 200, Rgb([4, 5, 6])));

        assert_eq!(first, Ok(None));
        assert_eq!(second.unwrap_err().position(), (0, 1));
        assert_eq!(*canvas.get_pixel(7, 7), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(8, 0), DEFAULT_FILL);
    }
}
