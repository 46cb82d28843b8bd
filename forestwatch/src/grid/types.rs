//! Sparse tile grid types.

use thiserror::Error;

use crate::coord::{TileCoord, TileRange};
use crate::provider::ProviderError;

/// A tile whose fetch succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTile {
    pub coord: TileCoord,
    /// Raw, undecoded image payload
    pub bytes: Vec<u8>,
}

/// One cell of a [`TileGrid`].
///
/// Absence is an explicit value so a failed fetch keeps its position in the
/// grid instead of shifting its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub enum TileCell {
    Present(FetchedTile),
    Absent {
        coord: TileCoord,
        reason: ProviderError,
    },
}

impl TileCell {
    pub fn coord(&self) -> &TileCoord {
        match self {
            TileCell::Present(tile) => &tile.coord,
            TileCell::Absent { coord, .. } => coord,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, TileCell::Present(_))
    }

    /// The fetched tile, if this cell holds one.
    pub fn tile(&self) -> Option<&FetchedTile> {
        match self {
            TileCell::Present(tile) => Some(tile),
            TileCell::Absent { .. } => None,
        }
    }
}

/// Error building a grid from cells that do not match its range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridShapeError {
    #[error("Grid expects {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("Cell ({row}, {col}) holds tile {actual}, expected {expected}")]
    Misplaced {
        row: usize,
        col: usize,
        expected: TileCoord,
        actual: TileCoord,
    },
}

/// Sparse 2-D grid of fetched tiles keyed by `(row, col)`.
///
/// Cells are stored row-major; cell `(row, col)` always holds tile
/// `(x_min + col, y_min + row)` of the underlying [`TileRange`], present or
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    range: TileRange,
    cells: Vec<TileCell>,
}

impl TileGrid {
    /// Builds a grid from row-major cells, checking count and placement.
    pub fn from_cells(range: TileRange, cells: Vec<TileCell>) -> Result<Self, GridShapeError> {
        if cells.len() != range.len() {
            return Err(GridShapeError::CellCount {
                expected: range.len(),
                actual: cells.len(),
            });
        }

        for (position, cell) in range.iter().zip(&cells) {
            if *cell.coord() != position.coord {
                return Err(GridShapeError::Misplaced {
                    row: position.row,
                    col: position.col,
                    expected: position.coord,
                    actual: *cell.coord(),
                });
            }
        }

        Ok(Self { range, cells })
    }

    /// Wraps cells produced by iterating `range` in order.
    pub(super) fn from_ordered_cells(range: TileRange, cells: Vec<TileCell>) -> Self {
        debug_assert_eq!(cells.len(), range.len());
        Self { range, cells }
    }

    /// The tile rectangle this grid covers.
    pub fn range(&self) -> &TileRange {
        &self.range
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.range.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.range.columns()
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&TileCell> {
        if row >= self.rows() || col >= self.columns() {
            return None;
        }
        self.cells.get(row * self.columns() + col)
    }

    /// Fetched tile at `(row, col)`, or `None` if absent or outside the grid.
    pub fn tile(&self, row: usize, col: usize) -> Option<&FetchedTile> {
        self.get(row, col).and_then(TileCell::tile)
    }

    /// Iterates `(row, col, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &TileCell)> + '_ {
        let columns = self.columns();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / columns, i % columns, cell))
    }

    /// Number of cells holding a fetched tile.
    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_present()).count()
    }

    /// Number of cells left empty by a failed fetch.
    pub fn absent_count(&self) -> usize {
        self.cells.len() - self.present_count()
    }

    /// True when no cell holds a tile.
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}
