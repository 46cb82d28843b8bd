//! Mosaic assembly.
//!
//! ```text
//! TileGrid ──► MosaicCompositor::stitch ──► StitchResult ──► save_mosaic
//!   (sparse)        (decode + paste)        (RgbImage +        (png/tiff/...)
//!                                             warnings)
//! ```
//!
//! Cell `(row, col)` lands at pixel `(col × tile_size, row × tile_size)`.
//! Absent cells stay at [`DEFAULT_FILL`]; the compositor never invents
//! pixels for them.

mod compositor;
mod error;
mod writer;

#[cfg(test)]
mod tests;

pub use compositor::{MosaicCompositor, StitchResult, DEFAULT_FILL, DEFAULT_TILE_SIZE};
pub use error::{MosaicError, PlacementWarning};
pub use writer::{encode_png, save_image, save_mosaic};
