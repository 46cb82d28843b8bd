//! Tile grid acquisition.
//!
//! Turns a bounding box into a rectangle of tile coordinates, fetches every
//! tile through a [`TileProvider`](crate::provider::TileProvider) and records
//! the outcome per cell in a sparse [`TileGrid`].
//!
//! Fetching is strictly sequential and row-major: the whole rectangle is
//! always visited, and a failed tile leaves a gap rather than aborting.

mod acquirer;
mod types;


pub use acquirer::{AcquireError, AcquireProgress, GridAcquirer, NoProgress, DEFAULT_MAX_TILES};
pub use types::{FetchedTile, GridShapeError, TileCell, TileGrid};
