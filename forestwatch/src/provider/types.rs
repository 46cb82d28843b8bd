//! Provider types and traits

use thiserror::Error;

use crate::coord::TileCoord;

/// Errors that can occur while fetching a tile.
///
/// Every variant is a per-tile condition: the grid acquirer records it as a
/// gap instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Transport failure or non-success HTTP status
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Zoom level not supported by this provider
    #[error("Zoom level {0} not supported by provider")]
    UnsupportedZoom(u8),

    /// Response arrived but cannot be a tile (e.g. empty body)
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for satellite tile providers.
///
/// One call performs exactly one blocking request. Implementations do not
/// retry; retry policy belongs to the HTTP client.
pub trait TileProvider: Send + Sync {
    /// Fetches the encoded image for a single tile.
    ///
    /// # Returns
    ///
    /// Raw, undecoded image bytes (typically JPEG or PNG) or an error.
    fn fetch_tile(&self, coord: &TileCoord) -> Result<Vec<u8>, ProviderError>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this provider supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}

impl<P: TileProvider + ?Sized> TileProvider for Box<P> {
    fn fetch_tile(&self, coord: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        (**self).fetch_tile(coord)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn min_zoom(&self) -> u8 {
        (**self).min_zoom()
    }

    fn max_zoom(&self) -> u8 {
        (**self).max_zoom()
    }
}
