//! URL-template tile provider.
//!
//! Serves any slippy-map endpoint laid out as
//! `{endpoint}/{zoom}/{x}/{y}.{extension}?key={api_key}`, which covers the
//! TomTom satellite tiles and most self-hosted XYZ servers.
//!
//! # Coordinate System
//!
//! Standard Web Mercator XYZ tile coordinates:
//! - X: Column (0 to 2^zoom - 1, west to east)
//! - Y: Row (0 to 2^zoom - 1, north to south)
//! - Z: Zoom level

use tracing::{debug, trace};

use crate::coord::TileCoord;
use crate::provider::{HttpClient, ProviderError, TileProvider};

/// TomTom satellite tile endpoint.
pub const TOMTOM_SATELLITE_ENDPOINT: &str = "https://api.tomtom.com/map/1/tile/sat/main";

/// Image extension served by the TomTom satellite endpoint.
pub const TOMTOM_SATELLITE_EXTENSION: &str = "jpg";

/// Deepest zoom served by the TomTom satellite endpoint.
pub const TOMTOM_SATELLITE_MAX_ZOOM: u8 = 19;

/// Tile provider driven by a URL template.
///
/// The access key is injected at construction and only ever appears in the
/// request URL, never in logs or error messages.
///
/// # Example
///
/// ```no_run
/// use forestwatch::provider::{ReqwestClient, TemplateProvider};
///
/// let client = ReqwestClient::new().unwrap();
/// let provider = TemplateProvider::tomtom(client, "YOUR_API_KEY".to_string());
/// ```
pub struct TemplateProvider<C: HttpClient> {
    http_client: C,
    endpoint: String,
    extension: String,
    api_key: String,
    name: String,
    min_zoom: u8,
    max_zoom: u8,
}

impl<C: HttpClient> TemplateProvider<C> {
    /// Creates a provider for an arbitrary endpoint.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `endpoint` - Base URL without trailing slash, e.g. `https://tiles.example.com/sat`
    /// * `extension` - Tile file extension, e.g. `jpg` or `png`
    /// * `api_key` - Access credential appended as the `key` query parameter
    pub fn new(
        http_client: C,
        endpoint: impl Into<String>,
        extension: impl Into<String>,
        api_key: String,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let extension = extension.into().trim_start_matches('.').to_string();
        Self {
            http_client,
            name: endpoint.clone(),
            endpoint,
            extension,
            api_key,
            min_zoom: crate::coord::MIN_ZOOM,
            max_zoom: crate::coord::MAX_ZOOM,
        }
    }

    /// Creates a provider for TomTom satellite imagery.
    pub fn tomtom(http_client: C, api_key: String) -> Self {
        Self::new(
            http_client,
            TOMTOM_SATELLITE_ENDPOINT,
            TOMTOM_SATELLITE_EXTENSION,
            api_key,
        )
        .with_name("TomTom Satellite")
        .with_zoom_range(0, TOMTOM_SATELLITE_MAX_ZOOM)
    }

    /// Sets the display name used in logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the zoom levels this provider will request.
    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Builds the tile URL for the given coordinates.
    fn build_url(&self, coord: &TileCoord) -> String {
        format!(
            "{}/{}/{}/{}.{}?key={}",
            self.endpoint, coord.zoom, coord.x, coord.y, self.extension, self.api_key
        )
    }
}

impl<C: HttpClient> TileProvider for TemplateProvider<C> {
    fn fetch_tile(&self, coord: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(coord.zoom) {
            return Err(ProviderError::UnsupportedZoom(coord.zoom));
        }

        trace!(provider = %self.name, tile = %coord, "Requesting tile");
        let bytes = self.http_client.get(&self.build_url(coord))?;

        if bytes.is_empty() {
            return Err(ProviderError::InvalidResponse("empty body".to_string()));
        }

        debug!(tile = %coord, bytes = bytes.len(), "Tile fetched");
        Ok(bytes)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}
