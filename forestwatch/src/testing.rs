//! Shared fixtures for unit tests.

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Mutex;

use image::{ImageFormat, Rgb, RgbImage};

use crate::coord::TileCoord;
use crate::provider::{ProviderError, TileProvider};

/// Distinct colour for a tile, so placement can be checked pixel-wise.
pub fn tile_color(coord: &TileCoord) -> Rgb<u8> {
    Rgb([
        (coord.x.wrapping_mul(37) % 251) as u8,
        (coord.y.wrapping_mul(53) % 251) as u8,
        200,
    ])
}

/// Encodes a solid `width × height` image as PNG.
pub fn solid_png(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, color);
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Provider serving solid PNG tiles, failing for selected `(x, y)` pairs.
pub struct MockTileProvider {
    pub tile_size: u32,
    pub failing: HashSet<(u32, u32)>,
    pub requests: Mutex<Vec<TileCoord>>,
}

impl MockTileProvider {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            failing: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, x: u32, y: u32) -> Self {
        self.failing.insert((x, y));
        self
    }

    pub fn requested(&self) -> Vec<TileCoord> {
        self.requests.lock().unwrap().clone()
    }
}

impl TileProvider for MockTileProvider {
    fn fetch_tile(&self, coord: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        self.requests.lock().unwrap().push(*coord);
        if self.failing.contains(&(coord.x, coord.y)) {
            return Err(ProviderError::HttpError("HTTP 404 Not Found".to_string()));
        }
        Ok(solid_png(self.tile_size, self.tile_size, tile_color(coord)))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn min_zoom(&self) -> u8 {
        crate::coord::MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        crate::coord::MAX_ZOOM
    }
}

/// Provider whose every request fails.
pub struct FailingProvider;

impl TileProvider for FailingProvider {
    fn fetch_tile(&self, _coord: &TileCoord) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::HttpError("Request failed: connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn min_zoom(&self) -> u8 {
        crate::coord::MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        crate::coord::MAX_ZOOM
    }
}
