//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::coverage::{DEFAULT_KERNEL_SIZE, DEFAULT_MAX_ITERATIONS, DEFAULT_OVERLAY_ALPHA};
use crate::grid::DEFAULT_MAX_TILES;
use crate::logging::{default_log_dir, default_log_file};
use crate::mosaic::DEFAULT_TILE_SIZE;
use crate::provider::{DEFAULT_TIMEOUT_SECS, TOMTOM_SATELLITE_ENDPOINT, TOMTOM_SATELLITE_EXTENSION};

/// Zoom level used for mosaics when none is configured.
pub const DEFAULT_ZOOM: u8 = 15;

/// Output directory for mosaics, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "images";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                endpoint: TOMTOM_SATELLITE_ENDPOINT.to_string(),
                extension: TOMTOM_SATELLITE_EXTENSION.to_string(),
                api_key: None,
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            mosaic: MosaicSettings {
                zoom: DEFAULT_ZOOM,
                tile_size: DEFAULT_TILE_SIZE,
                output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
                max_tiles: DEFAULT_MAX_TILES,
            },
            coverage: CoverageSettings {
                kernel_size: DEFAULT_KERNEL_SIZE,
                max_iterations: DEFAULT_MAX_ITERATIONS,
                overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            },
            logging: LoggingSettings {
                directory: config_directory().join(default_log_dir()),
                file: default_log_file().to_string(),
            },
        }
    }
}
