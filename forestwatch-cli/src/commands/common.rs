//! Common types and utilities shared across CLI commands.

use std::path::Path;

use forestwatch::config::ConfigFile;
use forestwatch::coord::MAX_ZOOM;
use forestwatch::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Load the config file, from `path` when given.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            Ok(ConfigFile::load_from(path)?)
        }
        None => Ok(ConfigFile::load()?),
    }
}

/// Start file and console logging as configured.
pub fn start_logging(config: &ConfigFile) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

/// Resolve the zoom level: CLI takes precedence, then config.
pub fn resolve_zoom(cli_zoom: Option<u8>, config: &ConfigFile) -> Result<u8, CliError> {
    let zoom = cli_zoom.unwrap_or(config.mosaic.zoom);
    if zoom > MAX_ZOOM {
        return Err(CliError::Config(format!(
            "zoom {} is out of range (0-{})",
            zoom, MAX_ZOOM
        )));
    }
    Ok(zoom)
}
