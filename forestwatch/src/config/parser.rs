//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::MAX_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = non_empty(section, "endpoint") {
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid("provider", "endpoint", v, "must be an http(s) URL"));
            }
            config.provider.endpoint = v.to_string();
        }
        if let Some(v) = non_empty(section, "extension") {
            config.provider.extension = v.trim_start_matches('.').to_string();
        }
        if let Some(v) = non_empty(section, "api_key") {
            config.provider.api_key = Some(v.to_string());
        }
        if let Some(timeout) = parse_number::<u64>(
            section,
            "provider",
            "timeout",
            "must be a positive integer (seconds)",
        )? {
            if timeout == 0 {
                return Err(invalid(
                    "provider",
                    "timeout",
                    "0",
                    "must be a positive integer (seconds)",
                ));
            }
            config.provider.timeout = timeout;
        }
    }

    // [mosaic] section
    if let Some(section) = ini.section(Some("mosaic")) {
        if let Some(zoom) =
            parse_number::<u8>(section, "mosaic", "zoom", "must be an integer from 0 to 30")?
        {
            if zoom > MAX_ZOOM {
                return Err(invalid(
                    "mosaic",
                    "zoom",
                    &zoom.to_string(),
                    "must be an integer from 0 to 30",
                ));
            }
            config.mosaic.zoom = zoom;
        }
        if let Some(size) =
            parse_number::<u32>(section, "mosaic", "tile_size", "must be a positive integer")?
        {
            if size == 0 {
                return Err(invalid("mosaic", "tile_size", "0", "must be a positive integer"));
            }
            config.mosaic.tile_size = size;
        }
        if let Some(v) = non_empty(section, "output_dir") {
            config.mosaic.output_dir = expand_tilde(v);
        }
        if let Some(max) =
            parse_number::<usize>(section, "mosaic", "max_tiles", "must be a positive integer")?
        {
            if max == 0 {
                return Err(invalid("mosaic", "max_tiles", "0", "must be a positive integer"));
            }
            config.mosaic.max_tiles = max;
        }
    }

    // [coverage] section
    if let Some(section) = ini.section(Some("coverage")) {
        if let Some(size) = parse_number::<u32>(
            section,
            "coverage",
            "kernel_size",
            "must be an odd positive integer",
        )? {
            if size % 2 == 0 {
                return Err(invalid(
                    "coverage",
                    "kernel_size",
                    &size.to_string(),
                    "must be an odd positive integer",
                ));
            }
            config.coverage.kernel_size = size;
        }
        if let Some(n) = parse_number::<u32>(
            section,
            "coverage",
            "max_iterations",
            "must be a positive integer",
        )? {
            config.coverage.max_iterations = n.max(1);
        }
        if let Some(alpha) = parse_number::<f32>(
            section,
            "coverage",
            "overlay_alpha",
            "must be a number between 0 and 1",
        )? {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(invalid(
                    "coverage",
                    "overlay_alpha",
                    &alpha.to_string(),
                    "must be a number between 0 and 1",
                ));
            }
            config.coverage.overlay_alpha = alpha;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "directory") {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match non_empty(section, key) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| invalid(section_name, key, v, reason)),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
