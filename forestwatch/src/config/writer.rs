//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.provider.api_key.as_deref().unwrap_or("");

    format!(
        r#"[provider]
; URL prefix for tile requests; {{z}}/{{x}}/{{y}}.{{extension}} is appended
endpoint = {}
; Tile image extension (jpg, png)
extension = {}
; Provider API key, sent as the `key` query parameter
api_key = {}
; Timeout in seconds for each tile request (default: 30)
timeout = {}

[mosaic]
; Zoom level used when --zoom is not given (0-30, default: 15)
zoom = {}
; Expected tile edge in pixels (default: 256)
tile_size = {}
; Directory mosaics are written to
output_dir = {}
; Refuse bounding boxes that would need more tiles than this (default: 4096)
max_tiles = {}

[coverage]
; Side of the square clean-up kernel, must be odd (default: 5)
kernel_size = {}
; K-means iteration cap (default: 20)
max_iterations = {}
; Weight of the highlight colour in overlay images, 0-1 (default: 0.33)
overlay_alpha = {}

[logging]
; Directory for log files
directory = {}
; Log file name, cleared at the start of every run
file = {}
"#,
        config.provider.endpoint,
        config.provider.extension,
        api_key,
        config.provider.timeout,
        config.mosaic.zoom,
        config.mosaic.tile_size,
        path_to_string(&config.mosaic.output_dir),
        config.mosaic.max_tiles,
        config.coverage.kernel_size,
        config.coverage.max_iterations,
        config.coverage.overlay_alpha,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Renders paths under the home directory with a `~/` prefix.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
