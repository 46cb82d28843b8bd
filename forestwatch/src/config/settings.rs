//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub provider: ProviderSettings,
    pub mosaic: MosaicSettings,
    pub coverage: CoverageSettings,
    pub logging: LoggingSettings,
}

/// Tile provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// URL prefix the `{z}/{x}/{y}.{ext}` path is appended to
    pub endpoint: String,
    /// Tile file extension, without the dot
    pub extension: String,
    /// Provider API key; requests fail without one
    pub api_key: Option<String>,
    /// Timeout in seconds for each tile request
    pub timeout: u64,
}

/// Mosaic assembly configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicSettings {
    /// Zoom level used when none is given on the command line
    pub zoom: u8,
    /// Expected tile edge in pixels
    pub tile_size: u32,
    /// Directory mosaics are written to
    pub output_dir: PathBuf,
    /// Upper bound on tiles fetched for one mosaic
    pub max_tiles: usize,
}

/// Vegetation coverage configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSettings {
    /// Side of the square morphology kernel (odd)
    pub kernel_size: u32,
    /// K-means iteration cap
    pub max_iterations: u32,
    /// Weight of the highlight layer in overlay images
    pub overlay_alpha: f32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}
