//! User configuration stored in `~/.forestwatch/config.ini`.
//!
//! Settings structs live in [`settings`], constants in [`defaults`], parsing
//! in `parser` and serialization in `writer`.

pub mod defaults;
mod file;
mod parser;
pub mod settings;
mod writer;

pub use defaults::{DEFAULT_OUTPUT_DIR, DEFAULT_ZOOM};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, CoverageSettings, LoggingSettings, MosaicSettings, ProviderSettings};
