//! Init command - initialize configuration file.

use std::path::Path;

use forestwatch::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command, writing to `path` or the default location.
pub fn run(path: Option<&Path>) -> Result<(), CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);

    if ConfigFile::ensure_exists_at(&path)? {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    println!();
    println!("Set api_key in the [provider] section before running 'forestwatch mosaic'.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
