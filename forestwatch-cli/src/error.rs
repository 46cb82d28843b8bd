//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use forestwatch::config::ConfigFileError;
use forestwatch::coord::CoordError;
use forestwatch::coverage::SegmentError;
use forestwatch::grid::AcquireError;
use forestwatch::mosaic::MosaicError;
use forestwatch::pipeline::PipelineError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read, parsed or written
    ConfigFile(ConfigFileError),
    /// Coordinates outside the projection
    Coordinate(CoordError),
    /// Mosaic run failed
    Pipeline(PipelineError),
    /// Input image could not be opened
    ImageRead {
        path: PathBuf,
        error: image::ImageError,
    },
    /// Mask or overlay could not be written
    ImageWrite(MosaicError),
    /// Segmentation failed
    Coverage(SegmentError),
    /// Report could not be serialized
    Report(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Pipeline(PipelineError::MissingApiKey) => {
                eprintln!();
                eprintln!("Set api_key in the [provider] section of the config file,");
                eprintln!("or pass --api-key. Run 'forestwatch init' to create the file.");
            }
            CliError::Pipeline(PipelineError::Acquire(AcquireError::EmptyGrid { .. })) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. Invalid or expired API key");
                eprintln!("  2. Zoom level beyond what the provider serves");
                eprintln!("  3. No network connection");
            }
            CliError::Pipeline(PipelineError::Acquire(AcquireError::TooManyTiles { .. })) => {
                eprintln!();
                eprintln!("Use a smaller area or a lower --zoom, or raise max_tiles in the");
                eprintln!("[mosaic] section of the config file.");
            }
            CliError::Pipeline(PipelineError::Mosaic(MosaicError::LossyFormat { .. }))
            | CliError::ImageWrite(MosaicError::LossyFormat { .. }) => {
                eprintln!();
                eprintln!("Mosaics and masks are written losslessly. Use a .png, .tiff or");
                eprintln!(".bmp output path.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Coordinate(e) => write!(f, "{}", e),
            CliError::Pipeline(e) => write!(f, "Mosaic failed: {}", e),
            CliError::ImageRead { path, error } => {
                write!(f, "Failed to open image '{}': {}", path.display(), error)
            }
            CliError::ImageWrite(e) => write!(f, "{}", e),
            CliError::Coverage(e) => write!(f, "Coverage analysis failed: {}", e),
            CliError::Report(e) => write!(f, "Failed to serialize report: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Coordinate(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            CliError::ImageRead { error, .. } => Some(error),
            CliError::ImageWrite(e) => Some(e),
            CliError::Coverage(e) => Some(e),
            CliError::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coordinate(e)
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<SegmentError> for CliError {
    fn from(e: SegmentError) -> Self {
        CliError::Coverage(e)
    }
}

impl From<MosaicError> for CliError {
    fn from(e: MosaicError) -> Self {
        CliError::ImageWrite(e)
    }
}
