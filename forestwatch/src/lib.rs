//! ForestWatch - satellite mosaics and vegetation coverage
//!
//! This library turns a geographic bounding box into a single satellite image
//! assembled from slippy-map tiles, and measures how much of that image is
//! covered by vegetation.
//!
//! # High-Level API
//!
//! ```no_run
//! use std::path::Path;
//! use forestwatch::config::ConfigFile;
//! use forestwatch::coord::GeoBoundingBox;
//! use forestwatch::pipeline::MosaicPipeline;
//!
//! let config = ConfigFile::load()?;
//! let pipeline = MosaicPipeline::from_config(&config)?;
//! let bbox = GeoBoundingBox::new(45.3696, 25.6933, 45.3893, 25.7630)?;
//! let report = pipeline.run(&bbox, 15, Path::new("images/area_1.png"))?;
//! println!("{} tiles placed", report.present);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod coord;
pub mod coverage;
pub mod grid;
pub mod logging;
pub mod mosaic;
pub mod pipeline;
pub mod provider;

#[cfg(test)]
mod testing;

/// Version of the ForestWatch library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
