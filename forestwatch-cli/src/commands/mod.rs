//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`coverage`] - Vegetation coverage of an image
//! - [`init`] - Configuration initialization
//! - [`locate`] - Tile coordinate of a point
//! - [`mosaic`] - Satellite mosaic of a bounding box

pub mod common;
pub mod coverage;
pub mod init;
pub mod locate;
pub mod mosaic;
