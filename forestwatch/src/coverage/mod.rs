//! Vegetation coverage analysis of assembled mosaics.
//!
//! A [`VegetationSegmenter`] turns an RGB image into a binary mask,
//! [`coverage_percent`] measures it and [`overlay`] renders it for humans.

mod error;
pub mod morphology;
mod report;
mod segmenter;

pub use error::SegmentError;
pub use report::{overlay, CoverageReport, DEFAULT_OVERLAY_ALPHA, OVERLAY_TINT};
pub use segmenter::{
    coverage_percent, mask_from_fn, KMeansSegmenter, VegetationSegmenter,
    DEFAULT_KERNEL_SIZE, DEFAULT_MAX_ITERATIONS, VEGETATION,
};

use image::{GrayImage, RgbImage};
use tracing::info;

/// Mask and measured coverage of one image.
#[derive(Debug, Clone)]
pub struct CoverageAnalysis {
    pub mask: GrayImage,
    pub report: CoverageReport,
}

/// Segments `image` and measures the vegetation share.
pub fn analyze<S: VegetationSegmenter + ?Sized>(
    segmenter: &S,
    image: &RgbImage,
) -> Result<CoverageAnalysis, SegmentError> {
    let mask = segmenter.segment(image)?;
    let coverage = coverage_percent(&mask)?;
    info!(
        width = image.width(),
        height = image.height(),
        coverage,
        "Vegetation coverage measured"
    );
    Ok(CoverageAnalysis {
        mask,
        report: CoverageReport::new(coverage, image.width(), image.height()),
    })
}
