//! Coverage overlay rendering and the JSON report.

use std::path::PathBuf;

use image::{GrayImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use super::error::SegmentError;
use super::segmenter::VEGETATION;

/// Highlight colour blended over vegetation pixels.
pub const OVERLAY_TINT: Rgb<u8> = Rgb([255, 255, 0]);

/// Default weight of the highlight layer.
pub const DEFAULT_OVERLAY_ALPHA: f32 = 0.33;

/// Blends a highlight layer over `image`.
///
/// The layer is [`OVERLAY_TINT`] on vegetation pixels and black elsewhere,
/// mixed as `(1 - alpha) * image + alpha * layer`.
pub fn overlay(image: &RgbImage, mask: &GrayImage, alpha: f32) -> Result<RgbImage, SegmentError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(SegmentError::InvalidAlpha(alpha));
    }
    if image.dimensions() != mask.dimensions() {
        return Err(SegmentError::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let mut out = image.clone();
    for (pixel, m) in out.pixels_mut().zip(mask.pixels()) {
        let vegetation = m[0] == VEGETATION;
        for c in 0..3 {
            let layer = if vegetation { OVERLAY_TINT[c] as f32 } else { 0.0 };
            let blended = (1.0 - alpha) * pixel[c] as f32 + alpha * layer;
            pixel[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// Result of a coverage analysis, serialised as the JSON the CLI prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Vegetation share of the image, in percent.
    pub forest_coverage: f64,
    /// `100 - forest_coverage`.
    pub deforested_area: f64,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mask_path: Option<PathBuf>,
    #[serde(
        rename = "masked_image_path",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub overlay_path: Option<PathBuf>,
}

impl CoverageReport {
    pub fn new(forest_coverage: f64, width: u32, height: u32) -> Self {
        Self {
            forest_coverage,
            deforested_area: 100.0 - forest_coverage,
            width,
            height,
            mask_path: None,
            overlay_path: None,
        }
    }
}
