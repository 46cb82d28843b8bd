//! Error types for vegetation segmentation.

use thiserror::Error;

/// Errors that can occur while segmenting an image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Kernel size must be odd and at least 1, got {0}")]
    InvalidKernel(u32),

    #[error("Overlay alpha must be between 0 and 1, got {0}")]
    InvalidAlpha(f32),

    #[error("Mask is {mask_width}x{mask_height} but image is {image_width}x{image_height}")]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },
}
