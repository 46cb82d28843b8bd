//! Binary morphology on 0/255 masks with a square structuring element.
//!
//! A square `k × k` kernel is the chessboard (`LInf`) ball of radius `k / 2`,
//! so every operation delegates to `imageproc::morphology`. Pixels outside
//! the image are ignored, which leaves borders untouched by erosion and
//! dilation alike.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

use super::error::SegmentError;

/// Validates an odd, non-zero kernel size and returns its radius.
///
/// `imageproc` takes the radius as a `u8` and reserves `u8::MAX` for
/// unreachable distances.
fn check_kernel(kernel_size: u32) -> Result<u8, SegmentError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(SegmentError::InvalidKernel(kernel_size));
    }
    u8::try_from(kernel_size / 2)
        .ok()
        .filter(|radius| *radius < u8::MAX)
        .ok_or(SegmentError::InvalidKernel(kernel_size))
}

/// Shrinks foreground regions.
pub fn erode(mask: &GrayImage, kernel_size: u32) -> Result<GrayImage, SegmentError> {
    let radius = check_kernel(kernel_size)?;
    Ok(morphology::erode(mask, Norm::LInf, radius))
}

/// Grows foreground regions.
pub fn dilate(mask: &GrayImage, kernel_size: u32) -> Result<GrayImage, SegmentError> {
    let radius = check_kernel(kernel_size)?;
    Ok(morphology::dilate(mask, Norm::LInf, radius))
}

/// Dilation followed by erosion: fills small holes.
pub fn close(mask: &GrayImage, kernel_size: u32) -> Result<GrayImage, SegmentError> {
    let radius = check_kernel(kernel_size)?;
    Ok(morphology::close(mask, Norm::LInf, radius))
}

/// Erosion followed by dilation: removes small specks.
pub fn open(mask: &GrayImage, kernel_size: u32) -> Result<GrayImage, SegmentError> {
    let radius = check_kernel(kernel_size)?;
    Ok(morphology::open(mask, Norm::LInf, radius))
}
