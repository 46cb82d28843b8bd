//! Persisting finished mosaics.

use std::io::Cursor;
use std::path::Path;

use image::{EncodableLayout, ImageBuffer, ImageFormat, PixelWithColorType, RgbImage};
use tracing::{debug, info};

use super::error::MosaicError;

/// Writes `mosaic` to `path`.
///
/// The format follows the file extension; a path without a recognised
/// extension is written as PNG. Extensions selecting a lossy encoder (JPEG,
/// GIF, AVIF, ...) are refused with [`MosaicError::LossyFormat`] before
/// anything touches the disk. Missing parent directories are created.
pub fn save_mosaic(mosaic: &RgbImage, path: &Path) -> Result<(), MosaicError> {
    save_image(mosaic, path)?;
    info!(
        path = %path.display(),
        width = mosaic.width(),
        height = mosaic.height(),
        "Stitched image saved"
    );
    Ok(())
}

/// Writes any 8-bit image buffer (mosaics, masks, overlays) the same way as
/// [`save_mosaic`].
pub fn save_image<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    path: &Path,
) -> Result<(), MosaicError>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    let format = output_format(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| MosaicError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image
        .save_with_format(path, format)
        .map_err(|source| MosaicError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), ?format, "Image written");
    Ok(())
}

/// Picks the encoder for `path`, accepting only lossless formats.
fn output_format(path: &Path) -> Result<ImageFormat, MosaicError> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    match format {
        ImageFormat::Png
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::Tga
        | ImageFormat::Pnm
        | ImageFormat::Qoi => Ok(format),
        _ => Err(MosaicError::LossyFormat {
            path: path.to_path_buf(),
            format,
        }),
    }
}

/// Encodes `mosaic` as PNG in memory.
pub fn encode_png(mosaic: &RgbImage) -> Result<Vec<u8>, MosaicError> {
    let mut buffer = Vec::new();
    mosaic
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(MosaicError::Encode)?;
    Ok(buffer)
}
