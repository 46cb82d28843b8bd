//! Two-cluster colour segmentation of vegetation.

use image::{GrayImage, Luma, RgbImage};
use tracing::debug;

use super::error::SegmentError;
use super::morphology;

/// Lloyd iterations before giving up on convergence.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Side of the square structuring element used to clean the mask.
pub const DEFAULT_KERNEL_SIZE: u32 = 5;

/// Mask value of vegetation pixels.
pub const VEGETATION: u8 = 255;

/// Classifies every pixel of an RGB image as vegetation or not.
///
/// Implementations return a single-channel mask with the same dimensions
/// as the input, holding [`VEGETATION`] or 0 per pixel.
pub trait VegetationSegmenter: Send + Sync {
    fn segment(&self, image: &RgbImage) -> Result<GrayImage, SegmentError>;
}

impl<S: VegetationSegmenter + ?Sized> VegetationSegmenter for Box<S> {
    fn segment(&self, image: &RgbImage) -> Result<GrayImage, SegmentError> {
        (**self).segment(image)
    }
}

/// K-means (k = 2) over RGB colour, followed by a morphological close then
/// open.
///
/// Initial centroids are the least green and the most green pixel (by
/// `g - (r + b) / 2`), so the result is deterministic for a given image.
/// The cluster whose centroid is greener by the same measure is vegetation.
#[derive(Debug, Clone, Copy)]
pub struct KMeansSegmenter {
    max_iterations: u32,
    kernel_size: u32,
}

impl Default for KMeansSegmenter {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}

impl KMeansSegmenter {
    /// Creates a segmenter; the kernel size must be odd.
    pub fn new(max_iterations: u32, kernel_size: u32) -> Result<Self, SegmentError> {
        if kernel_size == 0 || kernel_size % 2 == 0 {
            return Err(SegmentError::InvalidKernel(kernel_size));
        }
        Ok(Self {
            max_iterations: max_iterations.max(1),
            kernel_size,
        })
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn kernel_size(&self) -> u32 {
        self.kernel_size
    }

    /// Raw cluster mask before morphological clean-up.
    pub fn cluster(&self, image: &RgbImage) -> Result<GrayImage, SegmentError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SegmentError::EmptyImage);
        }

        let pixels: Vec<[f32; 3]> = image
            .pixels()
            .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
            .collect();

        let mut centroids = initial_centroids(&pixels);
        let mut labels = vec![0u8; pixels.len()];
        let mut iterations = 0;

        loop {
            iterations += 1;
            let mut changed = false;
            for (label, pixel) in labels.iter_mut().zip(&pixels) {
                let nearest = nearest(&centroids, pixel);
                if nearest != *label {
                    *label = nearest;
                    changed = true;
                }
            }

            let mut sums = [[0f64; 3]; 2];
            let mut counts = [0usize; 2];
            for (label, pixel) in labels.iter().zip(&pixels) {
                let k = *label as usize;
                counts[k] += 1;
                for c in 0..3 {
                    sums[k][c] += pixel[c] as f64;
                }
            }
            for k in 0..2 {
                if counts[k] > 0 {
                    for c in 0..3 {
                        centroids[k][c] = (sums[k][c] / counts[k] as f64) as f32;
                    }
                }
            }

            // Labels start at 0, so the first pass never counts as converged.
            if (!changed && iterations > 1) || iterations >= self.max_iterations {
                let vegetation = vegetation_cluster(&centroids, &counts);
                debug!(
                    iterations,
                    vegetation_pixels = counts[vegetation],
                    other_pixels = counts[1 - vegetation],
                    "K-means converged"
                );
                let mask = labels
                    .iter()
                    .map(|&l| if l as usize == vegetation { VEGETATION } else { 0 })
                    .collect();
                return GrayImage::from_raw(width, height, mask).ok_or(SegmentError::EmptyImage);
            }
        }
    }
}

impl VegetationSegmenter for KMeansSegmenter {
    fn segment(&self, image: &RgbImage) -> Result<GrayImage, SegmentError> {
        let raw = self.cluster(image)?;
        let closed = morphology::close(&raw, self.kernel_size)?;
        morphology::open(&closed, self.kernel_size)
    }
}

fn greenness(pixel: &[f32; 3]) -> f32 {
    pixel[1] - (pixel[0] + pixel[2]) / 2.0
}

fn initial_centroids(pixels: &[[f32; 3]]) -> [[f32; 3]; 2] {
    let mut least = pixels[0];
    let mut most = pixels[0];
    for pixel in pixels {
        if greenness(pixel) < greenness(&least) {
            least = *pixel;
        }
        if greenness(pixel) > greenness(&most) {
            most = *pixel;
        }
    }
    [least, most]
}

fn distance_sq(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    (0..3).map(|c| (a[c] - b[c]) * (a[c] - b[c])).sum()
}

/// Index of the closest centroid; ties go to cluster 0.
fn nearest(centroids: &[[f32; 3]; 2], pixel: &[f32; 3]) -> u8 {
    if distance_sq(&centroids[1], pixel) < distance_sq(&centroids[0], pixel) {
        1
    } else {
        0
    }
}

/// Non-empty cluster with the greener centroid; ties go to cluster 1.
fn vegetation_cluster(centroids: &[[f32; 3]; 2], counts: &[usize; 2]) -> usize {
    match counts {
        [0, _] => 1,
        [_, 0] => 0,
        _ if greenness(&centroids[0]) > greenness(&centroids[1]) => 0,
        _ => 1,
    }
}

/// Percentage of mask pixels marked as vegetation, in `[0, 100]`.
pub fn coverage_percent(mask: &GrayImage) -> Result<f64, SegmentError> {
    let total = mask.width() as u64 * mask.height() as u64;
    if total == 0 {
        return Err(SegmentError::EmptyImage);
    }
    let vegetation = mask.pixels().filter(|p| p[0] == VEGETATION).count() as u64;
    Ok(vegetation as f64 / total as f64 * 100.0)
}

/// Builds a mask image from a predicate; used by callers that already
/// classify pixels some other way.
pub fn mask_from_fn(
    width: u32,
    height: u32,
    mut is_vegetation: impl FnMut(u32, u32) -> bool,
) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        Luma([if is_vegetation(x, y) { VEGETATION } else { 0 }])
    })
}
