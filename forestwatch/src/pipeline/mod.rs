//! End-to-end mosaic runs: acquire, stitch, write.
//!
//! [`MosaicPipeline`] owns a [`GridAcquirer`] and a [`MosaicCompositor`] and
//! produces one image file per run. Coverage analysis of the result is left
//! to [`crate::coverage`].

mod naming;

pub use naming::{derived_path, mosaic_file_name, timestamped_output, TIMESTAMP_FORMAT};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigFile, ProviderSettings};
use crate::coord::{GeoBoundingBox, TileRange};
use crate::grid::{AcquireError, AcquireProgress, GridAcquirer, NoProgress};
use crate::mosaic::{save_mosaic, MosaicCompositor, MosaicError, PlacementWarning};
use crate::provider::{
    ProviderError, ReqwestClient, TemplateProvider, TileProvider, TOMTOM_SATELLITE_ENDPOINT,
    TOMTOM_SATELLITE_EXTENSION,
};

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Mosaic(#[from] MosaicError),

    #[error("No API key configured for the tile provider")]
    MissingApiKey,

    #[error("Failed to set up tile provider: {0}")]
    Provider(#[from] ProviderError),
}

/// Summary of a completed mosaic run.
#[derive(Debug, Clone)]
pub struct MosaicReport {
    /// Where the mosaic was written.
    pub output: PathBuf,
    /// Tile rectangle the mosaic covers.
    pub range: TileRange,
    pub width: u32,
    pub height: u32,
    /// Tiles fetched successfully.
    pub present: usize,
    /// Tiles that could not be fetched.
    pub absent: usize,
    /// Tiles fetched but not cleanly placed.
    pub warnings: Vec<PlacementWarning>,
}

/// Acquires, stitches and writes one mosaic per call.
pub struct MosaicPipeline<P: TileProvider> {
    acquirer: GridAcquirer<P>,
    compositor: MosaicCompositor,
}

impl<P: TileProvider> MosaicPipeline<P> {
    pub fn new(provider: P) -> Self {
        Self {
            acquirer: GridAcquirer::new(provider),
            compositor: MosaicCompositor::default(),
        }
    }

    pub fn with_compositor(mut self, compositor: MosaicCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    pub fn with_max_tiles(mut self, max_tiles: usize) -> Self {
        self.acquirer = self.acquirer.with_max_tiles(max_tiles);
        self
    }

    pub fn provider(&self) -> &P {
        self.acquirer.provider()
    }

    /// Builds the mosaic of `bbox` at `zoom` and writes it to `output`.
    pub fn run(
        &self,
        bbox: &GeoBoundingBox,
        zoom: u8,
        output: &Path,
    ) -> Result<MosaicReport, PipelineError> {
        self.run_with_progress(bbox, zoom, output, &mut NoProgress)
    }

    /// Like [`run`](Self::run), reporting each fetched cell to `progress`.
    pub fn run_with_progress(
        &self,
        bbox: &GeoBoundingBox,
        zoom: u8,
        output: &Path,
        progress: &mut dyn AcquireProgress,
    ) -> Result<MosaicReport, PipelineError> {
        info!(
            provider = self.provider().name(),
            zoom,
            output = %output.display(),
            "Starting mosaic run"
        );

        let grid = self.acquirer.acquire_with_progress(bbox, zoom, progress)?;
        let stitched = self.compositor.stitch(&grid)?;
        save_mosaic(&stitched.mosaic, output)?;

        info!(
            output = %output.display(),
            width = stitched.mosaic.width(),
            height = stitched.mosaic.height(),
            present = grid.present_count(),
            absent = grid.absent_count(),
            "Mosaic saved"
        );

        Ok(MosaicReport {
            output: output.to_path_buf(),
            range: *grid.range(),
            width: stitched.mosaic.width(),
            height: stitched.mosaic.height(),
            present: grid.present_count(),
            absent: grid.absent_count(),
            warnings: stitched.warnings,
        })
    }
}

impl MosaicPipeline<TemplateProvider<ReqwestClient>> {
    /// Builds a networked pipeline from user configuration.
    pub fn from_config(config: &ConfigFile) -> Result<Self, PipelineError> {
        let provider = provider_from_settings(&config.provider)?;
        Ok(Self::new(provider)
            .with_compositor(MosaicCompositor::new(config.mosaic.tile_size)?)
            .with_max_tiles(config.mosaic.max_tiles))
    }
}

/// HTTP tile provider for the configured endpoint.
///
/// The stock TomTom endpoint gets TomTom's name and zoom limits.
pub fn provider_from_settings(
    settings: &ProviderSettings,
) -> Result<TemplateProvider<ReqwestClient>, PipelineError> {
    let api_key = settings
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or(PipelineError::MissingApiKey)?;
    let client = ReqwestClient::with_timeout(settings.timeout)?;

    let endpoint = settings.endpoint.trim_end_matches('/');
    if endpoint == TOMTOM_SATELLITE_ENDPOINT && settings.extension == TOMTOM_SATELLITE_EXTENSION {
        return Ok(TemplateProvider::tomtom(client, api_key));
    }
    Ok(TemplateProvider::new(
        client,
        endpoint,
        settings.extension.as_str(),
        api_key,
    ))
}
