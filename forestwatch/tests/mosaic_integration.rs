//! Integration tests for the full mosaic flow.
//!
//! A fake HTTP client stands in for the tile server, so these tests cover the
//! URL template, grid acquisition, stitching, file output and coverage
//! analysis without network access.
//!
//! Run with: `cargo test --test mosaic_integration`

use std::io::Cursor;
use std::sync::Mutex;

use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

use forestwatch::coord::GeoBoundingBox;
use forestwatch::coverage::{analyze, KMeansSegmenter};
use forestwatch::mosaic::MosaicCompositor;
use forestwatch::pipeline::MosaicPipeline;
use forestwatch::provider::{HttpClient, ProviderError, TemplateProvider};

// ============================================================================
// Helper Functions
// ============================================================================

const TILE_SIZE: u32 = 16;
const FOREST: Rgb<u8> = Rgb([40, 140, 50]);
const BARE: Rgb<u8> = Rgb([150, 120, 90]);

/// Serves `z/x/y` URLs: even columns are forest, odd columns bare soil.
/// Tiles listed in `missing` answer with an HTTP error.
struct FakeTileServer {
    missing: Vec<(u32, u32)>,
    urls: Mutex<Vec<String>>,
}

impl FakeTileServer {
    fn new() -> Self {
        Self {
            missing: Vec::new(),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn without(mut self, x: u32, y: u32) -> Self {
        self.missing.push((x, y));
        self
    }
}

/// Extracts `(x, y)` from `.../{z}/{x}/{y}.png?key=...`.
fn parse_xy(url: &str) -> (u32, u32) {
    let path = url.split('?').next().unwrap();
    let mut parts = path.rsplit('/');
    let y = parts.next().unwrap().trim_end_matches(".png").parse().unwrap();
    let x = parts.next().unwrap().parse().unwrap();
    (x, y)
}

fn encode(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

impl HttpClient for FakeTileServer {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.urls.lock().unwrap().push(url.to_string());
        let (x, y) = parse_xy(url);
        if self.missing.contains(&(x, y)) {
            return Err(ProviderError::HttpError("HTTP 404 Not Found".to_string()));
        }
        let color = if x % 2 == 0 { FOREST } else { BARE };
        Ok(encode(&RgbImage::from_pixel(TILE_SIZE, TILE_SIZE, color)))
    }
}

fn requested_urls(pipeline: &MosaicPipeline<TemplateProvider<FakeTileServer>>) -> Vec<String> {
    pipeline.provider().http_client().urls.lock().unwrap().clone()
}

fn scenario_bbox() -> GeoBoundingBox {
    GeoBoundingBox::new(45.3696, 25.6933, 45.3893, 25.7630).unwrap()
}

fn pipeline(server: FakeTileServer) -> MosaicPipeline<TemplateProvider<FakeTileServer>> {
    let provider = TemplateProvider::new(
        server,
        "https://tiles.test/sat",
        "png",
        "test-key".to_string(),
    );
    MosaicPipeline::new(provider).with_compositor(MosaicCompositor::new(TILE_SIZE).unwrap())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_scenario_mosaic_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("images").join("area_1.png");

    let report = pipeline(FakeTileServer::new())
        .run(&scenario_bbox(), 15, &output)
        .unwrap();

    assert_eq!(report.present, 24);
    assert_eq!(report.width, 8 * TILE_SIZE);
    assert_eq!(report.height, 3 * TILE_SIZE);

    let mosaic = image::open(&output).unwrap().to_rgb8();
    // x_min = 18722 is even, so the first column is forest.
    assert_eq!(*mosaic.get_pixel(0, 0), FOREST);
    assert_eq!(*mosaic.get_pixel(TILE_SIZE, 0), BARE);
}

#[test]
fn test_requests_follow_url_template_in_row_major_order() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = pipeline(FakeTileServer::new());

    pipeline
        .run(&scenario_bbox(), 15, &temp_dir.path().join("out.png"))
        .unwrap();

    let urls = requested_urls(&pipeline);
    assert_eq!(urls.len(), 24);
    assert_eq!(
        urls[0],
        "https://tiles.test/sat/15/18722/11737.png?key=test-key"
    );
    assert_eq!(
        urls[1],
        "https://tiles.test/sat/15/18723/11737.png?key=test-key"
    );
    assert_eq!(
        urls[23],
        "https://tiles.test/sat/15/18729/11739.png?key=test-key"
    );
}

#[test]
fn test_missing_tile_leaves_black_cell() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("gap.png");

    let report = pipeline(FakeTileServer::new().without(18724, 11738))
        .run(&scenario_bbox(), 15, &output)
        .unwrap();

    assert_eq!(report.absent, 1);
    let mosaic = image::open(&output).unwrap().to_rgb8();
    assert_eq!(
        *mosaic.get_pixel(2 * TILE_SIZE + 3, TILE_SIZE + 3),
        Rgb([0, 0, 0])
    );
}

#[test]
fn test_coverage_of_striped_mosaic_is_half() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("stripes.png");

    pipeline(FakeTileServer::new())
        .run(&scenario_bbox(), 15, &output)
        .unwrap();

    let mosaic = image::open(&output).unwrap().to_rgb8();
    let analysis = analyze(&KMeansSegmenter::default(), &mosaic).unwrap();

    assert!((analysis.report.forest_coverage - 50.0).abs() < 1e-9);
    assert!((analysis.report.deforested_area - 50.0).abs() < 1e-9);
    assert_eq!(analysis.mask.dimensions(), mosaic.dimensions());
}
