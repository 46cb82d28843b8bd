use image::Rgb;

use super::*;
use crate::coord::{TileCoord, TileRange};
use crate::grid::{FetchedTile, GridAcquirer, NoProgress, TileCell, TileGrid};
use crate::provider::ProviderError;
use crate::testing::{solid_png, tile_color, MockTileProvider};

const SIZE: u32 = 8;

fn grid_from(provider: MockTileProvider, range: TileRange) -> TileGrid {
    GridAcquirer::new(provider)
        .acquire_range(&range, &mut NoProgress)
        .unwrap()
}

/// Checks that the whole `(row, col)` cell of the mosaic is `color`.
fn assert_cell_color(result: &StitchResult, row: u32, col: u32, color: Rgb<u8>) {
    for dy in 0..SIZE {
        for dx in 0..SIZE {
            let pixel = result.mosaic.get_pixel(col * SIZE + dx, row * SIZE + dy);
            assert_eq!(
                *pixel, color,
                "cell ({}, {}) pixel ({}, {}) has wrong colour",
                row, col, dx, dy
            );
        }
    }
}

fn coord(x: u32, y: u32) -> TileCoord {
    TileCoord { zoom: 10, x, y }
}

#[test]
fn test_full_grid_dimensions_and_placement() {
    let range = TileRange::new(10, 100, 102, 200, 201).unwrap();
    let grid = grid_from(MockTileProvider::new(SIZE), range);

    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    assert_eq!(result.mosaic.width(), 3 * SIZE);
    assert_eq!(result.mosaic.height(), 2 * SIZE);
    assert_eq!(result.placed, 6);
    assert!(result.warnings.is_empty());

    for row in 0..2 {
        for col in 0..3 {
            let expected = tile_color(&coord(100 + col, 200 + row));
            assert_cell_color(&result, row, col, expected);
        }
    }
}

#[test]
fn test_missing_center_tile_keeps_full_canvas() {
    let range = TileRange::new(10, 100, 102, 200, 202).unwrap();
    let provider = MockTileProvider::new(SIZE).failing_at(101, 201);
    let grid = grid_from(provider, range);

    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    assert_eq!(result.mosaic.dimensions(), (3 * SIZE, 3 * SIZE));
    assert_eq!(result.placed, 8);
    assert!(result.warnings.is_empty());

    for row in 0..3 {
        for col in 0..3 {
            let expected = if (row, col) == (1, 1) {
                DEFAULT_FILL
            } else {
                tile_color(&coord(100 + col, 200 + row))
            };
            assert_cell_color(&result, row, col, expected);
        }
    }
}

#[test]
fn test_undersized_tile_is_reported_and_pasted_at_offset() {
    let range = TileRange::new(10, 100, 101, 200, 200).unwrap();
    let red = Rgb([255, 0, 0]);
    let cells = vec![
        TileCell::Present(FetchedTile {
            coord: coord(100, 200),
            bytes: solid_png(SIZE, SIZE, tile_color(&coord(100, 200))),
        }),
        TileCell::Present(FetchedTile {
            coord: coord(101, 200),
            bytes: solid_png(SIZE / 2, SIZE / 2, red),
        }),
    ];
    let grid = TileGrid::from_cells(range, cells).unwrap();

    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    assert_eq!(result.placed, 2);
    assert_eq!(
        result.warnings,
        vec![PlacementWarning::SizeMismatch {
            row: 0,
            col: 1,
            coord: coord(101, 200),
            expected: SIZE,
            width: SIZE / 2,
            height: SIZE / 2,
        }]
    );
    assert_eq!(*result.mosaic.get_pixel(SIZE, 0), red);
    assert_eq!(*result.mosaic.get_pixel(SIZE + SIZE / 2 - 1, SIZE / 2 - 1), red);
    assert_eq!(*result.mosaic.get_pixel(2 * SIZE - 1, SIZE - 1), DEFAULT_FILL);
}

#[test]
fn test_oversized_tile_does_not_bleed_into_neighbours() {
    let range = TileRange::new(10, 100, 101, 200, 201).unwrap();
    let blue = Rgb([0, 0, 255]);
    let mut cells = Vec::new();
    for position in range.iter() {
        let bytes = if (position.row, position.col) == (0, 0) {
            solid_png(SIZE * 2, SIZE * 2, blue)
        } else {
            solid_png(SIZE, SIZE, tile_color(&position.coord))
        };
        cells.push(TileCell::Present(FetchedTile {
            coord: position.coord,
            bytes,
        }));
    }
    let grid = TileGrid::from_cells(range, cells).unwrap();

    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        PlacementWarning::SizeMismatch { row: 0, col: 0, .. }
    ));
    assert_cell_color(&result, 0, 0, blue);
    assert_cell_color(&result, 0, 1, tile_color(&coord(101, 200)));
    assert_cell_color(&result, 1, 0, tile_color(&coord(100, 201)));
    assert_cell_color(&result, 1, 1, tile_color(&coord(101, 201)));
}

#[test]
fn test_undecodable_tile_is_reported_and_left_empty() {
    let range = TileRange::new(10, 100, 101, 200, 200).unwrap();
    let cells = vec![
        TileCell::Present(FetchedTile {
            coord: coord(100, 200),
            bytes: b"<html>quota exceeded</html>".to_vec(),
        }),
        TileCell::Absent {
            coord: coord(101, 200),
            reason: ProviderError::HttpError("HTTP 500".to_string()),
        },
    ];
    let grid = TileGrid::from_cells(range, cells).unwrap();

    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    assert_eq!(result.placed, 0);
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        PlacementWarning::DecodeFailed { row: 0, col: 0, .. }
    ));
    assert_eq!(result.warnings[0].position(), (0, 0));
    assert_cell_color(&result, 0, 0, DEFAULT_FILL);
    assert_cell_color(&result, 0, 1, DEFAULT_FILL);
}

#[test]
fn test_restitching_is_byte_identical() {
    let range = TileRange::new(10, 100, 102, 200, 202).unwrap();
    let provider = MockTileProvider::new(SIZE).failing_at(102, 200);
    let grid = grid_from(provider, range);
    let compositor = MosaicCompositor::new(SIZE).unwrap();

    let first = encode_png(&compositor.stitch(&grid).unwrap().mosaic).unwrap();
    let second = encode_png(&compositor.stitch(&grid).unwrap().mosaic).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_zero_tile_size_is_rejected() {
    assert!(matches!(
        MosaicCompositor::new(0),
        Err(MosaicError::InvalidTileSize(0))
    ));
}

#[test]
fn test_default_tile_size() {
    assert_eq!(MosaicCompositor::default().tile_size(), 256);
}

#[test]
fn test_save_mosaic_creates_directories() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("images").join("area_1.png");
    let mosaic = image::RgbImage::from_pixel(16, 8, Rgb([1, 2, 3]));

    save_mosaic(&mosaic, &path).unwrap();

    let loaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(loaded, mosaic);
}

#[test]
fn test_save_mosaic_without_extension_writes_png() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("mosaic");
    let mosaic = image::RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));

    save_mosaic(&mosaic, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_save_mosaic_refuses_jpeg_output() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let range = TileRange::new(10, 100, 102, 200, 202).unwrap();
    let grid = grid_from(MockTileProvider::new(SIZE), range);
    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    for name in ["area_1.jpg", "area_1.JPEG"] {
        let path = temp_dir.path().join("images").join(name);
        let saved = save_mosaic(&result.mosaic, &path);

        assert!(
            matches!(
                saved,
                Err(MosaicError::LossyFormat { format: image::ImageFormat::Jpeg, .. })
            ),
            "{} was not refused",
            name
        );
        assert!(!path.exists());
    }
    assert!(!temp_dir.path().join("images").exists());
}

#[test]
fn test_save_mosaic_lossless_extensions_keep_every_pixel() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let range = TileRange::new(10, 100, 102, 200, 202).unwrap();
    let grid = grid_from(MockTileProvider::new(SIZE), range);
    let result = MosaicCompositor::new(SIZE).unwrap().stitch(&grid).unwrap();

    for name in ["area_1.bmp", "area_1.tiff", "area_1.tga"] {
        let path = temp_dir.path().join(name);
        save_mosaic(&result.mosaic, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded, result.mosaic, "{} altered pixels", name);
    }
}

#[test]
fn test_save_mosaic_reports_write_failure() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();
    let mosaic = image::RgbImage::new(4, 4);

    let result = save_mosaic(&mosaic, &blocker.join("out.png"));

    assert!(matches!(result, Err(MosaicError::CreateDir { .. })));
}

#[test]
fn test_save_image_writes_grayscale_mask() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("masks").join("mask.png");
    let mask = image::GrayImage::from_fn(4, 2, |x, _| image::Luma([if x < 2 { 255 } else { 0 }]));

    save_image(&mask, &path).unwrap();

    let loaded = image::open(&path).unwrap().to_luma8();
    assert_eq!(loaded, mask);
}
