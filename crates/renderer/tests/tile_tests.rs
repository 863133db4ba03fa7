//! Tests for tile rendering.

use hotspot_common::{BoundingBox, Grid, HotspotError, RasterSource};
use renderer::gradient::ColorRamp;
use renderer::tile::{render_tile, render_xyz_tile, Tile, TileConfig};
use test_utils::fixtures::{bbox, geographic_raster, FailingRaster};
use test_utils::{create_constant_grid, create_hotspot_field, create_single_peak_grid, init_tracing};

// ============================================================================
// render_tile
// ============================================================================

#[test]
fn test_own_bounds_fully_opaque() {
    init_tracing();
    let source = geographic_raster(create_hotspot_field(300, 200, 10, 11), &bbox::SOCAL);

    let tile = render_tile(&source, &source.bounds(), &TileConfig::default()).unwrap();

    assert_eq!((tile.width, tile.height), (256, 256));
    assert_eq!(tile.pixels.len(), 256 * 256 * 4);
    assert!(tile.pixels.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn test_disjoint_window_is_blank() {
    let source = geographic_raster(create_constant_grid(10, 10, 0.5), &bbox::SIMPLE);

    let tile = render_tile(&source, &bbox::DISJOINT, &TileConfig::default()).unwrap();

    assert!(tile.is_blank());
    assert_eq!(tile, Tile::blank(256, bbox::DISJOINT));
}

#[test]
fn test_constant_source_single_color() {
    let source = geographic_raster(create_constant_grid(10, 10, 0.9), &bbox::SIMPLE);
    let config = TileConfig::default().with_tile_size(32);

    let tile = render_tile(&source, &bbox::SIMPLE, &config).unwrap();

    for pixel in tile.pixels.chunks_exact(4) {
        assert_eq!(pixel, [231, 76, 60, 255]);
    }
}

#[test]
fn test_tile_carries_bbox() {
    let source = geographic_raster(create_constant_grid(4, 4, 0.0), &bbox::SIMPLE);
    let window = BoundingBox::new(-5.0, -5.0, 5.0, 5.0);

    let tile = render_tile(&source, &window, &TileConfig::default().with_tile_size(8)).unwrap();
    assert_eq!(tile.bbox, window);
}

#[test]
fn test_nodata_renders_transparent() {
    // One missing cell in the middle of a 4x4 source
    let mut grid = create_constant_grid(4, 4, 0.9);
    grid.data[5] = -9999.0;
    let extent = BoundingBox::new(0.0, 0.0, 4.0, 4.0);
    let source = geographic_raster(grid, &extent);

    let tile = render_tile(&source, &extent, &TileConfig::default().with_tile_size(4)).unwrap();

    // Output pixels line up with source cells one-to-one
    let alpha: Vec<u8> = tile.pixels.chunks_exact(4).map(|p| p[3]).collect();
    assert_eq!(alpha[5], 0);
    assert_eq!(alpha.iter().filter(|&&a| a == 0).count(), 1);
}

#[test]
fn test_custom_ramp() {
    let ramp = ColorRamp::from_json(
        r#"[{"position": 0.0, "color": [0, 0, 0]}, {"position": 1.0, "color": [255, 255, 255]}]"#,
    )
    .unwrap();
    let source = geographic_raster(create_constant_grid(2, 2, 1.0), &bbox::SIMPLE);

    let tile = render_tile(&source, &bbox::SIMPLE, &TileConfig::default().with_tile_size(2).with_ramp(ramp)).unwrap();
    assert!(tile.pixels.iter().all(|&b| b == 255));
}

// ============================================================================
// render_xyz_tile
// ============================================================================

#[test]
fn test_xyz_world_tile() {
    let source = geographic_raster(create_single_peak_grid(36, 18, 0.1, (9, 18), 1.0), &bbox::GLOBAL);

    let tile = render_xyz_tile(&source, 0, 0, 0, &TileConfig::default().with_tile_size(64)).unwrap();

    assert!((tile.bbox.min_lon + 180.0).abs() < 1e-9);
    assert!((tile.bbox.max_lat - 85.0511).abs() < 1e-3);
    assert!(!tile.is_blank());
}

#[test]
fn test_xyz_rejects_bad_addresses() {
    let source = geographic_raster(create_constant_grid(4, 4, 0.5), &bbox::SIMPLE);
    let config = TileConfig::default();

    for (z, x, y) in [(19, 0, 0), (2, 4, 0), (2, 0, 4), (0, 1, 0)] {
        let err = render_xyz_tile(&source, z, x, y, &config).unwrap_err();
        assert!(matches!(err, HotspotError::Config { .. }), "{}/{}/{}", z, x, y);
        assert_eq!(err.http_status_code(), 400);
    }
}

#[test]
fn test_xyz_max_zoom_accepted() {
    let source = geographic_raster(create_constant_grid(4, 4, 0.5), &bbox::SIMPLE);
    let config = TileConfig::default().with_tile_size(4);

    let last = (1u32 << 18) - 1;
    assert!(render_xyz_tile(&source, 18, last, last, &config).is_ok());
}

// ============================================================================
// Errors and PNG output
// ============================================================================

#[test]
fn test_errors_propagate() {
    let failing = FailingRaster::geographic(4, 4, &bbox::SIMPLE);
    assert!(matches!(
        render_tile(&failing, &bbox::SIMPLE, &TileConfig::default()),
        Err(HotspotError::Source(_))
    ));

    let source = geographic_raster(Grid::filled(2, 2, 0.5), &bbox::SIMPLE);
    assert!(matches!(
        render_tile(&source, &bbox::INVALID, &TileConfig::default()),
        Err(HotspotError::Config { .. })
    ));
    assert!(matches!(
        render_tile(&source, &bbox::SIMPLE, &TileConfig::default().with_tile_size(0)),
        Err(HotspotError::Config { .. })
    ));
}

#[test]
fn test_tile_to_png() {
    let source = geographic_raster(create_hotspot_field(64, 64, 4, 5), &bbox::SIMPLE);
    let tile = render_tile(&source, &bbox::SIMPLE, &TileConfig::default()).unwrap();

    let png = tile.to_png().unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let blank = Tile::blank(256, bbox::SIMPLE).to_png().unwrap();
    assert!(blank.len() < png.len());
}
