//! Common test fixtures for hotspot and tile tests.
//!
//! This module provides pre-defined extents and raster sources that
//! represent common scenarios in hotspot processing.

use hotspot_common::{GeoTransform, Grid, HotspotError, HotspotResult, MemoryRaster, RasterSource};

/// Common bounding box definitions for testing.
pub mod bbox {
    use hotspot_common::BoundingBox;

    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: BoundingBox = BoundingBox {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    /// Southern California Bight, a typical survey extent
    pub const SOCAL: BoundingBox = BoundingBox {
        min_lon: -121.0,
        min_lat: 32.0,
        max_lon: -117.0,
        max_lat: 35.0,
    };

    /// Simple 20 x 20 degree box around the origin
    pub const SIMPLE: BoundingBox = BoundingBox {
        min_lon: -10.0,
        min_lat: -10.0,
        max_lon: 10.0,
        max_lat: 10.0,
    };

    /// Fully disjoint from [`SIMPLE`]
    pub const DISJOINT: BoundingBox = BoundingBox {
        min_lon: 100.0,
        min_lat: 40.0,
        max_lon: 110.0,
        max_lat: 50.0,
    };

    /// Invalid bbox (min > max)
    pub const INVALID: BoundingBox = BoundingBox {
        min_lon: 10.0,
        min_lat: 10.0,
        max_lon: 5.0,
        max_lat: 5.0,
    };
}

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// UTM zone 10N, which the core cannot relate to lon/lat
    pub const EPSG_32610: &str = "EPSG:32610";
}

/// Geographic (EPSG:4326) raster spread evenly over `extent`.
pub fn geographic_raster(grid: Grid, extent: &hotspot_common::BoundingBox) -> MemoryRaster {
    MemoryRaster::geographic(grid, extent)
}

/// Web Mercator raster whose footprint matches the geographic `extent`.
pub fn mercator_raster(grid: Grid, extent: &hotspot_common::BoundingBox) -> MemoryRaster {
    let (min_x, min_y) = projection::mercator::lonlat_to_mercator(extent.min_lon, extent.min_lat);
    let (max_x, max_y) = projection::mercator::lonlat_to_mercator(extent.max_lon, extent.max_lat);
    let projected = hotspot_common::BoundingBox::new(min_x, min_y, max_x, max_y);
    let transform = GeoTransform::from_bounds(&projected, grid.width, grid.height);
    MemoryRaster::new(grid, transform, crs::EPSG_3857)
}

/// A raster whose reads always fail, for error-path tests.
#[derive(Debug, Clone)]
pub struct FailingRaster {
    pub width: usize,
    pub height: usize,
    pub transform: GeoTransform,
    pub crs: String,
}

impl FailingRaster {
    /// Failing geographic raster over `extent`.
    pub fn geographic(width: usize, height: usize, extent: &hotspot_common::BoundingBox) -> Self {
        Self {
            width,
            height,
            transform: GeoTransform::from_bounds(extent, width, height),
            crs: crs::EPSG_4326.to_string(),
        }
    }
}

impl RasterSource for FailingRaster {
    fn read_grid(&self) -> HotspotResult<Grid> {
        Err(HotspotError::source("simulated read failure"))
    }

    fn nodata(&self) -> Option<f64> {
        None
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn crs(&self) -> &str {
        &self.crs
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// A raster that declares one size but reads back a different grid.
#[derive(Debug, Clone)]
pub struct MismatchedRaster {
    pub declared: (usize, usize),
    pub grid: Grid,
    pub transform: GeoTransform,
}

impl MismatchedRaster {
    /// Declares `width x height` but its grid holds only `cells` values.
    pub fn short_data(width: usize, height: usize, cells: usize, extent: &hotspot_common::BoundingBox) -> Self {
        Self {
            declared: (width, height),
            grid: Grid {
                width,
                height,
                data: vec![1.0; cells],
                nodata: None,
            },
            transform: GeoTransform::from_bounds(extent, width, height),
        }
    }

    /// Declares `width x height` but reads a well-formed grid of another size.
    pub fn wrong_size(width: usize, height: usize, grid: Grid, extent: &hotspot_common::BoundingBox) -> Self {
        Self {
            declared: (width, height),
            grid,
            transform: GeoTransform::from_bounds(extent, width, height),
        }
    }
}

impl RasterSource for MismatchedRaster {
    fn read_grid(&self) -> HotspotResult<Grid> {
        Ok(self.grid.clone())
    }

    fn nodata(&self) -> Option<f64> {
        None
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn crs(&self) -> &str {
        crs::EPSG_4326
    }

    fn dimensions(&self) -> (usize, usize) {
        self.declared
    }
}
