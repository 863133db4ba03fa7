//! Read-only raster source interface.
//!
//! File formats and handle lifecycles belong to the raster I/O layer. The
//! core only needs a grid, a nodata sentinel, a geotransform and a CRS
//! identifier, and it never opens or closes anything itself.

use crate::bbox::BoundingBox;
use crate::error::{HotspotError, HotspotResult};
use crate::grid::Grid;
use crate::transform::GeoTransform;

/// A single-band raster the core operations can read from.
///
/// Implementations must keep the underlying handle valid for the duration
/// of one call. They are not required to be `Sync`; concurrent callers
/// each acquire their own source.
pub trait RasterSource {
    /// Read the full band as a grid.
    fn read_grid(&self) -> HotspotResult<Grid>;

    /// Nodata sentinel declared by the source, if any.
    fn nodata(&self) -> Option<f64>;

    /// Pixel to CRS transform.
    fn transform(&self) -> GeoTransform;

    /// CRS identifier such as "EPSG:4326".
    fn crs(&self) -> &str;

    /// Grid size as (width, height) without reading cell data.
    fn dimensions(&self) -> (usize, usize);

    /// Envelope of the raster in its own CRS.
    fn bounds(&self) -> BoundingBox {
        let (width, height) = self.dimensions();
        self.transform().footprint(width, height)
    }

    /// Read the band and check it against the declared dimensions.
    ///
    /// A grid whose cell count disagrees with its own size, or whose size
    /// disagrees with [`RasterSource::dimensions`], is a source error.
    fn read_checked_grid(&self) -> HotspotResult<Grid> {
        let grid = self.read_grid()?;
        grid.check()?;

        let (width, height) = self.dimensions();
        if (grid.width, grid.height) != (width, height) {
            return Err(HotspotError::source(format!(
                "source declares {}x{} but read a {}x{} grid",
                width, height, grid.width, grid.height
            )));
        }
        Ok(grid)
    }
}

impl<T: RasterSource + ?Sized> RasterSource for &T {
    fn read_grid(&self) -> HotspotResult<Grid> {
        (**self).read_grid()
    }

    fn nodata(&self) -> Option<f64> {
        (**self).nodata()
    }

    fn transform(&self) -> GeoTransform {
        (**self).transform()
    }

    fn crs(&self) -> &str {
        (**self).crs()
    }

    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn bounds(&self) -> BoundingBox {
        (**self).bounds()
    }
}

/// A raster held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    grid: Grid,
    transform: GeoTransform,
    crs: String,
}

impl MemoryRaster {
    /// Wrap an owned grid. The grid's own `nodata` is reported as the
    /// source nodata.
    pub fn new(grid: Grid, transform: GeoTransform, crs: impl Into<String>) -> Self {
        Self {
            grid,
            transform,
            crs: crs.into(),
        }
    }

    /// Geographic (EPSG:4326) raster spread evenly over `bbox`.
    pub fn geographic(grid: Grid, bbox: &BoundingBox) -> Self {
        let transform = GeoTransform::from_bounds(bbox, grid.width, grid.height);
        Self::new(grid, transform, "EPSG:4326")
    }

    /// Borrow the wrapped grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl RasterSource for MemoryRaster {
    fn read_grid(&self) -> HotspotResult<Grid> {
        Ok(self.grid.clone())
    }

    fn nodata(&self) -> Option<f64> {
        self.grid.nodata
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn crs(&self) -> &str {
        &self.crs
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }
}
