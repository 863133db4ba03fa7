//! Scalar grids and their geographic georeferencing.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::crs::CrsCode;
use crate::error::{HotspotError, HotspotResult};
use crate::transform::GeoTransform;

/// A regular 2D grid of scalar samples in row-major order.
///
/// A cell is invalid when it is NaN or equals the `nodata` sentinel.
/// Invalid cells never take part in comparisons or interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
    pub nodata: Option<f64>,
}

impl Grid {
    /// Create a grid, checking that `data` matches the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<f64>, nodata: Option<f64>) -> HotspotResult<Self> {
        if data.len() != width * height {
            return Err(HotspotError::source(format!(
                "grid data has {} cells, expected {}x{} = {}",
                data.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            nodata,
        })
    }

    /// Check that `data` holds exactly `width * height` cells.
    ///
    /// Fields are public, so a grid built by hand or returned by a raster
    /// reader may not satisfy the invariant `Grid::new` enforces.
    pub fn check(&self) -> HotspotResult<()> {
        let expected = self.width.checked_mul(self.height).ok_or_else(|| {
            HotspotError::source(format!("grid size {}x{} overflows", self.width, self.height))
        })?;
        if self.data.len() != expected {
            return Err(HotspotError::source(format!(
                "grid data has {} cells, expected {}x{} = {}",
                self.data.len(),
                self.width,
                self.height,
                expected
            )));
        }
        Ok(())
    }

    /// Grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
            nodata: None,
        }
    }

    /// Grid with every cell missing (NaN).
    pub fn nan(width: usize, height: usize) -> Self {
        Self::filled(width, height, f64::NAN)
    }

    /// Return a copy that treats `nodata` as the missing sentinel.
    pub fn with_nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    /// Value at (row, col), or None if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Whether a raw value counts as a real sample for this grid.
    #[inline]
    pub fn is_valid_value(&self, value: f64) -> bool {
        !value.is_nan() && self.nodata != Some(value)
    }

    /// Valid value at (row, col), or None for missing and out-of-range cells.
    pub fn valid_at(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col).filter(|&v| self.is_valid_value(v))
    }

    /// Number of valid cells.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| self.is_valid_value(v)).count()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A grid georeferenced in a known CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    pub grid: Grid,
    pub transform: GeoTransform,
    pub crs: CrsCode,
}

impl GeoGrid {
    /// Envelope of the grid in CRS coordinates.
    pub fn bounds(&self) -> BoundingBox {
        self.transform.footprint(self.grid.width, self.grid.height)
    }
}
