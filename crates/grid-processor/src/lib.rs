//! Hotspot detection and geographic resampling over scalar rasters.
//!
//! This crate provides the numeric core behind hotspot listings and map
//! tiles:
//!
//! - **Peak detection**: local maxima under a square window, ranked and
//!   trimmed to the requested count
//! - **Reprojection**: resample any raster source onto a regular lon/lat
//!   grid with bilinear or nearest interpolation
//! - **Point queries**: the raw value under a lon/lat
//!
//! # Architecture
//!
//! ```text
//! RasterSource
//!      │
//!      ├─► find_peaks(top_n)
//!      │        │
//!      │        ├─► maximum_filter (separable, monotonic deque)
//!      │        └─► select top_n ─► Vec<Peak>
//!      │
//!      ├─► reproject(bbox, width, height)
//!      │        │
//!      │        └─► lon/lat ─► source CRS ─► pixel ─► interpolate
//!      │                 │
//!      │                 ▼
//!      │             GeoGrid (NaN = missing) ─► renderer
//!      │
//!      └─► sample_point(lon, lat) ─► Option<f64>
//! ```
//!
//! # Example
//!
//! ```
//! use hotspot_common::{BoundingBox, Grid, MemoryRaster};
//! use grid_processor::{find_peaks, GridProcessorConfig};
//!
//! let mut grid = Grid::filled(10, 10, 5.0).with_nodata(Some(-9999.0));
//! grid.data[5 * 10 + 5] = 100.0;
//! let source = MemoryRaster::geographic(grid, &BoundingBox::new(0.0, 0.0, 10.0, 10.0));
//!
//! let config = GridProcessorConfig::default().with_neighborhood_size(3);
//! let peaks = find_peaks(&source, 1, &config).unwrap();
//! assert_eq!((peaks[0].row, peaks[0].col), (5, 5));
//! ```

pub mod config;
pub mod peaks;
pub mod projection;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{
    GridProcessorConfig, DEFAULT_NEIGHBORHOOD_SIZE, DEFAULT_NODATA, DEFAULT_TOP_N, MAX_TOP_N,
};
pub use peaks::{detect_peaks, find_peaks, maximum_filter};
pub use projection::{bilinear_interpolate, interpolate, nearest_interpolate, reproject};
pub use query::{locate_cell, sample_point};
pub use types::{HotspotRecord, InterpolationMethod, Peak};
