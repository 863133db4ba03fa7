//! Common types shared by the hotspot detection and tile rendering crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod source;
pub mod transform;

pub use bbox::{BboxParseError, BoundingBox};
pub use crs::{CrsCode, CrsParseError};
pub use error::{HotspotError, HotspotResult};
pub use grid::{GeoGrid, Grid};
pub use source::{MemoryRaster, RasterSource};
pub use transform::GeoTransform;
