//! Coordinate conversions between geographic lon/lat and source CRSs.
//!
//! Implements the projections needed here from scratch without external
//! dependencies.

pub mod mercator;
pub mod tiles;
pub mod transform;

pub use tiles::{coords_to_tile, tile_to_bbox};
pub use transform::{geographic_to_source, source_to_geographic, SourceProjection};
