//! Tile rendering for scalar rasters.
//!
//! - `gradient`: color ramps and grid colorization
//! - `tile`: reprojection plus colorization into fixed-size map tiles
//! - `png`: PNG encoding for rendered tiles

pub mod gradient;
pub mod png;
pub mod tile;

pub use gradient::{ColorRamp, ColorStop, Rgb, RgbaImage, DEFAULT_STOPS};
pub use png::{encode_png, PngError};
pub use tile::{render_tile, render_xyz_tile, Tile, TileConfig, DEFAULT_MAX_ZOOM, DEFAULT_TILE_SIZE};
