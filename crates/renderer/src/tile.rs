//! Map tile rendering.
//!
//! A tile is a fixed-size RGBA image of one geographic window: the source
//! is reprojected onto a square lon/lat grid covering the window and then
//! pushed through a color ramp.

use grid_processor::{reproject, GridProcessorConfig, InterpolationMethod};
use hotspot_common::{BoundingBox, HotspotError, HotspotResult, RasterSource};
use projection::tile_to_bbox;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::gradient::{ColorRamp, RgbaImage};
use crate::png::{encode_png, PngError};

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: usize = 256;

/// Deepest slippy-map zoom level accepted by default.
pub const DEFAULT_MAX_ZOOM: u32 = 18;

/// Zoom levels beyond this overflow 32-bit tile indices.
const ZOOM_LIMIT: u32 = 31;

/// Tile rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileConfig {
    /// Tile width and height in pixels.
    pub tile_size: usize,

    /// Largest zoom accepted by [`render_xyz_tile`].
    pub max_zoom: u32,

    /// Value to color mapping.
    pub ramp: ColorRamp,

    /// Resampling method used when reprojecting the source.
    pub interpolation: InterpolationMethod,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            max_zoom: DEFAULT_MAX_ZOOM,
            ramp: ColorRamp::default(),
            interpolation: InterpolationMethod::Bilinear,
        }
    }
}

impl TileConfig {
    /// Load configuration from environment variables.
    ///
    /// `TILE_COLOR_RAMP` names a JSON stop file; an unreadable or invalid
    /// file is logged and the default ramp kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TILE_SIZE") {
            if let Ok(size) = val.parse() {
                config.tile_size = size;
            }
        }

        if let Ok(val) = std::env::var("TILE_MAX_ZOOM") {
            if let Ok(zoom) = val.parse() {
                config.max_zoom = zoom;
            }
        }

        if let Ok(path) = std::env::var("TILE_COLOR_RAMP") {
            match ColorRamp::from_file(&path) {
                Ok(ramp) => config.ramp = ramp,
                Err(e) => warn!(path = %path, error = %e, "Ignoring color ramp file"),
            }
        }

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            config.interpolation = val.parse().unwrap_or_default();
        }

        config
    }

    /// Set the tile edge length.
    pub fn with_tile_size(mut self, size: usize) -> Self {
        self.tile_size = size;
        self
    }

    /// Set the color ramp.
    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HotspotResult<()> {
        if self.tile_size == 0 {
            return Err(HotspotError::config("tile_size", "must be > 0"));
        }

        if self.max_zoom > ZOOM_LIMIT {
            return Err(HotspotError::config(
                "max_zoom",
                format!("{} exceeds the supported limit {}", self.max_zoom, ZOOM_LIMIT),
            ));
        }

        Ok(())
    }

    fn grid_config(&self) -> GridProcessorConfig {
        GridProcessorConfig::default().with_interpolation(self.interpolation)
    }
}

/// A rendered map tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub width: usize,
    pub height: usize,
    /// Row-major RGBA, 4 bytes per pixel, row 0 along the north edge.
    pub pixels: Vec<u8>,
    pub bbox: BoundingBox,
}

impl Tile {
    /// Fully transparent square tile.
    pub fn blank(size: usize, bbox: BoundingBox) -> Self {
        Self::from_image(RgbaImage::transparent(size, size), bbox)
    }

    fn from_image(image: RgbaImage, bbox: BoundingBox) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
            bbox,
        }
    }

    /// Encode as PNG, indexed when the tile has few enough colors.
    pub fn to_png(&self) -> Result<Vec<u8>, PngError> {
        encode_png(&self.pixels, self.width, self.height)
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }
}

/// Render the geographic window `bbox` of `source` as a tile.
pub fn render_tile<S>(source: &S, bbox: &BoundingBox, config: &TileConfig) -> HotspotResult<Tile>
where
    S: RasterSource + ?Sized,
{
    config.validate()?;

    let size = config.tile_size;
    let resampled = reproject(source, bbox, size, size, &config.grid_config())?;
    let image = config.ramp.colorize(&resampled.grid);

    debug!(
        min_lon = bbox.min_lon,
        min_lat = bbox.min_lat,
        max_lon = bbox.max_lon,
        max_lat = bbox.max_lat,
        size,
        "Rendered tile"
    );

    Ok(Tile::from_image(image, *bbox))
}

/// Render slippy-map tile `z/x/y` of `source`.
///
/// `z` must not exceed `config.max_zoom`, and `x`, `y` must lie in
/// `0..2^z`.
pub fn render_xyz_tile<S>(source: &S, z: u32, x: u32, y: u32, config: &TileConfig) -> HotspotResult<Tile>
where
    S: RasterSource + ?Sized,
{
    config.validate()?;

    if z > config.max_zoom {
        return Err(HotspotError::config(
            "z",
            format!("zoom {} exceeds max_zoom {}", z, config.max_zoom),
        ));
    }

    let n = 1u64 << z;
    if u64::from(x) >= n || u64::from(y) >= n {
        return Err(HotspotError::config(
            "xy",
            format!("tile {}/{}/{} is outside the 0..{} range", z, x, y, n),
        ));
    }

    let bbox = tile_to_bbox(z, x, y);
    render_tile(source, &bbox, config)
}
