//! Point conversion between geographic lon/lat and a raster's native CRS.

use hotspot_common::{CrsCode, HotspotError, HotspotResult};
use tracing::debug;

use crate::mercator::{lonlat_to_mercator, mercator_to_lonlat, MAX_LATITUDE};

/// How points move between geographic coordinates and a source CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceProjection {
    /// Source is already lon/lat; conversion is the identity.
    Geographic,
    /// Source is spherical Web Mercator.
    WebMercator,
}

impl SourceProjection {
    /// Resolve the projection for a source CRS identifier.
    ///
    /// Fails with a reprojection error when the CRS cannot be related to
    /// geographic coordinates.
    pub fn for_crs(identifier: &str) -> HotspotResult<Self> {
        let code = CrsCode::from_identifier(identifier)?;
        let projection = Self::from(code);
        debug!(crs = %code, ?projection, "Resolved source projection");
        Ok(projection)
    }

    /// Geographic (lon, lat) to source (x, y).
    ///
    /// Returns `None` for points the source CRS cannot represent, such as
    /// latitudes beyond the Web Mercator limit.
    #[inline]
    pub fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self {
            SourceProjection::Geographic => Some((lon, lat)),
            SourceProjection::WebMercator => {
                (lat.abs() <= MAX_LATITUDE).then(|| lonlat_to_mercator(lon, lat))
            }
        }
    }

    /// Source (x, y) to geographic (lon, lat).
    #[inline]
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            SourceProjection::Geographic => (x, y),
            SourceProjection::WebMercator => mercator_to_lonlat(x, y),
        }
    }
}

impl From<CrsCode> for SourceProjection {
    fn from(code: CrsCode) -> Self {
        if code.is_geographic() {
            SourceProjection::Geographic
        } else {
            SourceProjection::WebMercator
        }
    }
}

/// Convert a geographic point into the CRS named by `crs`.
///
/// A point outside the CRS's valid area is `HotspotError::OutOfBounds`.
pub fn geographic_to_source(crs: &str, lon: f64, lat: f64) -> HotspotResult<(f64, f64)> {
    SourceProjection::for_crs(crs)?
        .forward(lon, lat)
        .ok_or(HotspotError::OutOfBounds { lon, lat })
}

/// Convert a point in the CRS named by `crs` into geographic lon/lat.
pub fn source_to_geographic(crs: &str, x: f64, y: f64) -> HotspotResult<(f64, f64)> {
    Ok(SourceProjection::for_crs(crs)?.inverse(x, y))
}
