//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::HotspotError;

/// CRS codes a raster source may declare.
///
/// Only CRSs that can be related to geographic lon/lat are listed;
/// anything else fails to parse and surfaces as a reprojection error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// NAD83 Geographic, treated as WGS84 at tile resolution
    Epsg4269,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS identifier as reported by a raster source.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326" / "epsg:4326" / "4326"
    /// - "CRS:84" / "OGC:CRS84" (WGS84 with lon/lat axis order)
    /// - "EPSG:900913" (legacy Web Mercator alias)
    pub fn from_identifier(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "4326" | "CRS:84" | "OGC:CRS84" | "WGS84" => Ok(CrsCode::Epsg4326),
            "EPSG:4269" | "4269" => Ok(CrsCode::Epsg4269),
            "EPSG:3857" | "3857" | "EPSG:900913" => Ok(CrsCode::Epsg3857),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Check if this is a geographic (lon/lat) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg4269)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg4269 => "EPSG:4269",
            CrsCode::Epsg3857 => "EPSG:3857",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}

impl From<CrsParseError> for HotspotError {
    fn from(err: CrsParseError) -> Self {
        HotspotError::Reprojection(err.to_string())
    }
}
