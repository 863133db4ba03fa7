//! Error types for hotspot detection and tile rendering.

use thiserror::Error;

/// Result type alias using HotspotError.
pub type HotspotResult<T> = Result<T, HotspotError>;

/// Primary error type for core operations.
///
/// Only collaborator failures and configuration errors reach callers.
/// Numeric edge cases (nodata cells, empty candidate sets, degenerate
/// color stops) are resolved locally and never produce an error.
#[derive(Debug, Error)]
pub enum HotspotError {
    /// The raster source could not be read (unreadable, corrupt, missing).
    #[error("Raster source error: {0}")]
    Source(String),

    /// A queried point lies outside the source footprint.
    #[error("Point ({lon}, {lat}) is outside the raster footprint")]
    OutOfBounds { lon: f64, lat: f64 },

    /// The source CRS cannot be related to geographic coordinates.
    #[error("Reprojection failed: {0}")]
    Reprojection(String),

    /// Invalid call parameters.
    #[error("Invalid parameter value for '{param}': {message}")]
    Config { param: String, message: String },
}

impl HotspotError {
    /// Create a Config error.
    pub fn config(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a Source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Get the HTTP status code a serving layer should answer with.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HotspotError::Config { .. } => 400,
            HotspotError::OutOfBounds { .. } => 404,
            HotspotError::Reprojection(_) => 422,
            HotspotError::Source(_) => 502,
        }
    }
}

impl From<std::io::Error> for HotspotError {
    fn from(err: std::io::Error) -> Self {
        HotspotError::Source(err.to_string())
    }
}

impl From<serde_json::Error> for HotspotError {
    fn from(err: serde_json::Error) -> Self {
        HotspotError::config("json", err.to_string())
    }
}
