//! Core types for grid processing.

use serde::{Deserialize, Serialize};

/// A ranked local maximum of a raster.
///
/// `longitude`/`latitude` are always the center of pixel (`row`, `col`)
/// mapped through the source geotransform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub row: usize,
    pub col: usize,
    pub longitude: f64,
    pub latitude: f64,
    pub value: f64,
    /// 1-based position after sorting by value, highest first.
    pub rank: usize,
}

/// Wire representation of a peak for JSON consumers.
///
/// `tchi_score` is the raw grid value at the peak, unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    pub lat: f64,
    pub lon: f64,
    pub tchi_score: f64,
    pub rank: usize,
}

impl From<&Peak> for HotspotRecord {
    fn from(peak: &Peak) -> Self {
        Self {
            lat: peak.latitude,
            lon: peak.longitude,
            tchi_score: peak.value,
            rank: peak.rank,
        }
    }
}

/// Interpolation method for grid resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Nearest neighbor (preserves exact values).
    Nearest,
    /// Bilinear interpolation over the four surrounding cells.
    #[default]
    Bilinear,
}

/// Parses case-insensitively; unknown names fall back to bilinear.
impl std::str::FromStr for InterpolationMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            _ => Self::Bilinear,
        })
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}
