//! Configuration for the grid processor.

use hotspot_common::{HotspotError, HotspotResult};
use serde::{Deserialize, Serialize};

use crate::types::InterpolationMethod;

/// Side length of the peak-detection window, in grid cells.
pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 15;

/// Nodata sentinel assumed when a source declares none.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// Number of hotspots returned when a request does not say.
pub const DEFAULT_TOP_N: usize = 10;

/// Upper bound on hotspots per request.
pub const MAX_TOP_N: usize = 50;

/// Configuration for peak detection, reprojection and point queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridProcessorConfig {
    /// Window side length for the local-maximum filter (grid cells).
    pub neighborhood_size: usize,

    /// Nodata sentinel used when the source does not declare one.
    pub default_nodata: f64,

    /// Hotspot count used for requests that omit one.
    pub default_top_n: usize,

    /// Largest hotspot count a request may ask for.
    pub max_top_n: usize,

    /// Interpolation method for reprojection.
    pub interpolation: InterpolationMethod,
}

impl Default for GridProcessorConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: DEFAULT_NEIGHBORHOOD_SIZE,
            default_nodata: DEFAULT_NODATA,
            default_top_n: DEFAULT_TOP_N,
            max_top_n: MAX_TOP_N,
            interpolation: InterpolationMethod::Bilinear,
        }
    }
}

impl GridProcessorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("HOTSPOT_NEIGHBORHOOD_SIZE") {
            if let Ok(size) = val.parse() {
                config.neighborhood_size = size;
            }
        }

        if let Ok(val) = std::env::var("HOTSPOT_DEFAULT_NODATA") {
            if let Ok(nodata) = val.parse() {
                config.default_nodata = nodata;
            }
        }

        if let Ok(val) = std::env::var("HOTSPOT_DEFAULT_COUNT") {
            if let Ok(count) = val.parse() {
                config.default_top_n = count;
            }
        }

        if let Ok(val) = std::env::var("HOTSPOT_MAX_COUNT") {
            if let Ok(count) = val.parse() {
                config.max_top_n = count;
            }
        }

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            config.interpolation = val.parse().unwrap_or_default();
        }

        config
    }

    /// Set the peak-detection window size.
    pub fn with_neighborhood_size(mut self, size: usize) -> Self {
        self.neighborhood_size = size;
        self
    }

    /// Set the fallback nodata sentinel.
    pub fn with_default_nodata(mut self, nodata: f64) -> Self {
        self.default_nodata = nodata;
        self
    }

    /// Set the reprojection interpolation method.
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HotspotResult<()> {
        if self.neighborhood_size == 0 {
            return Err(HotspotError::config("neighborhood_size", "must be > 0"));
        }

        if self.default_top_n == 0 || self.max_top_n == 0 {
            return Err(HotspotError::config("top_n", "default and max counts must be > 0"));
        }

        if self.default_top_n > self.max_top_n {
            return Err(HotspotError::config(
                "default_top_n",
                format!("{} exceeds max_top_n {}", self.default_top_n, self.max_top_n),
            ));
        }

        Ok(())
    }

    /// Turn a raw request count into the number of hotspots to find.
    ///
    /// Missing or non-positive counts fall back to the default; larger
    /// counts are capped at `max_top_n`.
    pub fn resolve_count(&self, requested: Option<i64>) -> usize {
        match requested {
            Some(count) if count > 0 => (count as u64).min(self.max_top_n as u64) as usize,
            _ => self.default_top_n,
        }
    }
}
