//! Color ramp rendering for scalar grids.
//!
//! A ramp is a list of color stops over the normalized range [0, 1].
//! Values between two stops blend linearly; values outside the range clamp
//! to the boundary stops. Missing cells render fully transparent.

use std::path::Path;

use hotspot_common::{Grid, HotspotError, HotspotResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Opaque RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA bytes with full opacity.
    pub fn opaque(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// RGBA bytes for a missing cell.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// A single ramp stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Normalized position in [0, 1].
    pub position: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Stops of the default hotspot ramp: dark navy through green and yellow
/// to red, with the last interval held at red.
pub const DEFAULT_STOPS: [ColorStop; 6] = [
    ColorStop::new(0.0, Rgb::new(10, 25, 47)),
    ColorStop::new(0.2, Rgb::new(20, 50, 94)),
    ColorStop::new(0.4, Rgb::new(46, 204, 113)),
    ColorStop::new(0.6, Rgb::new(241, 196, 15)),
    ColorStop::new(0.8, Rgb::new(231, 76, 60)),
    ColorStop::new(1.0, Rgb::new(231, 76, 60)),
];

/// Piecewise-linear color ramp over [0, 1].
///
/// Stops are non-decreasing in position, start at 0.0 and end at 1.0.
/// Repeated positions are allowed and produce a hard color step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            stops: DEFAULT_STOPS.to_vec(),
        }
    }
}

impl<'de> Deserialize<'de> for ColorRamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stops = Vec::<ColorStop>::deserialize(deserializer)?;
        ColorRamp::new(stops).map_err(serde::de::Error::custom)
    }
}

impl ColorRamp {
    /// Build a ramp, checking the stop invariants.
    pub fn new(stops: Vec<ColorStop>) -> HotspotResult<Self> {
        if stops.len() < 2 {
            return Err(HotspotError::config(
                "color_ramp",
                format!("needs at least 2 stops, got {}", stops.len()),
            ));
        }
        if let Some(bad) = stops.iter().find(|s| !s.position.is_finite()) {
            return Err(HotspotError::config(
                "color_ramp",
                format!("stop position {} is not finite", bad.position),
            ));
        }
        if stops[0].position != 0.0 || stops[stops.len() - 1].position != 1.0 {
            return Err(HotspotError::config(
                "color_ramp",
                format!(
                    "stops must span 0.0 to 1.0, got {} to {}",
                    stops[0].position,
                    stops[stops.len() - 1].position
                ),
            ));
        }
        if stops.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(HotspotError::config("color_ramp", "stop positions must be non-decreasing"));
        }

        Ok(Self { stops })
    }

    /// Load a ramp from a JSON list of `{"position": p, "color": [r, g, b]}`.
    pub fn from_json(json: &str) -> HotspotResult<Self> {
        let stops: Vec<ColorStop> = serde_json::from_str(json)?;
        Self::new(stops)
    }

    /// Load a ramp from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> HotspotResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            HotspotError::config("color_ramp", format!("cannot read {}: {}", path.display(), e))
        })?;
        let ramp = Self::from_json(&json)?;
        debug!(path = %path.display(), stops = ramp.stops.len(), "Loaded color ramp");
        Ok(ramp)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for a value, clamped to [0, 1].
    ///
    /// NaN is treated as 0.0; callers that need transparency for missing
    /// values should check validity first, as [`ColorRamp::colorize`] does.
    pub fn color_at(&self, value: f64) -> Rgb {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        // Rightmost stop at or below v, kept off the last stop so there is
        // always a right neighbour.
        let upper = self.stops.partition_point(|s| s.position <= v);
        let i = upper.saturating_sub(1).min(self.stops.len() - 2);

        let left = &self.stops[i];
        let right = &self.stops[i + 1];
        let span = right.position - left.position;
        let t = if span > 0.0 { (v - left.position) / span } else { 0.0 };

        Rgb::new(
            lerp_channel(left.color.r, right.color.r, t),
            lerp_channel(left.color.g, right.color.g, t),
            lerp_channel(left.color.b, right.color.b, t),
        )
    }

    /// Map every cell of `grid` to RGBA.
    ///
    /// Valid cells get an opaque ramp color; NaN and nodata cells become
    /// `(0, 0, 0, 0)`.
    pub fn colorize(&self, grid: &Grid) -> RgbaImage {
        let mut pixels = Vec::with_capacity(grid.len() * 4);
        for &value in &grid.data {
            if grid.is_valid_value(value) {
                pixels.extend_from_slice(&self.color_at(value).opaque());
            } else {
                pixels.extend_from_slice(&TRANSPARENT);
            }
        }

        RgbaImage {
            width: grid.width,
            height: grid.height,
            pixels,
        }
    }
}

/// Linear blend in f64, truncated to u8.
#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    ((1.0 - t) * a as f64 + t * b as f64) as u8
}

/// Row-major RGBA image, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Fully transparent image.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// RGBA bytes at (row, col), or None if out of range.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 4]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = (row * self.width + col) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Alpha channel of every pixel.
    pub fn alpha(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.chunks_exact(4).map(|p| p[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ramp_endpoints() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(0.0), Rgb::new(10, 25, 47));
        assert_eq!(ramp.color_at(1.0), Rgb::new(231, 76, 60));
        assert_eq!(ramp.color_at(0.4), Rgb::new(46, 204, 113));
    }

    #[test]
    fn test_clamping() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(-3.0), ramp.color_at(0.0));
        assert_eq!(ramp.color_at(7.5), ramp.color_at(1.0));
        assert_eq!(ramp.color_at(f64::INFINITY), ramp.color_at(1.0));
    }

    #[test]
    fn test_midpoint_truncates() {
        // Halfway between (10,25,47) and (20,50,94)
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_at(0.1), Rgb::new(15, 37, 70));
    }

    #[test]
    fn test_hard_step() {
        let ramp = ColorRamp::new(vec![
            ColorStop::new(0.0, Rgb::new(0, 0, 0)),
            ColorStop::new(0.5, Rgb::new(0, 0, 0)),
            ColorStop::new(0.5, Rgb::new(200, 200, 200)),
            ColorStop::new(1.0, Rgb::new(200, 200, 200)),
        ])
        .unwrap();

        assert_eq!(ramp.color_at(0.49), Rgb::new(0, 0, 0));
        assert_eq!(ramp.color_at(0.5), Rgb::new(200, 200, 200));
    }

    #[test]
    fn test_rejects_bad_stops() {
        let black = Rgb::new(0, 0, 0);
        assert!(ColorRamp::new(vec![ColorStop::new(0.0, black)]).is_err());
        assert!(ColorRamp::new(vec![ColorStop::new(0.1, black), ColorStop::new(1.0, black)]).is_err());
        assert!(ColorRamp::new(vec![ColorStop::new(0.0, black), ColorStop::new(0.9, black)]).is_err());
        assert!(ColorRamp::new(vec![
            ColorStop::new(0.0, black),
            ColorStop::new(0.7, black),
            ColorStop::new(0.3, black),
            ColorStop::new(1.0, black),
        ])
        .is_err());
        assert!(ColorRamp::new(vec![
            ColorStop::new(0.0, black),
            ColorStop::new(f64::NAN, black),
            ColorStop::new(1.0, black),
        ])
        .is_err());
    }

    #[test]
    fn test_pixel_accessor() {
        let image = RgbaImage::transparent(2, 1);
        assert_eq!(image.pixel(0, 1), Some(TRANSPARENT));
        assert_eq!(image.pixel(1, 0), None);
    }
}
