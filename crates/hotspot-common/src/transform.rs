//! Affine geotransforms between pixel and CRS coordinates.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{HotspotError, HotspotResult};

/// Six-coefficient affine transform in GDAL order.
///
/// Maps pixel-corner coordinates (column, row) to CRS coordinates:
///
/// ```text
/// x = origin_x + col * pixel_width     + row * row_rotation
/// y = origin_y + col * column_rotation + row * pixel_height
/// ```
///
/// Pixel `(col, row)` covers `[col, col + 1) x [row, row + 1)`; its center
/// sits at `(col + 0.5, row + 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub column_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Create a transform from GDAL-ordered coefficients.
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            column_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// GDAL-ordered coefficients.
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.column_rotation,
            self.pixel_height,
        ]
    }

    /// North-up transform spreading a `width x height` grid evenly over `bbox`.
    ///
    /// Row 0 lies along `max_lat`; rows advance southwards.
    pub fn from_bounds(bbox: &BoundingBox, width: usize, height: usize) -> Self {
        Self {
            origin_x: bbox.min_lon,
            pixel_width: bbox.width() / width as f64,
            row_rotation: 0.0,
            origin_y: bbox.max_lat,
            column_rotation: 0.0,
            pixel_height: -bbox.height() / height as f64,
        }
    }

    /// Map fractional pixel-corner coordinates to CRS coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.pixel_width + row * self.row_rotation,
            self.origin_y + col * self.column_rotation + row * self.pixel_height,
        )
    }

    /// CRS coordinates of the center of pixel `(row, col)`.
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Inverse transform, mapping CRS coordinates back to (col, row).
    ///
    /// The returned transform's `apply(x, y)` yields fractional pixel
    /// coordinates. A singular transform means the source metadata is
    /// unusable and is reported as a source error.
    pub fn invert(&self) -> HotspotResult<GeoTransform> {
        let forward = Matrix3::new(
            self.pixel_width,
            self.row_rotation,
            self.origin_x,
            self.column_rotation,
            self.pixel_height,
            self.origin_y,
            0.0,
            0.0,
            1.0,
        );

        let inverse = forward
            .try_inverse()
            .filter(|m| m.iter().all(|v| v.is_finite()))
            .ok_or_else(|| {
                HotspotError::source(format!("geotransform {:?} is not invertible", self.to_gdal()))
            })?;

        Ok(GeoTransform {
            origin_x: inverse[(0, 2)],
            pixel_width: inverse[(0, 0)],
            row_rotation: inverse[(0, 1)],
            origin_y: inverse[(1, 2)],
            column_rotation: inverse[(1, 0)],
            pixel_height: inverse[(1, 1)],
        })
    }

    /// Envelope of a `width x height` grid in CRS coordinates.
    pub fn footprint(&self, width: usize, height: usize) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];
        BoundingBox::enclosing(&corners).unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_maps_corners() {
        let bbox = BoundingBox::new(-10.0, 20.0, 10.0, 40.0);
        let transform = GeoTransform::from_bounds(&bbox, 200, 100);

        assert_eq!(transform.apply(0.0, 0.0), (-10.0, 40.0));
        let (x, y) = transform.apply(200.0, 100.0);
        assert!((x - 10.0).abs() < 1e-12);
        assert!((y - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_center() {
        let transform = GeoTransform::from_gdal([100.0, 1.0, 0.0, 50.0, 0.0, -1.0]);
        assert_eq!(transform.pixel_center(0, 0), (100.5, 49.5));
        assert_eq!(transform.pixel_center(2, 3), (103.5, 47.5));
    }

    #[test]
    fn test_invert_roundtrip() {
        let transform = GeoTransform::from_gdal([-120.0, 0.25, 0.01, 45.0, -0.02, -0.25]);
        let inverse = transform.invert().unwrap();

        for (col, row) in [(0.0, 0.0), (10.5, 3.25), (99.0, 42.0)] {
            let (x, y) = transform.apply(col, row);
            let (c, r) = inverse.apply(x, y);
            assert!((c - col).abs() < 1e-9, "col roundtrip: {} vs {}", col, c);
            assert!((r - row).abs() < 1e-9, "row roundtrip: {} vs {}", row, r);
        }
    }

    #[test]
    fn test_singular_transform_is_source_error() {
        let transform = GeoTransform::from_gdal([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(transform.invert(), Err(HotspotError::Source(_))));
    }

    #[test]
    fn test_footprint() {
        let transform = GeoTransform::from_gdal([0.0, 0.5, 0.0, 10.0, 0.0, -0.5]);
        assert_eq!(transform.footprint(4, 8), BoundingBox::new(0.0, 6.0, 2.0, 10.0));
    }
}
