//! Point queries against a raster source.

use hotspot_common::{HotspotError, HotspotResult, RasterSource};
use projection::SourceProjection;
use tracing::debug;

/// Relative tolerance when comparing a sample with the nodata sentinel.
const NODATA_RTOL: f64 = 1e-5;
/// Absolute tolerance when comparing a sample with the nodata sentinel.
const NODATA_ATOL: f64 = 1e-8;

/// Raw value of the cell containing a geographic point.
///
/// Returns `Ok(None)` when the point lies outside the raster or the cell
/// is missing. Sentinels are matched with a small tolerance so float32
/// rasters storing e.g. `-3.4e38` still compare equal.
pub fn sample_point<S>(source: &S, lon: f64, lat: f64) -> HotspotResult<Option<f64>>
where
    S: RasterSource + ?Sized,
{
    if !lon.is_finite() || !lat.is_finite() {
        return Err(HotspotError::config(
            "point",
            format!("coordinates must be finite, got ({}, {})", lon, lat),
        ));
    }

    let (row, col) = match locate_cell(source, lon, lat) {
        Ok(cell) => cell,
        Err(HotspotError::OutOfBounds { lon, lat }) => {
            debug!(lon, lat, "Point outside raster");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let grid = source.read_checked_grid()?;
    let Some(value) = grid.get(row, col) else {
        return Ok(None);
    };

    if value.is_nan() {
        return Ok(None);
    }
    if let Some(nodata) = source.nodata() {
        if is_close(value, nodata) {
            return Ok(None);
        }
    }

    Ok(Some(value))
}

/// Cell `(row, col)` containing a geographic point.
///
/// Fractional pixel coordinates are floored, so a point on a shared edge
/// belongs to the cell to its right or below. Points outside the raster
/// yield `HotspotError::OutOfBounds`.
pub fn locate_cell<S>(source: &S, lon: f64, lat: f64) -> HotspotResult<(usize, usize)>
where
    S: RasterSource + ?Sized,
{
    let projection = SourceProjection::for_crs(source.crs())?;
    let inverse = source.transform().invert()?;
    let (width, height) = source.dimensions();

    let (x, y) = projection
        .forward(lon, lat)
        .ok_or(HotspotError::OutOfBounds { lon, lat })?;
    let (col_f, row_f) = inverse.apply(x, y);
    let (col, row) = (col_f.floor(), row_f.floor());

    if !(col >= 0.0 && row >= 0.0 && col < width as f64 && row < height as f64) {
        return Err(HotspotError::OutOfBounds { lon, lat });
    }

    Ok((row as usize, col as usize))
}

#[inline]
fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= NODATA_ATOL + NODATA_RTOL * b.abs()
}
