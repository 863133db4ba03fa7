//! Reprojection of raster sources onto regular geographic grids.
//!
//! Each destination cell centre is carried from lon/lat into the source CRS,
//! through the inverted source geotransform into fractional pixel
//! coordinates, and sampled there. Cells that fall outside the source
//! footprint, that the source CRS cannot represent, or whose sample
//! touches a missing cell, come out as NaN.

use hotspot_common::{
    BoundingBox, CrsCode, GeoGrid, GeoTransform, Grid, HotspotError, HotspotResult, RasterSource,
};
use projection::SourceProjection;
use tracing::debug;

use super::interpolation::interpolate;
use crate::config::GridProcessorConfig;

/// Distance to a lattice line below which a position snaps onto it.
const LATTICE_SNAP: f64 = 1e-9;

/// Reproject `source` onto an `out_width x out_height` EPSG:4326 grid
/// covering `bbox`.
///
/// The result uses NaN as its only missing-value marker and carries no
/// nodata sentinel. A source CRS that cannot be related to lon/lat fails
/// with a reprojection error; a failed read fails with a source error.
///
/// # Example
/// ```
/// use hotspot_common::{BoundingBox, Grid, MemoryRaster};
/// use grid_processor::{reproject, GridProcessorConfig};
///
/// let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
/// let source = MemoryRaster::geographic(Grid::filled(4, 4, 2.5), &bbox);
///
/// let out = reproject(&source, &bbox, 8, 8, &GridProcessorConfig::default()).unwrap();
/// assert_eq!(out.grid.width, 8);
/// assert!(out.grid.data.iter().all(|&v| (v - 2.5).abs() < 1e-12));
/// ```
pub fn reproject<S>(
    source: &S,
    bbox: &BoundingBox,
    out_width: usize,
    out_height: usize,
    config: &GridProcessorConfig,
) -> HotspotResult<GeoGrid>
where
    S: RasterSource + ?Sized,
{
    bbox.validate()?;
    if out_width == 0 || out_height == 0 {
        return Err(HotspotError::config(
            "size",
            format!("output must be at least 1x1, got {}x{}", out_width, out_height),
        ));
    }

    let projection = SourceProjection::for_crs(source.crs())?;
    let inverse = source.transform().invert()?;

    let nodata = source.nodata();
    let grid = source.read_checked_grid()?.with_nodata(nodata);

    let dst_transform = GeoTransform::from_bounds(bbox, out_width, out_height);
    let mut data = vec![f64::NAN; out_width * out_height];

    for row in 0..out_height {
        for col in 0..out_width {
            let (lon, lat) = dst_transform.pixel_center(row, col);
            let Some((x, y)) = projection.forward(lon, lat) else {
                continue;
            };
            let (col_f, row_f) = inverse.apply(x, y);

            if let Some((lx, ly)) = lattice_position(&grid, col_f, row_f) {
                if let Some(value) = interpolate(&grid, config.interpolation, lx, ly) {
                    data[row * out_width + col] = value;
                }
            }
        }
    }

    let valid = data.iter().filter(|v| !v.is_nan()).count();
    debug!(
        out_width,
        out_height,
        valid,
        method = %config.interpolation,
        "Reprojected grid"
    );

    Ok(GeoGrid {
        grid: Grid {
            width: out_width,
            height: out_height,
            data,
            nodata: None,
        },
        transform: dst_transform,
        crs: CrsCode::Epsg4326,
    })
}

/// Map fractional pixel-corner coordinates onto the cell-centre lattice.
///
/// Returns `None` outside the source footprint. Inside the footprint but
/// beyond the outermost centres the position clamps to the edge lattice
/// line.
fn lattice_position(grid: &Grid, col_f: f64, row_f: f64) -> Option<(f64, f64)> {
    let (w, h) = (grid.width as f64, grid.height as f64);
    if grid.is_empty() || !(0.0..=w).contains(&col_f) || !(0.0..=h).contains(&row_f) {
        return None;
    }

    let x = snap((col_f - 0.5).clamp(0.0, w - 1.0));
    let y = snap((row_f - 0.5).clamp(0.0, h - 1.0));
    Some((x, y))
}

#[inline]
fn snap(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() < LATTICE_SNAP {
        nearest
    } else {
        v
    }
}
