//! Interpolation methods for grid resampling.
//!
//! Positions are given on the cell-centre lattice: `(x, y) = (0, 0)` is the
//! centre of the top-left cell and `(width - 1, height - 1)` the centre of
//! the bottom-right one. Missing cells never contribute; any method that
//! would need one returns `None`.

use hotspot_common::Grid;

use crate::types::InterpolationMethod;

/// Sample `grid` at lattice position `(x, y)` with the given method.
#[inline]
pub fn interpolate(grid: &Grid, method: InterpolationMethod, x: f64, y: f64) -> Option<f64> {
    match method {
        InterpolationMethod::Nearest => nearest_interpolate(grid, x, y),
        InterpolationMethod::Bilinear => bilinear_interpolate(grid, x, y),
    }
}

/// Nearest neighbor interpolation.
///
/// Returns the value of the closest cell centre.
pub fn nearest_interpolate(grid: &Grid, x: f64, y: f64) -> Option<f64> {
    if !in_lattice(grid, x, y) {
        return None;
    }

    grid.valid_at(y.round() as usize, x.round() as usize)
}

/// Bilinear interpolation.
///
/// Blends the four surrounding cell centres. Corners with zero weight are
/// not read, so a position exactly on a lattice line only depends on the
/// cells along that line, and a position exactly on a centre returns that
/// cell's value unchanged. If any corner with non-zero weight is missing
/// the result is `None`.
pub fn bilinear_interpolate(grid: &Grid, x: f64, y: f64) -> Option<f64> {
    if !in_lattice(grid, x, y) {
        return None;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    // A non-zero fraction implies x < width - 1, so x0 + 1 is in range.
    let x1 = if xf > 0.0 { x0 + 1 } else { x0 };
    let y1 = if yf > 0.0 { y0 + 1 } else { y0 };

    let corners = [
        (y0, x0, (1.0 - xf) * (1.0 - yf)),
        (y0, x1, xf * (1.0 - yf)),
        (y1, x0, (1.0 - xf) * yf),
        (y1, x1, xf * yf),
    ];

    let mut sum = 0.0;
    for (row, col, weight) in corners {
        if weight == 0.0 {
            continue;
        }
        sum += grid.valid_at(row, col)? * weight;
    }
    Some(sum)
}

fn in_lattice(grid: &Grid, x: f64, y: f64) -> bool {
    !grid.is_empty()
        && x >= 0.0
        && y >= 0.0
        && x <= (grid.width - 1) as f64
        && y <= (grid.height - 1) as f64
}
