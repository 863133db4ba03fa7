//! Hotspot detection by local-maximum filtering.
//!
//! A cell is a candidate peak when it is valid and equals the maximum of the
//! square window centred on it. Taking local maxima instead of the global
//! top-N pixels keeps reported hotspots roughly half a window apart, since
//! the highest pixels of one feature tend to cluster together.

use std::cmp::Ordering;
use std::collections::VecDeque;

use hotspot_common::{GeoTransform, Grid, HotspotError, HotspotResult, RasterSource};
use projection::SourceProjection;
use tracing::{debug, info};

use crate::config::GridProcessorConfig;
use crate::types::Peak;

/// A local maximum before ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    /// Row-major index, which doubles as discovery order.
    index: usize,
    value: f64,
}

/// Highest value first; equal values keep row-major discovery order.
fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then_with(|| a.index.cmp(&b.index))
}

/// Find the `top_n` highest local maxima of a raster source.
///
/// The source nodata falls back to `config.default_nodata`. A source with
/// no valid cells yields an empty list; read failures and CRS problems are
/// returned as errors rather than folded into an empty result.
pub fn find_peaks<S>(source: &S, top_n: usize, config: &GridProcessorConfig) -> HotspotResult<Vec<Peak>>
where
    S: RasterSource + ?Sized,
{
    validate_params(top_n, config.neighborhood_size)?;
    let projection = SourceProjection::for_crs(source.crs())?;

    let nodata = source.nodata().unwrap_or(config.default_nodata);
    let grid = source.read_checked_grid()?.with_nodata(Some(nodata));

    detect_peaks(
        &grid,
        &source.transform(),
        projection,
        top_n,
        config.neighborhood_size,
    )
}

/// Rank the local maxima of an already-read grid.
///
/// Peak coordinates are the pixel centres mapped through `transform`, then
/// into lon/lat through `projection`.
pub fn detect_peaks(
    grid: &Grid,
    transform: &GeoTransform,
    projection: SourceProjection,
    top_n: usize,
    neighborhood_size: usize,
) -> HotspotResult<Vec<Peak>> {
    validate_params(top_n, neighborhood_size)?;
    grid.check()?;

    let mut candidates = local_maxima(grid, neighborhood_size);
    debug!(
        width = grid.width,
        height = grid.height,
        neighborhood_size,
        candidates = candidates.len(),
        "Computed local maxima"
    );

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let keep = top_n.min(candidates.len());
    if keep < candidates.len() {
        candidates.select_nth_unstable_by(keep - 1, rank_order);
        candidates.truncate(keep);
    }
    candidates.sort_unstable_by(rank_order);

    let peaks: Vec<Peak> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let row = candidate.index / grid.width;
            let col = candidate.index % grid.width;
            let (x, y) = transform.pixel_center(row, col);
            let (longitude, latitude) = projection.inverse(x, y);
            Peak {
                row,
                col,
                longitude,
                latitude,
                value: candidate.value,
                rank: i + 1,
            }
        })
        .collect();

    info!(requested = top_n, found = peaks.len(), "Detected hotspots");
    Ok(peaks)
}

fn validate_params(top_n: usize, neighborhood_size: usize) -> HotspotResult<()> {
    if top_n < 1 {
        return Err(HotspotError::config("top_n", format!("must be >= 1, got {}", top_n)));
    }
    if neighborhood_size < 1 {
        return Err(HotspotError::config(
            "neighborhood_size",
            format!("must be >= 1, got {}", neighborhood_size),
        ));
    }
    Ok(())
}

/// Valid cells equal to their neighborhood maximum, in row-major order.
fn local_maxima(grid: &Grid, size: usize) -> Vec<Candidate> {
    let filtered = maximum_filter(grid, size);

    grid.data
        .iter()
        .zip(filtered.iter())
        .enumerate()
        .filter(|&(_, (&value, &local_max))| grid.is_valid_value(value) && value == local_max)
        .map(|(index, (&value, _))| Candidate { index, value })
        .collect()
}

/// Sliding-window maximum over a `size x size` square centred on each cell.
///
/// The window is truncated at the grid edges, which gives the same result
/// as edge replication for a maximum. For even sizes the window spans
/// `size / 2` cells before the centre and `size - 1 - size / 2` after. Invalid
/// cells contribute negative infinity, so an all-invalid window yields
/// `f64::NEG_INFINITY`.
pub fn maximum_filter(grid: &Grid, size: usize) -> Vec<f64> {
    let (width, height) = (grid.width, grid.height);
    if grid.is_empty() || size == 0 {
        return vec![f64::NEG_INFINITY; width * height];
    }

    let before = size / 2;
    let after = size - 1 - before;

    let masked: Vec<f64> = grid
        .data
        .iter()
        .map(|&v| if grid.is_valid_value(v) { v } else { f64::NEG_INFINITY })
        .collect();

    // Separable: rows first, then columns.
    let mut row_max = vec![f64::NEG_INFINITY; width * height];
    let mut deque = VecDeque::with_capacity(size.min(width.max(height)));
    for row in 0..height {
        let span = row * width..(row + 1) * width;
        sliding_max(&masked[span.clone()], before, after, &mut row_max[span], &mut deque);
    }

    let mut output = vec![f64::NEG_INFINITY; width * height];
    let mut column = vec![0.0; height];
    let mut column_out = vec![0.0; height];
    for col in 0..width {
        for row in 0..height {
            column[row] = row_max[row * width + col];
        }
        sliding_max(&column, before, after, &mut column_out, &mut deque);
        for row in 0..height {
            output[row * width + col] = column_out[row];
        }
    }

    output
}

/// 1D running maximum using a monotonic deque of indices.
fn sliding_max(line: &[f64], before: usize, after: usize, out: &mut [f64], deque: &mut VecDeque<usize>) {
    deque.clear();
    let len = line.len();
    let mut next = 0;

    for i in 0..len {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(len - 1);

        while next <= hi {
            while let Some(&back) = deque.back() {
                if line[back] <= line[next] {
                    deque.pop_back();
                } else {
                    break;
                }
            }
            deque.push_back(next);
            next += 1;
        }

        while let Some(&front) = deque.front() {
            if front < lo {
                deque.pop_front();
            } else {
                break;
            }
        }

        out[i] = deque.front().map_or(f64::NEG_INFINITY, |&idx| line[idx]);
    }
}
