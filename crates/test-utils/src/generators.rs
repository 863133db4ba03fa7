//! Test data generators for synthetic scalar rasters.
//!
//! These generators create predictable, verifiable grid patterns
//! that can be used across the test suite.

use hotspot_common::Grid;

/// Nodata sentinel used by the generated grids.
pub const TEST_NODATA: f64 = -9999.0;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that a sample came from the expected cell
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid.data[0], 0.0);     // col=0, row=0
/// assert_eq!(grid.data[1], 1000.0);  // col=1, row=0
/// assert_eq!(grid.data[10], 1.0);    // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Grid {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    Grid {
        width,
        height,
        data,
        nodata: Some(TEST_NODATA),
    }
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Grid {
    Grid::filled(width, height, value).with_nodata(Some(TEST_NODATA))
}

/// Creates a flat grid with a single raised cell.
///
/// # Arguments
///
/// * `background` - Value of every other cell
/// * `(row, col)` - Position of the peak
/// * `peak` - Value at the peak
pub fn create_single_peak_grid(
    width: usize,
    height: usize,
    background: f64,
    (row, col): (usize, usize),
    peak: f64,
) -> Grid {
    let mut grid = create_constant_grid(width, height, background);
    if row < height && col < width {
        grid.data[row * width + col] = peak;
    }
    grid
}

/// Creates a grid with nodata at specified positions.
///
/// # Arguments
///
/// * `nodata_positions` - List of (col, row) positions set to [`TEST_NODATA`]
///
/// Every other cell is 0.5.
pub fn create_grid_with_nodata(width: usize, height: usize, nodata_positions: &[(usize, usize)]) -> Grid {
    let mut grid = create_constant_grid(width, height, 0.5);
    for &(col, row) in nodata_positions {
        if col < width && row < height {
            grid.data[row * width + col] = TEST_NODATA;
        }
    }
    grid
}

/// Creates a grid rising linearly from 0.0 at the west edge to 1.0 at the
/// east edge.
///
/// Useful for color ramp tests since every value already lies in [0, 1].
pub fn create_unit_ramp_grid(width: usize, height: usize) -> Grid {
    let span = width.saturating_sub(1).max(1) as f64;
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f64 / span);
        }
    }
    Grid {
        width,
        height,
        data,
        nodata: Some(TEST_NODATA),
    }
}

/// Creates a grid of smooth bumps, similar to a habitat index surface.
///
/// Bump centres and heights are derived deterministically from `seed`;
/// values stay within [0, 1].
pub fn create_hotspot_field(width: usize, height: usize, bumps: usize, seed: u32) -> Grid {
    let centres: Vec<(f64, f64, f64)> = (0..bumps as u32)
        .map(|i| {
            let h = simple_hash(i, 0, seed);
            let cx = (h % 10_000) as f64 / 10_000.0 * width as f64;
            let cy = (simple_hash(i, 1, seed) % 10_000) as f64 / 10_000.0 * height as f64;
            let amplitude = 0.3 + (simple_hash(i, 2, seed) % 700) as f64 / 1000.0;
            (cx, cy, amplitude)
        })
        .collect();

    let radius = (width.min(height) as f64 / 8.0).max(1.0);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let value = centres
                .iter()
                .map(|&(cx, cy, amplitude)| {
                    let dx = col as f64 - cx;
                    let dy = row as f64 - cy;
                    amplitude * (-(dx * dx + dy * dy) / (2.0 * radius * radius)).exp()
                })
                .fold(0.0, f64::max);
            data.push(value.min(1.0));
        }
    }

    Grid {
        width,
        height,
        data,
        nodata: Some(TEST_NODATA),
    }
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates RGBA pixel data for a simple test pattern.
///
/// Creates a gradient pattern with many distinct colors, useful for
/// testing the RGBA PNG path.
pub fn create_test_rgba_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            let b = 128u8;
            let a = 255u8;
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }
    pixels
}

/// Creates RGBA pixel data using only the hotspot ramp stop colors plus
/// transparent cells, suitable for testing indexed PNG encoding.
pub fn create_ramp_palette_pixels(width: usize, height: usize) -> Vec<u8> {
    let palette: [[u8; 4]; 6] = [
        [0, 0, 0, 0],
        [10, 25, 47, 255],
        [20, 50, 94, 255],
        [46, 204, 113, 255],
        [241, 196, 15, 255],
        [231, 76, 60, 255],
    ];

    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let idx = ((x as f32 / width as f32 * 0.3 + y as f32 / height as f32 * 0.7) * 5.0) as usize;
            pixels.extend_from_slice(&palette[idx.min(5)]);
        }
    }
    pixels
}
