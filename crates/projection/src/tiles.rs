//! XYZ (slippy map) tile addressing.

use hotspot_common::BoundingBox;

/// Geographic bounding box of Web Mercator tile `z/x/y`.
///
/// Tile rows count down from the north edge, so `y + 1` is the southern
/// boundary.
pub fn tile_to_bbox(z: u32, x: u32, y: u32) -> BoundingBox {
    let n = 2_f64.powi(z as i32);

    let lon_min = x as f64 / n * 360.0 - 180.0;
    let lon_max = (x + 1) as f64 / n * 360.0 - 180.0;

    let lat_max = (std::f64::consts::PI * (1.0 - 2.0 * y as f64 / n))
        .sinh()
        .atan()
        .to_degrees();
    let lat_min = (std::f64::consts::PI * (1.0 - 2.0 * (y + 1) as f64 / n))
        .sinh()
        .atan()
        .to_degrees();

    BoundingBox::new(lon_min, lat_min, lon_max, lat_max)
}

/// Tile containing a geographic point at zoom `z`.
pub fn coords_to_tile(lon: f64, lat: f64, z: u32) -> (u32, u32) {
    let n = 2_f64.powi(z as i32);

    let x = ((lon + 180.0) / 360.0 * n).floor().max(0.0) as u32;
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * n)
        .floor()
        .max(0.0) as u32;

    let max_index = n as u32 - 1;
    (x.min(max_index), y.min(max_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_to_bbox() {
        // Tile 0/0/0 covers the world
        let bbox = tile_to_bbox(0, 0, 0);
        assert!((bbox.min_lon - (-180.0)).abs() < 0.001);
        assert!((bbox.max_lon - 180.0).abs() < 0.001);
        assert!((bbox.max_lat - 85.0511).abs() < 0.001);

        let bbox = tile_to_bbox(4, 3, 5);
        assert!(bbox.min_lon < bbox.max_lon);
        assert!(bbox.min_lat < bbox.max_lat);
    }

    #[test]
    fn test_coords_to_tile() {
        let (x, y) = coords_to_tile(0.0, 0.0, 1);
        assert_eq!(x, 1);
        assert_eq!(y, 1);

        let (x, _y) = coords_to_tile(-90.0, 45.0, 2);
        assert!(x < 2);
    }

    #[test]
    fn test_roundtrip() {
        let (z, x, y) = (8, 45, 98);

        let bbox = tile_to_bbox(z, x, y);
        let (cx, cy) = bbox.center();
        assert_eq!(coords_to_tile(cx, cy, z), (x, y));
    }
}
