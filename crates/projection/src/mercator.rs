//! Spherical Web Mercator (EPSG:3857).

use std::f64::consts::PI;

/// Sphere radius used by EPSG:3857 (WGS84 semi-major axis).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit where the projection becomes a square world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Convert lon/lat degrees to Web Mercator meters.
///
/// Latitudes beyond the projection limit are clamped to it.
pub fn lonlat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((PI / 4.0) + (lat.to_radians() / 2.0)).tan().ln();
    (x, y)
}

/// Convert Web Mercator meters to lon/lat degrees.
pub fn mercator_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let (x, y) = lonlat_to_mercator(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_world_extent() {
        let (x, y) = lonlat_to_mercator(180.0, MAX_LATITUDE);
        assert!((x - 20037508.342789244).abs() < 1e-3);
        assert!((y - 20037508.342789244).abs() < 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        for (lon, lat) in [(-120.0, 35.0), (10.5, -42.25), (179.0, 80.0)] {
            let (x, y) = lonlat_to_mercator(lon, lat);
            let (lon_back, lat_back) = mercator_to_lonlat(x, y);
            assert!((lon - lon_back).abs() < 1e-9, "lon roundtrip for {}", lon);
            assert!((lat - lat_back).abs() < 1e-9, "lat roundtrip for {}", lat);
        }
    }

    #[test]
    fn test_symmetry() {
        let (_, y_pos) = lonlat_to_mercator(0.0, 45.0);
        let (_, y_neg) = lonlat_to_mercator(0.0, -45.0);
        assert!((y_pos + y_neg).abs() < 1e-6);
    }
}
