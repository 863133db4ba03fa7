//! Tests for color ramps and grid colorization.

use hotspot_common::Grid;
use renderer::gradient::{ColorRamp, ColorStop, Rgb, TRANSPARENT};
use test_utils::{create_grid_with_nodata, create_unit_ramp_grid, temp_file_with};

// ============================================================================
// color_at tests
// ============================================================================

#[test]
fn test_default_stops_exact() {
    let ramp = ColorRamp::default();
    let expected = [
        (0.0, Rgb::new(10, 25, 47)),
        (0.2, Rgb::new(20, 50, 94)),
        (0.4, Rgb::new(46, 204, 113)),
        (0.6, Rgb::new(241, 196, 15)),
        (0.8, Rgb::new(231, 76, 60)),
        (1.0, Rgb::new(231, 76, 60)),
    ];
    for (value, color) in expected {
        assert_eq!(ramp.color_at(value), color, "value {}", value);
    }
}

#[test]
fn test_top_interval_is_flat() {
    let ramp = ColorRamp::default();
    for v in [0.8, 0.85, 0.9, 0.99, 1.0, 2.0] {
        assert_eq!(ramp.color_at(v), Rgb::new(231, 76, 60));
    }
}

#[test]
fn test_continuity_within_interval() {
    let ramp = ColorRamp::default();
    let eps = 1e-7;

    let mut v: f64 = 0.0;
    while v < 1.0 - eps {
        // Stay inside one interval
        let next_stop = ((v / 0.2).floor() + 1.0) * 0.2;
        if v + eps < next_stop - 1e-12 {
            let a = ramp.color_at(v);
            let b = ramp.color_at(v + eps);
            assert!((a.r as i32 - b.r as i32).abs() <= 1, "r at {}", v);
            assert!((a.g as i32 - b.g as i32).abs() <= 1, "g at {}", v);
            assert!((a.b as i32 - b.b as i32).abs() <= 1, "b at {}", v);
        }
        v += 0.0137;
    }
}

#[test]
fn test_monotonic_green_on_rising_segment() {
    // Green rises from 50 to 204 between 0.2 and 0.4
    let ramp = ColorRamp::default();
    let mut last = 0;
    for i in 0..100 {
        let g = ramp.color_at(0.2 + 0.2 * i as f64 / 100.0).g;
        assert!(g >= last);
        last = g;
    }
}

// ============================================================================
// colorize tests
// ============================================================================

#[test]
fn test_colorize_dimensions() {
    let grid = create_unit_ramp_grid(7, 3);
    let image = ColorRamp::default().colorize(&grid);

    assert_eq!((image.width, image.height), (7, 3));
    assert_eq!(image.pixels.len(), 7 * 3 * 4);
}

#[test]
fn test_alpha_zero_iff_missing() {
    let mut grid = create_grid_with_nodata(6, 6, &[(0, 0), (3, 4)]);
    grid.data[10] = f64::NAN;
    let image = ColorRamp::default().colorize(&grid);

    for (value, alpha) in grid.data.iter().zip(image.alpha()) {
        if grid.is_valid_value(*value) {
            assert_eq!(alpha, 255);
        } else {
            assert_eq!(alpha, 0);
        }
    }
    assert_eq!(image.pixel(0, 0), Some(TRANSPARENT));
    assert_eq!(image.pixel(4, 3), Some(TRANSPARENT));
}

#[test]
fn test_nan_grid_fully_transparent() {
    let image = ColorRamp::default().colorize(&Grid::nan(16, 16));
    assert!(image.pixels.iter().all(|&b| b == 0));
}

#[test]
fn test_out_of_range_values_clamp() {
    let grid = Grid::new(3, 1, vec![-5.0, 0.5, 12.0], None).unwrap();
    let ramp = ColorRamp::default();
    let image = ramp.colorize(&grid);

    assert_eq!(image.pixel(0, 0), Some(ramp.color_at(0.0).opaque()));
    assert_eq!(image.pixel(0, 2), Some(ramp.color_at(1.0).opaque()));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_from_json() {
    let json = r#"[
        {"position": 0.0, "color": [0, 0, 255]},
        {"position": 1.0, "color": [255, 0, 0]}
    ]"#;
    let ramp = ColorRamp::from_json(json).unwrap();

    assert_eq!(ramp.stops().len(), 2);
    assert_eq!(ramp.color_at(0.5), Rgb::new(127, 0, 127));
}

#[test]
fn test_from_json_rejects_invalid() {
    assert!(ColorRamp::from_json("not json").is_err());
    assert!(ColorRamp::from_json(r#"[{"position": 0.0, "color": [1, 2, 3]}]"#).is_err());
    assert!(ColorRamp::from_json(r#"[{"position": 0.0, "color": [1, 2, 300]}]"#).is_err());
}

#[test]
fn test_serde_roundtrip_matches_stops() {
    let json = serde_json::to_string(&ColorRamp::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["color"], serde_json::json!([10, 25, 47]));
    assert_eq!(value[5]["position"], 1.0);

    let back: ColorRamp = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ColorRamp::default());
}

#[test]
fn test_from_file() {
    let file = temp_file_with(
        r#"[{"position": 0.0, "color": [0, 0, 0]}, {"position": 1.0, "color": [100, 100, 100]}]"#,
    );
    let ramp = ColorRamp::from_file(file.path()).unwrap();
    assert_eq!(ramp.color_at(1.0), Rgb::new(100, 100, 100));

    assert!(ColorRamp::from_file("/nonexistent/ramp.json").is_err());
}

#[test]
fn test_custom_stops() {
    let ramp = ColorRamp::new(vec![
        ColorStop::new(0.0, Rgb::new(0, 0, 0)),
        ColorStop::new(0.25, Rgb::new(100, 0, 0)),
        ColorStop::new(1.0, Rgb::new(100, 150, 0)),
    ])
    .unwrap();

    assert_eq!(ramp.color_at(0.125), Rgb::new(50, 0, 0));
    assert_eq!(ramp.color_at(0.625), Rgb::new(100, 75, 0));
}
