//! Benchmarks for the renderer crate - colorization, tiles and PNG encoding.
//!
//! Run with: cargo bench --package renderer -- colorize
//! Or: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hotspot_common::{BoundingBox, Grid, MemoryRaster};
use rand::Rng;
use renderer::{encode_png, render_tile, ColorRamp, TileConfig};

/// Generate a noisy index grid in [0, 1] with a sprinkling of nodata.
fn generate_index_grid(width: usize, height: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let data = (0..width * height)
        .map(|i| {
            if rng.gen_ratio(1, 50) {
                -9999.0
            } else {
                let x = (i % width) as f64 / width as f64;
                let y = (i / width) as f64 / height as f64;
                (0.5 + 0.45 * (x * 9.0).sin() * (y * 7.0).cos() + rng.gen_range(-0.02..0.02)).clamp(0.0, 1.0)
            }
        })
        .collect();

    Grid {
        width,
        height,
        data,
        nodata: Some(-9999.0),
    }
}

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");
    let ramp = ColorRamp::default();

    for size in [256usize, 512, 1024] {
        let grid = generate_index_grid(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| ramp.colorize(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_render_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_tile");
    let extent = BoundingBox::new(-121.0, 32.0, -117.0, 35.0);
    let source = MemoryRaster::geographic(generate_index_grid(1200, 900), &extent);
    let config = TileConfig::default();

    for (name, window) in [
        ("full_extent", extent),
        ("zoomed", BoundingBox::new(-119.5, 33.5, -119.0, 34.0)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &window, |b, window| {
            b.iter(|| render_tile(black_box(&source), window, &config))
        });
    }
    group.finish();
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    let extent = BoundingBox::new(-121.0, 32.0, -117.0, 35.0);
    let source = MemoryRaster::geographic(generate_index_grid(600, 450), &extent);

    for size in [256usize, 512] {
        let config = TileConfig::default().with_tile_size(size);
        let tile = match render_tile(&source, &extent, &config) {
            Ok(tile) => tile,
            Err(e) => panic!("tile render failed: {}", e),
        };
        group.throughput(Throughput::Bytes(tile.pixels.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tile, |b, tile| {
            b.iter(|| encode_png(black_box(&tile.pixels), tile.width, tile.height))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_colorize, bench_render_tile, bench_png_encoding);
criterion_main!(benches);
