//! Compositing and encoding benchmarks.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use renderer::{colorize, composite, encode_png_auto, PaletteName};
use test_utils::{create_disk_grid, create_layer, create_temperature_grid};

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");
    let values = create_temperature_grid(256, 256);
    group.throughput(Throughput::Elements(values.len() as u64));

    for palette in [PaletteName::Grayscale, PaletteName::Viridis, PaletteName::JetR] {
        group.bench_with_input(BenchmarkId::new("palette", palette), &palette, |b, &p| {
            b.iter(|| {
                for &v in &values {
                    black_box(colorize(v, 220.0, 320.0, p));
                }
            });
        });
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    for size in [512usize, 1024, 2048] {
        let layer = create_layer("CMI", "K", size, size, create_disk_grid(size, size));
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("disk", size), &layer, |b, layer| {
            b.iter(|| black_box(composite(layer, PaletteName::Viridis)));
        });
    }

    group.finish();
}

fn bench_png(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");
    let layer = create_layer("CMI", "K", 512, 512, create_disk_grid(512, 512));
    let image = composite(&layer, PaletteName::Viridis).image;

    group.bench_function("composited_512", |b| {
        b.iter(|| black_box(encode_png_auto(&image.pixels, image.width, image.height)));
    });

    group.finish();
}

criterion_group!(benches, bench_colorize, bench_composite, bench_png);
criterion_main!(benches);
