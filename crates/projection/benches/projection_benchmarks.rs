//! Projection engine and spatial index benchmarks.
//!
//! Run with: cargo bench --package projection --bench projection_benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use projection::{compute_geodetic_field, SpatialIndex};
use test_utils::{full_disk_descriptor, square_ring, GOES_EAST_LON};

fn bench_geodetic_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("geodetic_field");

    for size in [256usize, 1024, 2048] {
        let desc = full_disk_descriptor(size, GOES_EAST_LON);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("full_disk", size), &desc, |b, desc| {
            b.iter(|| black_box(compute_geodetic_field(desc)));
        });
    }

    group.finish();
}

fn bench_spatial_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_index");
    let field = Arc::new(compute_geodetic_field(&full_disk_descriptor(1024, GOES_EAST_LON)));

    group.bench_function("build_1024", |b| {
        b.iter(|| black_box(SpatialIndex::build(Arc::clone(&field))));
    });

    let index = SpatialIndex::build(Arc::clone(&field)).expect("disk has finite points");
    let ring = square_ring(20.0, -90.0, 15.0);
    group.bench_function("nearest_pixel_ring", |b| {
        b.iter(|| {
            for &[lon, lat] in &ring {
                black_box(index.nearest_pixel(lat, lon));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_geodetic_field, bench_spatial_index);
criterion_main!(benches);
