//! Integration tests for the projection engine, spatial index and worker.

use std::sync::Arc;

use fixedgrid_common::{PixelCoord, ViewerError};
use projection::{compute_geodetic_field, Geostationary, ProjectionWorker, SpatialIndex};
use test_utils::{
    assert_approx_eq, full_disk_descriptor, goes_descriptor, nadir_2x2_descriptor,
    sector_descriptor, square_ring, GOES_EAST_LON,
};

// ============================================================================
// Projection engine
// ============================================================================

#[test]
fn test_nadir_2x2_cluster() {
    let field = compute_geodetic_field(&nadir_2x2_descriptor());

    assert_eq!(field.nx(), 2);
    assert_eq!(field.ny(), 2);
    assert_eq!(field.valid_count(), 4);

    let coords: Vec<(f32, f32)> = (0..4).map(|i| field.get(i).unwrap()).collect();
    for (i, a) in coords.iter().enumerate() {
        for b in &coords[i + 1..] {
            assert_ne!(a, b, "coordinates must be distinct");
        }
    }

    // Symmetric about nadir
    let (lat0, lon0) = coords[0];
    let (lat3, lon3) = coords[3];
    assert_approx_eq!(lat0, -lat3, 1e-4);
    assert_approx_eq!(lon0, -lon3, 1e-4);

    // 0.01 rad off axis from geostationary height is about 3.2 degrees
    // of arc on the surface.
    for (lat, lon) in coords {
        assert!((2.5..3.5).contains(&lat.abs()), "lat {}", lat);
        assert!((2.5..3.5).contains(&lon.abs()), "lon {}", lon);
    }
}

#[test]
fn test_on_axis_pixel_is_nadir() {
    let desc = goes_descriptor(vec![0.0], vec![0.0], GOES_EAST_LON);
    let field = compute_geodetic_field(&desc);
    let (lat, lon) = field.get(0).unwrap();
    assert_approx_eq!(lat, 0.0, 1e-6);
    assert_approx_eq!(lon, GOES_EAST_LON, 1e-4);
}

#[test]
fn test_full_disk_space_pixels_nan() {
    let desc = full_disk_descriptor(33, GOES_EAST_LON);
    let field = compute_geodetic_field(&desc);
    let proj = Geostationary::from_descriptor(&desc);

    let mut space = 0;
    for (j, &y) in desc.y.iter().enumerate() {
        for (k, &x) in desc.x.iter().enumerate() {
            let (lat, lon) = field.get(j * desc.nx() + k).unwrap();
            if proj.scan_to_geo(x, y).is_none() {
                assert!(lat.is_nan() && lon.is_nan());
                space += 1;
            } else {
                assert!(lat.is_finite() && lon.is_finite());
                assert!((-90.0..=90.0).contains(&lat));
            }
        }
    }
    // Corners of a full-disk square always look into space.
    assert!(space > 0);
    assert!(field.get(0).unwrap().0.is_nan());
    assert!(field.valid_count() > field.len() / 2);
}

#[test]
fn test_north_up_orientation() {
    // y decreasing down the rows means latitude decreases down the rows.
    let field = compute_geodetic_field(&sector_descriptor(5, 5, 0.0));
    let top = field.get(2).unwrap().0;
    let bottom = field.get(4 * 5 + 2).unwrap().0;
    assert!(top > 0.0 && bottom < 0.0);
}

// ============================================================================
// Spatial index over a projected field
// ============================================================================

#[test]
fn test_index_over_full_disk() {
    let field = Arc::new(compute_geodetic_field(&full_disk_descriptor(64, GOES_EAST_LON)));
    let index = SpatialIndex::build(Arc::clone(&field)).unwrap();
    assert_eq!(index.len(), field.valid_count());

    // Every projected pixel resolves to itself.
    for i in (0..field.len()).step_by(37) {
        let (lat, lon) = field.get(i).unwrap();
        if lat.is_nan() {
            continue;
        }
        let pixel = index.nearest_pixel(lat as f64, lon as f64).unwrap();
        assert_eq!(pixel, PixelCoord::from_index(i, 64));
    }
}

#[test]
fn test_index_snaps_overlay_vertices() {
    // Dense enough that every bucket near the center holds several pixels.
    let desc = sector_descriptor(300, 300, 0.0);
    let field = Arc::new(compute_geodetic_field(&desc));
    let index = SpatialIndex::build(Arc::clone(&field)).unwrap();

    let ring = square_ring(0.0, 0.0, 4.0);
    for &[lon, lat] in &ring {
        let p = index.nearest_pixel(lat, lon).expect("vertex should land on the sector");
        assert!(p.col < 300 && p.row < 300);

        let (plat, plon) = field.get(p.index(300)).unwrap();
        assert!((plat as f64 - lat).abs() < 0.5);
        assert!((plon as f64 - lon).abs() < 0.5);
    }

    // South-west corner maps left of and below the north-east corner.
    let sw = index.nearest_pixel(ring[0][1], ring[0][0]).unwrap();
    let ne = index.nearest_pixel(ring[2][1], ring[2][0]).unwrap();
    assert!(sw.col < ne.col);
    assert!(sw.row > ne.row);
}

#[test]
fn test_index_absent_for_space_only_grid() {
    let desc = goes_descriptor(vec![0.3, 0.4], vec![0.3], 0.0);
    let field = compute_geodetic_field(&desc);
    assert_eq!(field.valid_count(), 0);
    assert!(SpatialIndex::build(Arc::new(field)).is_none());
}

// ============================================================================
// Background worker
// ============================================================================

#[tokio::test]
async fn test_worker_returns_field() {
    let worker = ProjectionWorker::new();
    let ticket = worker.submit(sector_descriptor(16, 8, GOES_EAST_LON));
    assert!(ticket.is_current());

    let output = ticket.wait().await.unwrap();
    assert_eq!(output.field.len(), 128);
    let bounds = output.bounds.unwrap();
    assert!(bounds.contains(0.0, GOES_EAST_LON));
}

#[tokio::test]
async fn test_worker_superseded_result_is_dropped() {
    let worker = ProjectionWorker::new();
    let first = worker.submit(sector_descriptor(8, 8, 0.0));
    let second = worker.clone().submit(sector_descriptor(4, 4, 0.0));

    assert!(!first.is_current());
    assert!(second.is_current());
    assert_eq!(worker.latest_generation(), second.generation());

    assert!(matches!(first.wait().await, Err(ViewerError::Superseded)));
    let output = second.wait().await.unwrap();
    assert_eq!(output.field.len(), 16);
}

#[tokio::test]
async fn test_worker_space_only_has_no_bounds() {
    let worker = ProjectionWorker::new();
    let output = worker
        .submit(goes_descriptor(vec![0.5], vec![0.5], 0.0))
        .wait()
        .await
        .unwrap();
    assert!(output.bounds.is_none());
    assert!(output.field.get(0).unwrap().0.is_nan());
}
