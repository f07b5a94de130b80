//! Common test fixtures: ellipsoid constants, descriptors and overlays.

use fixedgrid_common::{Feature, FeatureCollection, GridDescriptor};

/// GRS80 equatorial radius used by GOES-R (meters).
pub const GOES_SEMI_MAJOR_AXIS: f64 = 6378137.0;

/// GRS80 polar radius used by GOES-R (meters).
pub const GOES_SEMI_MINOR_AXIS: f64 = 6356752.31414;

/// GOES-R perspective point height above the surface (meters).
pub const GOES_PERSPECTIVE_HEIGHT: f64 = 35786023.0;

/// GOES-East sub-satellite longitude (degrees).
pub const GOES_EAST_LON: f64 = -75.0;

/// Scan angle of the Earth's limb from geostationary altitude (radians).
pub const LIMB_SCAN_ANGLE: f64 = 0.1518;

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Descriptor with standard GOES ellipsoid constants.
pub fn goes_descriptor(x: Vec<f64>, y: Vec<f64>, lon0: f64) -> GridDescriptor {
    GridDescriptor {
        semi_major_axis: GOES_SEMI_MAJOR_AXIS,
        semi_minor_axis: GOES_SEMI_MINOR_AXIS,
        perspective_point_height: GOES_PERSPECTIVE_HEIGHT,
        longitude_of_projection_origin: lon0,
        x,
        y,
    }
}

/// The 2x2 grid straddling nadir at 0° longitude.
pub fn nadir_2x2_descriptor() -> GridDescriptor {
    goes_descriptor(vec![-0.01, 0.01], vec![-0.01, 0.01], 0.0)
}

/// Full-disk style grid of `n` x `n` pixels with y decreasing north to
/// south; the corners look into space.
pub fn full_disk_descriptor(n: usize, lon0: f64) -> GridDescriptor {
    goes_descriptor(linspace(-0.16, 0.16, n), linspace(0.16, -0.16, n), lon0)
}

/// Small sector of `nx` x `ny` pixels around nadir, entirely on Earth.
pub fn sector_descriptor(nx: usize, ny: usize, lon0: f64) -> GridDescriptor {
    goes_descriptor(linspace(-0.05, 0.05, nx), linspace(0.05, -0.05, ny), lon0)
}

/// Closed square ring of `[lon, lat]` vertices centered on a point.
pub fn square_ring(center_lat: f64, center_lon: f64, half: f64) -> Vec<[f64; 2]> {
    vec![
        [center_lon - half, center_lat - half],
        [center_lon + half, center_lat - half],
        [center_lon + half, center_lat + half],
        [center_lon - half, center_lat + half],
        [center_lon - half, center_lat - half],
    ]
}

/// Collection with a single square polygon.
pub fn square_feature_collection(center_lat: f64, center_lon: f64, half: f64) -> FeatureCollection {
    FeatureCollection {
        features: vec![Feature::polygon(vec![square_ring(center_lat, center_lon, half)])],
    }
}
