//! Geostationary satellite projection.
//!
//! The satellite views Earth from a fixed position above the equator,
//! and fixed-grid coordinates are expressed as scan angles in radians
//! from nadir.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4

use fixedgrid_common::{GeodeticField, GridDescriptor};
use rayon::prelude::*;

/// Geostationary projection parameters.
///
/// These parameters define the projection from satellite scan angle
/// (x, y) coordinates to geographic (lat/lon) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geostationary {
    /// Satellite height above Earth center (meters).
    /// This is perspective_point_height + semi_major_axis
    pub h: f64,
    /// Semi-major axis of Earth ellipsoid (meters)
    pub req: f64,
    /// Semi-minor axis of Earth ellipsoid (meters)
    pub rpol: f64,
    /// Longitude of satellite nadir point (radians)
    pub lambda_0: f64,
}

impl Geostationary {
    /// Create a new projection from CF `goes_imager_projection` attributes.
    ///
    /// # Arguments
    /// * `perspective_point_height` - Satellite altitude above Earth surface (meters)
    /// * `semi_major_axis` - Earth equatorial radius (meters)
    /// * `semi_minor_axis` - Earth polar radius (meters)
    /// * `longitude_origin_deg` - Satellite longitude (degrees, negative for west)
    pub fn new(
        perspective_point_height: f64,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        longitude_origin_deg: f64,
    ) -> Self {
        Self {
            h: perspective_point_height + semi_major_axis,
            req: semi_major_axis,
            rpol: semi_minor_axis,
            lambda_0: longitude_origin_deg.to_radians(),
        }
    }

    /// Projection parameters of a grid descriptor.
    pub fn from_descriptor(desc: &GridDescriptor) -> Self {
        Self::new(
            desc.perspective_point_height,
            desc.semi_major_axis,
            desc.semi_minor_axis,
            desc.longitude_of_projection_origin,
        )
    }

    /// Convert scan angles (radians) to geographic coordinates.
    ///
    /// Based on GOES-R PUG Volume 4, Section 4.2.8.
    /// Returns `(lat, lon)` in degrees, or None if the scan angle points
    /// to space (off Earth).
    pub fn scan_to_geo(&self, x_rad: f64, y_rad: f64) -> Option<(f64, f64)> {
        let (sin_x, cos_x) = x_rad.sin_cos();
        let (sin_y, cos_y) = y_rad.sin_cos();
        self.solve(sin_x, cos_x, sin_y, cos_y)
    }

    /// Inverse navigation from precomputed scan-angle sines and cosines.
    #[inline]
    fn solve(&self, sin_x: f64, cos_x: f64, sin_y: f64, cos_y: f64) -> Option<(f64, f64)> {
        let ratio = (self.req * self.req) / (self.rpol * self.rpol);

        // Quadratic coefficients for finding distance to Earth surface
        let a = sin_x * sin_x + cos_x * cos_x * (cos_y * cos_y + ratio * sin_y * sin_y);
        let b = -2.0 * self.h * cos_x * cos_y;
        let c = self.h * self.h - self.req * self.req;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None; // Scan angle points to space
        }

        // Near root: the satellite-facing intersection.
        let rs = (-b - discriminant.sqrt()) / (2.0 * a);

        // 3D coordinates (satellite-centered, Earth-fixed)
        let sx = rs * cos_x * cos_y;
        let sy = -rs * sin_x;
        let sz = rs * cos_x * sin_y;

        // Convert to geodetic coordinates
        let lat = (ratio * sz / ((self.h - sx).powi(2) + sy * sy).sqrt()).atan();
        let lon = self.lambda_0 - sy.atan2(self.h - sx);

        Some((lat.to_degrees(), lon.to_degrees()))
    }

    /// Compute the geodetic coordinates of every pixel in the grid.
    ///
    /// Output is row-major (`index = row * nx + col`), with NaN for pixels
    /// that miss the Earth. Never fails; rows are computed in parallel.
    pub fn project_grid(&self, x: &[f64], y: &[f64]) -> (Vec<f32>, Vec<f32>) {
        let nx = x.len();
        let n = nx * y.len();
        let mut lats = vec![f32::NAN; n];
        let mut lons = vec![f32::NAN; n];
        if n == 0 {
            return (lats, lons);
        }

        let cols: Vec<(f64, f64)> = x.iter().map(|v| v.sin_cos()).collect();

        lats.par_chunks_mut(nx)
            .zip(lons.par_chunks_mut(nx))
            .zip(y.par_iter())
            .for_each(|((lat_row, lon_row), &y_rad)| {
                let (sin_y, cos_y) = y_rad.sin_cos();
                for (k, &(sin_x, cos_x)) in cols.iter().enumerate() {
                    if let Some((lat, lon)) = self.solve(sin_x, cos_x, sin_y, cos_y) {
                        lat_row[k] = lat as f32;
                        lon_row[k] = lon as f32;
                    }
                }
            });

        (lats, lons)
    }
}

/// Compute the full geodetic field for a grid descriptor.
///
/// Cost is one inverse navigation per pixel; run it off the interactive
/// path (see [`crate::ProjectionWorker`]).
pub fn compute_geodetic_field(desc: &GridDescriptor) -> GeodeticField {
    let proj = Geostationary::from_descriptor(desc);
    let (lats, lons) = proj.project_grid(&desc.x, &desc.y);
    GeodeticField::from_projection(desc.nx(), desc.ny(), lats, lons)
}
