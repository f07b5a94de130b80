//! Geographic bounding boxes over geodetic fields.

use serde::{Deserialize, Serialize};

/// Latitude/longitude extents of a set of geodetic points, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLonBounds {
    /// Create a new bounding box from its extents.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Compute the extents of every pair where both coordinates are finite.
    ///
    /// Returns None when no such pair exists.
    pub fn from_points(lats: &[f32], lons: &[f32]) -> Option<Self> {
        let mut bounds: Option<Self> = None;

        for (&lat, &lon) in lats.iter().zip(lons) {
            if !lat.is_finite() || !lon.is_finite() {
                continue;
            }
            let (lat, lon) = (lat as f64, lon as f64);
            match bounds.as_mut() {
                Some(b) => {
                    b.min_lat = b.min_lat.min(lat);
                    b.max_lat = b.max_lat.max(lat);
                    b.min_lon = b.min_lon.min(lon);
                    b.max_lon = b.max_lon.max(lon);
                }
                None => bounds = Some(Self::new(lat, lat, lon, lon)),
            }
        }

        bounds
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Check if a point lies inside the box (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
