//! Fixed-grid descriptors and the geodetic fields derived from them.

use crate::{LatLonBounds, ViewerError, ViewerResult};
use serde::{Deserialize, Serialize};

/// Geostationary projection parameters plus the scan-angle axes of a grid.
///
/// Field names follow the CF `goes_imager_projection` attributes so the
/// ingestion side can deserialize them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDescriptor {
    /// Earth equatorial radius (meters)
    pub semi_major_axis: f64,
    /// Earth polar radius (meters)
    pub semi_minor_axis: f64,
    /// Satellite height above the surface (meters)
    pub perspective_point_height: f64,
    /// Satellite sub-point longitude (degrees)
    pub longitude_of_projection_origin: f64,
    /// East-west scan angles, one per column (radians)
    pub x: Vec<f64>,
    /// North-south scan angles, one per row (radians)
    pub y: Vec<f64>,
}

impl GridDescriptor {
    /// Number of columns.
    pub fn nx(&self) -> usize {
        self.x.len()
    }

    /// Number of rows.
    pub fn ny(&self) -> usize {
        self.y.len()
    }

    /// Total number of pixels (`ny * nx`).
    pub fn pixel_count(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Check that the descriptor is usable by the projection engine.
    ///
    /// The engine itself never validates; loaders call this first.
    pub fn validate(&self) -> ViewerResult<()> {
        let positive = [
            ("semi_major_axis", self.semi_major_axis),
            ("semi_minor_axis", self.semi_minor_axis),
            ("perspective_point_height", self.perspective_point_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ViewerError::InvalidDescriptor(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !self.longitude_of_projection_origin.is_finite() {
            return Err(ViewerError::InvalidDescriptor(
                "longitude_of_projection_origin must be finite".to_string(),
            ));
        }

        if self.x.is_empty() || self.y.is_empty() {
            return Err(ViewerError::InvalidDescriptor(format!(
                "scan axes must be non-empty (nx={}, ny={})",
                self.nx(),
                self.ny()
            )));
        }

        if self.x.iter().chain(&self.y).any(|v| !v.is_finite()) {
            return Err(ViewerError::InvalidDescriptor(
                "scan angles must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Integer pixel position in a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub col: usize,
    pub row: usize,
}

impl PixelCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Position of a linear index in a grid `width` columns wide.
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            col: index % width,
            row: index / width,
        }
    }

    /// Linear index in a grid `width` columns wide.
    pub fn index(&self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// Per-pixel geodetic coordinates (degrees), flattened row-major.
///
/// NaN at an index means the scan ray misses the Earth. The field is
/// immutable once produced; reloads build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticField {
    nx: usize,
    ny: usize,
    lats: Vec<f32>,
    lons: Vec<f32>,
}

impl GeodeticField {
    /// Wrap already computed coordinate buffers without copying them.
    pub fn new(nx: usize, ny: usize, lats: Vec<f32>, lons: Vec<f32>) -> ViewerResult<Self> {
        let expected = nx * ny;
        for len in [lats.len(), lons.len()] {
            if len != expected {
                return Err(ViewerError::DimensionMismatch {
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self { nx, ny, lats, lons })
    }

    /// Wrap buffers produced by the projection engine, which always sizes
    /// them `nx * ny`.
    pub fn from_projection(nx: usize, ny: usize, lats: Vec<f32>, lons: Vec<f32>) -> Self {
        debug_assert_eq!(lats.len(), nx * ny);
        debug_assert_eq!(lons.len(), nx * ny);
        Self { nx, ny, lats, lons }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    pub fn lats(&self) -> &[f32] {
        &self.lats
    }

    pub fn lons(&self) -> &[f32] {
        &self.lons
    }

    /// Coordinate `(lat, lon)` at a linear pixel index. May contain NaN.
    pub fn get(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.lats.get(index)?, *self.lons.get(index)?))
    }

    /// Number of pixels with a finite coordinate pair.
    pub fn valid_count(&self) -> usize {
        self.lats
            .iter()
            .zip(&self.lons)
            .filter(|(lat, lon)| lat.is_finite() && lon.is_finite())
            .count()
    }

    /// Extents of the finite coordinates, or None for an all-space field.
    pub fn bounds(&self) -> Option<LatLonBounds> {
        LatLonBounds::from_points(&self.lats, &self.lons)
    }

    /// Give the coordinate buffers back to the caller.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.lats, self.lons)
    }
}
