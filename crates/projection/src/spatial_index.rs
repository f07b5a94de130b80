//! Uniform bucket grid over a geodetic field for approximate
//! nearest-pixel lookup.
//!
//! Used to snap lat/lon vector geometry onto the non-rectilinear sensor
//! grid. Accuracy depends on point density per bucket, which is fine for
//! overlay drawing but not for measurement.

use std::sync::Arc;

use fixedgrid_common::{GeodeticField, LatLonBounds, PixelCoord};
use tracing::debug;

/// Bucket divisions per axis. Overlays line up with the sensor grid the
/// same way at every load only when this stays fixed.
pub const DEFAULT_GRID_DIVISIONS: usize = 100;

/// Immutable spatial index built once per geospatial source and shared
/// read-only (behind an `Arc`) by every view of that source.
#[derive(Debug)]
pub struct SpatialIndex {
    field: Arc<GeodeticField>,
    bounds: LatLonBounds,
    divisions: usize,
    lat_step: f64,
    lon_step: f64,
    /// `divisions * divisions` buckets of linear pixel indices.
    buckets: Vec<Vec<u32>>,
}

impl SpatialIndex {
    /// Build with [`DEFAULT_GRID_DIVISIONS`].
    ///
    /// Returns None when the field has no finite coordinate pair; callers
    /// skip overlay features in that case.
    pub fn build(field: Arc<GeodeticField>) -> Option<Self> {
        Self::build_with_divisions(field, DEFAULT_GRID_DIVISIONS)
    }

    /// Build with a custom number of divisions per axis (at least 1).
    pub fn build_with_divisions(field: Arc<GeodeticField>, divisions: usize) -> Option<Self> {
        let bounds = field.bounds()?;
        let divisions = divisions.max(1);
        let lat_step = bounds.lat_span() / divisions as f64;
        let lon_step = bounds.lon_span() / divisions as f64;

        let mut index = Self {
            field: Arc::clone(&field),
            bounds,
            divisions,
            lat_step,
            lon_step,
            buckets: vec![Vec::new(); divisions * divisions],
        };

        let mut indexed = 0usize;
        for (i, (&lat, &lon)) in field.lats().iter().zip(field.lons()).enumerate() {
            if !lat.is_finite() || !lon.is_finite() {
                continue;
            }
            let bucket = index.bucket_of(lat as f64, lon as f64);
            index.buckets[bucket].push(i as u32);
            indexed += 1;
        }

        debug!(
            points = indexed,
            divisions,
            min_lat = bounds.min_lat,
            max_lat = bounds.max_lat,
            min_lon = bounds.min_lon,
            max_lon = bounds.max_lon,
            "Built spatial index"
        );

        Some(index)
    }

    /// Bucket cell along one axis, clamped into `[0, divisions)`.
    #[inline]
    fn cell(&self, value: f64, min: f64, step: f64) -> usize {
        if step <= 0.0 {
            return 0;
        }
        let cell = ((value - min) / step).floor();
        // NaN and negative casts saturate to 0.
        (cell as usize).min(self.divisions - 1)
    }

    #[inline]
    fn bucket_of(&self, lat: f64, lon: f64) -> usize {
        let row = self.cell(lat, self.bounds.min_lat, self.lat_step);
        let col = self.cell(lon, self.bounds.min_lon, self.lon_step);
        row * self.divisions + col
    }

    /// Find the pixel closest to `(lat, lon)` among the candidates of the
    /// query's bucket.
    ///
    /// Returns None outside the indexed bounding box, for an empty bucket,
    /// or when the best candidate is further than twice the bucket
    /// diagonal.
    pub fn nearest_pixel(&self, lat: f64, lon: f64) -> Option<PixelCoord> {
        let index = self.nearest_index(lat, lon)?;
        Some(PixelCoord::from_index(index, self.field.nx()))
    }

    /// Like [`nearest_pixel`](Self::nearest_pixel) but returns the linear index.
    pub fn nearest_index(&self, lat: f64, lon: f64) -> Option<usize> {
        if !self.bounds.contains(lat, lon) {
            return None;
        }

        let lats = self.field.lats();
        let lons = self.field.lons();

        let mut best: Option<(usize, f64)> = None;
        for &candidate in &self.buckets[self.bucket_of(lat, lon)] {
            let i = candidate as usize;
            let dlat = lat - lats[i] as f64;
            let dlon = lon - lons[i] as f64;
            let dist_sq = dlat * dlat + dlon * dlon;
            if best.map_or(true, |(_, d)| dist_sq < d) {
                best = Some((i, dist_sq));
            }
        }

        let (i, dist_sq) = best?;
        let max_dist = 2.0 * (self.lat_step * self.lat_step + self.lon_step * self.lon_step).sqrt();
        if dist_sq.sqrt() > max_dist {
            return None;
        }
        Some(i)
    }

    pub fn bounds(&self) -> LatLonBounds {
        self.bounds
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Bucket size in degrees, `(lat_step, lon_step)`.
    pub fn steps(&self) -> (f64, f64) {
        (self.lat_step, self.lon_step)
    }

    /// The field this index was built from.
    pub fn field(&self) -> &Arc<GeodeticField> {
        &self.field
    }

    /// Number of indexed (finite) points.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
