//! Background execution of the projection engine.
//!
//! The geodetic field costs one inverse navigation per pixel, so it is
//! computed on tokio's blocking pool instead of the interactive path.
//! Each submission gets a generation number; when a newer load has been
//! submitted, older results are reported as superseded and must be
//! dropped by the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fixedgrid_common::{GeodeticField, GridDescriptor, LatLonBounds, ViewerError, ViewerResult};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::geostationary::compute_geodetic_field;

/// Handle to the background projection engine.
///
/// Owned by the dataset-loading pipeline; cloning shares the generation
/// counter, so any clone's submission supersedes earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ProjectionWorker {
    latest: Arc<AtomicU64>,
}

/// A pending projection result.
#[derive(Debug)]
pub struct ProjectionTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
    handle: JoinHandle<GeodeticField>,
}

/// Completed projection with the extents of its finite coordinates.
#[derive(Debug)]
pub struct ProjectionOutput {
    pub field: GeodeticField,
    pub bounds: Option<LatLonBounds>,
}

impl ProjectionWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start projecting `descriptor` on the blocking pool.
    ///
    /// Must be called from within a tokio runtime. Supersedes every
    /// earlier submission made through this handle or its clones.
    pub fn submit(&self, descriptor: GridDescriptor) -> ProjectionTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            generation,
            nx = descriptor.nx(),
            ny = descriptor.ny(),
            "Submitting projection"
        );

        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let field = compute_geodetic_field(&descriptor);
            info!(
                generation,
                pixels = field.len(),
                valid = field.valid_count(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Projection complete"
            );
            field
        });

        ProjectionTicket {
            generation,
            latest: Arc::clone(&self.latest),
            handle,
        }
    }

    /// Generation number of the most recent submission (0 if none).
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl ProjectionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer submission has been made.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Wait for the field. The buffers are moved out of the worker, not
    /// copied.
    ///
    /// Returns [`ViewerError::Superseded`] if a newer load was submitted
    /// before the result arrived.
    pub async fn wait(self) -> ViewerResult<ProjectionOutput> {
        let field = self
            .handle
            .await
            .map_err(|e| ViewerError::TaskFailed(e.to_string()))?;

        if self.latest.load(Ordering::SeqCst) != self.generation {
            debug!(generation = self.generation, "Dropping stale projection result");
            return Err(ViewerError::Superseded);
        }

        let bounds = field.bounds();
        if let Some(b) = bounds {
            info!(
                min_lat = b.min_lat,
                max_lat = b.max_lat,
                min_lon = b.min_lon,
                max_lon = b.max_lon,
                "Geodetic domain"
            );
        }
        Ok(ProjectionOutput { field, bounds })
    }
}
