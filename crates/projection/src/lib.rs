//! Geostationary fixed-grid navigation.
//!
//! - [`geostationary`]: scan angle <-> lat/lon math and the full-grid
//!   projection engine
//! - [`spatial_index`]: bucket grid for snapping lat/lon vertices onto
//!   sensor pixels
//! - [`worker`]: runs the projection engine off the interactive path

pub mod geostationary;
pub mod spatial_index;
pub mod worker;

pub use geostationary::{compute_geodetic_field, Geostationary};
pub use spatial_index::{SpatialIndex, DEFAULT_GRID_DIVISIONS};
pub use worker::{ProjectionOutput, ProjectionTicket, ProjectionWorker};
