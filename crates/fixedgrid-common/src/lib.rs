//! Common types shared by the projection, rendering and viewer crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod layer;
pub mod overlay;

pub use bbox::LatLonBounds;
pub use error::{ViewerError, ViewerResult};
pub use grid::{GeodeticField, GridDescriptor, PixelCoord};
pub use layer::{Domain, ScalarLayer};
pub use overlay::{Feature, FeatureCollection, Geometry};
