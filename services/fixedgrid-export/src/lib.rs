//! Batch export of fixed-grid layers to PNG.
//!
//! Reads an input bundle (projection parameters, one scalar layer and
//! optional coastline/boundary features), projects the grid, and writes
//! the composited export.

pub mod bundle;
pub mod config;
pub mod pipeline;

pub use bundle::InputBundle;
pub use config::{load_view_config, ViewOverrides};
pub use pipeline::{run_export, ExportSummary};
