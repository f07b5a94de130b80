//! Interactive view state for fixed-grid layers: pan/zoom transform,
//! tool modes, pixel picking, frame rendering and scaled export.

pub mod config;
pub mod data_view;
pub mod export;
pub mod pick;
pub mod view;

pub use config::ViewerConfig;
pub use data_view::{DataView, OverlaySettings, ToolMode};
pub use export::{export_dimensions, export_filename, ExportArtifact};
pub use pick::{pick_pixel, PickResult};
pub use view::ViewState;
