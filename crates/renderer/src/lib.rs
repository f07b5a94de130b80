//! Rendering for fixed-grid scalar layers.
//!
//! - [`palette`] / [`gradient`]: named palettes and the value-to-color map
//! - [`raster`]: colorizing a whole layer into a bitmap
//! - [`overlay`]: snapping and stroking lat/lon vector geometry
//! - [`legend`]: colorbar panel
//! - [`text`]: font rendering for legend text
//! - [`png`]: PNG encoding

pub mod gradient;
pub mod legend;
pub mod overlay;
pub mod palette;
pub mod png;
pub mod raster;
pub mod text;

pub use gradient::{colorize, sample_gradient, Color};
pub use legend::{legend_scale, Legend, LegendLayout, LegendPosition};
pub use overlay::{project_features, project_rings, stroke_polylines, OverlayStyle, Polyline};
pub use palette::{Palette, PaletteName};
pub use png::{encode_pixmap, encode_png_auto};
pub use raster::{composite, CompositeResult, RasterImage};
