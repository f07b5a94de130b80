//! Full-resolution export at an arbitrary scale factor.
//!
//! The export is recomposited rather than resampled from the viewport:
//! bitmap, overlays and legend are drawn directly at the output size, and
//! stroke widths and legend proportions scale with the factor.

use std::time::Instant;

use fixedgrid_common::{ViewerError, ViewerResult};
use renderer::{encode_pixmap, legend_scale, stroke_polylines};
use tiny_skia::{Pixmap, Transform};
use tracing::info;

use crate::data_view::{nearest_paint, DataView};

/// An encoded export image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Output dimensions for a `rows x cols` layer: `floor(dim * factor)`.
pub fn export_dimensions(rows: usize, cols: usize, scale_factor: f64) -> ViewerResult<(u32, u32)> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(ViewerError::InvalidScale(scale_factor));
    }
    let width = (cols as f64 * scale_factor).floor();
    let height = (rows as f64 * scale_factor).floor();
    if width < 1.0 || height < 1.0 || width > u32::MAX as f64 || height > u32::MAX as f64 {
        return Err(ViewerError::InvalidScale(scale_factor));
    }
    Ok((width as u32, height as u32))
}

/// `{TITLE}_{W}X{H}.png`, with every non-alphanumeric character of the
/// title replaced by `_` and the result uppercased.
pub fn export_filename(title: &str, width: u32, height: u32) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{}_{}X{}.png", stem, width, height)
}

impl DataView {
    /// Coastline stroke width in export pixels: the interactive width
    /// carried into data space, then scaled by the export factor.
    pub fn export_stroke_width(&self, scale_factor: f64) -> f32 {
        (self.settings().width as f64 / self.view_state().scale * scale_factor) as f32
    }

    /// Render and encode the layer at `scale_factor` times its native size.
    pub fn export(&self, scale_factor: f64) -> ViewerResult<ExportArtifact> {
        let start = Instant::now();
        let layer = self.layer();
        let (width, height) = export_dimensions(layer.rows(), layer.cols(), scale_factor)?;

        let mut canvas = Pixmap::new(width, height)
            .ok_or_else(|| ViewerError::RenderError(format!("cannot allocate {}x{} export", width, height)))?;

        if let Some(bitmap) = self.bitmap() {
            // Stretch to the floored output size exactly.
            let sx = width as f32 / layer.cols() as f32;
            let sy = height as f32 / layer.rows() as f32;
            canvas.draw_pixmap(0, 0, bitmap.as_ref(), &nearest_paint(), Transform::from_scale(sx, sy), None);
        }

        let settings = self.settings();
        if settings.visible {
            let factor = scale_factor as f32;
            let transform = Transform::from_scale(factor, factor);
            // Widths in data pixels; the transform applies the factor.
            let coast_width = settings.width / self.view_state().scale as f32;
            stroke_polylines(&mut canvas, self.coastline_lines(), settings.color, coast_width, transform);
            stroke_polylines(
                &mut canvas,
                self.boundary_lines(),
                settings.boundary_color,
                coast_width / 2.0,
                transform,
            );
        }

        if let Some(legend) = self.legend() {
            legend.draw(&mut canvas, legend_scale(width as usize));
        }

        let png = encode_pixmap(&canvas)?;
        let filename = export_filename(layer.display_title(), width, height);

        info!(
            filename = %filename,
            width,
            height,
            scale_factor,
            bytes = png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Exported layer"
        );

        Ok(ExportArtifact {
            filename,
            width,
            height,
            png,
        })
    }
}
