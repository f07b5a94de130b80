//! Colorizing a whole scalar layer into an RGBA bitmap.

use std::time::Instant;

use fixedgrid_common::{Domain, ScalarLayer, ViewerError, ViewerResult};
use rayon::prelude::*;
use tracing::debug;

use crate::gradient::colorize_with;
use crate::palette::PaletteName;

/// Row-major RGBA bitmap, 4 bytes per pixel.
///
/// Pixels are either fully opaque or fully transparent black, so the
/// buffer is also valid premultiplied RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// RGBA at a pixel, or None when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Hand the buffer over to a tiny-skia pixmap for compositing. The
    /// pixels are moved, not copied.
    pub fn into_pixmap(self) -> ViewerResult<tiny_skia::Pixmap> {
        let size = tiny_skia::IntSize::from_wh(self.width as u32, self.height as u32)
            .ok_or_else(|| {
                ViewerError::RenderError(format!("invalid bitmap size {}x{}", self.width, self.height))
            })?;
        tiny_skia::Pixmap::from_vec(self.pixels, size)
            .ok_or_else(|| ViewerError::RenderError("bitmap buffer has wrong length".to_string()))
    }
}

/// A layer colorized with one palette, plus the domain that was used.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResult {
    pub image: RasterImage,
    pub domain: Domain,
    pub palette: PaletteName,
}

/// Colorize every value of `layer` into a `cols x rows` bitmap.
///
/// Uses the layer's supplied domain when present, otherwise one finite
/// min/max scan. O(rows * cols); callers cache the result per
/// (layer, palette) instead of recomputing it per frame.
pub fn composite(layer: &ScalarLayer, palette: PaletteName) -> CompositeResult {
    let start = Instant::now();
    let (rows, cols) = (layer.rows(), layer.cols());
    let domain = layer.effective_domain();
    let resolved = palette.palette();

    let mut image = RasterImage::new(cols, rows);
    if cols > 0 && rows > 0 {
        image
            .pixels
            .par_chunks_mut(cols * 4)
            .zip(layer.values.par_chunks(cols))
            .for_each(|(out_row, values)| {
                for (px, &v) in out_row.chunks_exact_mut(4).zip(values) {
                    px.copy_from_slice(&colorize_with(v, domain.min, domain.max, resolved).to_array());
                }
            });
    }

    debug!(
        layer = %layer.name,
        rows,
        cols,
        palette = %palette,
        min = domain.min,
        max = domain.max,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Composited layer"
    );

    CompositeResult {
        image,
        domain,
        palette,
    }
}
