//! Vector overlay stroking.
//!
//! Overlay vertices are `[lon, lat]` pairs. Each one is snapped onto the
//! sensor grid through the spatial index and drawn at its pixel
//! coordinate in data space; the caller's transform maps data space to
//! the output surface.

use fixedgrid_common::FeatureCollection;
use projection::SpatialIndex;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::gradient::Color;

/// Alpha applied to the overlay color for administrative boundaries.
pub const BOUNDARY_ALPHA: u8 = 0x99;

/// A connected run of resolved vertices, in data-pixel coordinates.
pub type Polyline = Vec<(f32, f32)>;

/// Stroke color and width. The width is in output pixels before the
/// view scale is divided out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub color: Color,
    pub width: f32,
}

impl OverlayStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Coastlines use the overlay color and width unchanged.
    pub fn coastline(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Boundaries are drawn translucent at half width.
    pub fn boundary(color: Color, width: f32) -> Self {
        Self::new(color.with_alpha(BOUNDARY_ALPHA), width / 2.0)
    }
}

/// Resolve rings of `[lon, lat]` vertices into polylines.
///
/// A vertex the index cannot resolve ends the current polyline; the next
/// resolved vertex starts a new one, so no segment bridges an unmapped
/// region. Runs with fewer than two vertices are dropped since they draw
/// nothing.
pub fn project_rings<'a, I>(rings: I, index: &SpatialIndex) -> Vec<Polyline>
where
    I: IntoIterator<Item = &'a [[f64; 2]]>,
{
    let mut polylines = Vec::new();
    for ring in rings {
        let mut current: Polyline = Vec::new();
        for &[lon, lat] in ring {
            match index.nearest_pixel(lat, lon) {
                Some(pixel) => current.push((pixel.col as f32, pixel.row as f32)),
                None => flush(&mut polylines, &mut current),
            }
        }
        flush(&mut polylines, &mut current);
    }
    polylines
}

fn flush(polylines: &mut Vec<Polyline>, current: &mut Polyline) {
    if current.len() >= 2 {
        polylines.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Resolve every ring of a feature collection.
pub fn project_features(features: &FeatureCollection, index: &SpatialIndex) -> Vec<Polyline> {
    project_rings(features.rings(), index)
}

/// Stroke polylines given in data space.
///
/// `data_width` is the stroke width in data pixels; `transform` maps data
/// space onto the pixmap and scales the stroke with it.
pub fn stroke_polylines(
    pixmap: &mut Pixmap,
    polylines: &[Polyline],
    color: Color,
    data_width: f32,
    transform: Transform,
) {
    if polylines.is_empty() || data_width.is_nan() || data_width <= 0.0 {
        return;
    }

    let mut pb = PathBuilder::new();
    for line in polylines {
        let mut points = line.iter();
        if let Some(&(x, y)) = points.next() {
            pb.move_to(x, y);
        }
        for &(x, y) in points {
            pb.line_to(x, y);
        }
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: data_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}
