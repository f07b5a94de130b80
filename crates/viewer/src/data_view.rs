//! Per-layer interactive view.
//!
//! A `DataView` owns its transform and tool state and caches the
//! colorized bitmap and the resolved overlay polylines, so pan, zoom,
//! pick and frame rendering cost O(viewport) rather than O(data).
//! The bitmap is rebuilt only when the layer or palette changes.

use std::str::FromStr;
use std::sync::Arc;

use fixedgrid_common::{Domain, FeatureCollection, GeodeticField, ScalarLayer, ViewerError, ViewerResult};
use projection::SpatialIndex;
use renderer::{
    composite, project_features, stroke_polylines, Color, Legend, LegendPosition,
    OverlayStyle, PaletteName, Polyline,
};
use serde::{Deserialize, Serialize};
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint};
use tracing::debug;

use crate::config::ViewerConfig;
use crate::pick::{pick_pixel, PickResult};
use crate::view::ViewState;

/// Viewport background.
const BACKGROUND: Color = Color {
    r: 0x22,
    g: 0x22,
    b: 0x22,
    a: 255,
};

/// Wheel zoom factors.
pub const WHEEL_ZOOM_OUT: f64 = 0.95;
pub const WHEEL_ZOOM_IN: f64 = 1.05;

/// What pointer input does in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Pan,
    Picker,
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pan" => Ok(ToolMode::Pan),
            "picker" | "pick" => Ok(ToolMode::Picker),
            other => Err(format!("unknown tool mode: {}", other)),
        }
    }
}

/// Overlay and legend settings of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    pub visible: bool,
    pub color: Color,
    pub boundary_color: Color,
    pub width: f32,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
}

impl OverlaySettings {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            visible: config.show_overlay,
            color: config.coastline_color(),
            boundary_color: config.boundary_color(),
            width: config.overlay_width,
            show_legend: config.show_legend,
            legend_position: config.legend_position,
        }
    }

    pub fn coastline_style(&self) -> OverlayStyle {
        OverlayStyle::coastline(self.color, self.width)
    }

    pub fn boundary_style(&self) -> OverlayStyle {
        OverlayStyle::new(self.boundary_color, self.width / 2.0)
    }
}

/// Interactive view of one scalar layer.
#[derive(Debug)]
pub struct DataView {
    layer: Arc<ScalarLayer>,
    field: Option<Arc<GeodeticField>>,
    index: Option<Arc<SpatialIndex>>,
    palette: PaletteName,
    domain: Domain,
    bitmap: Option<Pixmap>,

    view: ViewState,
    viewport: (u32, u32),
    fit_margin: f64,
    min_scale: f64,
    tool: ToolMode,
    drag_anchor: Option<(f64, f64)>,

    settings: OverlaySettings,
    coastlines: Option<Arc<FeatureCollection>>,
    boundaries: Option<Arc<FeatureCollection>>,
    coastline_lines: Vec<Polyline>,
    boundary_lines: Vec<Polyline>,
}

impl DataView {
    /// Create a view of `layer` fitted to a `width x height` viewport.
    pub fn new(layer: Arc<ScalarLayer>, config: &ViewerConfig, width: u32, height: u32) -> ViewerResult<Self> {
        layer.validate()?;
        let (domain, bitmap) = build_bitmap(&layer, config.palette)?;
        let mut view = Self {
            layer,
            field: None,
            index: None,
            palette: config.palette,
            domain,
            bitmap,
            view: ViewState::default(),
            viewport: (width, height),
            fit_margin: config.fit_margin,
            min_scale: config.min_scale,
            tool: ToolMode::default(),
            drag_anchor: None,
            settings: OverlaySettings::from_config(config),
            coastlines: None,
            boundaries: None,
            coastline_lines: Vec::new(),
            boundary_lines: Vec::new(),
        };
        view.reset_to_fit();
        Ok(view)
    }

    /// Replace the layer. Recolorizes, resets the transform and drops the
    /// geolocation; the loader attaches the new source's field again.
    pub fn set_layer(&mut self, layer: Arc<ScalarLayer>) -> ViewerResult<()> {
        layer.validate()?;
        let (domain, bitmap) = build_bitmap(&layer, self.palette)?;
        debug!(layer = %layer.name, rows = layer.rows(), cols = layer.cols(), "Loaded layer into view");
        self.layer = layer;
        self.domain = domain;
        self.bitmap = bitmap;
        self.clear_geolocation();
        self.reset_to_fit();
        Ok(())
    }

    /// Attach the projected coordinates and, when one could be built, the
    /// spatial index of the layer's geospatial source.
    pub fn set_geolocation(
        &mut self,
        field: Arc<GeodeticField>,
        index: Option<Arc<SpatialIndex>>,
    ) -> ViewerResult<()> {
        if field.nx() != self.layer.cols() || field.ny() != self.layer.rows() {
            return Err(ViewerError::DimensionMismatch {
                expected: self.layer.values.len(),
                actual: field.len(),
            });
        }
        if index.is_none() {
            debug!(layer = %self.layer.name, "No spatial index; overlays disabled for this view");
        }
        self.field = Some(field);
        self.index = index;
        self.refresh_overlays();
        Ok(())
    }

    pub fn clear_geolocation(&mut self) {
        self.field = None;
        self.index = None;
        self.refresh_overlays();
    }

    /// Switch palettes; recolorizes only when the palette changes.
    pub fn set_palette(&mut self, palette: PaletteName) -> ViewerResult<()> {
        if palette == self.palette {
            return Ok(());
        }
        let (domain, bitmap) = build_bitmap(&self.layer, palette)?;
        self.palette = palette;
        self.domain = domain;
        self.bitmap = bitmap;
        Ok(())
    }

    pub fn set_coastlines(&mut self, features: Option<Arc<FeatureCollection>>) {
        self.coastlines = features;
        self.refresh_overlays();
    }

    pub fn set_boundaries(&mut self, features: Option<Arc<FeatureCollection>>) {
        self.boundaries = features;
        self.refresh_overlays();
    }

    fn refresh_overlays(&mut self) {
        let resolve = |features: &Option<Arc<FeatureCollection>>| match (features, &self.index) {
            (Some(f), Some(index)) => project_features(f, index),
            _ => Vec::new(),
        };
        self.coastline_lines = resolve(&self.coastlines);
        self.boundary_lines = resolve(&self.boundaries);
    }

    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.settings.visible = visible;
    }

    /// Set the coastline color; boundaries follow at reduced alpha.
    pub fn set_overlay_color(&mut self, color: Color) {
        self.settings.color = color;
        self.settings.boundary_color = color.with_alpha(renderer::overlay::BOUNDARY_ALPHA);
    }

    pub fn set_overlay_width(&mut self, width: f32) {
        self.settings.width = width.max(0.0);
    }

    pub fn set_legend_visible(&mut self, visible: bool) {
        self.settings.show_legend = visible;
    }

    pub fn set_legend_position(&mut self, position: LegendPosition) {
        self.settings.legend_position = position;
    }

    pub fn set_tool_mode(&mut self, tool: ToolMode) {
        self.tool = tool;
        self.drag_anchor = None;
    }

    /// Resize the viewport. The transform is left alone.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn set_view_state(&mut self, view: ViewState) {
        self.view = view;
    }

    // --- transform transitions ---

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    /// Relative zoom. A factor of exactly 1 resets to fit.
    pub fn zoom(&mut self, factor: f64) {
        if factor == 1.0 {
            self.reset_to_fit();
        } else {
            self.view.zoom(factor, self.min_scale);
        }
    }

    /// Wheel zoom: scrolling down (positive delta) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.zoom(factor);
    }

    pub fn reset_to_fit(&mut self) {
        let (w, h) = self.viewport;
        self.view = ViewState::fit(
            w as f64,
            h as f64,
            self.layer.cols() as f64,
            self.layer.rows() as f64,
            self.fit_margin,
        );
    }

    /// Start a pan drag. Ignored outside pan mode.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if self.tool == ToolMode::Pan {
            self.drag_anchor = Some((x, y));
        }
    }

    /// Pan by the movement since the last drag position.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if self.tool != ToolMode::Pan {
            return;
        }
        if let Some((last_x, last_y)) = self.drag_anchor {
            self.view.pan(x - last_x, y - last_y);
            self.drag_anchor = Some((x, y));
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Pick the pixel under a screen point. Ignored outside picker mode.
    pub fn pick(&self, screen_x: f64, screen_y: f64) -> Option<PickResult> {
        if self.tool != ToolMode::Picker {
            return None;
        }
        pick_pixel(&self.layer, self.field.as_deref(), &self.view, screen_x, screen_y)
    }

    /// Legend description for the hosting UI, when enabled and the layer
    /// has finite values.
    pub fn legend(&self) -> Option<Legend> {
        if !self.settings.show_legend {
            return None;
        }
        Legend::new(
            &self.layer,
            self.domain,
            self.palette,
            self.settings.legend_position,
        )
    }

    /// Render the viewport: background, transformed bitmap, overlays.
    pub fn render_frame(&self, width: u32, height: u32) -> ViewerResult<Pixmap> {
        let mut frame = Pixmap::new(width, height)
            .ok_or_else(|| ViewerError::RenderError(format!("invalid frame size {}x{}", width, height)))?;
        frame.fill(tiny_skia::Color::from_rgba8(BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, BACKGROUND.a));

        let transform = self.view.to_transform();
        if let Some(bitmap) = &self.bitmap {
            frame.draw_pixmap(0, 0, bitmap.as_ref(), &nearest_paint(), transform, None);
        }

        if self.settings.visible {
            let scale = self.view.scale as f32;
            let coast = self.settings.coastline_style();
            let boundary = self.settings.boundary_style();
            stroke_polylines(&mut frame, &self.coastline_lines, coast.color, coast.width / scale, transform);
            stroke_polylines(&mut frame, &self.boundary_lines, boundary.color, boundary.width / scale, transform);
        }

        Ok(frame)
    }

    // --- accessors ---

    pub fn layer(&self) -> &Arc<ScalarLayer> {
        &self.layer
    }

    pub fn field(&self) -> Option<&Arc<GeodeticField>> {
        self.field.as_ref()
    }

    pub fn spatial_index(&self) -> Option<&Arc<SpatialIndex>> {
        self.index.as_ref()
    }

    pub fn palette(&self) -> PaletteName {
        self.palette
    }

    /// Value domain the bitmap was colorized with.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Colorized layer, `cols x rows`. None for an empty layer.
    pub fn bitmap(&self) -> Option<&Pixmap> {
        self.bitmap.as_ref()
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    pub(crate) fn coastline_lines(&self) -> &[Polyline] {
        &self.coastline_lines
    }

    pub(crate) fn boundary_lines(&self) -> &[Polyline] {
        &self.boundary_lines
    }
}

pub(crate) fn nearest_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    }
}

/// Colorize a layer and move the result into a drawable pixmap. Empty
/// layers have no pixmap.
fn build_bitmap(layer: &ScalarLayer, palette: PaletteName) -> ViewerResult<(Domain, Option<Pixmap>)> {
    let result = composite(layer, palette);
    let bitmap = if result.image.width > 0 && result.image.height > 0 {
        Some(result.image.into_pixmap()?)
    } else {
        None
    };
    Ok((result.domain, bitmap))
}
