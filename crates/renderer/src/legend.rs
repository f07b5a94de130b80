//! Colorbar legend: a translucent panel in one corner of the image with a
//! title, a gradient bar and min/max labels.

use std::fmt;
use std::str::FromStr;

use fixedgrid_common::{Domain, ScalarLayer, ViewerError};
use serde::{Deserialize, Serialize};
use tiny_skia::{
    GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, Shader, SpreadMode, Transform,
};
use tracing::warn;

use crate::gradient::{sample_gradient, Color};
use crate::palette::PaletteName;
use crate::text::{self, TextAlign, TextLayer};

/// Gradient samples across the domain (positions 0.00, 0.01, ... 1.00).
pub const LEGEND_SAMPLES: usize = 101;

/// Export width at which the legend is drawn at unit scale.
pub const LEGEND_REFERENCE_WIDTH: f32 = 1200.0;

const PANEL_WIDTH: f32 = 220.0;
const PANEL_HEIGHT: f32 = 60.0;
const PADDING: f32 = 10.0;
const BAR_HEIGHT: f32 = 20.0;
/// Space above the bar reserved for the title.
const TITLE_OFFSET: f32 = 15.0;
/// Title baseline below the top padding.
const TITLE_BASELINE: f32 = 12.0;
/// Label baseline below the bar.
const LABEL_BASELINE: f32 = 25.0;
const FONT_SIZE: f32 = 12.0;
const PANEL_COLOR: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 153,
};
const TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Corner the legend panel is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl LegendPosition {
    pub const ALL: [LegendPosition; 4] = [
        LegendPosition::TopLeft,
        LegendPosition::TopRight,
        LegendPosition::BottomLeft,
        LegendPosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::TopLeft => "top-left",
            LegendPosition::TopRight => "top-right",
            LegendPosition::BottomLeft => "bottom-left",
            LegendPosition::BottomRight => "bottom-right",
        }
    }

    fn is_bottom(&self) -> bool {
        matches!(self, LegendPosition::BottomLeft | LegendPosition::BottomRight)
    }

    fn is_right(&self) -> bool {
        matches!(self, LegendPosition::TopRight | LegendPosition::BottomRight)
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendPosition {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('_', "-");
        LegendPosition::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| ViewerError::RenderError(format!("unknown legend position: {}", s)))
    }
}

/// Legend scale for an export of the given width.
pub fn legend_scale(export_width: usize) -> f32 {
    (export_width as f32 / LEGEND_REFERENCE_WIDTH).max(0.5)
}

/// Panel and bar rectangles for a canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    pub panel_x: f32,
    pub panel_y: f32,
    pub panel_width: f32,
    pub panel_height: f32,
    pub bar_x: f32,
    pub bar_y: f32,
    pub bar_width: f32,
    pub bar_height: f32,
    pub title_baseline: f32,
    pub label_baseline: f32,
    pub font_size: f32,
}

impl LegendLayout {
    pub fn new(canvas_width: f32, canvas_height: f32, position: LegendPosition, scale: f32) -> Self {
        let panel_width = PANEL_WIDTH * scale;
        let panel_height = PANEL_HEIGHT * scale;
        let padding = PADDING * scale;

        let panel_x = if position.is_right() {
            canvas_width - panel_width - padding
        } else {
            padding
        };
        let panel_y = if position.is_bottom() {
            canvas_height - panel_height - padding
        } else {
            padding
        };

        let bar_y = panel_y + padding + TITLE_OFFSET * scale;
        let bar_height = BAR_HEIGHT * scale;
        Self {
            panel_x,
            panel_y,
            panel_width,
            panel_height,
            bar_x: panel_x + padding,
            bar_y,
            bar_width: panel_width - padding * 2.0,
            bar_height,
            title_baseline: panel_y + padding + TITLE_BASELINE * scale,
            label_baseline: panel_y + padding + bar_height + LABEL_BASELINE * scale,
            font_size: FONT_SIZE * scale,
        }
    }
}

/// Everything needed to draw a legend, also handed to hosting UIs that
/// draw their own colorbar.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub domain: Domain,
    pub palette: PaletteName,
    pub position: LegendPosition,
}

impl Legend {
    /// None when the domain has no finite values to describe.
    pub fn new(
        layer: &ScalarLayer,
        domain: Domain,
        palette: PaletteName,
        position: LegendPosition,
    ) -> Option<Self> {
        if domain.is_empty() {
            return None;
        }
        Some(Self {
            title: layer.legend_title().to_string(),
            domain,
            palette,
            position,
        })
    }

    pub fn min_label(&self) -> String {
        format!("{:.2}", self.domain.min)
    }

    pub fn max_label(&self) -> String {
        format!("{:.2}", self.domain.max)
    }

    /// Gradient stops as `(position, color)` pairs.
    pub fn stops(&self) -> Vec<(f32, Color)> {
        sample_gradient(self.domain.min, self.domain.max, self.palette, LEGEND_SAMPLES)
    }

    /// Draw onto `pixmap` at the given scale.
    pub fn draw(&self, pixmap: &mut Pixmap, scale: f32) {
        let layout = LegendLayout::new(pixmap.width() as f32, pixmap.height() as f32, self.position, scale);

        if let Some(panel) = Rect::from_xywh(
            layout.panel_x,
            layout.panel_y,
            layout.panel_width,
            layout.panel_height,
        ) {
            let mut paint = Paint::default();
            paint.set_color_rgba8(PANEL_COLOR.r, PANEL_COLOR.g, PANEL_COLOR.b, PANEL_COLOR.a);
            pixmap.fill_rect(panel, &paint, Transform::identity(), None);
        }

        if let Some(bar) = Rect::from_xywh(layout.bar_x, layout.bar_y, layout.bar_width, layout.bar_height) {
            let paint = Paint {
                shader: self.bar_shader(&layout),
                anti_alias: false,
                ..Paint::default()
            };
            pixmap.fill_rect(bar, &paint, Transform::identity(), None);
        }

        let Some(font) = text::load_font() else {
            warn!("Failed to load font for legend text");
            return;
        };
        // Text stays inside the panel.
        let mut layer = TextLayer::new(layout.panel_x, layout.panel_y, layout.panel_width, layout.panel_height);
        layer.draw(
            &font,
            &self.title,
            layout.panel_x + layout.panel_width / 2.0,
            layout.title_baseline,
            layout.font_size,
            TEXT_COLOR,
            TextAlign::Center,
        );
        layer.draw(
            &font,
            &self.min_label(),
            layout.bar_x,
            layout.label_baseline,
            layout.font_size,
            TEXT_COLOR,
            TextAlign::Left,
        );
        layer.draw(
            &font,
            &self.max_label(),
            layout.bar_x + layout.bar_width,
            layout.label_baseline,
            layout.font_size,
            TEXT_COLOR,
            TextAlign::Right,
        );
        layer.composite(pixmap);
    }

    fn bar_shader(&self, layout: &LegendLayout) -> Shader<'static> {
        let samples = self.stops();
        let first = to_skia(samples[0].1);
        if self.domain.is_degenerate() {
            return Shader::SolidColor(first);
        }

        let stops: Vec<GradientStop> = samples
            .into_iter()
            .map(|(pos, c)| GradientStop::new(pos, to_skia(c)))
            .collect();
        LinearGradient::new(
            Point::from_xy(layout.bar_x, 0.0),
            Point::from_xy(layout.bar_x + layout.bar_width, 0.0),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or(Shader::SolidColor(first))
    }
}

fn to_skia(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(units: &str) -> ScalarLayer {
        ScalarLayer::new("CMI", units, 1, 2, vec![200.0, 300.0]).unwrap()
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("top-left".parse::<LegendPosition>().unwrap(), LegendPosition::TopLeft);
        assert_eq!("Bottom_Right".parse::<LegendPosition>().unwrap(), LegendPosition::BottomRight);
        assert!("middle".parse::<LegendPosition>().is_err());
        assert_eq!(LegendPosition::default(), LegendPosition::BottomRight);
        assert_eq!(
            serde_json::to_string(&LegendPosition::TopRight).unwrap(),
            "\"top-right\""
        );
    }

    #[test]
    fn test_legend_scale() {
        assert_eq!(legend_scale(1200), 1.0);
        assert_eq!(legend_scale(2400), 2.0);
        assert_eq!(legend_scale(300), 0.5);
        assert_eq!(legend_scale(0), 0.5);
    }

    #[test]
    fn test_layout_corners() {
        let tl = LegendLayout::new(1000.0, 800.0, LegendPosition::TopLeft, 1.0);
        assert_eq!((tl.panel_x, tl.panel_y), (10.0, 10.0));
        assert_eq!((tl.bar_x, tl.bar_y), (20.0, 35.0));
        assert_eq!((tl.bar_width, tl.bar_height), (200.0, 20.0));

        let br = LegendLayout::new(1000.0, 800.0, LegendPosition::BottomRight, 1.0);
        assert_eq!((br.panel_x, br.panel_y), (770.0, 730.0));

        let tr = LegendLayout::new(1000.0, 800.0, LegendPosition::TopRight, 2.0);
        assert_eq!((tr.panel_x, tr.panel_y), (540.0, 20.0));
        assert_eq!((tr.panel_width, tr.panel_height), (440.0, 120.0));
    }

    #[test]
    fn test_title_and_labels() {
        let d = Domain::new(200.0, 300.0);
        let legend = Legend::new(&layer("K"), d, PaletteName::Viridis, LegendPosition::BottomLeft).unwrap();
        assert_eq!(legend.title, "K");
        assert_eq!(legend.min_label(), "200.00");
        assert_eq!(legend.max_label(), "300.00");

        let legend = Legend::new(&layer("1"), d, PaletteName::Viridis, LegendPosition::BottomLeft).unwrap();
        assert_eq!(legend.title, "CMI");
    }

    #[test]
    fn test_no_legend_for_empty_domain() {
        let legend = Legend::new(&layer("K"), Domain::EMPTY, PaletteName::Jet, LegendPosition::TopLeft);
        assert!(legend.is_none());
    }

    #[test]
    fn test_stops_cover_domain() {
        let legend = Legend::new(
            &layer("K"),
            Domain::new(0.0, 1.0),
            PaletteName::Grayscale,
            LegendPosition::TopLeft,
        )
        .unwrap();
        let stops = legend.stops();
        assert_eq!(stops.len(), LEGEND_SAMPLES);
        assert_eq!(stops[0].1, Color::new(0, 0, 0, 255));
        assert_eq!(stops[100].1, Color::new(255, 255, 255, 255));
    }

    #[test]
    fn test_draw_paints_panel_and_bar() {
        let mut pixmap = Pixmap::new(400, 200).unwrap();
        let legend = Legend::new(
            &layer("K"),
            Domain::new(0.0, 1.0),
            PaletteName::Grayscale,
            LegendPosition::TopLeft,
        )
        .unwrap();
        legend.draw(&mut pixmap, 1.0);

        // Panel corner: translucent black.
        let panel = pixmap.pixel(12, 12).unwrap();
        assert_eq!(panel.alpha(), 153);

        // Bar runs dark to light from left to right.
        let left = pixmap.pixel(21, 45).unwrap();
        let right = pixmap.pixel(218, 45).unwrap();
        assert_eq!(left.alpha(), 255);
        assert!(left.red() < 10);
        assert!(right.red() > 245);

        // Nothing outside the panel.
        assert_eq!(pixmap.pixel(300, 150).unwrap().alpha(), 0);
    }

    #[test]
    fn test_degenerate_domain_draws_flat_bar() {
        let mut pixmap = Pixmap::new(300, 100).unwrap();
        let legend = Legend::new(
            &layer("K"),
            Domain::new(5.0, 5.0),
            PaletteName::Jet,
            LegendPosition::TopLeft,
        )
        .unwrap();
        legend.draw(&mut pixmap, 1.0);
        let left = pixmap.pixel(25, 45).unwrap();
        let right = pixmap.pixel(210, 45).unwrap();
        assert_eq!(left, right);
        assert_eq!((left.red(), left.green(), left.blue()), (0, 0, 131));
    }

    fn text_pixels(pixmap: &Pixmap, x0: u32, x1: u32, y0: u32, y1: u32) -> usize {
        let mut n = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixmap.pixel(x, y).unwrap();
                if p.red() > 100 && p.green() > 100 && p.blue() > 100 {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_title_is_drawn_centered() {
        let mut pixmap = Pixmap::new(400, 200).unwrap();
        let legend = Legend::new(
            &layer("W m-2 sr-1 um-1"),
            Domain::new(0.0, 1.0),
            PaletteName::Viridis,
            LegendPosition::TopLeft,
        )
        .unwrap();
        legend.draw(&mut pixmap, 1.0);

        // Title band sits between the panel's top padding and the bar.
        let title = text_pixels(&pixmap, 10, 230, 20, 35);
        assert!(title > 40, "title inked {} pixels", title);
        // Centered on the panel: ink on both sides of x = 120.
        assert!(text_pixels(&pixmap, 10, 120, 20, 35) > 10);
        assert!(text_pixels(&pixmap, 120, 230, 20, 35) > 10);
    }

    #[test]
    fn test_different_titles_render_differently() {
        let render = |units: &str| {
            let mut pixmap = Pixmap::new(400, 200).unwrap();
            Legend::new(&layer(units), Domain::new(0.0, 1.0), PaletteName::Jet, LegendPosition::BottomRight)
                .unwrap()
                .draw(&mut pixmap, 2.0);
            pixmap
        };
        assert_ne!(render("K").data(), render("W m-2 sr-1 um-1").data());
    }

    #[test]
    fn test_labels_sit_below_bar() {
        let mut pixmap = Pixmap::new(400, 200).unwrap();
        let legend = Legend::new(
            &layer("K"),
            Domain::new(0.0, 1.0),
            PaletteName::Grayscale,
            LegendPosition::TopLeft,
        )
        .unwrap();
        legend.draw(&mut pixmap, 1.0);

        // Baseline at 65: "0.00" on the left, "1.00" right-aligned to 220.
        assert!(text_pixels(&pixmap, 20, 60, 55, 66) > 10);
        assert!(text_pixels(&pixmap, 180, 221, 55, 66) > 10);
        assert_eq!(text_pixels(&pixmap, 80, 160, 55, 70), 0);
    }
}
