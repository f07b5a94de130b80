//! Raster text for legend titles and labels.
//!
//! Text is drawn with imageproc into a transparent scratch image covering
//! only the region that holds it, then composited onto the pixmap.

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use tiny_skia::{IntSize, Pixmap, PixmapPaint, Transform};

/// Embedded font data - DejaVu Sans Mono
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

pub fn load_font() -> Option<Font<'static>> {
    Font::try_from_bytes(FONT_DATA)
}

/// Horizontal anchor of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Advance width of `text` at `size` pixels.
pub fn text_width(font: &Font<'_>, text: &str, size: f32) -> f32 {
    font.layout(text, Scale::uniform(size), point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Scratch area for text, positioned over a region of a pixmap.
pub struct TextLayer {
    x: i32,
    y: i32,
    image: RgbaImage,
}

impl TextLayer {
    /// Layer covering `[x, x + width) x [y, y + height)` in pixmap pixels.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let width = width.ceil().max(0.0) as u32;
        let height = height.ceil().max(0.0) as u32;
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
            image: ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    /// Draw `text` with its baseline at `baseline`. Coordinates are in
    /// pixmap pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        font: &Font<'_>,
        text: &str,
        x: f32,
        baseline: f32,
        size: f32,
        color: [u8; 4],
        align: TextAlign,
    ) {
        if text.is_empty() || !(size.is_finite() && size > 0.0) {
            return;
        }
        let scale = Scale::uniform(size);
        let width = text_width(font, text, size);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        // draw_text_mut places the top of the ascent at y.
        let top = baseline - font.v_metrics(scale).ascent;
        draw_text_mut(
            &mut self.image,
            Rgba(color),
            (left - self.x as f32).round() as i32,
            (top - self.y as f32).round() as i32,
            scale,
            font,
            text,
        );
    }

    /// Composite the drawn text onto `pixmap`.
    pub fn composite(self, pixmap: &mut Pixmap) {
        let (width, height) = self.image.dimensions();
        let Some(size) = IntSize::from_wh(width, height) else {
            return;
        };
        // Blending glyph coverage over transparent black scales every
        // channel, alpha included, by the coverage: the buffer is already
        // premultiplied.
        let Some(layer) = Pixmap::from_vec(self.image.into_raw(), size) else {
            return;
        };
        pixmap.draw_pixmap(
            self.x,
            self.y,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn inked(pixmap: &Pixmap, x0: u32, x1: u32, y0: u32, y1: u32) -> usize {
        let mut n = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                if pixmap.pixel(x, y).map_or(false, |p| p.alpha() > 128) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_font_loads() {
        let font = load_font().unwrap();
        // Monospace: every glyph advances the same amount.
        let one = text_width(&font, "0", 12.0);
        assert!(one > 5.0 && one < 10.0);
        assert!((text_width(&font, "0000", 12.0) - 4.0 * one).abs() < 0.01);
        assert_eq!(text_width(&font, "", 12.0), 0.0);
    }

    #[test]
    fn test_draw_left_and_right_aligned() {
        let font = load_font().unwrap();
        let mut pixmap = Pixmap::new(200, 40).unwrap();
        let mut layer = TextLayer::new(0.0, 0.0, 200.0, 40.0);
        layer.draw(&font, "123", 10.0, 30.0, 20.0, WHITE, TextAlign::Left);
        layer.draw(&font, "456", 190.0, 30.0, 20.0, WHITE, TextAlign::Right);
        layer.composite(&mut pixmap);

        assert!(inked(&pixmap, 10, 60, 10, 31) > 20);
        assert!(inked(&pixmap, 140, 190, 10, 31) > 20);
        assert_eq!(inked(&pixmap, 70, 130, 0, 40), 0);
        // Nothing below the baseline for digits.
        assert_eq!(inked(&pixmap, 0, 200, 33, 40), 0);
    }

    #[test]
    fn test_centered_text_straddles_anchor() {
        let font = load_font().unwrap();
        let mut pixmap = Pixmap::new(200, 40).unwrap();
        let mut layer = TextLayer::new(50.0, 5.0, 100.0, 30.0);
        layer.draw(&font, "TITLE", 100.0, 25.0, 16.0, WHITE, TextAlign::Center);
        layer.composite(&mut pixmap);

        let left = inked(&pixmap, 50, 100, 0, 40);
        let right = inked(&pixmap, 100, 150, 0, 40);
        assert!(left > 10 && right > 10);
        assert_eq!(inked(&pixmap, 0, 50, 0, 40), 0);
    }

    #[test]
    fn test_text_is_clipped_to_layer() {
        let font = load_font().unwrap();
        let mut pixmap = Pixmap::new(100, 40).unwrap();
        let mut layer = TextLayer::new(0.0, 0.0, 30.0, 40.0);
        layer.draw(&font, "88888888", 0.0, 30.0, 20.0, WHITE, TextAlign::Left);
        layer.composite(&mut pixmap);
        assert!(inked(&pixmap, 0, 30, 0, 40) > 0);
        assert_eq!(inked(&pixmap, 30, 100, 0, 40), 0);
    }

    #[test]
    fn test_colored_text_stays_premultiplied() {
        let font = load_font().unwrap();
        let mut pixmap = Pixmap::new(60, 30).unwrap();
        let mut layer = TextLayer::new(0.0, 0.0, 60.0, 30.0);
        layer.draw(&font, "8", 10.0, 24.0, 24.0, [255, 0, 0, 255], TextAlign::Left);
        layer.composite(&mut pixmap);
        for p in pixmap.pixels() {
            assert!(p.red() <= p.alpha());
            assert_eq!(p.green(), 0);
        }
    }
}
