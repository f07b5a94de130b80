//! Pan/zoom transform between screen and data pixel space.

use tiny_skia::Transform;

/// Uniform-scale, non-rotating affine transform.
///
/// `screen = data * scale + pan`. Owned by a single view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub pan_x: f64,
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewState {
    pub fn new(pan_x: f64, pan_y: f64, scale: f64) -> Self {
        Self { pan_x, pan_y, scale }
    }

    /// Transform that fits a `data_w x data_h` image into the viewport,
    /// scaled by `margin` and centered.
    ///
    /// An empty viewport or empty data leaves the identity transform.
    pub fn fit(view_w: f64, view_h: f64, data_w: f64, data_h: f64, margin: f64) -> Self {
        if view_w <= 0.0 || view_h <= 0.0 || data_w <= 0.0 || data_h <= 0.0 {
            return Self::default();
        }
        let scale = (view_w / data_w).min(view_h / data_h) * margin;
        Self {
            pan_x: (view_w - data_w * scale) / 2.0,
            pan_y: (view_h - data_h * scale) / 2.0,
            scale,
        }
    }

    pub fn screen_to_data(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.scale, (y - self.pan_y) / self.scale)
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.pan_x, y * self.scale + self.pan_y)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the scale by `factor`, never going below `min_scale`.
    pub fn zoom(&mut self, factor: f64, min_scale: f64) {
        self.scale = (self.scale * factor).max(min_scale);
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_row(
            self.scale as f32,
            0.0,
            0.0,
            self.scale as f32,
            self.pan_x as f32,
            self.pan_y as f32,
        )
    }
}
