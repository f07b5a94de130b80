//! Pixel picking: screen point to value and geolocation.

use fixedgrid_common::{GeodeticField, PixelCoord, ScalarLayer};
use serde::Serialize;

use crate::view::ViewState;

/// Value under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickResult {
    pub layer_title: String,
    pub value: f32,
    /// Layer units, `N/A` when the layer has none.
    pub units: String,
    /// Geodetic coordinate of the pixel; NaN when the pixel is unsolvable,
    /// None when the layer has no geolocation.
    pub lat: Option<f32>,
    pub lon: Option<f32>,
    pub pixel: PixelCoord,
    /// Screen position the pick came from.
    pub screen: (f64, f64),
}

/// Pick the layer pixel under `(screen_x, screen_y)`.
///
/// Returns None off the data or on a NaN value. The geolocation is read
/// by linear index from `field`, not resolved through the spatial index.
pub fn pick_pixel(
    layer: &ScalarLayer,
    field: Option<&GeodeticField>,
    view: &ViewState,
    screen_x: f64,
    screen_y: f64,
) -> Option<PickResult> {
    let (dx, dy) = view.screen_to_data(screen_x, screen_y);
    let (col, row) = (dx.floor(), dy.floor());
    if !(col >= 0.0 && row >= 0.0) {
        return None;
    }
    let pixel = PixelCoord::new(col as usize, row as usize);

    let value = layer.value_at(pixel.col, pixel.row)?;
    if value.is_nan() {
        return None;
    }

    let index = pixel.index(layer.cols());
    let coord = field.and_then(|f| f.get(index));

    let units = if layer.units.is_empty() {
        "N/A".to_string()
    } else {
        layer.units.clone()
    };

    Some(PickResult {
        layer_title: layer.display_title().to_string(),
        value,
        units,
        lat: coord.map(|(lat, _)| lat),
        lon: coord.map(|(_, lon)| lon),
        pixel,
        screen: (screen_x, screen_y),
    })
}
