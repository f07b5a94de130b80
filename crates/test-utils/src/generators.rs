//! Test data generators for creating synthetic sensor-like data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use fixedgrid_common::ScalarLayer;

/// Creates a test grid with brightness-temperature-like values in Kelvin.
///
/// The values range from approximately 250K to 310K, a gradient pattern
/// similar to an infrared channel over a clear scene.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
///
/// # Returns
///
/// A `Vec<f32>` with temperature values in Kelvin.
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            // Create a gradient from cold (top-left) to warm (bottom-right)
            let x_factor = col as f32 / width.max(1) as f32;
            let y_factor = row as f32 / height.max(1) as f32;
            // Temperature range: 250K to 310K
            let temp = 250.0 + (x_factor * 30.0) + (y_factor * 30.0);
            data.push(temp);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
///
/// Useful for testing edge cases and simple scenarios.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `value` - The constant value to fill
///
/// # Returns
///
/// A `Vec<f32>` filled with the constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a full-disk style grid: a radial gradient inside the inscribed
/// circle and NaN outside it (pixels looking into space).
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
///
/// # Returns
///
/// A `Vec<f32>` with values in `[0, 1]` on the disk and NaN off it.
pub fn create_disk_grid(width: usize, height: usize) -> Vec<f32> {
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let radius = cx.min(cy).max(0.5);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            let r = (dx * dx + dy * dy).sqrt() / radius;
            data.push(if r <= 1.0 { 1.0 - r } else { f32::NAN });
        }
    }
    data
}

/// Creates a named layer from a generated grid.
///
/// Panics if `values` does not hold `width * height` entries.
pub fn create_layer(name: &str, units: &str, width: usize, height: usize, values: Vec<f32>) -> ScalarLayer {
    ScalarLayer::new(name, units, height, width, values).expect("generated grid has wrong size")
}
