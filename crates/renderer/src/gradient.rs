//! Scalar-to-RGBA color mapping.
//!
//! `colorize` is total: NaN renders transparent, out-of-range values clamp
//! to the end stops, and a degenerate domain renders a flat color.

use crate::palette::{Palette, PaletteName};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 255)
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Gray used for every value of a single-valued layer.
const FLAT_GRAY: Color = Color {
    r: 128,
    g: 128,
    b: 128,
    a: 255,
};

/// Linear interpolation between two stops, rounded to the nearest level.
fn interpolate_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> Color {
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::new(lerp(c1[0], c2[0]), lerp(c1[1], c2[1]), lerp(c1[2], c2[2]), 255)
}

/// Map a value to a color within `[min, max]` using the named palette.
pub fn colorize(value: f32, min: f32, max: f32, palette: PaletteName) -> Color {
    colorize_with(value, min, max, palette.palette())
}

/// Map a value to a color with an already resolved palette.
pub fn colorize_with(value: f32, min: f32, max: f32, palette: &Palette) -> Color {
    if value.is_nan() {
        return Color::transparent();
    }

    if min == max {
        return match palette {
            Palette::Gray { .. } => FLAT_GRAY,
            Palette::Stops(stops) => Color::opaque(stops[0]),
        };
    }

    let t = (value as f64 - min as f64) / (max as f64 - min as f64);
    if t.is_nan() {
        // Infinite or NaN domain bounds
        return Color::transparent();
    }

    match palette {
        Palette::Gray { reversed } => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            let v = if *reversed { 255 - v } else { v };
            Color::new(v, v, v, 255)
        }
        Palette::Stops(stops) => {
            if t < 0.0 {
                return Color::opaque(stops[0]);
            }
            if t > 1.0 {
                return Color::opaque(stops[stops.len() - 1]);
            }
            let pos = t * (stops.len() - 1) as f64;
            let i1 = pos.floor() as usize;
            let i2 = pos.ceil() as usize;
            if i1 == i2 {
                return Color::opaque(stops[i1]);
            }
            interpolate_color(stops[i1], stops[i2], pos - i1 as f64)
        }
    }
}

/// Evenly spaced colors across a domain, `samples` of them (at least 2).
///
/// Used for legend gradients: position `i / (samples - 1)` maps to
/// `min + (max - min) * i / (samples - 1)`.
pub fn sample_gradient(min: f32, max: f32, palette: PaletteName, samples: usize) -> Vec<(f32, Color)> {
    let samples = samples.max(2);
    let resolved = palette.palette();
    (0..samples)
        .map(|i| {
            let pos = i as f32 / (samples - 1) as f32;
            let value = if min == max { min } else { min + (max - min) * pos };
            (pos, colorize_with(value, min, max, resolved))
        })
        .collect()
}
