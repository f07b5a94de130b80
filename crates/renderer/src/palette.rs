//! Named palettes and their reversed variants.
//!
//! Every palette is resolved through a fixed table indexed by
//! [`PaletteName`]; the reversed stop lists are built once when the table
//! is first used.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use fixedgrid_common::ViewerError;
use serde::{Deserialize, Serialize};

const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [180, 222, 44],
    [253, 231, 37],
];

const JET: &[[u8; 3]] = &[
    [0, 0, 131],
    [0, 60, 170],
    [5, 255, 255],
    [255, 255, 0],
    [250, 100, 0],
    [240, 0, 0],
    [130, 0, 0],
];

const RAINBOW: &[[u8; 3]] = &[
    [150, 0, 90],
    [0, 0, 200],
    [0, 255, 0],
    [255, 255, 0],
    [255, 127, 0],
    [255, 0, 0],
];

/// Palette identifier. Parses from and displays as the lowercase name,
/// with `_r` for reversed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteName {
    Grayscale,
    GrayscaleR,
    #[default]
    Viridis,
    ViridisR,
    Jet,
    JetR,
    Rainbow,
    RainbowR,
}

impl PaletteName {
    /// Every palette, in table order.
    pub const ALL: [PaletteName; 8] = [
        PaletteName::Grayscale,
        PaletteName::GrayscaleR,
        PaletteName::Viridis,
        PaletteName::ViridisR,
        PaletteName::Jet,
        PaletteName::JetR,
        PaletteName::Rainbow,
        PaletteName::RainbowR,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteName::Grayscale => "grayscale",
            PaletteName::GrayscaleR => "grayscale_r",
            PaletteName::Viridis => "viridis",
            PaletteName::ViridisR => "viridis_r",
            PaletteName::Jet => "jet",
            PaletteName::JetR => "jet_r",
            PaletteName::Rainbow => "rainbow",
            PaletteName::RainbowR => "rainbow_r",
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.as_str().ends_with("_r")
    }

    /// The same palette with the opposite direction.
    pub fn reversed(&self) -> PaletteName {
        match self {
            PaletteName::Grayscale => PaletteName::GrayscaleR,
            PaletteName::GrayscaleR => PaletteName::Grayscale,
            PaletteName::Viridis => PaletteName::ViridisR,
            PaletteName::ViridisR => PaletteName::Viridis,
            PaletteName::Jet => PaletteName::JetR,
            PaletteName::JetR => PaletteName::Jet,
            PaletteName::Rainbow => PaletteName::RainbowR,
            PaletteName::RainbowR => PaletteName::Rainbow,
        }
    }

    /// Resolved palette from the shared table.
    pub fn palette(&self) -> &'static Palette {
        &table()[*self as usize]
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        PaletteName::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| ViewerError::UnknownPalette(s.to_string()))
    }
}

/// How a palette turns a normalized position into a color.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    /// Linear gray ramp; `reversed` maps `v` to `255 - v`.
    Gray { reversed: bool },
    /// Piecewise-linear interpolation between ordered RGB stops.
    Stops(Vec<[u8; 3]>),
}

impl Palette {
    fn stops(colors: &[[u8; 3]], reversed: bool) -> Self {
        let mut stops = colors.to_vec();
        if reversed {
            stops.reverse();
        }
        Palette::Stops(stops)
    }

    /// First stop color (black/white for the gray ramps).
    pub fn first_stop(&self) -> [u8; 3] {
        match self {
            Palette::Gray { reversed: false } => [0, 0, 0],
            Palette::Gray { reversed: true } => [255, 255, 255],
            Palette::Stops(stops) => stops[0],
        }
    }

    /// Last stop color (white/black for the gray ramps).
    pub fn last_stop(&self) -> [u8; 3] {
        match self {
            Palette::Gray { reversed: false } => [255, 255, 255],
            Palette::Gray { reversed: true } => [0, 0, 0],
            Palette::Stops(stops) => stops[stops.len() - 1],
        }
    }
}

fn table() -> &'static [Palette; 8] {
    static TABLE: OnceLock<[Palette; 8]> = OnceLock::new();
    TABLE.get_or_init(|| {
        // Same order as PaletteName::ALL
        [
            Palette::Gray { reversed: false },
            Palette::Gray { reversed: true },
            Palette::stops(VIRIDIS, false),
            Palette::stops(VIRIDIS, true),
            Palette::stops(JET, false),
            Palette::stops(JET, true),
            Palette::stops(RAINBOW, false),
            Palette::stops(RAINBOW, true),
        ]
    })
}
