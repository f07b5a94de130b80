//! Configuration for a data view.

use renderer::{Color, LegendPosition, PaletteName};
use serde::{Deserialize, Serialize};

/// View defaults: palette, overlay styling, legend and transform limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Palette applied to newly loaded layers.
    pub palette: PaletteName,

    /// Coastline stroke color as `#rrggbb` or `#rrggbbaa`.
    pub overlay_color: String,

    /// Boundary stroke color. Defaults to the overlay color at alpha 0x99.
    pub boundary_color: Option<String>,

    /// Coastline stroke width in screen pixels; boundaries use half.
    pub overlay_width: f32,

    pub show_overlay: bool,

    pub show_legend: bool,

    pub legend_position: LegendPosition,

    /// Spatial index bucket divisions per axis.
    pub index_divisions: usize,

    /// Fraction of the viewport the data fills after reset-to-fit.
    pub fit_margin: f64,

    /// Smallest zoom scale reachable by relative zoom.
    pub min_scale: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            palette: PaletteName::Viridis,
            overlay_color: "#00ffff".to_string(),
            boundary_color: None,
            overlay_width: 5.0,
            show_overlay: true,
            show_legend: true,
            legend_position: LegendPosition::BottomRight,
            index_divisions: projection::DEFAULT_GRID_DIVISIONS,
            fit_margin: 0.95,
            min_scale: 0.1,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from environment variables. Unparseable values
    /// keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("FIXEDGRID_PALETTE") {
            if let Ok(palette) = val.parse() {
                config.palette = palette;
            }
        }

        if let Ok(val) = std::env::var("FIXEDGRID_OVERLAY_COLOR") {
            config.overlay_color = val;
        }

        if let Ok(val) = std::env::var("FIXEDGRID_OVERLAY_WIDTH") {
            if let Ok(width) = val.parse() {
                config.overlay_width = width;
            }
        }

        if let Ok(val) = std::env::var("FIXEDGRID_SHOW_OVERLAY") {
            config.show_overlay = parse_bool(&val);
        }

        if let Ok(val) = std::env::var("FIXEDGRID_SHOW_LEGEND") {
            config.show_legend = parse_bool(&val);
        }

        if let Ok(val) = std::env::var("FIXEDGRID_LEGEND_POSITION") {
            if let Ok(position) = val.parse() {
                config.legend_position = position;
            }
        }

        if let Ok(val) = std::env::var("FIXEDGRID_INDEX_DIVISIONS") {
            if let Ok(divisions) = val.parse() {
                config.index_divisions = divisions;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if Color::from_hex(&self.overlay_color).is_none() {
            return Err(format!("overlay_color is not a hex color: {}", self.overlay_color));
        }

        if let Some(boundary) = &self.boundary_color {
            if Color::from_hex(boundary).is_none() {
                return Err(format!("boundary_color is not a hex color: {}", boundary));
            }
        }

        if !self.overlay_width.is_finite() || self.overlay_width < 0.0 {
            return Err("overlay_width must be >= 0".to_string());
        }

        if self.index_divisions == 0 {
            return Err("index_divisions must be > 0".to_string());
        }

        if !(self.fit_margin > 0.0 && self.fit_margin <= 1.0) {
            return Err("fit_margin must be in (0, 1]".to_string());
        }

        if !(self.min_scale > 0.0 && self.min_scale.is_finite()) {
            return Err("min_scale must be > 0".to_string());
        }

        Ok(())
    }

    /// Parsed coastline color; falls back to cyan when invalid.
    pub fn coastline_color(&self) -> Color {
        Color::from_hex(&self.overlay_color).unwrap_or(Color::new(0, 255, 255, 255))
    }

    /// Parsed boundary color.
    pub fn boundary_color(&self) -> Color {
        self.boundary_color
            .as_deref()
            .and_then(Color::from_hex)
            .unwrap_or_else(|| self.coastline_color().with_alpha(renderer::overlay::BOUNDARY_ALPHA))
    }
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.index_divisions, 100);
        assert_eq!(config.coastline_color(), Color::new(0, 255, 255, 255));
        assert_eq!(config.boundary_color(), Color::new(0, 255, 255, 0x99));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ViewerConfig {
            overlay_color: "cyan".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = ViewerConfig {
            index_divisions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = ViewerConfig {
            fit_margin: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = ViewerConfig {
            min_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = ViewerConfig {
            boundary_color: Some("#12".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_boundary_color() {
        let config = ViewerConfig {
            boundary_color: Some("#ff000080".to_string()),
            ..Default::default()
        };
        assert_eq!(config.boundary_color(), Color::new(255, 0, 0, 0x80));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "palette: jet_r\nlegend_position: top-left\nshow_overlay: false\n";
        let config: ViewerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.palette, PaletteName::JetR);
        assert_eq!(config.legend_position, LegendPosition::TopLeft);
        assert!(!config.show_overlay);
        assert_eq!(config.overlay_width, 5.0);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("FIXEDGRID_PALETTE", "rainbow");
        std::env::set_var("FIXEDGRID_OVERLAY_WIDTH", "2.5");
        std::env::set_var("FIXEDGRID_SHOW_LEGEND", "false");
        std::env::set_var("FIXEDGRID_INDEX_DIVISIONS", "not-a-number");

        let config = ViewerConfig::from_env();
        assert_eq!(config.palette, PaletteName::Rainbow);
        assert_eq!(config.overlay_width, 2.5);
        assert!(!config.show_legend);
        assert_eq!(config.index_divisions, 100);

        std::env::remove_var("FIXEDGRID_PALETTE");
        std::env::remove_var("FIXEDGRID_OVERLAY_WIDTH");
        std::env::remove_var("FIXEDGRID_SHOW_LEGEND");
        std::env::remove_var("FIXEDGRID_INDEX_DIVISIONS");
    }
}
