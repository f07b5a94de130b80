//! View configuration for the export tool.
//!
//! Precedence: command-line flags, then the YAML file if one is given,
//! otherwise `FIXEDGRID_*` environment variables, then defaults.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use renderer::{LegendPosition, PaletteName};
use viewer::ViewerConfig;

/// Flag values that override the loaded configuration when set.
#[derive(Debug, Clone, Default)]
pub struct ViewOverrides {
    pub palette: Option<PaletteName>,
    pub overlay_color: Option<String>,
    pub overlay_width: Option<f32>,
    pub legend_position: Option<LegendPosition>,
    pub no_overlay: bool,
    pub no_legend: bool,
}

impl ViewOverrides {
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        if let Some(color) = &self.overlay_color {
            config.overlay_color = color.clone();
        }
        if let Some(width) = self.overlay_width {
            config.overlay_width = width;
        }
        if let Some(position) = self.legend_position {
            config.legend_position = position;
        }
        if self.no_overlay {
            config.show_overlay = false;
        }
        if self.no_legend {
            config.show_legend = false;
        }
    }
}

/// Load, override and validate the view configuration.
pub fn load_view_config(path: Option<&Path>, overrides: &ViewOverrides) -> Result<ViewerConfig> {
    let mut config = match path {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read view config {}", path.display()))?;
            serde_yaml::from_str(&yaml)
                .with_context(|| format!("failed to parse view config {}", path.display()))?
        }
        None => ViewerConfig::from_env(),
    };

    overrides.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow!("invalid view config: {}", e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Color;
    use test_utils::temp_test_dir;

    #[test]
    fn test_overrides_win() {
        let mut config = ViewerConfig::default();
        ViewOverrides {
            palette: Some(PaletteName::JetR),
            overlay_width: Some(1.5),
            no_legend: true,
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.palette, PaletteName::JetR);
        assert_eq!(config.overlay_width, 1.5);
        assert!(!config.show_legend);
        assert!(config.show_overlay);
    }

    #[test]
    fn test_yaml_file() {
        let dir = temp_test_dir();
        let path = dir.path().join("view.yaml");
        std::fs::write(&path, "palette: rainbow\noverlay_color: '#ff0000'\n").unwrap();

        let config = load_view_config(Some(&path), &ViewOverrides::default()).unwrap();
        assert_eq!(config.palette, PaletteName::Rainbow);
        assert_eq!(config.coastline_color(), Color::new(255, 0, 0, 255));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = ViewOverrides {
            overlay_color: Some("teal".to_string()),
            ..Default::default()
        };
        let dir = temp_test_dir();
        let path = dir.path().join("view.yaml");
        std::fs::write(&path, "{}\n").unwrap();
        assert!(load_view_config(Some(&path), &overrides).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_view_config(Some(Path::new("/nonexistent/view.yaml")), &ViewOverrides::default());
        assert!(err.is_err());
    }
}
