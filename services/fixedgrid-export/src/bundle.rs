//! Input bundle: everything an export needs, as one JSON document.

use std::path::Path;

use anyhow::{bail, Context, Result};
use fixedgrid_common::{FeatureCollection, GridDescriptor, ScalarLayer};
use serde::{Deserialize, Serialize};

/// `{ projection, layer, coastlines?, boundaries? }`
///
/// The layer holds already unpacked values: scale/offset applied and
/// fill values replaced by NaN (`null` in JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBundle {
    pub projection: GridDescriptor,
    pub layer: LayerInput,
    #[serde(default)]
    pub coastlines: Option<FeatureCollection>,
    #[serde(default)]
    pub boundaries: Option<FeatureCollection>,
}

/// Layer as it appears in JSON; `null` values stand for missing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerInput {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    pub dims: [usize; 2],
    pub values: Vec<Option<f32>>,
    #[serde(default)]
    pub domain: Option<fixedgrid_common::Domain>,
}

impl LayerInput {
    pub fn into_layer(self) -> Result<ScalarLayer> {
        let values = self.values.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect();
        let mut layer = ScalarLayer::new(
            self.name,
            self.units.unwrap_or_else(|| "N/A".to_string()),
            self.dims[0],
            self.dims[1],
            values,
        )
        .context("layer values do not match dims")?;
        layer.title = self.title;
        layer.domain = self.domain;
        Ok(layer)
    }
}

impl InputBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse input bundle")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Validate the descriptor and layer and check that they describe the
    /// same grid. Returns the layer ready for viewing.
    pub fn validate(&self) -> Result<()> {
        self.projection
            .validate()
            .context("invalid projection parameters")?;

        let [rows, cols] = self.layer.dims;
        if rows != self.projection.ny() || cols != self.projection.nx() {
            bail!(
                "layer dims [{}, {}] do not match projection grid [{}, {}]",
                rows,
                cols,
                self.projection.ny(),
                self.projection.nx()
            );
        }
        Ok(())
    }
}
