//! Vector boundary features (GeoJSON polygons) drawn over a layer.
//!
//! Vertices are `[longitude, latitude]`, as in GeoJSON.

use crate::ViewerResult;
use serde::{Deserialize, Serialize};

/// A linear ring or path of `[lon, lat]` vertices.
pub type Ring = Vec<[f64; 2]>;

/// Supported geometry types. Anything else deserializes to `Unsupported`
/// and is skipped when drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// Every ring of the geometry, in document order.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &[[f64; 2]]> + '_> {
        match self {
            Geometry::Polygon { coordinates } => Box::new(coordinates.iter().map(Vec::as_slice)),
            Geometry::MultiPolygon { coordinates } => Box::new(
                coordinates
                    .iter()
                    .flat_map(|poly| poly.iter().map(Vec::as_slice)),
            ),
            Geometry::Unsupported => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn polygon(rings: Vec<Ring>) -> Self {
        Self {
            geometry: Some(Geometry::Polygon { coordinates: rings }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON FeatureCollection document.
    pub fn from_geojson(json: &str) -> ViewerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All rings across all features, skipping null geometries.
    pub fn rings(&self) -> impl Iterator<Item = &[[f64; 2]]> + '_ {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(Geometry::rings)
    }
}
