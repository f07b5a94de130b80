//! Scalar measurement layers handed over by the ingestion side.

use crate::{ViewerError, ViewerResult};
use serde::{Deserialize, Serialize};

/// The `[min, max]` range used to normalize values before color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f32,
    pub max: f32,
}

impl Domain {
    /// Domain of a layer with no finite values.
    pub const EMPTY: Domain = Domain {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Single pass min/max over the finite values.
    ///
    /// Returns [`Domain::EMPTY`] if nothing is finite.
    pub fn scan(values: &[f32]) -> Self {
        values
            .iter()
            .filter(|v| v.is_finite())
            .fold(Self::EMPTY, |d, &v| Self {
                min: d.min.min(v),
                max: d.max.max(v),
            })
    }

    /// True when no finite value contributed to the domain.
    pub fn is_empty(&self) -> bool {
        self.min.is_nan() || self.max.is_nan() || self.min > self.max
    }

    /// True when every value maps to the same color.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// A named 2-D scalar array, already unpacked (scale/offset applied,
/// fill values replaced by NaN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarLayer {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_units")]
    pub units: String,
    /// `[rows, cols]`
    pub dims: [usize; 2],
    pub values: Vec<f32>,
    #[serde(default)]
    pub domain: Option<Domain>,
}

fn default_units() -> String {
    "N/A".to_string()
}

impl ScalarLayer {
    /// Create a layer, checking that `values` matches `rows * cols`.
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        rows: usize,
        cols: usize,
        values: Vec<f32>,
    ) -> ViewerResult<Self> {
        let layer = Self {
            name: name.into(),
            title: None,
            units: units.into(),
            dims: [rows, cols],
            values,
            domain: None,
        };
        layer.validate()?;
        Ok(layer)
    }

    /// Attach a precomputed domain.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Attach a display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check the value count against the declared dimensions.
    pub fn validate(&self) -> ViewerResult<()> {
        let expected = self.rows() * self.cols();
        if self.values.len() != expected {
            return Err(ViewerError::DimensionMismatch {
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.dims[0]
    }

    pub fn cols(&self) -> usize {
        self.dims[1]
    }

    /// Value at a pixel, or None when out of bounds.
    pub fn value_at(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.cols() || row >= self.rows() {
            return None;
        }
        self.values.get(row * self.cols() + col).copied()
    }

    /// The supplied domain if present, otherwise one computed from the values.
    pub fn effective_domain(&self) -> Domain {
        self.domain.unwrap_or_else(|| Domain::scan(&self.values))
    }

    /// Title used for exports and view headers.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Legend caption: the layer name for dimensionless layers, else the units.
    pub fn legend_title(&self) -> &str {
        match self.units.as_str() {
            "1" => &self.name,
            "" => "N/A",
            units => units,
        }
    }
}
