//! Error types for the fixed-grid viewer crates.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for ingestion, rendering and export.
///
/// The projection math, colorizer and spatial index are total and never
/// produce one of these; NaN carries "no data" through those stages.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Ingestion Errors ===
    #[error("Invalid grid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid overlay data: {0}")]
    InvalidOverlay(String),

    // === Rendering Errors ===
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Invalid export scale factor: {0}")]
    InvalidScale(f64),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("PNG encoding failed: {0}")]
    EncodeError(String),

    // === Background Work ===
    #[error("Projection result superseded by a newer load")]
    Superseded,

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::InvalidOverlay(err.to_string())
    }
}
