//! Load-project-index-export pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use projection::{ProjectionWorker, SpatialIndex};
use serde::Serialize;
use tracing::{info, warn};
use viewer::{DataView, ViewState, ViewerConfig};

use crate::bundle::InputBundle;

/// What was written.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub valid_pixels: usize,
    pub overlays_drawn: bool,
}

/// Export `bundle` at `scale` times its native size into `out_dir`.
///
/// The view is the identity view (one screen pixel per data pixel), so
/// overlay stroke widths in the output are `overlay_width * scale`.
pub async fn run_export(
    bundle: InputBundle,
    config: &ViewerConfig,
    scale: f64,
    out_dir: &Path,
) -> Result<ExportSummary> {
    let start = Instant::now();
    bundle.validate()?;

    let InputBundle {
        projection,
        layer,
        coastlines,
        boundaries,
    } = bundle;
    let layer = Arc::new(layer.into_layer()?);

    let worker = ProjectionWorker::new();
    let output = worker
        .submit(projection)
        .wait()
        .await
        .context("projection failed")?;

    let field = Arc::new(output.field);
    let valid_pixels = field.valid_count();
    let index = SpatialIndex::build_with_divisions(Arc::clone(&field), config.index_divisions).map(Arc::new);
    if index.is_none() {
        warn!(layer = %layer.name, "No pixel sees the Earth; overlays disabled");
    }
    let overlays_drawn = config.show_overlay && index.is_some() && (coastlines.is_some() || boundaries.is_some());

    let width = layer.cols() as u32;
    let height = layer.rows() as u32;
    let mut view = DataView::new(layer, config, width, height)?;
    view.set_view_state(ViewState::default());
    view.set_geolocation(field, index)?;
    view.set_coastlines(coastlines.map(Arc::new));
    view.set_boundaries(boundaries.map(Arc::new));

    let artifact = view.export(scale)?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(&artifact.filename);
    tokio::fs::write(&path, &artifact.png)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        width = artifact.width,
        height = artifact.height,
        valid_pixels,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Export written"
    );

    Ok(ExportSummary {
        path,
        width: artifact.width,
        height: artifact.height,
        bytes: artifact.png.len(),
        valid_pixels,
        overlays_drawn,
    })
}
