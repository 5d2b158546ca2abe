//! Drawing loader: JSON stroke list on disk -> `Vec<PictureLine>`.

use std::path::Path;

use jackbox_core::error::{JackboxError, Result};
use jackbox_core::model::PictureLine;

/// Load a drawing. No size or stroke-count limits.
pub async fn load_drawing(path: impl AsRef<Path>) -> Result<Vec<PictureLine>> {
    let path = path.as_ref();
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| JackboxError::NotFound(format!("{}: {e}", path.display())))?;

    let lines: Vec<PictureLine> = serde_json::from_slice(&contents)
        .map_err(|e| JackboxError::Malformed(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), strokes = lines.len(), "drawing loaded");
    Ok(lines)
}
