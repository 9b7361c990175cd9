//! Layout export

use anyhow::Context;
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use skillz_core::constants::catalog::LAYOUT_FILE;
use skillz_core::layout::export_layout;
use skillz_core::LayoutMap;

use crate::error::AppError;
use crate::types::LayoutExportRequest;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", post(export))
        .route("/save", post(save))
}

/// Rounded positions for the submitted live nodes
async fn export(Json(req): Json<LayoutExportRequest>) -> Json<LayoutMap> {
    Json(export_layout(&req.nodes))
}

/// Write the exported layout to `<public_dir>/layout.json` and apply it
async fn save(
    State(state): State<AppState>,
    Json(req): Json<LayoutExportRequest>,
) -> Result<Json<LayoutMap>, AppError> {
    let layout = export_layout(&req.nodes);

    let path = state.settings.public_dir.join(LAYOUT_FILE);
    let text = serde_json::to_string_pretty(&layout).context("Failed to encode layout")?;
    tokio::fs::write(&path, text)
        .await
        .with_context(|| format!("Failed to write {:?}", path))?;
    info!("Saved {} positions to {:?}", layout.len(), path);

    let mut session = state.session.write().await;
    for (id, position) in &layout {
        session.set_position(id, *position);
    }

    Ok(Json(layout))
}
