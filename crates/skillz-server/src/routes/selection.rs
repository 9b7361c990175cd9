//! Selection toggles
//!
//! The client owns the selection and sends it with every request.

use axum::{extract::State, routing::post, Json, Router};

use skillz_core::selection::{highlighted_ancestors, highlighted_edges, toggle_subtree};

use crate::error::AppError;
use crate::types::{ToggleRequest, ToggleResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/toggle", post(toggle))
}

async fn toggle(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    if req.id.is_empty() {
        return Err(AppError::BadRequest("Missing node id".to_string()));
    }

    let session = state.session.read().await;
    let catalog = session.catalog();
    let node = catalog
        .node(&req.id)
        .ok_or_else(|| AppError::unknown_node(&req.id))?;

    let selected = toggle_subtree(node, &req.selected);
    Ok(Json(ToggleResponse {
        highlighted_ancestors: highlighted_ancestors(&selected, catalog.parents()),
        highlighted_edges: highlighted_edges(&selected, catalog.parents()),
        selected,
    }))
}
