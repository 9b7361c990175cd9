//! Catalog endpoints: graph, node details, reload

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use skillz_core::Graph;

use crate::error::AppError;
use crate::types::{NodeDetailResponse, ReloadResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/graph", get(graph))
        .route("/nodes/:id", get(node_detail))
        .route("/reload", post(reload))
}

/// Positioned nodes and edges for the current layout
async fn graph(State(state): State<AppState>) -> Json<Graph> {
    Json(state.session.read().await.graph())
}

async fn node_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeDetailResponse>, AppError> {
    let session = state.session.read().await;
    let node = session.node(&id).ok_or_else(|| AppError::unknown_node(&id))?;

    Ok(Json(NodeDetailResponse {
        label: node.label.clone(),
        breadcrumb: session.breadcrumb(&id),
        ancestors: session.ancestors(&id),
        description: session.describe(&id),
        id,
    }))
}

async fn reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    state.reload().await;

    let session = state.session.read().await;
    let response = ReloadResponse {
        nodes: session.catalog().nodes().len(),
        documents: session.contents().len(),
    };
    info!(
        "Reloaded catalog: {} nodes, {} documents",
        response.nodes, response.documents
    );
    Json(response)
}
