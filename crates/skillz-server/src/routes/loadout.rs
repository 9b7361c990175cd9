//! Loadout stitching for a client-held selection

use axum::{extract::State, routing::post, Json, Router};

use skillz_core::loadout::{build_export, format_token_count, list_items, total_tokens};

use crate::types::{LoadoutRequest, LoadoutResponse};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(loadout))
}

async fn loadout(
    State(state): State<AppState>,
    Json(req): Json<LoadoutRequest>,
) -> Json<LoadoutResponse> {
    let session = state.session.read().await;
    let catalog = session.catalog();

    let items = list_items(
        &req.selected,
        catalog.nodes(),
        catalog.parents(),
        session.contents(),
    );
    let export = build_export(
        &req.selected,
        catalog.nodes(),
        session.contents(),
        catalog.overview_path(),
    );
    let total = total_tokens(&items);

    Json(LoadoutResponse {
        items,
        export,
        total_tokens: total,
        total_tokens_label: format_token_count(total),
    })
}
