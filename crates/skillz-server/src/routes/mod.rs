//! API routes

use axum::Router;

use crate::AppState;

mod catalog;
mod layout;
mod loadout;
mod selection;

/// Build the API router with all endpoints
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/selection", selection::router())
        .nest("/loadout", loadout::router())
        .nest("/layout", layout::router())
}
