//! Skillz Server
//!
//! Serves a prepared catalog: the manifest, layout and skill documents as
//! static files, plus a JSON API over the core (graph, node details,
//! selection toggles, loadout stitching, layout export).
//! This is a library crate; the server is started via `start_server()`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::Method, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use skillz_core::constants::catalog::SKILLS_URL_PREFIX;
use skillz_core::{CatalogSession, DocumentFetcher, Settings, SiteFetcher};

pub mod error;
pub mod routes;
pub mod types;

/// Configuration for starting the server.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub settings: Settings,
}

impl From<Settings> for ServerConfig {
    fn from(settings: Settings) -> Self {
        Self { settings }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Where the catalog is (re)loaded from
    pub fetcher: Arc<dyn DocumentFetcher>,
    /// Current catalog; replaced wholesale on reload
    pub session: Arc<RwLock<CatalogSession>>,
}

impl AppState {
    /// Load the catalog from the local public and skills directories
    pub async fn load(settings: Settings) -> Self {
        let fetcher: Arc<dyn DocumentFetcher> =
            Arc::new(SiteFetcher::new(&settings.public_dir, &settings.skills_dir));
        Self::with_fetcher(settings, fetcher).await
    }

    pub async fn with_fetcher(settings: Settings, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let session =
            CatalogSession::load(fetcher.as_ref(), &settings.origin, &settings.app_name).await;
        Self {
            settings: Arc::new(settings),
            fetcher,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Load a fresh session and swap it in
    pub async fn reload(&self) {
        let next = CatalogSession::load(
            self.fetcher.as_ref(),
            &self.settings.origin,
            &self.settings.app_name,
        )
        .await;
        *self.session.write().await = next;
    }
}

/// Router for an already loaded state
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let skills = ServeDir::new(&state.settings.skills_dir);
    let public = ServeDir::new(&state.settings.public_dir);

    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_router())
        .nest_service(&format!("/{}", SKILLS_URL_PREFIX), skills)
        .fallback_service(public)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the catalog and build the Axum router.
pub async fn build_router(config: &ServerConfig) -> (Router, AppState) {
    let state = AppState::load(config.settings.clone()).await;
    (router(state.clone()), state)
}

/// Start the skillz server and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.settings.port).parse()?;
    let (app, _state) = build_router(&config).await;

    tracing::info!("Skillz server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, Response};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    pub const MANIFEST: &str = r#"{"overviewPath": "skills/OVERVIEW.md", "tree": {"id": "root", "type": "root", "children": [
        {"id": "cat-docs", "label": "docs", "type": "category", "children": [
            {"id": "skill-pdf", "label": "pdf", "type": "skill", "skillPath": "skills/docs/pdf/SKILL.md"},
            {"id": "skill-xlsx", "label": "xlsx", "type": "skill", "skillPath": "skills/docs/xlsx/SKILL.md"}
        ]},
        {"id": "skill-playground", "label": "playground", "type": "skill", "skillPath": "skills/misc/playground/SKILL.md"}
    ]}}"#;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    /// A prepared site on disk with its loaded state
    pub async fn site() -> (TempDir, AppState) {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            skills_dir: temp.path().join("skills"),
            public_dir: temp.path().join("public"),
            origin: "https://skills.test".to_string(),
            ..Settings::default()
        };

        write(&settings.public_dir.join("skills.json"), MANIFEST);
        write(
            &settings.skills_dir.join("docs/pdf/SKILL.md"),
            "---\nname: pdf\ndescription: Read and write PDF files\n---\n# PDF\nSee ${baseUrl}${skillPath}/forms.md",
        );
        write(&settings.skills_dir.join("docs/xlsx/SKILL.md"), "# XLSX");
        write(&settings.skills_dir.join("misc/playground/SKILL.md"), "# Playground");
        write(&settings.skills_dir.join("OVERVIEW.md"), "# Overview");

        let state = AppState::load(settings).await;
        (temp, state)
    }

    pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
        router(state.clone()).oneshot(request).await.unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
