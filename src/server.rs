//! HTTP API wrapper over the legislation client.
//!
//! Exposes the remote search/detail/article operations as a small JSON API.
//! Every handler wraps one client call; the client's collapse-to-empty
//! failure contract means remote outages surface as empty result sets, not
//! transport errors.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Service descriptor with the endpoint table |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/search` | Date-ranged search against the remote API |
//! | `POST` | `/article-tree` | Article list for one document |
//! | `POST` | `/article-content` | Full detail record for one document |
//!
//! # Response Contract
//!
//! Successful calls return `{"success": true, "data": ...}`. Failures return
//! status 500 with `{"success": false, "error": "..."}`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::client::{LegislationSource, MevzuatClient};
use crate::config::Config;

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor. The remote client is constructed once at startup.
#[derive(Clone)]
struct AppState {
    client: Arc<MevzuatClient>,
    default_page_size: i64,
}

/// Starts the HTTP API server.
///
/// Binds to the address configured in `[server].bind` and runs until the
/// process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState {
        client: Arc::new(MevzuatClient::new(&config.remote)?),
        default_page_size: config.remote.page_size,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .route("/article-tree", post(handle_article_tree))
        .route("/article-content", post(handle_article_content))
        .layer(cors)
        .with_state(state);

    println!("API server listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Internal error type that converts into a 500 response with the
/// `{"success": false, "error": ...}` body.
struct AppError(String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.0 });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
struct SearchRequest {
    start_date: String,
    end_date: String,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default)]
    page_size: Option<i64>,
}

fn default_page() -> i64 {
    1
}

#[derive(Deserialize)]
struct DocumentRequest {
    document_id: String,
}

async fn handle_root() -> Json<Value> {
    Json(json!({
        "service": "mevzuat-sync",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "HTTP API for Turkish legislation search",
        "endpoints": {
            "search": "POST /search",
            "article_tree": "POST /article-tree",
            "article_content": "POST /article-content",
            "health": "GET /health",
        },
    }))
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "mevzuat-sync",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<Value> {
    let page_size = request.page_size.unwrap_or(state.default_page_size);
    let data = state
        .client
        .search(&request.start_date, &request.end_date, request.page, page_size)
        .await;

    Json(json!({ "success": true, "data": data }))
}

async fn handle_article_tree(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Json<Value> {
    let data = state.client.fetch_articles(&request.document_id).await;
    Json(json!({ "success": true, "data": data }))
}

async fn handle_article_content(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<Value>, AppError> {
    match state.client.fetch_detail(&request.document_id).await {
        Some(detail) => Ok(Json(json!({ "success": true, "data": detail }))),
        None => Err(AppError(format!(
            "document content unavailable: {}",
            request.document_id
        ))),
    }
}
