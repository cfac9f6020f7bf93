//! Router configuration for the web server.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::config::ServerConfig;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(state.cors.clone())
        .layer(DefaultBodyLimit::max(state.settings.server.max_upload_bytes));

    Router::new()
        .route("/health", get(handlers::health))
        // Transcript ingestion
        .route("/upload-text", post(handlers::upload_text))
        .route("/upload-file", post(handlers::upload_file))
        // Summaries
        .route("/summarize", post(handlers::summarize))
        .route("/share", post(handlers::share))
        .layer(layers)
        .with_state(state)
}

/// Build the CORS policy: permissive for `*`, otherwise a single origin
/// with credentials allowed.
pub fn cors_layer(server: &ServerConfig) -> anyhow::Result<CorsLayer> {
    if server.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }

    let origin: HeaderValue = server.frontend_origin.trim().parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid FRONTEND_ORIGIN '{}': {}",
            server.frontend_origin,
            e
        )
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
