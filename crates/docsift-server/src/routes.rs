use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Health
        .route("/api/health", get(handlers::health::health_check))
        // Extraction
        .route("/api/extract", post(handlers::extract::extract_document))
}

/// Router with state and the HTTP layers the binary serves.
pub fn build_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    create_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
