use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use tracing::info;

use docsift_core::api_types::HealthResponse;

use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let ocr = state.dispatcher.ocr_engine();
    let ocr_available = ocr.is_available().await;
    if !ocr_available {
        tracing::warn!(engine = ocr.name(), "OCR engine is not reachable");
    }

    let status = if ocr_available {
        "ok".to_string()
    } else {
        "degraded".to_string()
    };

    let now = Utc::now();
    let response = HealthResponse {
        status,
        version: VERSION.to_string(),
        ocr_available,
        started_at: state.started_at,
        uptime_seconds: (now - state.started_at).num_seconds(),
    };

    (StatusCode::OK, Json(response))
}
