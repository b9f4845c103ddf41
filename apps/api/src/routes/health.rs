use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /
/// Liveness message; touches nothing.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Resume & Cover Letter Generator!"
    }))
}

/// GET /health
/// Service version plus record-store reachability. 503 when the store is down.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, store) = match state.records.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!("Record store health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(json!({
            "status": if status.is_success() { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "service": env!("CARGO_PKG_NAME"),
            "store": store,
        })),
    )
}
