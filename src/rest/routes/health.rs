//! GET /api/health — liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// Reports service liveness and the crate version.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
