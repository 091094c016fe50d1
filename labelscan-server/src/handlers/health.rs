use axum::Json;
use serde_json::{Value, json};

/// Liveness probe; the upstream client polls this to tell a stopped
/// scanner service apart from a slow one.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
