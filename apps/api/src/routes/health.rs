use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Always `{"ok": true}`, whatever state the Google configuration is in.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}
