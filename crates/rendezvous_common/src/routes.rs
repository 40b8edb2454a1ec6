// --- File: crates/rendezvous_common/src/routes.rs ---

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Routes shared by every deployment: currently just `GET /health`.
pub fn routes() -> Router {
    Router::new().route("/health", get(health))
}
