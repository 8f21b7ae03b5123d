//! Health check endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::services::store::AppState;
use crate::WebError;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "notes-api"
    }))
}

async fn ready_check(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| WebError::Unavailable(e.to_string()))?;

    Ok(Json(json!({ "status": "ready" })))
}
