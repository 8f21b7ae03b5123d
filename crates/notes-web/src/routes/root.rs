use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::services::store::AppState;

pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Notes API is running" }))
}
