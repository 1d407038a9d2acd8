pub mod assets;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the application router.
pub fn app_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(assets::routes())
        .route("/health", get(health))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "assets": state.registry.len(),
        "source": format!("{:?}", state.config.data_source).to_lowercase(),
    }))
}
