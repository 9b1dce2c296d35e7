use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Career assistant API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health
/// Returns service status and which optional integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "database": state.store.is_some(),
        "integrations": {
            "llm": config.gemini_api_key.is_some(),
            "videos": config.youtube_api_key.is_some(),
            "photos": config.pexels_api_key.is_some(),
            "news": config.news_api_key.is_some(),
            "exchange": config.exchange_api_key.is_some(),
            "jobs": config.jsearch_api_key.is_some()
        }
    }))
}
