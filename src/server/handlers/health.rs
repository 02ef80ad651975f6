use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "initialized": true
    }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let index = state.retriever.index();
    Json(json!({
        "initialized": true,
        "records": index.len(),
        "products": state.catalog().products().len(),
        "embedding": {
            "backend": state.retriever.encoder().name(),
            "dimension": index.dimension()
        },
        "retrieval": {
            "top_k": state.retriever.top_k()
        },
        "llm": {
            "provider": state.llm.provider_name(),
            "model": state.llm.model()
        },
        "started_at": state.started_at.to_rfc3339(),
        "uptime_secs": state.uptime_secs()
    }))
}
