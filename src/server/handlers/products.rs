use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::state::AppState;

/// Distinct products as `{id, name}`, in catalog order.
pub async fn list_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog().products())
}
