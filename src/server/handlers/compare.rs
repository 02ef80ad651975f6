use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::{compare as compare_products, Comparison, ComparisonRow, FieldSelection};
use crate::core::errors::ApiError;
use crate::state::AppState;

pub const PRODUCT_NOT_FOUND: &str = "One or both products not found";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub product_a: Option<String>,
    pub product_b: Option<String>,
    #[serde(default)]
    pub specification: Option<String>,
}

/// Both shapes are answered with HTTP 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompareResponse {
    Found(Comparison),
    #[serde(rename_all = "camelCase")]
    NotFound {
        error: String,
        product_a_name: String,
        product_b_name: String,
        comparisons: Vec<ComparisonRow>,
    },
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let product_a = required(payload.product_a.as_deref(), "productA")?;
    let product_b = required(payload.product_b.as_deref(), "productB")?;
    let selection = FieldSelection::parse(payload.specification.as_deref());

    let response = match compare_products(state.catalog(), product_a, product_b, &selection) {
        Ok(comparison) => CompareResponse::Found(comparison),
        Err(missing) => {
            tracing::info!(product_a, product_b, "comparison product not found");
            CompareResponse::NotFound {
                error: PRODUCT_NOT_FOUND.to_string(),
                product_a_name: missing.product_a_name,
                product_b_name: missing.product_b_name,
                comparisons: Vec::new(),
            }
        }
    };

    Ok(Json(response))
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}
