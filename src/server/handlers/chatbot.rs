use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::rag::build_answer_prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatbotRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotResponse {
    pub answer: String,
    pub data_available: bool,
}

pub async fn chatbot(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatbotRequest>, JsonRejection>,
) -> Result<Json<ChatbotResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let question = payload
        .question
        .as_deref()
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .ok_or_else(|| ApiError::BadRequest("question is required".to_string()))?
        .to_string();
    let product = payload
        .product
        .as_deref()
        .map(str::trim)
        .filter(|product| !product.is_empty())
        .map(str::to_string);

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "chatbot",
        %request_id,
        product = product.as_deref().unwrap_or("")
    );

    async move {
        let retrieved = state
            .retriever
            .retrieve_default(&question, product.as_deref())
            .await?;
        info!(hits = retrieved.hits.len(), "context retrieved");

        let prompt = build_answer_prompt(&question, product.as_deref(), &retrieved.context);
        let answer = state.llm.generate(&prompt).await.map_err(|err| {
            tracing::warn!("Generation failed: {}", err);
            ApiError::from(err)
        })?;

        info!(answer_chars = answer.len(), "answer generated");
        Ok::<_, ApiError>(Json(ChatbotResponse {
            answer,
            data_available: true,
        }))
    }
    .instrument(span)
    .await
}
