use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::llm::LlmError;
use crate::rag::{IndexError, RetrievalError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<EmbeddingError> for ApiError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Unavailable(_) | EmbeddingError::Timeout(_) => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            other => ApiError::internal(other),
        }
    }
}

impl From<IndexError> for ApiError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NotReady => ApiError::ServiceUnavailable(err.to_string()),
            other => ApiError::internal(other),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::Embedding(inner) => inner.into(),
            RetrievalError::Index(inner) => inner.into(),
            other => ApiError::internal(other),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::GenerationFailed(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, payload) = match &self {
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": msg }))
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::GenerationFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "generation_failed", "message": msg }),
            ),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_not_ready_maps_to_service_unavailable() {
        let err: ApiError = IndexError::NotReady.into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn embedding_outage_inside_retrieval_is_service_unavailable() {
        let err: ApiError =
            RetrievalError::Embedding(EmbeddingError::Unavailable("offline".to_string())).into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn llm_failure_is_reported_as_bad_gateway() {
        let err: ApiError = LlmError::Timeout(30).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bad_request_keeps_message() {
        let err = ApiError::BadRequest("question is required".to_string());
        assert_eq!(err.to_string(), "bad request: question is required");
    }
}
