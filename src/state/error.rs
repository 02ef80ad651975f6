use thiserror::Error;

use crate::catalog::CatalogError;
use crate::core::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::llm::LlmError;
use crate::rag::RetrievalError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to initialize embedding model: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Failed to build catalog index: {0}")]
    Index(#[from] RetrievalError),

    #[error("Failed to initialize LLM service: {0}")]
    Llm(#[from] LlmError),
}
