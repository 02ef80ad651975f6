//! Text embedding backends and the shared encoder used for both catalog
//! chunks and queries.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::config::{EmbeddingConfig, EmbeddingProviderKind};

mod encoder;
mod hashing;
mod openai;

pub use encoder::EmbeddingEncoder;
pub use hashing::HashingEmbedder;
pub use openai::OpenAiEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model unavailable: {0}")]
    Unavailable(String),
    #[error("embedding request timed out after {0}s")]
    Timeout(u64),
    #[error("embedding provider returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// A model that maps texts to fixed-width vectors. Output order matches input
/// order and identical inputs must produce identical vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Provider/model label for logs and status.
    fn name(&self) -> String;

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

pub fn build_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let embedder: Arc<dyn Embedder> = match config.provider {
        EmbeddingProviderKind::Hashing => Arc::new(HashingEmbedder::new(config.dimension)),
        EmbeddingProviderKind::OpenAi => Arc::new(OpenAiEmbedder::new(
            config.base_url.clone(),
            config.model.clone(),
            config.api_key.clone(),
            config.timeout_secs,
        )?),
    };
    Ok(embedder)
}
