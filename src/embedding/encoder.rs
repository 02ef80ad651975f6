use std::sync::Arc;

use futures_util::{stream, StreamExt, TryStreamExt};
use tracing::debug;

use super::{Embedder, EmbeddingError};

/// Shared front door to one embedding model. Catalog chunks and user queries
/// both pass through the same instance so they land in the same space.
#[derive(Clone)]
pub struct EmbeddingEncoder {
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
    max_concurrency: usize,
}

impl EmbeddingEncoder {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize, max_concurrency: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn name(&self) -> String {
        self.embedder.name()
    }

    /// Encodes every text, returning vectors in input order. Batches run with
    /// bounded concurrency. Every vector must have the same width.
    pub async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batches: Vec<Vec<Vec<f32>>> = stream::iter(texts.chunks(self.batch_size))
            .map(|batch| self.encode_chunk(batch))
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        let vectors: Vec<Vec<f32>> = batches.into_iter().flatten().collect();
        ensure_uniform_dimension(&vectors)?;

        debug!(
            count = vectors.len(),
            dimension = vectors.first().map(Vec::len).unwrap_or(0),
            "encoded batch"
        );
        Ok(vectors)
    }

    pub async fn encode_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.encode_chunk(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            EmbeddingError::InvalidResponse("no embedding returned for query".to_string())
        })
    }

    async fn encode_chunk(&self, batch: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let vectors = self.embedder.embed(batch).await?;
        if vectors.len() != batch.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}

fn ensure_uniform_dimension(vectors: &[Vec<f32>]) -> Result<(), EmbeddingError> {
    let Some(expected) = vectors.first().map(Vec::len) else {
        return Ok(());
    };
    match vectors.iter().find(|vector| vector.len() != expected) {
        Some(vector) => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: vector.len(),
        }),
        None => Ok(()),
    }
}
