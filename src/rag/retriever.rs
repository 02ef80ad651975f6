use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::catalog_index::CatalogIndex;
use super::index::SearchHit;
use super::RetrievalError;
use crate::catalog::display_name_from_id;
use crate::embedding::EmbeddingEncoder;

pub const CHUNK_SEPARATOR: &str = "\n\n";

/// What a retrieval produced: the search string actually encoded, the ranked
/// hits, and the verbatim chunk texts joined in rank order.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedContext {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub context: String,
}

/// Turns a question (optionally scoped to a product) into context for the
/// generative model. Never calls the model itself.
#[derive(Clone)]
pub struct Retriever {
    index: Arc<CatalogIndex>,
    encoder: EmbeddingEncoder,
    top_k: usize,
}

impl Retriever {
    pub fn new(index: Arc<CatalogIndex>, encoder: EmbeddingEncoder, top_k: usize) -> Self {
        Self {
            index,
            encoder,
            top_k,
        }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn encoder(&self) -> &EmbeddingEncoder {
        &self.encoder
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieves with the configured `top_k`.
    pub async fn retrieve_default(
        &self,
        question: &str,
        product_filter: Option<&str>,
    ) -> Result<RetrievedContext, RetrievalError> {
        self.retrieve(question, product_filter, self.top_k).await
    }

    pub async fn retrieve(
        &self,
        question: &str,
        product_filter: Option<&str>,
        k: usize,
    ) -> Result<RetrievedContext, RetrievalError> {
        let query = compose_query(question, product_filter);
        let vector = self.encoder.encode_query(&query).await?;
        let hits = self.index.search(&vector, k)?;

        let context = hits
            .iter()
            .filter_map(|hit| self.index.chunk(hit.ordinal))
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        debug!(query = %query, hits = hits.len(), "retrieved context");
        Ok(RetrievedContext {
            query,
            hits,
            context,
        })
    }
}

/// The search string: the filter's display form followed by the question.
/// A blank filter leaves the question as is.
pub fn compose_query(question: &str, product_filter: Option<&str>) -> String {
    match product_filter.map(str::trim).filter(|filter| !filter.is_empty()) {
        Some(filter) => format!("{} {}", display_name_from_id(filter), question),
        None => question.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Record;
    use crate::embedding::HashingEmbedder;

    fn record(company: &str, model: &str, ram: &str) -> Record {
        Record {
            company_name: company.to_string(),
            model_name: model.to_string(),
            ram: Some(ram.to_string()),
            processor: Some("Octa-core".to_string()),
            ..Record::default()
        }
    }

    async fn retriever() -> Retriever {
        let encoder = EmbeddingEncoder::new(Arc::new(HashingEmbedder::new(384)), 16, 1);
        let records = vec![
            record("Samsung", "Galaxy S24 256GB", "12GB"),
            record("Apple", "iPhone 16 128GB", "8GB"),
            record("Google", "Pixel 9 128GB", "12GB"),
            record("OnePlus", "12 256GB", "16GB"),
        ];
        let index = CatalogIndex::build(records, &encoder).await.expect("build");
        Retriever::new(Arc::new(index), encoder, 5)
    }

    #[test]
    fn filter_is_prepended_in_display_form() {
        assert_eq!(
            compose_query("How much RAM?", Some("apple-iphone-16-128gb")),
            "Apple Iphone 16 128Gb How much RAM?"
        );
    }

    #[test]
    fn blank_filter_is_ignored() {
        assert_eq!(compose_query("Best battery?", Some("  ")), "Best battery?");
        assert_eq!(compose_query("Best battery?", None), "Best battery?");
    }

    #[tokio::test]
    async fn scoped_question_ranks_the_product_first() {
        let retriever = retriever().await;
        let retrieved = retriever
            .retrieve("How much RAM?", Some("apple-iphone-16-128gb"), 2)
            .await
            .expect("retrieve");

        assert_eq!(retrieved.hits.len(), 2);
        assert_eq!(retrieved.hits[0].ordinal, 1);
        assert!(retrieved
            .context
            .starts_with("Mobile Name: Apple iPhone 16 128GB\nRAM: 8GB"));
    }

    #[tokio::test]
    async fn context_is_verbatim_chunks_in_rank_order() {
        let retriever = retriever().await;
        let retrieved = retriever
            .retrieve_default("Which phone has 16GB RAM?", None)
            .await
            .expect("retrieve");

        assert_eq!(retrieved.hits.len(), 4);
        let expected: Vec<&str> = retrieved
            .hits
            .iter()
            .map(|hit| retriever.index().chunk(hit.ordinal).expect("chunk").text.as_str())
            .collect();
        assert_eq!(retrieved.context, expected.join(CHUNK_SEPARATOR));
    }

    #[tokio::test]
    async fn k_of_zero_yields_empty_context() {
        let retriever = retriever().await;
        let retrieved = retriever.retrieve("RAM", None, 0).await.expect("retrieve");
        assert!(retrieved.hits.is_empty());
        assert!(retrieved.context.is_empty());
    }
}
