use tracing::info;

use super::chunker::{build_chunk, Chunk};
use super::index::{FlatL2Index, SearchHit};
use super::RetrievalError;
use crate::catalog::{Catalog, Record};
use crate::embedding::EmbeddingEncoder;

/// Records, their chunks and the vector index over those chunks, built
/// together so that ordinal `i` names the same product in all three.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    catalog: Catalog,
    chunks: Vec<Chunk>,
    index: FlatL2Index,
}

impl CatalogIndex {
    pub async fn build(
        records: Vec<Record>,
        encoder: &EmbeddingEncoder,
    ) -> Result<Self, RetrievalError> {
        let chunks: Vec<Chunk> = records.iter().map(build_chunk).collect();
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();

        let vectors = encoder.encode_batch(&texts).await?;
        if vectors.len() != records.len() {
            return Err(RetrievalError::Misaligned {
                records: records.len(),
                vectors: vectors.len(),
            });
        }

        let index = FlatL2Index::build(&vectors)?;
        info!(
            records = records.len(),
            dimension = index.dimension(),
            encoder = %encoder.name(),
            "catalog index built"
        );

        Ok(Self {
            catalog: Catalog::new(records),
            chunks,
            index,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn chunk(&self, ordinal: usize) -> Option<&Chunk> {
        self.chunks.get(ordinal)
    }

    pub fn record(&self, ordinal: usize) -> Option<&Record> {
        self.catalog.records().get(ordinal)
    }

    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        Ok(self.index.search(query, k)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::rag::IndexError;
    use std::sync::Arc;

    fn record(company: &str, model: &str, ram: &str) -> Record {
        Record {
            company_name: company.to_string(),
            model_name: model.to_string(),
            ram: Some(ram.to_string()),
            ..Record::default()
        }
    }

    fn encoder() -> EmbeddingEncoder {
        EmbeddingEncoder::new(Arc::new(HashingEmbedder::new(128)), 2, 2)
    }

    #[tokio::test]
    async fn ordinals_align_across_records_chunks_and_vectors() {
        let records = vec![
            record("Apple", "iPhone 16 128GB", "8GB"),
            record("Samsung", "Galaxy S24 256GB", "12GB"),
            record("Google", "Pixel 9 128GB", "12GB"),
        ];
        let index = CatalogIndex::build(records, &encoder())
            .await
            .expect("build");

        assert_eq!(index.len(), 3);
        assert_eq!(index.catalog().len(), 3);
        for ordinal in 0..index.len() {
            let record = index.record(ordinal).expect("record");
            let chunk = index.chunk(ordinal).expect("chunk");
            assert!(chunk.text.contains(&record.display_name()));
        }
    }

    #[tokio::test]
    async fn chunk_text_finds_its_own_ordinal() {
        let encoder = encoder();
        let records = vec![
            record("Apple", "iPhone 16 128GB", "8GB"),
            record("Samsung", "Galaxy S24 256GB", "12GB"),
        ];
        let index = CatalogIndex::build(records, &encoder)
            .await
            .expect("build");

        for ordinal in 0..index.len() {
            let text = &index.chunk(ordinal).expect("chunk").text;
            let query = encoder.encode_query(text).await.expect("query");
            let hits = index.search(&query, 1).expect("search");
            assert_eq!(hits[0].ordinal, ordinal);
            assert!(hits[0].distance.abs() < 1e-5);
        }
    }

    #[tokio::test]
    async fn empty_catalog_builds_but_is_not_ready() {
        let index = CatalogIndex::build(Vec::new(), &encoder())
            .await
            .expect("empty build");
        assert!(index.is_empty());
        assert!(matches!(
            index.search(&[0.0; 128], 5),
            Err(RetrievalError::Index(IndexError::NotReady))
        ));
    }
}
