//! Retrieval over the product catalog.
//!
//! - `chunker`: renders each record into the text that gets embedded
//! - `index`: exact flat L2 nearest-neighbour search
//! - `CatalogIndex`: records, chunks and vectors built together in one pass
//! - `Retriever`: question (+ product filter) to ranked context block
//! - `prompt`: the grounded-answer prompt handed to the LLM

use thiserror::Error;

use crate::embedding::EmbeddingError;

mod catalog_index;
pub mod chunker;
pub mod index;
pub mod prompt;
mod retriever;

pub use catalog_index::CatalogIndex;
pub use chunker::{build_chunk, Chunk};
pub use index::{FlatL2Index, IndexError, SearchHit};
pub use prompt::build_answer_prompt;
pub use retriever::{compose_query, RetrievedContext, Retriever, CHUNK_SEPARATOR};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("encoder returned {vectors} vectors for {records} records")]
    Misaligned { records: usize, vectors: usize },
}
