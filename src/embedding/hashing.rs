//! Local feature-hashing embedder.
//!
//! Lowercased alphanumeric tokens and adjacent-token bigrams are hashed with
//! SHA-256 into signed buckets, then the vector is L2-normalized. Texts that
//! share vocabulary land close together, which is enough to route a question
//! naming a phone toward that phone's chunk. Output is bit-identical across
//! runs and platforms.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::{Embedder, EmbeddingError};
use crate::vector_math::l2_normalize;

const BIGRAM_WEIGHT: f32 = 0.5;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("static regex is valid"))
}

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut vector = vec![0.0f32; self.dimension];
        for token in &tokens {
            self.accumulate(&mut vector, token.as_bytes(), 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut vector, bigram.as_bytes(), BIGRAM_WEIGHT);
        }

        l2_normalize(&mut vector);
        vector
    }

    fn accumulate(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let digest = Sha256::digest(feature);
        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> String {
        format!("hashing-{}", self.dimension)
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(inputs.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_math::l2_norm;

    fn distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }

    #[test]
    fn same_text_yields_identical_vectors() {
        let embedder = HashingEmbedder::new(384);
        let first = embedder.embed_text("Apple iPhone 16 128GB RAM: 8GB");
        let second = embedder.embed_text("Apple iPhone 16 128GB RAM: 8GB");
        assert_eq!(first, second);
        assert_eq!(first.len(), 384);
    }

    #[test]
    fn vectors_are_unit_length() {
        let embedder = HashingEmbedder::new(64);
        let vector = embedder.embed_text("Samsung Galaxy S24 Ultra");
        assert!((l2_norm(&vector) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        let vector = embedder.embed_text("  ?! ");
        assert!(vector.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn casing_and_punctuation_do_not_matter() {
        let embedder = HashingEmbedder::new(128);
        assert_eq!(
            embedder.embed_text("Apple iPhone 16"),
            embedder.embed_text("apple, IPHONE 16!")
        );
    }

    #[test]
    fn shared_vocabulary_is_closer() {
        let embedder = HashingEmbedder::new(384);
        let query = embedder.embed_text("Apple Iphone 16 128Gb How much RAM?");
        let iphone = embedder.embed_text(
            "Mobile Name: Apple iPhone 16 128GB\nRAM: 8GB\nProcessor: A18 Bionic",
        );
        let pixel = embedder.embed_text(
            "Mobile Name: Google Pixel 9 256GB\nRAM: 12GB\nProcessor: Tensor G4",
        );
        assert!(distance(&query, &iphone) < distance(&query, &pixel));
    }

    #[tokio::test]
    async fn batch_embedding_preserves_order() {
        let embedder = HashingEmbedder::new(32);
        let inputs = vec!["first".to_string(), "second".to_string()];
        let vectors = embedder.embed(&inputs).await.expect("embed");
        assert_eq!(vectors[0], embedder.embed_text("first"));
        assert_eq!(vectors[1], embedder.embed_text("second"));
    }
}
