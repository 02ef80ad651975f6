//! Exact nearest-neighbour search over a flat matrix of embeddings.
//!
//! Rows are stored in insertion order in a dense `N x D` matrix; a search
//! scans every row and ranks by Euclidean distance. Catalogs here are small
//! enough that brute force is the right structure, and it keeps results exact.

use ndarray::{Array2, ArrayView1, Zip};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index not ready: no vectors have been indexed")]
    NotReady,
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("vectors must have at least one dimension")]
    ZeroDimension,
    #[error("vector contains non-finite values")]
    NonFinite,
    #[error("failed to shape embedding matrix: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit {
    /// Position of the vector in build order.
    pub ordinal: usize,
    /// Euclidean distance to the query.
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct FlatL2Index {
    vectors: Array2<f32>,
}

impl FlatL2Index {
    /// Builds the index from vectors in order. All vectors must share one
    /// dimension and contain only finite values. An empty input produces an
    /// index that reports [`IndexError::NotReady`] on search.
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self, IndexError> {
        let Some(first) = vectors.first() else {
            return Ok(Self {
                vectors: Array2::zeros((0, 0)),
            });
        };

        let dimension = first.len();
        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }

        let mut flat = Vec::with_capacity(vectors.len() * dimension);
        for vector in vectors {
            if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|value| !value.is_finite()) {
                return Err(IndexError::NonFinite);
            }
            flat.extend_from_slice(vector);
        }

        let vectors = Array2::from_shape_vec((vectors.len(), dimension), flat)?;
        Ok(Self { vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    /// The `k` nearest vectors by ascending distance. Equal distances keep
    /// insertion order; `k` larger than the index returns every vector.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, IndexError> {
        if self.is_empty() {
            return Err(IndexError::NotReady);
        }
        if query.len() != self.dimension() {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension(),
                actual: query.len(),
            });
        }
        if query.iter().any(|value| !value.is_finite()) {
            return Err(IndexError::NonFinite);
        }

        let query = ArrayView1::from(query);
        let mut hits: Vec<SearchHit> = self
            .vectors
            .outer_iter()
            .enumerate()
            .map(|(ordinal, row)| SearchHit {
                ordinal,
                distance: squared_distance(row, query).sqrt(),
            })
            .collect();

        // `sort_by` is stable, which gives the insertion-order tie break.
        hits.sort_by(|left, right| left.distance.total_cmp(&right.distance));
        hits.truncate(k.min(self.len()));
        Ok(hits)
    }
}

fn squared_distance(row: ArrayView1<'_, f32>, query: ArrayView1<'_, f32>) -> f32 {
    Zip::from(&row).and(&query).fold(0.0, |acc, &a, &b| {
        let diff = a - b;
        acc + diff * diff
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(left: f32, right: f32) -> bool {
        (left - right).abs() < 1e-5
    }

    fn sample() -> FlatL2Index {
        FlatL2Index::build(&[
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 2.0],
            vec![3.0, 4.0],
        ])
        .expect("build")
    }

    #[test]
    fn identical_vector_is_nearest_with_zero_distance() {
        let index = sample();
        let points: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 2.0], [3.0, 4.0]];
        for (ordinal, vector) in points.iter().enumerate() {
            let hits = index.search(vector, 1).expect("search");
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].ordinal, ordinal);
            assert!(approx_eq(hits[0].distance, 0.0));
        }
    }

    #[test]
    fn distances_are_euclidean_and_non_decreasing() {
        let hits = sample().search(&[0.0, 0.0], 4).expect("search");
        let ordinals: Vec<usize> = hits.iter().map(|hit| hit.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
        assert!(approx_eq(hits[3].distance, 5.0));
        assert!(hits.windows(2).all(|pair| pair[0].distance <= pair[1].distance));
    }

    #[test]
    fn k_is_clamped_to_index_size() {
        let hits = sample().search(&[1.0, 1.0], 50).expect("search");
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn zero_k_returns_nothing() {
        assert!(sample().search(&[1.0, 1.0], 0).expect("search").is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let index = FlatL2Index::build(&[
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
            vec![0.0, -1.0],
        ])
        .expect("build");
        let hits = index.search(&[0.0, 0.0], 4).expect("search");
        let ordinals: Vec<usize> = hits.iter().map(|hit| hit.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_index_is_not_ready() {
        let index = FlatL2Index::build(&[]).expect("empty build");
        assert!(index.is_empty());
        assert!(matches!(
            index.search(&[1.0], 3),
            Err(IndexError::NotReady)
        ));
    }

    #[test]
    fn build_rejects_mixed_dimensions() {
        let err = FlatL2Index::build(&[vec![1.0, 2.0], vec![1.0]]).expect_err("mixed dims");
        assert!(matches!(
            err,
            IndexError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn build_rejects_non_finite_values() {
        assert!(matches!(
            FlatL2Index::build(&[vec![f32::NAN, 0.0]]),
            Err(IndexError::NonFinite)
        ));
        assert!(matches!(
            FlatL2Index::build(&[vec![]]),
            Err(IndexError::ZeroDimension)
        ));
    }

    #[test]
    fn search_rejects_wrong_query_dimension() {
        assert!(matches!(
            sample().search(&[1.0, 2.0, 3.0], 1),
            Err(IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
