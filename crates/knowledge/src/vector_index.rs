//! Vector index abstraction for knowledge chunks.
//!
//! Rows are addressed by insertion position, which is also the chunk's
//! position in the knowledge store.

use crate::error::{RetrievalError, RetrievalResult};

/// A single search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Squared Euclidean distance to the query
    pub distance: f32,

    /// Row position in insertion order
    pub position: usize,
}

/// Trait for vector index backends.
///
/// Implementations must:
/// - fix their dimension on the first append and reject other dimensions
/// - validate a whole batch before storing any of it
/// - return at most `min(k, len)` hits, nearest first, ties by insertion order
pub trait VectorIndex: Send + Sync + std::fmt::Debug {
    /// Dimension of stored vectors, `None` until the first append.
    fn dimension(&self) -> Option<usize>;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append vectors in order.
    fn add(&mut self, vectors: Vec<Vec<f32>>) -> RetrievalResult<()>;

    /// Find the `k` nearest stored vectors to `query`.
    fn search(&self, query: &[f32], k: usize) -> RetrievalResult<Vec<Neighbor>>;
}

/// Exhaustive L2 index over a flat row-major buffer.
#[derive(Debug, Default, Clone)]
pub struct FlatL2Index {
    dimension: Option<usize>,
    data: Vec<f32>,
    rows: usize,
}

impl FlatL2Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index whose dimension is fixed up front.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    fn row(&self, position: usize, dimension: usize) -> &[f32] {
        let start = position * dimension;
        &self.data[start..start + dimension]
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

impl VectorIndex for FlatL2Index {
    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn len(&self) -> usize {
        self.rows
    }

    fn add(&mut self, vectors: Vec<Vec<f32>>) -> RetrievalResult<()> {
        let Some(first) = vectors.first() else {
            return Ok(());
        };

        let expected = self.dimension.unwrap_or(first.len());
        if expected == 0 {
            return Err(RetrievalError::Embedding(
                "embedding vectors cannot be empty".to_string(),
            ));
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(RetrievalError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }

        self.dimension = Some(expected);
        self.data.reserve(vectors.len() * expected);
        for vector in &vectors {
            self.data.extend_from_slice(vector);
        }
        self.rows += vectors.len();

        Ok(())
    }

    fn search(&self, query: &[f32], k: usize) -> RetrievalResult<Vec<Neighbor>> {
        let dimension = match self.dimension {
            Some(dimension) if self.rows > 0 => dimension,
            _ => return Err(RetrievalError::EmptyCorpusQuery),
        };

        if query.len() != dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            });
        }

        let k = k.min(self.rows);
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Neighbor> = (0..self.rows)
            .map(|position| Neighbor {
                distance: squared_l2(query, self.row(position, dimension)),
                position,
            })
            .collect();

        // Stable sort keeps insertion order among equal distances
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(rows: &[[f32; 2]]) -> FlatL2Index {
        let mut index = FlatL2Index::new();
        index
            .add(rows.iter().map(|r| r.to_vec()).collect())
            .unwrap();
        index
    }

    #[test]
    fn test_empty_index_search_fails() {
        let index = FlatL2Index::new();
        assert_eq!(
            index.search(&[0.0, 0.0], 3),
            Err(RetrievalError::EmptyCorpusQuery)
        );
    }

    #[test]
    fn test_nearest_first() {
        let index = index_with(&[[5.0, 5.0], [1.0, 0.0], [0.0, 0.0]]);
        let hits = index.search(&[0.1, 0.0], 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![2, 1, 0]);
        assert!((hits[0].distance - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = index_with(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]);
        let hits = index.search(&[0.0, 0.0], 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_k_is_clamped() {
        let index = index_with(&[[1.0, 0.0], [0.0, 1.0], [2.0, 2.0]]);
        let hits = index.search(&[0.0, 0.0], 10).unwrap();

        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.position < 3));
    }

    #[test]
    fn test_k_zero_returns_nothing() {
        let index = index_with(&[[1.0, 0.0]]);
        assert!(index.search(&[0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_fixed_by_first_batch() {
        let mut index = index_with(&[[1.0, 0.0]]);
        assert_eq!(index.dimension(), Some(2));

        let result = index.add(vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!(
            result,
            Err(RetrievalError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_mixed_batch_rejected_without_partial_append() {
        let mut index = FlatL2Index::new();
        let result = index.add(vec![vec![1.0, 0.0], vec![1.0]]);

        assert!(result.is_err());
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
    }

    #[test]
    fn test_query_dimension_checked() {
        let index = index_with(&[[1.0, 0.0]]);
        assert!(matches!(
            index.search(&[1.0], 1),
            Err(RetrievalError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_with_dimension_rejects_other_sizes() {
        let mut index = FlatL2Index::with_dimension(4);
        assert!(index.add(vec![vec![0.0; 3]]).is_err());
        assert!(index.add(vec![vec![0.0; 4]]).is_ok());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut index = FlatL2Index::new();
        index.add(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
    }
}
