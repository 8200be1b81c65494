use crate::error::QuizkitError;
use crate::{err, map_err};
use serde::{Deserialize, Serialize};

/// Exact inner product index over L2 normalized vectors.
///
/// Append only; a vector's position is its insertion order and is the
/// only way it is ever addressed. Inner product over unit vectors is
/// equivalent to cosine similarity ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: vec![],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append a vector to the index. Errors if its dimension does not
    /// match the index.
    pub fn append(&mut self, vector: Vec<f32>) -> Result<(), QuizkitError> {
        if vector.len() != self.dim {
            return err!(
                DimensionMismatch,
                "expected {}, got {}",
                self.dim,
                vector.len()
            );
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// Exhaustive top-k search, descending by inner product score.
    /// Returns at most `min(limit, len)` entries; every returned
    /// position refers to a stored vector.
    pub fn search(&self, query: &[f32], limit: usize) -> Vec<(usize, f32)> {
        debug_assert_eq!(self.dim, query.len());

        let mut scored = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| {
                let score = vector.iter().zip(query).map(|(a, b)| a * b).sum::<f32>();
                (position, score)
            })
            .collect::<Vec<_>>();

        scored.sort_unstable_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);
        scored
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, QuizkitError> {
        Ok(map_err!(bincode::serialize(self)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QuizkitError> {
        Ok(map_err!(bincode::deserialize(bytes)))
    }
}

/// Scale `v` to unit L2 norm. A zero vector has no direction and is
/// left untouched instead of dividing by zero.
pub fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
}
