use crate::core::model::Chunk;
use crate::error::QuizkitError;
use crate::map_err;
use serde::{Deserialize, Serialize};

/// Ordered chunk storage, persisted whole as a single JSON document.
///
/// Represented as an explicit sequence, never an unordered map;
/// enumeration order is insertion order and must equal the vector
/// index append order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Get the chunk at the given insertion position.
    pub fn get(&self, position: usize) -> Option<&Chunk> {
        self.chunks.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, QuizkitError> {
        Ok(map_err!(serde_json::to_vec_pretty(self)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QuizkitError> {
        Ok(map_err!(serde_json::from_slice(bytes)))
    }
}
