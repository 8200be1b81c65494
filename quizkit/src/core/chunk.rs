use crate::error::QuizkitError;
use crate::map_err;
use serde::{Deserialize, Serialize};
use wordwin::WordWindow;

use crate::config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Chunking configuration for ingest.
///
/// * `size`: Amount of words per chunk.
/// * `overlap`: Fraction of `size` shared between consecutive chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub size: usize,
    pub overlap: f64,
}

impl ChunkConfig {
    pub fn new(size: usize, overlap: f64) -> Self {
        Self { size, overlap }
    }

    pub fn chunk(&self, input: &str) -> Result<Vec<String>, QuizkitError> {
        let window = map_err!(WordWindow::new(self.size, self.overlap));
        Ok(map_err!(window.chunk(input)))
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}
