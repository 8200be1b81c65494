use super::ChunkerError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const WORD_WINDOW_DEFAULT_SIZE: usize = 400;
const WORD_WINDOW_DEFAULT_OVERLAP: f64 = 0.2;

/// Word based sliding window chunker.
///
/// `size` is the amount of words per chunk and `overlap` is the
/// fraction of `size` shared between consecutive chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordWindow {
    pub size: usize,
    pub overlap: f64,
}

impl WordWindow {
    /// Create a new `WordWindow` chunker.
    /// Errors if `size` is zero or `overlap` is not a finite non-negative number.
    pub fn new(size: usize, overlap: f64) -> Result<Self, ChunkerError> {
        if size == 0 {
            return Err(ChunkerError::Config("size must be greater than 0".to_string()));
        }
        if !overlap.is_finite() || overlap < 0.0 {
            return Err(ChunkerError::Config(
                "overlap must be a finite non-negative number".to_string(),
            ));
        }
        Ok(Self { size, overlap })
    }

    /// The distance in words between the starts of consecutive windows.
    /// Clamped to a minimum of 1 so the window always advances,
    /// even with an overlap of 1 or more.
    pub fn step(&self) -> usize {
        let step = (self.size as f64 * (1.0 - self.overlap)) as isize;
        step.max(1) as usize
    }

    pub fn chunk(&self, input: &str) -> Result<Vec<String>, ChunkerError> {
        let words = input.split_whitespace().collect::<Vec<_>>();

        if words.is_empty() {
            return Ok(vec![]);
        }

        let step = self.step();
        let mut chunks = vec![];

        let mut start = 0;
        while start < words.len() {
            let end = usize::min(start + self.size, words.len());
            chunks.push(words[start..end].join(" "));
            start += step;
        }

        debug!(
            "Chunked {} chunk(s), avg words per chunk: {}",
            chunks.len(),
            words.len().div_ceil(chunks.len())
        );

        Ok(chunks)
    }
}

impl Default for WordWindow {
    fn default() -> Self {
        Self::new(WORD_WINDOW_DEFAULT_SIZE, WORD_WINDOW_DEFAULT_OVERLAP)
            .expect("invalid default chunker config")
    }
}
