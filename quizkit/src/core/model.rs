use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded contiguous window of words extracted from a source document,
/// the atomic unit of indexing. Immutable once created, destroyed only by
/// a full corpus reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub text: String,
}

impl Chunk {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
        }
    }
}

/// A chunk resolved from a similarity search.
#[derive(Debug, Clone, Serialize)]
pub struct RelevantChunk {
    pub id: Uuid,
    pub text: String,
    pub score: f32,
}

/// The outcome of an ingest. `ids` are the newly created chunk ids in
/// chunking order; `degraded` counts chunks whose embedding was
/// substituted with a zero vector.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub ids: Vec<Uuid>,
    pub degraded: usize,
}

/// The outcome of a search, ranked descending by score.
#[derive(Debug, Default, Serialize)]
pub struct SearchReport {
    pub hits: Vec<RelevantChunk>,
    pub degraded: usize,
}

/// Extracted document text along with the amount of text elements
/// it was parsed from (pages for PDFs).
#[derive(Debug)]
pub struct TextExtract {
    pub text: String,
    pub pages: usize,
}
