use crate::core::chunk::ChunkConfig;
use crate::core::corpus::{Corpus, CorpusPaths};
use crate::core::embedder::{Embedder, EmbeddingBatch};
use crate::core::index::normalize;
use crate::core::model::{Chunk, IngestReport, SearchReport};
use crate::err;
use crate::error::QuizkitError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// High level operations over the single live corpus.
///
/// The only mutators and readers of the corpus artifacts. A readers-writer
/// lock scoped to the corpus guarantees at most one mutation in flight and
/// that searches never observe a partially written corpus.
pub struct CorpusService {
    paths: CorpusPaths,
    embedder: Arc<dyn Embedder + Send + Sync>,
    model: String,
    chunker: ChunkConfig,
    lock: RwLock<()>,
}

impl CorpusService {
    pub fn new(
        paths: CorpusPaths,
        embedder: Arc<dyn Embedder + Send + Sync>,
        model: String,
        chunker: ChunkConfig,
    ) -> Self {
        Self {
            paths,
            embedder,
            model,
            chunker,
            lock: RwLock::new(()),
        }
    }

    /// Chunk, embed and append `text` to the corpus, then persist it.
    ///
    /// Appends to an existing corpus; a fresh corpus takes its dimension
    /// from the first embedded batch. Text that chunks to nothing is not
    /// an error and returns an empty report. Ingesting the same text
    /// twice stores it twice under distinct ids.
    pub async fn ingest(&self, text: &str) -> Result<IngestReport, QuizkitError> {
        let chunks = self.chunker.chunk(text)?;

        if chunks.is_empty() {
            info!("Nothing to ingest");
            return Ok(IngestReport::default());
        }

        let _lock = self.lock.write().await;

        let existing = Corpus::load(&self.paths).await?;

        let content = chunks.iter().map(String::as_str).collect::<Vec<_>>();
        let outcomes = self.embedder.embed(&content, &self.model).await?;

        debug_assert_eq!(chunks.len(), outcomes.len());

        let batch = EmbeddingBatch::mask(outcomes, existing.as_ref().map(Corpus::dimension))?;

        if batch.degraded > 0 {
            warn!(
                "{} of {} chunk(s) degraded to zero vectors",
                batch.degraded,
                chunks.len()
            );
        }

        let mut corpus = match existing {
            Some(corpus) => {
                if corpus.dimension() != batch.dimension() {
                    return err!(
                        DimensionMismatch,
                        "expected {}, got {}",
                        corpus.dimension(),
                        batch.dimension()
                    );
                }
                corpus
            }
            None => Corpus::new(batch.dimension()),
        };

        let mut ids = Vec::with_capacity(chunks.len());

        for (text, mut vector) in chunks.into_iter().zip(batch.vectors) {
            normalize(&mut vector);
            let chunk = Chunk::new(text);
            ids.push(chunk.id);
            corpus.append(chunk, vector)?;
        }

        corpus.persist(&self.paths).await?;

        info!(
            "Ingested {} chunk(s), corpus now holds {}",
            ids.len(),
            corpus.len()
        );

        Ok(IngestReport {
            ids,
            degraded: batch.degraded,
        })
    }

    /// Query the corpus (semantic search).
    ///
    /// An absent or empty corpus is not an error and returns an empty
    /// report. Results preserve the index ranking, descending by score.
    ///
    /// * `query`: The text to search by.
    /// * `limit`: Maximum amount of results.
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchReport, QuizkitError> {
        let _lock = self.lock.read().await;

        let Some(corpus) = Corpus::load(&self.paths).await? else {
            return Ok(SearchReport::default());
        };

        if corpus.is_empty() {
            return Ok(SearchReport::default());
        }

        let outcomes = self.embedder.embed(&[query], &self.model).await?;
        let mut batch = EmbeddingBatch::mask(outcomes, Some(corpus.dimension()))?;

        if batch.dimension() != corpus.dimension() {
            return err!(
                DimensionMismatch,
                "expected {}, got {}",
                corpus.dimension(),
                batch.dimension()
            );
        }

        if batch.degraded > 0 {
            warn!("Query embedding degraded to a zero vector");
        }

        debug_assert_eq!(1, batch.vectors.len());

        let mut vector = std::mem::take(&mut batch.vectors[0]);
        normalize(&mut vector);

        let hits = corpus.search(&vector, limit);

        Ok(SearchReport {
            hits,
            degraded: batch.degraded,
        })
    }

    /// Delete the corpus artifacts. Safe to call when no corpus exists.
    pub async fn reset(&self) -> Result<(), QuizkitError> {
        let _lock = self.lock.write().await;
        Corpus::reset(&self.paths).await?;
        info!("Corpus reset");
        Ok(())
    }
}
