use crate::err;
use crate::error::QuizkitError;

/// Operations related to embeddings.
///
/// Implementations are injected into the corpus service so the ingest
/// and search pipelines stay testable with deterministic fakes.
#[async_trait::async_trait]
pub trait Embedder {
    fn id(&self) -> &'static str;

    /// Embed each entry of `content`, preserving order and count.
    ///
    /// A `None` entry means the provider failed for that entry after
    /// exhausting its retries; callers mask such entries via
    /// [EmbeddingBatch::mask].
    ///
    /// * `content`: The text to embed. Can be a user's query or a
    ///   chunked document.
    /// * `model`: The embedding model to use.
    async fn embed(
        &self,
        content: &[&str],
        model: &str,
    ) -> Result<Vec<Option<Vec<f32>>>, QuizkitError>;
}

/// An embedding batch with failed entries masked by zero vectors.
///
/// `vectors` is equal in length and order to the embedded content;
/// `degraded` counts the masked entries.
#[derive(Debug)]
pub struct EmbeddingBatch {
    pub vectors: Vec<Vec<f32>>,
    pub degraded: usize,
}

impl EmbeddingBatch {
    /// Mask failed entries with zero vectors of the batch dimension.
    ///
    /// The dimension is discovered from the first successful entry,
    /// falling back to `fallback_dim` (the known corpus dimension) when
    /// every entry failed. With no successful entry and no fallback the
    /// batch is unusable and this is a hard error. A successful entry
    /// whose dimension disagrees with the rest is also a hard error.
    pub fn mask(
        outcomes: Vec<Option<Vec<f32>>>,
        fallback_dim: Option<usize>,
    ) -> Result<Self, QuizkitError> {
        let dim = outcomes
            .iter()
            .find_map(|outcome| outcome.as_ref().map(Vec::len))
            .or(fallback_dim);

        let Some(dim) = dim else {
            return err!(
                EmbeddingFailed,
                "all {} entries failed and the corpus dimension is unknown",
                outcomes.len()
            );
        };

        let mut vectors = Vec::with_capacity(outcomes.len());
        let mut degraded = 0;

        for outcome in outcomes {
            match outcome {
                Some(vector) if vector.len() == dim => vectors.push(vector),
                Some(vector) => {
                    return err!(DimensionMismatch, "expected {dim}, got {}", vector.len())
                }
                None => {
                    degraded += 1;
                    vectors.push(vec![0.0; dim]);
                }
            }
        }

        Ok(Self { vectors, degraded })
    }

    pub fn dimension(&self) -> usize {
        self.vectors.first().map(Vec::len).unwrap_or(0)
    }
}
