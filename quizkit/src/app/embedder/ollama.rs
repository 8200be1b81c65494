use crate::core::embedder::Embedder;
use crate::error::QuizkitError;
use quizkit_embedders::ollama::OllamaEmbeddings;
use tracing::warn;

/// Adapts the Ollama client to the core [Embedder] contract.
///
/// The client retries transient failures per entry; an entry that still
/// fails afterwards is reported as `None` so one bad chunk never aborts
/// a whole batch.
pub struct OllamaEmbedder {
    client: OllamaEmbeddings,
}

impl OllamaEmbedder {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: OllamaEmbeddings::new(endpoint),
        }
    }
}

#[async_trait::async_trait]
impl Embedder for OllamaEmbedder {
    fn id(&self) -> &'static str {
        "ollama"
    }

    async fn embed(
        &self,
        content: &[&str],
        model: &str,
    ) -> Result<Vec<Option<Vec<f32>>>, QuizkitError> {
        let mut outcomes = Vec::with_capacity(content.len());

        // The Ollama embeddings endpoint takes a single prompt, so
        // entries are embedded sequentially.
        for entry in content {
            match self.client.embed(entry, model).await {
                Ok(embedding) => outcomes.push(Some(embedding)),
                Err(e) => {
                    warn!("Embedding failed for one entry, masking with a zero vector: {e}");
                    outcomes.push(None);
                }
            }
        }

        Ok(outcomes)
    }
}
