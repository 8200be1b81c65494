use crate::error::EmbeddingError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://127.0.0.1:11434";

/// Per-request timeout for the embeddings endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How many times a failed request is retried before giving up on an entry.
const RETRY_BUDGET: usize = 2;

/// Client for the Ollama embeddings API.
///
/// The endpoint embeds a single prompt per request, so batches
/// are embedded sequentially.
pub struct OllamaEmbeddings {
    endpoint: String,
    client: reqwest::Client,
}

impl OllamaEmbeddings {
    pub fn new(endpoint: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("unable to build http client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Embed a single input, retrying transient failures.
    /// Errors only once the retry budget is exhausted.
    ///
    /// * `input`: The text to embed.
    /// * `model`: The embedding model to use.
    pub async fn embed(&self, input: &str, model: &str) -> Result<Vec<f32>, EmbeddingError> {
        if input.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("input is empty".to_string()));
        }

        let mut last_err = None;

        for attempt in 0..=RETRY_BUDGET {
            match self.request(input, model).await {
                Ok(embedding) => {
                    debug!("Embedded 1 prompt with '{model}' ({} dimensions)", embedding.len());
                    return Ok(embedding);
                }
                Err(e) if attempt < RETRY_BUDGET && is_transient(&e) => {
                    warn!("Embedding attempt {} failed, retrying: {e}", attempt + 1);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Unreachable unless the loop exited through the retry arm.
        Err(last_err.unwrap_or_else(|| EmbeddingError::Response("retries exhausted".to_string())))
    }

    async fn request(&self, input: &str, model: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: model.to_string(),
            prompt: input.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.endpoint))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Ollama request failed with status {status}: {body}");
            return Err(EmbeddingError::Response(format!("status {status}; {body}")));
        }

        let response = response.json::<EmbeddingResponse>().await?;

        if response.embedding.is_empty() {
            return Err(EmbeddingError::Response(
                "response contains no embedding".to_string(),
            ));
        }

        Ok(response.embedding)
    }
}

/// Server errors and transport errors are worth retrying;
/// anything else fails immediately.
fn is_transient(e: &EmbeddingError) -> bool {
    match e {
        EmbeddingError::Reqwest(e) => e
            .status()
            .map(|s| s.is_server_error())
            .unwrap_or(true),
        EmbeddingError::Response(msg) => msg.starts_with("status 5"),
        _ => false,
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}
