use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("provider response: {0}")]
    Response(String),

    #[cfg(feature = "ollama")]
    #[error("http client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
