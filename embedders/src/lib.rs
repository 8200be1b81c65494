pub mod error;

#[cfg(feature = "ollama")]
pub mod ollama;
