//! Module containing concrete implementations from the [core](crate::core) module.

/// Text embedder implementations.
pub mod embedder;

/// Application state configuration.
pub mod state;

/// Telemetry sink implementations.
pub mod telemetry;
