use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single telemetry record.
#[derive(Debug, Serialize)]
pub struct TelemetryEvent {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub detail: serde_json::Value,
}

impl TelemetryEvent {
    pub fn new(operation: &str, detail: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: operation.to_string(),
            detail,
        }
    }
}

/// Best effort, append only request event log.
///
/// Implementations must swallow their own failures; telemetry can never
/// affect the corpus or the outcome of a request.
#[async_trait::async_trait]
pub trait TelemetrySink {
    async fn record(&self, event: TelemetryEvent);
}
