use crate::core::telemetry::{TelemetryEvent, TelemetrySink};
use crate::error::QuizkitError;
use crate::map_err;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::error;

/// Append only JSONL event log on the local filesystem.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn append(&self, event: &TelemetryEvent) -> Result<(), QuizkitError> {
        if let Some(parent) = self.path.parent() {
            map_err!(tokio::fs::create_dir_all(parent).await);
        }

        let mut line = map_err!(serde_json::to_vec(event));
        line.push(b'\n');

        let mut file = map_err!(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await
        );

        map_err!(file.write_all(&line).await);

        Ok(())
    }
}

#[async_trait::async_trait]
impl TelemetrySink for JsonlSink {
    async fn record(&self, event: TelemetryEvent) {
        // Telemetry is best effort and never fails the request.
        if let Err(e) = self.append(&event).await {
            error!("Telemetry logging failed: {e}");
        }
    }
}
