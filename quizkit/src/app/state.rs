use super::embedder::ollama::OllamaEmbedder;
use super::telemetry::JsonlSink;
use crate::config::StartArgs;
use crate::core::chunk::ChunkConfig;
use crate::core::corpus::CorpusPaths;
use crate::core::embedder::Embedder;
use crate::core::service::corpus::CorpusService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub struct AppState {
    /// Quizkit services.
    pub services: ServiceState,

    /// Request event log.
    pub telemetry: Arc<JsonlSink>,
}

pub struct ServiceState {
    pub corpus: Arc<CorpusService>,
}

impl AppState {
    /// Load the application state using the provided configuration.
    pub fn new(args: &StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let embedder = Arc::new(OllamaEmbedder::new(&args.ollama_url()));
        tracing::info!("Registered embedding provider '{}'", embedder.id());

        let paths = CorpusPaths::new(Path::new(&args.data_dir()));
        let corpus = CorpusService::new(paths, embedder, args.model(), ChunkConfig::default());

        let telemetry = Arc::new(JsonlSink::new(PathBuf::from(args.telemetry_path())));

        Self {
            services: ServiceState {
                corpus: Arc::new(corpus),
            },
            telemetry,
        }
    }
}
