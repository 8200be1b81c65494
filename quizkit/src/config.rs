use clap::{Parser, Subcommand};

/// The amount of words per chunk during ingest.
pub const DEFAULT_CHUNK_SIZE: usize = 400;
/// The fraction of a chunk shared with its predecessor.
pub const DEFAULT_CHUNK_OVERLAP: f64 = 0.2;
/// How many results a search returns when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 4;
/// The maximum accepted query length, enforced by the safety filter.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 1000;
/// The embedding model used when none is configured.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
/// Where the corpus artifacts live by default.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Where telemetry events are appended by default.
pub const DEFAULT_TELEMETRY_PATH: &str = "logs/requests.jsonl";

/// File name of the vector index artifact within the data directory.
pub const INDEX_FILE_NAME: &str = "index.bin";
/// File name of the chunk store document within the data directory.
pub const CHUNKS_FILE_NAME: &str = "chunks.json";

#[derive(Debug, Parser)]
#[command(name = "quizkit", version = "0.1", about = "Ingest documents and search them", long_about = None)]
pub struct StartArgs {
    /// Directory holding the corpus artifacts.
    #[arg(short, long)]
    data_dir: Option<String>,

    /// RUST_LOG string to use as the env filter.
    #[arg(short, long)]
    log: Option<String>,

    /// Ollama endpoint for the embedding provider.
    #[arg(short, long)]
    ollama_url: Option<String>,

    /// Embedding model to use.
    #[arg(short, long)]
    model: Option<String>,

    /// Path of the telemetry event log.
    #[arg(long)]
    telemetry_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the text of a document and add it to the corpus.
    Ingest {
        /// Path of the document to ingest.
        path: String,
    },

    /// Search the corpus for chunks relevant to the query.
    Search {
        /// The text to search by.
        query: String,

        /// Amount of results to return.
        #[arg(short = 'k', long)]
        limit: Option<usize>,
    },

    /// Delete the corpus. Safe to run when no corpus exists.
    Reset,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either panic or default if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, panic $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => panic!($msg),
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
}

arg!(data_dir,       "DATA_DIR",        default DEFAULT_DATA_DIR.to_string());
arg!(log,            "RUST_LOG",        default "info".to_string());
arg!(ollama_url,     "OLLAMA_URL",      default quizkit_embedders::ollama::DEFAULT_OLLAMA_ENDPOINT.to_string());
arg!(model,          "EMBEDDING_MODEL", default DEFAULT_EMBEDDING_MODEL.to_string());
arg!(telemetry_path, "TELEMETRY_PATH",  default DEFAULT_TELEMETRY_PATH.to_string());
