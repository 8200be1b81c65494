use std::{error::Error as _, string::FromUtf8Error};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum QuizkitErr {
    #[error("Corrupt corpus; {0}")]
    CorruptCorpus(String),

    #[error("Dimension mismatch; {0}")]
    DimensionMismatch(String),

    #[error("embedding failed; {0}")]
    EmbeddingFailed(String),

    #[error("chunker: {0}")]
    Chunker(#[from] wordwin::ChunkerError),

    #[error("extraction failed; {0}")]
    Extraction(#[from] pdf_extract::OutputError),

    #[error("IO; {0}")]
    IO(#[from] std::io::Error),

    #[error("UTF-8; {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("JSON error; {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("binary codec; {0}")]
    Bincode(#[from] bincode::Error),
}

#[derive(Debug, Error)]
#[error("{error}")]
pub struct QuizkitError {
    file: &'static str,
    line: u32,
    column: u32,
    pub error: QuizkitErr,
}

impl QuizkitError {
    pub fn new(file: &'static str, line: u32, column: u32, error: QuizkitErr) -> QuizkitError {
        QuizkitError {
            file,
            line,
            column,
            error,
        }
    }

    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }

    pub fn print(&self) {
        let location = self.location();

        error!("{location} | {self}");

        if self.error.source().is_some() {
            error!("Causes:");
        }

        let mut src = self.error.source();
        while let Some(source) = src {
            error!(" - {source}");
            src = source.source();
        }
    }
}

#[macro_export]
macro_rules! err {
    ($ty:ident $(, $l:literal $(,)? $($args:expr),* )?) => {
        Err($crate::error::QuizkitError::new(
            file!(),
            line!(),
            column!(),
            $crate::error::QuizkitErr::$ty $( (format!($l, $( $args, )*)) )?,
        ))
    };
}

#[macro_export]
macro_rules! map_err {
    ($ex:expr) => {
        $ex.map_err(|e| $crate::error::QuizkitError::new(file!(), line!(), column!(), e.into()))?
    };
}
