use std::path::Path;

pub mod parser;

/// Supported source document types, determined from the file extension.
/// Anything that is not a PDF is treated as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Text,
    Pdf,
}

impl DocumentType {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Self::Pdf,
            _ => Self::Text,
        }
    }
}
