use super::DocumentType;
use crate::core::model::TextExtract;
use crate::error::QuizkitError;

pub mod pdf;
pub mod text;

use pdf::PdfParser;
use text::TextParser;

/// Enumeration of all supported parser types.
#[derive(Debug)]
pub enum Parser {
    Text(TextParser),
    Pdf(PdfParser),
}

impl Parser {
    /// Returns the default parser for a document.
    pub fn new(ty: DocumentType) -> Self {
        match ty {
            DocumentType::Text => Self::Text(TextParser),
            DocumentType::Pdf => Self::Pdf(PdfParser),
        }
    }

    pub fn parse(&self, input: &[u8]) -> Result<TextExtract, QuizkitError> {
        match self {
            Self::Text(p) => p.parse(input),
            Self::Pdf(p) => p.parse(input),
        }
    }
}
