use crate::core::model::TextExtract;
use crate::error::QuizkitError;
use crate::map_err;
use tracing::debug;

/// PDF text extraction via `pdf-extract`.
#[derive(Debug, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn parse(&self, input: &[u8]) -> Result<TextExtract, QuizkitError> {
        let pages = map_err!(pdf_extract::extract_text_from_mem_by_pages(input));

        debug!("Parsed pdf document ({} pages)", pages.len());

        Ok(TextExtract {
            text: pages.join("\n"),
            pages: pages.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizkitErr;

    #[test]
    fn garbage_input_is_an_extraction_error() {
        let err = PdfParser.parse(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err.error, QuizkitErr::Extraction(_)));
    }
}
