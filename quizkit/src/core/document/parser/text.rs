use crate::core::model::TextExtract;
use crate::error::QuizkitError;
use crate::map_err;
use tracing::debug;

/// Plain UTF-8 text pass-through.
#[derive(Debug, Default)]
pub struct TextParser;

impl TextParser {
    pub fn parse(&self, input: &[u8]) -> Result<TextExtract, QuizkitError> {
        let text = map_err!(String::from_utf8(input.to_vec()));

        debug!("Parsed text document ({} bytes)", text.len());

        Ok(TextExtract { text, pages: 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_utf8() {
        let extract = TextParser.parse("hello there".as_bytes()).unwrap();
        assert_eq!(extract.text, "hello there");
        assert_eq!(extract.pages, 1);
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(TextParser.parse(&[0xff, 0xfe, 0xfd]).is_err());
    }
}
