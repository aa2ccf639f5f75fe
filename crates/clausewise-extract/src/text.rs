use crate::{ExtractionError, TextExtractor};

/// UTF-8 text documents, passed through unchanged apart from a leading BOM.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        let text = std::str::from_utf8(bytes)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}
