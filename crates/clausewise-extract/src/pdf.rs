use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::{ExtractionError, TextExtractor};

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with an embedded text layer; scanned pages yield no text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let text = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }))
        .map_err(|_| ExtractionError::Pdf("extractor aborted on malformed input".into()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        debug!(bytes = bytes.len(), chars = text.chars().count(), "extracted PDF text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bytes_rejected() {
        let err = PdfTextExtractor.extract_text(b"").unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let result = PdfTextExtractor.extract_text(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
