//! Text extraction: turns uploaded document bytes into plain text.

mod error;
pub use error::ExtractionError;

mod pdf;
pub use pdf::PdfTextExtractor;
mod text;
pub use text::PlainTextExtractor;

use std::path::Path;

/// Converts raw document bytes into text for the analysis pipeline.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Picks an extractor from the file extension: `.txt`/`.md` as UTF-8 text,
/// anything else as PDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoExtractor;

impl AutoExtractor {
    pub fn for_filename(&self, filename: &str) -> &'static dyn TextExtractor {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("txt" | "md") => &PlainTextExtractor,
            _ => &PdfTextExtractor,
        }
    }

    pub fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        self.for_filename(filename).extract_text(bytes)
    }
}
