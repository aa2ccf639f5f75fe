use clausewise_ai::{InferenceError, MalformedOutputError};
use clausewise_core::ErrorEnvelope;
use clausewise_extract::ExtractionError;
use thiserror::Error;

/// Why a request produced no result. Every variant ends the request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No file content uploaded.")]
    EmptyUpload,

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("AI inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("AI failed to parse legal clauses: {0}")]
    MalformedOutput(#[from] MalformedOutputError),
}

impl AnalysisError {
    /// Pipeline stage that failed, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::EmptyUpload => "upload",
            Self::Extraction(_) => "extraction",
            Self::Inference(_) => "inference",
            Self::MalformedOutput(_) => "parsing",
        }
    }

    /// True when the caller sent a bad request rather than the service failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyUpload)
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.to_string())
    }
}
