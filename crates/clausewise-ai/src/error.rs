use std::time::Duration;

use thiserror::Error;

/// The inference call itself failed. Never retried.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("no API key configured for the inference service")]
    MissingApiKey,

    #[error("inference request timed out after {0:?}")]
    Timeout(Duration),

    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("inference service returned no text ({0})")]
    EmptyResponse(String),

    #[error("could not decode inference service reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The service answered, but not with an array of clause records.
#[derive(Debug, Error)]
pub enum MalformedOutputError {
    #[error("model output is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("model output is a JSON {found}, expected an array")]
    NotArray { found: &'static str },

    #[error("element {index} is a JSON {found}, expected an object")]
    NotObject { index: usize, found: &'static str },

    #[error("element {index} has no {field:?}")]
    MissingField { index: usize, field: &'static str },

    #[error("element {index} is not a clause record: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
