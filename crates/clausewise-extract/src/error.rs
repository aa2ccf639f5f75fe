use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    Empty,

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Other(String),
}
