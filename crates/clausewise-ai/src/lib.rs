//! AI layer: prompt construction, the generative inference contract, and the
//! trust boundary that validates what the model sends back.

mod error;
pub mod inference;
pub mod parse;
pub mod prompt;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use error::{InferenceError, MalformedOutputError};
pub use inference::{InferenceRequest, InferenceService, OutputFormat};
pub use parse::parse_clauses;
pub use prompt::{MAX_DOCUMENT_CHARS, SYSTEM_INSTRUCTION, build_prompt};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig};
