//! The objects that cross the system boundary.

use serde::{Deserialize, Serialize};

use crate::clause::ProcessedClause;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Final result for one analysed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: ResultStatus,
    pub filename: String,
    /// Which checklist standard produced `clauses`.
    pub benchmark: String,
    pub clauses: Vec<ProcessedClause>,
}

/// Error body returned in place of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: ResultStatus,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            error: error.into(),
        }
    }
}

/// Wrap processed clauses with request metadata.
pub fn assemble(
    filename: &str,
    benchmark_id: &str,
    processed: Vec<ProcessedClause>,
) -> AnalysisResult {
    AnalysisResult {
        status: ResultStatus::Success,
        filename: filename.to_string(),
        benchmark: benchmark_id.to_string(),
        clauses: processed,
    }
}
