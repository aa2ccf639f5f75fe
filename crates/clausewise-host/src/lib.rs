//! Pipeline runtime: upload bytes in, [`AnalysisResult`] out.
//!
//! One request runs extraction → prompt → inference → validation →
//! post-processing → assembly, all-or-nothing. The [`Analyzer`] holds only
//! immutable state, so a single instance serves concurrent requests.

mod config;
mod error;
pub mod server;

#[cfg(test)]
mod testing;

pub use config::AnalyzerConfig;
pub use error::AnalysisError;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clausewise_ai::{InferenceService, build_prompt, parse_clauses};
use clausewise_core::{AnalysisResult, PostProcessor, assemble};
use clausewise_extract::{AutoExtractor, ExtractionError, TextExtractor};
use tracing::{error, info, warn};

pub struct Analyzer {
    config: AnalyzerConfig,
    rules: PostProcessor,
    inference: Arc<dyn InferenceService>,
    /// Fixed extractor; when unset the file extension decides.
    extractor: Option<Arc<dyn TextExtractor>>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig, inference: Arc<dyn InferenceService>) -> Self {
        let rules = PostProcessor::for_checklist(&config.checklist);
        Self {
            config,
            rules,
            inference,
            extractor: None,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        self.inference.model()
    }

    /// Analyse one uploaded document, dating statuses against today (UTC).
    pub async fn handle(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.handle_on(bytes, filename, Utc::now().date_naive()).await
    }

    /// [`handle`](Self::handle) with an explicit `today`.
    pub async fn handle_on(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        today: NaiveDate,
    ) -> Result<AnalysisResult, AnalysisError> {
        let result = self.run(bytes, filename, today).await;
        if let Err(e) = &result {
            if e.is_client_error() {
                warn!(filename, stage = e.stage(), error = %e, "rejected upload");
            } else {
                error!(filename, stage = e.stage(), error = %e, "analysis failed");
            }
        }
        result
    }

    async fn run(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        today: NaiveDate,
    ) -> Result<AnalysisResult, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::EmptyUpload);
        }
        info!(filename, bytes = bytes.len(), "processing file");
        let text = self.extract(bytes, filename).await?;
        self.analyze_text(&text, filename, today).await
    }

    /// Extraction is CPU-bound, so it runs off the async workers.
    async fn extract(&self, bytes: Vec<u8>, filename: &str) -> Result<String, ExtractionError> {
        let extractor = self.extractor.clone();
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || match extractor {
            Some(extractor) => extractor.extract_text(&bytes),
            None => AutoExtractor.extract(&filename, &bytes),
        })
        .await
        .map_err(|e| ExtractionError::Other(format!("extraction task failed: {e}")))?
    }

    /// Run the pipeline on already-extracted text.
    pub async fn analyze_text(
        &self,
        text: &str,
        filename: &str,
        today: NaiveDate,
    ) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            warn!(filename, "document has no extractable text");
        }

        let prompt = build_prompt(text, &self.config.checklist);
        let request = self.config.inference_request(prompt);
        let raw = self.inference.generate(&request).await?;

        let records = parse_clauses(&raw)?;
        let found = records.len();
        let clauses = self.rules.process(records, today);

        info!(
            filename,
            model = self.inference.model(),
            found,
            kept = clauses.len(),
            "analysis complete"
        );
        Ok(assemble(filename, &self.config.checklist.benchmark, clauses))
    }
}
