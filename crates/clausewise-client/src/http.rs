//! HTTP upload client for a running clause analysis server.

use std::path::{Path, PathBuf};

use clausewise_core::{AnalysisResult, ErrorEnvelope};
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Posts documents to the upload endpoint as multipart field `file`.
pub struct UploadClient {
    client: reqwest::Client,
    url: String,
}

impl UploadClient {
    /// `url` is the endpoint, e.g. `http://127.0.0.1:8080/analyze`.
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload the file at `path` under its base name.
    pub async fn upload(&self, path: &Path) -> Result<AnalysisResult, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.pdf");
        self.upload_bytes(filename, bytes).await
    }

    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AnalysisResult, ClientError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        info!(url = %self.url, filename, "uploading document");
        let resp = self.client.post(&self.url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let result: AnalysisResult = serde_json::from_str(&body)?;
        info!(clauses = result.clauses.len(), "analysis received");
        Ok(result)
    }
}

/// The envelope's `error` field, or the raw body if it is not an envelope.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error)
        .unwrap_or_else(|_| body.to_string())
}
