//! HTTP transport: multipart upload in, JSON result or error envelope out.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clausewise_core::ErrorEnvelope;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::Analyzer;

/// Request body cap (multipart overhead included).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

const DEFAULT_FILENAME: &str = "unknown.pdf";

#[derive(Serialize)]
struct Health<'a> {
    status: &'static str,
    model: &'a str,
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/", post(analyze))
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .route("/checklist", get(checklist))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(analyzer)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, analyzer: Arc<Analyzer>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        checklist = %analyzer.config().checklist.name,
        model = analyzer.model(),
        "clause analysis server listening"
    );
    axum::serve(listener, router(analyzer)).await?;
    Ok(())
}

async fn analyze(
    State(analyzer): State<Arc<Analyzer>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("upload is not multipart: {rejection}");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Expected a multipart/form-data upload: {}", rejection.body_text()),
            );
        }
    };
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("unreadable multipart body: {e}");
                return error_response(StatusCode::BAD_REQUEST, format!("Could not read upload: {e}"));
            }
        };

        // File parts carry a filename; a bare part named "file" also counts.
        let is_file = field.file_name().is_some() || field.name() == Some("file");
        if !is_file || upload.is_some() {
            continue;
        }
        let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
        match field.bytes().await {
            Ok(bytes) => upload = Some((filename, bytes.to_vec())),
            Err(e) => {
                warn!(filename = %filename, "failed to read upload bytes: {e}");
                return error_response(StatusCode::BAD_REQUEST, "Failed to read file data.".into());
            }
        }
    }

    let (filename, bytes) = upload.unwrap_or_else(|| (DEFAULT_FILENAME.to_string(), Vec::new()));
    match analyzer.handle(bytes, &filename).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(e.envelope())).into_response()
        }
    }
}

async fn health(State(analyzer): State<Arc<Analyzer>>) -> Response {
    Json(Health {
        status: "ok",
        model: analyzer.model(),
    })
    .into_response()
}

async fn checklist(State(analyzer): State<Arc<Analyzer>>) -> Response {
    Json(&analyzer.config().checklist).into_response()
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorEnvelope::new(message))).into_response()
}
