//! Test doubles shared by the pipeline and server tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use clausewise_ai::{InferenceError, InferenceRequest, InferenceService};

/// 2026-02-19: `2026-03-01` is 10 days out, `2027-03-26` is 400.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
}

/// Returns a canned reply and records every request it receives.
pub struct ScriptedInference {
    /// `Err` holds the body of a simulated 503 from the service.
    reply: Result<String, String>,
    calls: AtomicUsize,
    last: Mutex<Option<InferenceRequest>>,
}

impl ScriptedInference {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InferenceRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceService for ScriptedInference {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        self.reply.clone().map_err(|body| InferenceError::Service { status: 503, body })
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
