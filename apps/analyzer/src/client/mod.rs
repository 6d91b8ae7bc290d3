//! Client side of the analysis exchange.
//!
//! `AnalyzerForm` holds the UI state of one form session (the two inputs,
//! the loading flag, and either an error or a result) and drives a single
//! request through an `AnalysisTransport`. The `analyze` binary renders it
//! to the terminal.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

pub mod http;

pub use http::HttpTransport;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};

/// Shown when either input is empty; no request is issued.
pub const MISSING_INPUT_PROMPT: &str = "Please provide both resume content and a job description.";

/// Prefix of every error that comes back from a request.
pub const REQUEST_ERROR_PREFIX: &str = "An error occurred while analyzing the resume: ";

/// Fallback when a failed response carries no message of its own.
pub const BACKEND_FAILED_MESSAGE: &str = "Backend analysis failed.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. Displays the server's message only.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("invalid analysis payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Carries one analysis request to the server.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;
}

#[derive(Debug, Default)]
pub struct AnalyzerForm {
    pub resume_text: String,
    pub job_description: String,
    loading: bool,
    error: Option<String>,
    result: Option<AnalysisResult>,
}

impl AnalyzerForm {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description: job_description.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Runs one analysis. Returns `true` if a request was issued.
    ///
    /// Ignored while a request is outstanding. Empty inputs set the
    /// missing-input error without touching the network.
    pub async fn submit<T>(&mut self, transport: &T) -> bool
    where
        T: AnalysisTransport + ?Sized,
    {
        if self.loading {
            debug!("Analysis already in flight; ignoring submit");
            return false;
        }

        if self.resume_text.is_empty() || self.job_description.is_empty() {
            self.result = None;
            self.error = Some(MISSING_INPUT_PROMPT.to_string());
            return false;
        }

        self.error = None;
        self.result = None;
        let loading = LoadingGuard::raise(&mut self.loading);

        let request = AnalysisRequest::new(self.resume_text.clone(), self.job_description.clone());
        match transport.analyze(&request).await {
            Ok(result) => self.result = Some(result),
            Err(e) => {
                error!("Error analyzing resume: {e}");
                self.error = Some(format!("{REQUEST_ERROR_PREFIX}{e}"));
            }
        }

        drop(loading);
        true
    }

    /// Plain-text rendering of the current state.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.loading {
            out.push_str("Analyzing...\n");
        }

        if let Some(error) = &self.error {
            out.push_str("Error:\n");
            out.push_str(error);
            out.push('\n');
        }

        if let Some(result) = &self.result {
            out.push_str("Analysis Result\n");
            out.push_str(&format!("{} / 100\n", result.score));
            out.push_str(&format!("Justification: {}\n", result.justification));
        }

        out
    }
}

/// Holds the loading flag up for the lifetime of one request, including
/// a submit future that is dropped before it settles.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
