use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Body of every 400 returned by the analysis endpoint.
pub const MISSING_INPUT_MESSAGE: &str = "Resume text and job description are required.";

/// Body of every 500. Upstream detail is logged, never returned.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze resume. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Analysis error: {0}")]
    Analysis(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Analysis(e) => {
                tracing::error!("Error calling Gemini API: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ANALYSIS_FAILED_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
