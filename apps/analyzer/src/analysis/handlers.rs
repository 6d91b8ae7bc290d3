//! Axum route handler for the analysis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::models::AnalysisRequest;
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::{AppError, MISSING_INPUT_MESSAGE};
use crate::state::AppState;

/// POST /analyze-resume
///
/// Scores a resume against a job description. The model's JSON reply is
/// returned as-is; a reply that is not JSON becomes a generic 500.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Rejected analysis body: {rejection}");
            return Err(missing_input());
        }
    };

    let (resume_text, job_description) = request.inputs().ok_or_else(missing_input)?;

    info!(
        resume_bytes = resume_text.len(),
        job_description_bytes = job_description.len(),
        "Analyzing resume"
    );

    let prompt = build_analysis_prompt(resume_text, job_description);
    let result = state.model.analyze(&prompt).await?;

    Ok(Json(result))
}

fn missing_input() -> AppError {
    AppError::Validation(MISSING_INPUT_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::analysis::scorer::CompatibilityModel;
    use crate::config::Config;
    use crate::errors::ANALYSIS_FAILED_MESSAGE;
    use crate::llm_client::LlmError;
    use crate::routes::build_router;

    use super::*;

    enum Reply {
        Json(Value),
        Malformed,
        Upstream,
    }

    struct FakeModel {
        reply: Reply,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl FakeModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompatibilityModel for FakeModel {
        async fn analyze(&self, prompt: &str) -> Result<Value, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Reply::Json(value) => Ok(value.clone()),
                Reply::Malformed => Err(LlmError::Parse(
                    serde_json::from_str::<Value>("{\"score\": 82,").unwrap_err(),
                )),
                Reply::Upstream => Err(LlmError::Api {
                    status: 503,
                    message: "model overloaded".to_string(),
                }),
            }
        }
    }

    fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "test-model".to_string(),
            gemini_api_base_url: "http://127.0.0.1:1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    fn app(model: Arc<FakeModel>) -> Router {
        build_router(AppState {
            config: Arc::new(test_config()),
            model,
        })
    }

    async fn post_raw(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        post_raw(app, &body.to_string()).await
    }

    #[tokio::test]
    async fn test_valid_request_passes_model_reply_through() {
        let reply = json!({
            "score": 82,
            "justification": "Strong skills match; missing cloud certification."
        });
        let model = FakeModel::new(Reply::Json(reply.clone()));

        let (status, body) = post_json(
            app(model.clone()),
            json!({ "resumeText": "Rust engineer, 6 years", "jobDescription": "Senior Rust role" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reply);
        assert_eq!(model.calls(), 1);

        let prompt = model.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Rust engineer, 6 years"));
        assert!(prompt.contains("Senior Rust role"));
    }

    #[tokio::test]
    async fn test_passthrough_keeps_property_order_and_unvalidated_values() {
        let raw = r#"{"score":140,"justification":"Overqualified","extra":true}"#;
        let model = FakeModel::new(Reply::Json(serde_json::from_str(raw).unwrap()));

        let request = Request::builder()
            .method("POST")
            .uri("/analyze-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "resumeText": "r", "jobDescription": "j" }).to_string(),
            ))
            .unwrap();
        let response = app(model).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), raw);
    }

    #[tokio::test]
    async fn test_missing_or_empty_fields_are_rejected_without_model_call() {
        let bodies = [
            json!({}),
            json!({ "resumeText": "resume" }),
            json!({ "jobDescription": "job" }),
            json!({ "resumeText": "", "jobDescription": "job" }),
            json!({ "resumeText": "resume", "jobDescription": "" }),
            json!({ "resumeText": null, "jobDescription": "job" }),
        ];

        for body in bodies {
            let model = FakeModel::new(Reply::Json(json!({})));
            let (status, response) = post_json(app(model.clone()), body.clone()).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(response, json!({ "error": MISSING_INPUT_MESSAGE }));
            assert_eq!(model.calls(), 0, "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_rejected_without_model_call() {
        let model = FakeModel::new(Reply::Json(json!({})));
        let (status, response) = post_raw(app(model.clone()), "resume=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": MISSING_INPUT_MESSAGE }));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_model_reply_is_generic_server_error() {
        let model = FakeModel::new(Reply::Malformed);
        let (status, response) = post_json(
            app(model.clone()),
            json!({ "resumeText": "secret resume", "jobDescription": "job" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, json!({ "error": ANALYSIS_FAILED_MESSAGE }));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried_or_leaked() {
        let model = FakeModel::new(Reply::Upstream);
        let (status, response) = post_json(
            app(model.clone()),
            json!({ "resumeText": "secret resume", "jobDescription": "job" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, json!({ "error": ANALYSIS_FAILED_MESSAGE }));
        assert!(!response.to_string().contains("secret resume"));
        assert!(!response.to_string().contains("overloaded"));
        assert_eq!(model.calls(), 1);
    }
}
