//! The model seam for compatibility scoring.
//!
//! `AppState` holds an `Arc<dyn CompatibilityModel>`. Production uses
//! `GeminiScorer`; tests substitute in-memory fakes.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{GeminiClient, LlmError};

/// Scores a composed prompt and returns the model's JSON reply untouched.
#[async_trait]
pub trait CompatibilityModel: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<Value, LlmError>;
}

/// Response schema: an object with integer `score` then string `justification`.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "justification": { "type": "STRING" }
        },
        "propertyOrdering": ["score", "justification"]
    })
}

/// Gemini-backed scorer. One `generateContent` call per analysis.
pub struct GeminiScorer(pub GeminiClient);

#[async_trait]
impl CompatibilityModel for GeminiScorer {
    async fn analyze(&self, prompt: &str) -> Result<Value, LlmError> {
        self.0.call_json(prompt, analysis_response_schema()).await
    }
}
