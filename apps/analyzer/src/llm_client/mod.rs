//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! No other module talks to the Gemini API directly; prompts are built
//! by their owning module and handed to this client.
//!
//! Every call is a single attempt. Failures are returned to the caller as-is.
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod types;

use crate::config::Config;
use types::{
    Content, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Thin wrapper over the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_api_base_url.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends `prompt` as a single user-role message and returns the full response.
    pub async fn generate(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }

    /// Calls the model in JSON mode with `schema` and returns the raw reply text.
    pub async fn generate_json_text(&self, prompt: &str, schema: Value) -> Result<String, LlmError> {
        let response = self
            .generate(prompt, Some(GenerationConfig::json(schema)))
            .await?;

        match response.text() {
            Some(text) => Ok(text),
            None => {
                if let Some(reason) = response.block_reason() {
                    warn!("Gemini blocked the prompt: {reason}");
                } else if let Some(reason) = response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                {
                    warn!("Gemini returned no text (finish reason: {reason})");
                }
                Err(LlmError::EmptyContent)
            }
        }
    }

    /// Calls the model in JSON mode and deserializes the reply.
    /// The reply text must be JSON as-is; fenced or prose replies are errors.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<T, LlmError> {
        let text = self.generate_json_text(prompt, schema).await?;

        serde_json::from_str(&text).map_err(LlmError::Parse)
    }
}
