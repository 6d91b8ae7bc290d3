use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{AnalysisTransport, ClientError, BACKEND_FAILED_MESSAGE};
use crate::analysis::models::{AnalysisRequest, AnalysisResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Posts analysis requests to a running relay server.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/analyze-resume", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message: failure_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Picks the server's `error` (or `message`) field from a failed response.
fn failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| BACKEND_FAILED_MESSAGE.to_string())
}
