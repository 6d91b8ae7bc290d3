use serde::{Deserialize, Serialize};

/// Body of `POST /analyze-resume`.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

impl AnalysisRequest {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume_text: Some(resume_text.into()),
            job_description: Some(job_description.into()),
        }
    }

    /// Returns both texts when each one is present and non-empty.
    pub fn inputs(&self) -> Option<(&str, &str)> {
        let resume = self.resume_text.as_deref().filter(|s| !s.is_empty())?;
        let job = self.job_description.as_deref().filter(|s| !s.is_empty())?;
        Some((resume, job))
    }
}

/// Compatibility verdict produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: i64, // 0 – 100, not enforced
    pub justification: String,
}
