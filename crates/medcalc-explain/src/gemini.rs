//! Explainer backed by the Gemini `generateContent` API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ExplainError, Explainer, ExplanationRequest, build_prompt};

/// Blocking HTTP client for one model.
pub struct GeminiExplainer {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl GeminiExplainer {
    /// Client for `{endpoint}/models/{model}:generateContent`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::MissingApiKey`] when `api_key` is absent or blank.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ExplainError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ExplainError::MissingApiKey)?;

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Ok(Self {
            agent,
            url: generate_url(endpoint, model),
            api_key: api_key.to_string(),
        })
    }
}

impl Explainer for GeminiExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError> {
        let body = GenerateRequest::from_prompt(build_prompt(request));
        debug!(url = %self.url, calculation = %request.calculation_name, "requesting explanation");

        let mut response = self
            .agent
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .send_json(&body)?;
        let parsed: GenerateResponse = response.body_mut().read_json()?;

        parsed.first_text().ok_or(ExplainError::EmptyResponse)
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_shape() {
        assert_eq!(
            generate_url("https://example.test/v1beta/", "gemini-2.0-flash"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn missing_key_is_rejected() {
        for key in [None, Some(""), Some("   ")] {
            let err = GeminiExplainer::new("https://x", "m", key, Duration::from_secs(1));
            assert!(matches!(err, Err(ExplainError::MissingApiKey)));
        }
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hi".into())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn first_candidate_text_is_extracted() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "- Within normal range"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("- Within normal range"));
    }

    #[test]
    fn blocked_response_has_no_text() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert_eq!(resp.first_text(), None);

        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }
}
