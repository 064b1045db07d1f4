//! Plain-language explanations of calculation results.
//!
//! [`prompt::build_prompt`] turns an [`ExplanationRequest`] into the text sent
//! to a generative model; an [`Explainer`] sends it somewhere and returns the
//! model's answer. [`gemini::GeminiExplainer`] is the HTTP implementation.
//!
//! Explanations are advisory. Callers keep the calculation result when an
//! explanation fails and show [`FALLBACK_EXPLANATION`] instead.

pub mod gemini;
pub mod prompt;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub use gemini::GeminiExplainer;
pub use prompt::build_prompt;

/// Shown in place of an explanation that could not be produced.
pub const FALLBACK_EXPLANATION: &str = "Sorry, could not get explanation.";

/// Everything the prompt is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub calculation_name: String,
    /// Formatted result value.
    pub result: String,
    pub result_unit: Option<String>,
    /// Input values by parameter name.
    pub parameters: BTreeMap<String, String>,
    /// Free-text clinical context supplied by the user.
    pub additional_context: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("no API key configured (set explain.api_key or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("explanation request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("explanation response contained no text")]
    EmptyResponse,
}

/// Produces an explanation for a calculation result.
pub trait Explainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError>;
}
