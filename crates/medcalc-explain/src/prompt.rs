//! Prompt construction.

use std::fmt::Write;

use crate::ExplanationRequest;

/// Parameters promoted to patient lines, matched case-insensitively.
const DEMOGRAPHICS: [(&str, &str); 3] = [("age", "Age"), ("sex", "Sex"), ("race", "Race")];

const INSTRUCTIONS: &str = "You are a senior clinical nursing assistant AI. \
When I provide you a lab value or a medical calculation result, you will:
  1) State whether the result is within the normal reference range (or above/below),
  2) Explain what an abnormal value could imply about the patient's condition,
  3) List any potential nursing concerns or next steps,
  4) Use plain language suitable for a registered nurse (RN),
  5) Keep your answer to 3-5 bullet points.";

/// Render the prompt for `request`.
///
/// Demographic parameters (`age`, `sex`, `race`) are lifted out of the
/// parameter list into `Patient ...` lines; empty values are omitted.
pub fn build_prompt(request: &ExplanationRequest) -> String {
    let unit = request.result_unit.as_deref().unwrap_or("");

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", INSTRUCTIONS);
    let _ = writeln!(out, "Calculation Name: {}", request.calculation_name);
    let _ = writeln!(out, "Result Value: {} {}", request.result, unit);
    let _ = writeln!(out, "Unit: {}", unit);

    for (key, label) in DEMOGRAPHICS {
        if let Some(value) = demographic(request, key) {
            let _ = writeln!(out, "Patient {}: {}", label, value);
        }
    }
    if let Some(context) = request
        .additional_context
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        let _ = writeln!(out, "Additional Context: {}", context);
    }

    let remaining: Vec<_> = request
        .parameters
        .iter()
        .filter(|(k, _)| !is_demographic(k))
        .collect();
    if !remaining.is_empty() {
        out.push_str("Calculation Parameters:\n");
        for (k, v) in remaining {
            let _ = writeln!(out, "- {}: {}", k, v);
        }
    }

    out.push_str("\nPlease provide your explanation now:");
    out
}

fn is_demographic(key: &str) -> bool {
    DEMOGRAPHICS
        .iter()
        .any(|(name, _)| key.eq_ignore_ascii_case(name))
}

fn demographic<'a>(request: &'a ExplanationRequest, key: &str) -> Option<&'a str> {
    request
        .parameters
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}
