//! `medcalc calc` -- run a calculation from `key=value` inputs.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::warn;

use medcalc_explain::{
    ExplainError, Explainer, ExplanationRequest, FALLBACK_EXPLANATION, GeminiExplainer,
};
use medcalc_formula::{Computation, ErrorReport, Outcome};

use crate::cli::CalcArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, render_bold, render_muted, render_pass, with_unit};

#[derive(Serialize)]
struct CalcView<'a> {
    #[serde(flatten)]
    computation: &'a Computation,
    display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

#[derive(Serialize)]
struct ErrorView {
    error: ErrorReport,
}

/// Execute the `medcalc calc` command.
pub fn run(ctx: &RuntimeContext, args: &CalcArgs) -> Result<()> {
    let raw = parse_params(&args.params)?;
    let engine = ctx.engine()?;

    let computation = match engine.invoke(&args.slug, &args.name, &raw) {
        Ok(c) => c,
        Err(err) => {
            if ctx.json {
                output_json(&ErrorView {
                    error: err.to_report(),
                });
                std::process::exit(1);
            }
            return Err(err.into());
        }
    };

    let display = format_result(&computation.result);
    let explanation = if args.explain {
        let request = explanation_request(&computation, &display, args.context.as_deref());
        Some(explain_or_fallback(ctx, &request))
    } else {
        None
    };

    if ctx.json {
        output_json(&CalcView {
            computation: &computation,
            display,
            explanation,
        });
        return Ok(());
    }

    let value = with_unit(&display, computation.result_unit.as_deref());
    if ctx.quiet {
        println!("{}", value);
    } else {
        println!(
            "{}: {}",
            render_bold(&computation.calculation),
            render_pass(&value)
        );
    }
    if let Some(text) = explanation {
        println!("\n{}\n{}", render_muted("Explanation:"), text);
    }
    Ok(())
}

/// Split repeated `key=value` arguments into the raw input map.
///
/// Keys are trimmed; values are kept verbatim. A repeated key keeps its last
/// value.
fn parse_params(params: &[String]) -> Result<HashMap<String, String>> {
    let mut raw = HashMap::with_capacity(params.len());
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("invalid parameter '{}' (expected KEY=VALUE)", param);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid parameter '{}' (empty key)", param);
        }
        raw.insert(key.to_string(), value.to_string());
    }
    Ok(raw)
}

/// Integers as-is; decimals with more than four fractional digits are
/// rounded to four, trailing zeros dropped.
fn format_result(result: &Outcome) -> String {
    match result {
        Outcome::Integer(v) => v.to_string(),
        Outcome::Decimal(v) => {
            let plain = v.to_string();
            let fraction = plain.split_once('.').map_or(0, |(_, f)| f.len());
            if fraction <= 4 {
                return plain;
            }
            let rounded = format!("{:.4}", v);
            rounded
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        }
    }
}

fn explanation_request(
    computation: &Computation,
    display: &str,
    context: Option<&str>,
) -> ExplanationRequest {
    ExplanationRequest {
        calculation_name: computation.calculation.clone(),
        result: display.to_string(),
        result_unit: computation.result_unit.clone(),
        parameters: computation
            .inputs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect(),
        additional_context: context.map(String::from),
    }
}

fn explain_or_fallback(ctx: &RuntimeContext, request: &ExplanationRequest) -> String {
    let cfg = &ctx.config.explain;
    let explainer = GeminiExplainer::new(
        &cfg.endpoint,
        &cfg.model,
        cfg.api_key.as_deref(),
        Duration::from_secs(cfg.timeout_secs),
    );
    match explainer {
        Ok(explainer) => explain_with(&explainer, request),
        Err(e) => fallback(&e),
    }
}

/// The explanation, or the fallback sentence when the explainer fails.
fn explain_with(explainer: &dyn Explainer, request: &ExplanationRequest) -> String {
    explainer
        .explain(request)
        .unwrap_or_else(|e| fallback(&e))
}

fn fallback(err: &ExplainError) -> String {
    warn!(error = %err, "explanation unavailable");
    FALLBACK_EXPLANATION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use medcalc_formula::Value;
    use pretty_assertions::assert_eq;

    struct Canned(Option<&'static str>);

    impl Explainer for Canned {
        fn explain(&self, _: &ExplanationRequest) -> Result<String, ExplainError> {
            self.0.map(String::from).ok_or(ExplainError::EmptyResponse)
        }
    }

    fn bmi() -> Computation {
        let mut inputs = BTreeMap::new();
        inputs.insert("height".to_string(), Value::Decimal(1.75));
        inputs.insert("weight".to_string(), Value::Decimal(70.0));
        Computation {
            category_slug: "nutrition-fluid".into(),
            calculation: "Body Mass Index (BMI)".into(),
            result: Outcome::Decimal(70.0 / (1.75 * 1.75)),
            result_unit: Some("kg/m²".into()),
            inputs,
        }
    }

    #[test]
    fn params_split_on_first_equals() {
        let raw = parse_params(&[
            "weight=70".to_string(),
            " note =a=b".to_string(),
            "weight=72".to_string(),
        ])
        .unwrap();
        assert_eq!(raw.get("weight").map(String::as_str), Some("72"));
        assert_eq!(raw.get("note").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn params_keep_empty_values() {
        let raw = parse_params(&["weight=".to_string()]).unwrap();
        assert_eq!(raw.get("weight").map(String::as_str), Some(""));
    }

    #[test]
    fn params_reject_malformed() {
        assert!(parse_params(&["weight".to_string()]).is_err());
        assert!(parse_params(&["=70".to_string()]).is_err());
    }

    #[test]
    fn result_formatting() {
        assert_eq!(format_result(&Outcome::Integer(9)), "9");
        assert_eq!(format_result(&Outcome::Decimal(12.5)), "12.5");
        assert_eq!(format_result(&Outcome::Decimal(93.33333333)), "93.3333");
        assert_eq!(format_result(&Outcome::Decimal(2.000001)), "2");
        assert_eq!(format_result(&bmi().result), "22.8571");
    }

    #[test]
    fn request_carries_inputs_and_context() {
        let req = explanation_request(&bmi(), "22.8571", Some("post-op"));
        assert_eq!(req.calculation_name, "Body Mass Index (BMI)");
        assert_eq!(req.result, "22.8571");
        assert_eq!(req.result_unit.as_deref(), Some("kg/m²"));
        assert_eq!(req.parameters.get("height").map(String::as_str), Some("1.75"));
        assert_eq!(req.parameters.get("weight").map(String::as_str), Some("70"));
        assert_eq!(req.additional_context.as_deref(), Some("post-op"));
    }

    #[test]
    fn failed_explanation_falls_back() {
        let req = explanation_request(&bmi(), "22.8571", None);
        assert_eq!(explain_with(&Canned(None), &req), FALLBACK_EXPLANATION);
        assert_eq!(
            explain_with(&Canned(Some("- Normal weight range")), &req),
            "- Normal weight range"
        );
    }
}
