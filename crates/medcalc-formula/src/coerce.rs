//! Coerce raw string inputs into typed values according to a parameter schema.
//!
//! Validation is fail-fast: parameters are checked in declared order and the
//! first missing or malformed one is reported.

use std::collections::HashMap;

use medcalc_core::{ParamType, Parameter};

use crate::value::{Args, Value};

/// Strings that coerce to `true` for boolean parameters (compared lower-cased).
const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing value for {field}")]
    MissingValue { field: String },

    #[error("invalid {expected_type} for {field}")]
    InvalidType {
        field: String,
        expected_type: ParamType,
    },
}

impl ValidationError {
    /// The offending parameter name.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingValue { field } | Self::InvalidType { field, .. } => field,
        }
    }
}

/// Coerce a single non-empty raw value to `param`'s declared type.
pub fn coerce(param: &Parameter, raw: &str) -> Result<Value, ValidationError> {
    let invalid = || ValidationError::InvalidType {
        field: param.name.clone(),
        expected_type: param.param_type,
    };

    match param.param_type {
        ParamType::Decimal => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Decimal)
            .ok_or_else(invalid),
        ParamType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid()),
        ParamType::Boolean => Ok(Value::Boolean(
            TRUTHY.contains(&raw.to_lowercase().as_str()),
        )),
        ParamType::Text => Ok(Value::Text(raw.to_string())),
    }
}

/// Validate `raw` against `params`, producing exactly one value per declared
/// parameter. Extra keys in `raw` are ignored.
pub fn validate(
    params: &[Parameter],
    raw: &HashMap<String, String>,
) -> Result<Args, ValidationError> {
    let mut args = Args::new();
    for param in params {
        let value = match raw.get(&param.name) {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(ValidationError::MissingValue {
                    field: param.name.clone(),
                });
            }
        };
        args.insert(param.name.clone(), coerce(param, value)?);
    }
    Ok(args)
}
