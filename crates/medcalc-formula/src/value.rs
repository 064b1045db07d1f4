//! Typed values produced by coercion and the argument bag formulas read from.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Decimal(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decimal(_) => "decimal",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// The bare result of a formula. Units come from the catalog, not from here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Decimal(f64),
    Integer(i64),
}

impl Outcome {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Decimal(v) => v,
            Self::Integer(v) => v as f64,
        }
    }

    /// Integers are always finite; decimals must not be NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Decimal(v) => v.is_finite(),
            Self::Integer(_) => true,
        }
    }
}

impl From<f64> for Outcome {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

impl From<i64> for Outcome {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Failures raised by a formula while computing its result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of a negative number ({0})")]
    NegativeSquareRoot(f64),

    #[error("logarithm of a non-positive number ({0})")]
    NonPositiveLogarithm(f64),

    #[error("{base} cannot be raised to the power {exponent}")]
    InvalidPower { base: f64, exponent: f64 },

    #[error("unrecognized {field} '{value}' (expected {expected})")]
    InvalidCode {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("integer overflow")]
    Overflow,

    #[error("missing argument '{0}'")]
    MissingArgument(String),

    #[error("argument '{field}' is {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Categorical codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    Black,
    NonBlack,
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

/// Coerced values keyed by parameter name, handed to a formula.
///
/// Formulas read by name; an accessor failing means the descriptor and the
/// implementation disagree about the parameter set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: HashMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&Value, DomainError> {
        self.values
            .get(name)
            .ok_or_else(|| DomainError::MissingArgument(name.to_string()))
    }

    /// Read a decimal. Integers widen losslessly for the magnitudes in use.
    pub fn decimal(&self, name: &str) -> Result<f64, DomainError> {
        match self.get(name)? {
            Value::Decimal(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => Err(wrong_type(name, "decimal", other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, DomainError> {
        match self.get(name)? {
            Value::Integer(v) => Ok(*v),
            other => Err(wrong_type(name, "integer", other)),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, DomainError> {
        match self.get(name)? {
            Value::Boolean(v) => Ok(*v),
            other => Err(wrong_type(name, "boolean", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, DomainError> {
        match self.get(name)? {
            Value::Text(v) => Ok(v.as_str()),
            other => Err(wrong_type(name, "text", other)),
        }
    }

    /// Read a sex code: `male`/`m` or `female`/`f`, case-insensitive.
    pub fn sex(&self, name: &str) -> Result<Sex, DomainError> {
        let raw = self.text(name)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(DomainError::InvalidCode {
                field: name.to_string(),
                value: raw.to_string(),
                expected: "male or female",
            }),
        }
    }

    /// Read a race code: `black` or `non-black`, case-insensitive.
    pub fn race(&self, name: &str) -> Result<Race, DomainError> {
        let raw = self.text(name)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Race::Black),
            "non-black" | "nonblack" | "non black" | "other" => Ok(Race::NonBlack),
            _ => Err(DomainError::InvalidCode {
                field: name.to_string(),
                value: raw.to_string(),
                expected: "black or non-black",
            }),
        }
    }

    /// Sorted copy of the values, for stable output.
    pub fn to_sorted(&self) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn wrong_type(name: &str, expected: &'static str, found: &Value) -> DomainError {
    DomainError::WrongType {
        field: name.to_string(),
        expected,
        found: found.kind(),
    }
}
