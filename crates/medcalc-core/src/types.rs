//! Catalog data model -- categories, calculation descriptors and parameters.
//!
//! The catalog is pure metadata: it names every calculation, its parameters
//! and result unit, but carries no executable logic. It is loaded once at
//! startup and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Root structure of a catalog document (`calculations.json` and friends).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Categories in document order.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Where this catalog was loaded from (set by the parser).
    #[serde(skip)]
    pub source: String,
}

/// A named group of calculations, addressed externally by its slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Display name, e.g. "Pharmacokinetics".
    pub name: String,

    /// Stable identifier used for linking, e.g. "pharmacokinetics".
    pub slug: String,

    /// Short blurb shown in listings.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Calculations in document order.
    #[serde(default)]
    pub calculations: Vec<Calculation>,
}

/// Descriptor for one calculation. The name is the registry key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Unit attached to the bare number an implementation returns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_unit: Option<String>,

    /// Ordered parameter list. Every entry must be supplied on invocation.
    /// The key is required; a calculation without inputs declares `[]`.
    pub parameters: Vec<Parameter>,
}

/// Descriptor for one calculation input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Key used to look up the raw input value (case-sensitive).
    pub name: String,

    /// Declared type; drives coercion of the raw string.
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Human-readable label for forms and prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Unit annotation (informational only, no conversion is performed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Suggested values for categorical inputs. Never enforced by the validator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Parameter {
    /// The label if present, otherwise the parameter name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl Calculation {
    /// Parameter names in declared order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// ParamType
// ---------------------------------------------------------------------------

/// Declared type of a parameter.
///
/// Serialized with the canonical tag; deserialization also accepts the
/// aliases older catalogs use (`float`, `int`, `bool`, `string`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Decimal,
    Integer,
    Boolean,
    /// Free-form or categorical text, passed through verbatim.
    Text,
}

impl ParamType {
    /// Returns the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Text => "text",
        }
    }

    /// Parse a type tag, accepting aliases. Case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "decimal" | "float" | "number" => Some(Self::Decimal),
            "integer" | "int" => Some(Self::Integer),
            "boolean" | "bool" => Some(Self::Boolean),
            "text" | "string" | "select" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::from_tag(&tag).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown parameter type '{}' (expected decimal, integer, boolean or text)",
                tag
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl Catalog {
    /// Find a category by slug.
    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Find a calculation by category slug and exact name.
    pub fn find_calculation(&self, slug: &str, name: &str) -> Option<&Calculation> {
        self.category(slug)?.calculation(name)
    }

    /// Iterate over every `(category, calculation)` pair in document order.
    pub fn calculations(&self) -> impl Iterator<Item = (&Category, &Calculation)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.calculations.iter().map(move |calc| (cat, calc)))
    }

    /// Total number of calculation descriptors, duplicates included.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.calculations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Category {
    /// Find a calculation in this category by exact name.
    pub fn calculation(&self, name: &str) -> Option<&Calculation> {
        self.calculations.iter().find(|c| c.name == name)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("category #{index} has an empty {field}")]
    EmptyCategoryField { index: usize, field: &'static str },

    #[error("duplicate category slug: {0}")]
    DuplicateSlug(String),

    #[error("calculation #{index} in category '{slug}' has no name")]
    UnnamedCalculation { slug: String, index: usize },

    #[error("calculation '{name}' appears twice in category '{slug}'")]
    DuplicateCalculation { slug: String, name: String },

    #[error("calculation '{calculation}' has a parameter with no name")]
    UnnamedParameter { calculation: String },

    #[error("calculation '{calculation}' declares parameter '{parameter}' twice")]
    DuplicateParameter {
        calculation: String,
        parameter: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_type_aliases() {
        assert_eq!(ParamType::from_tag("float"), Some(ParamType::Decimal));
        assert_eq!(ParamType::from_tag("Decimal"), Some(ParamType::Decimal));
        assert_eq!(ParamType::from_tag("int"), Some(ParamType::Integer));
        assert_eq!(ParamType::from_tag("bool"), Some(ParamType::Boolean));
        assert_eq!(ParamType::from_tag("select"), Some(ParamType::Text));
        assert_eq!(ParamType::from_tag("date"), None);
    }

    #[test]
    fn param_type_serializes_canonical_tag() {
        let p: Parameter = serde_json::from_str(r#"{"name": "age", "type": "int"}"#).unwrap();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "integer");
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let err = serde_json::from_str::<Parameter>(r#"{"name": "x", "type": "matrix"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("matrix"));
    }

    #[test]
    fn display_name_prefers_label() {
        let p = Parameter {
            name: "dosePerKg".into(),
            param_type: ParamType::Decimal,
            label: Some("Dose per kg".into()),
            unit: None,
            options: vec![],
        };
        assert_eq!(p.display_name(), "Dose per kg");
    }
}
