//! Invocation engine: catalog lookup, registry lookup, validation, execution.
//!
//! Every step either proceeds or returns a terminal [`InvocationError`]; the
//! caller always gets structured data back, never a panic or a silently
//! non-finite number.

use std::collections::{BTreeMap, HashMap};

use medcalc_core::{Catalog, CatalogError, ParamType, builtin_catalog};
use serde::Serialize;
use tracing::debug;

use crate::coerce::{ValidationError, validate};
use crate::formulas::builtin_registry;
use crate::integrity::IntegrityReport;
use crate::registry::Registry;
use crate::value::{Outcome, Value};

/// Terminal failure of an invocation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvocationError {
    #[error("category not found: {slug}")]
    CategoryNotFound { slug: String },

    #[error("calculation '{name}' not found in category '{slug}'")]
    CalculationNotFound { slug: String, name: String },

    #[error("calculation '{name}' is not implemented")]
    NotImplemented { name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("calculation failed: {message}")]
    Execution { message: String },
}

/// Flat, serializable view of an [`InvocationError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<ParamType>,
}

impl InvocationError {
    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CategoryNotFound { .. } => "category_not_found",
            Self::CalculationNotFound { .. } => "calculation_not_found",
            Self::NotImplemented { .. } => "not_implemented",
            Self::Validation(ValidationError::MissingValue { .. }) => "missing_value",
            Self::Validation(ValidationError::InvalidType { .. }) => "invalid_type",
            Self::Execution { .. } => "execution_error",
        }
    }

    /// The offending input field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(e.field()),
            _ => None,
        }
    }

    pub fn to_report(&self) -> ErrorReport {
        let expected_type = match self {
            Self::Validation(ValidationError::InvalidType { expected_type, .. }) => {
                Some(*expected_type)
            }
            _ => None,
        };
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            field: self.field().map(String::from),
            expected_type,
        }
    }
}

/// Successful invocation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub category_slug: String,
    pub calculation: String,
    pub result: Outcome,
    /// Carried from the catalog descriptor.
    pub result_unit: Option<String>,
    /// The coerced inputs the formula ran with.
    pub inputs: BTreeMap<String, Value>,
}

/// Catalog + registry pair serving invocations.
///
/// Both halves are immutable after construction, so an `Engine` can be
/// shared freely across threads (`&Engine` is all `invoke` needs).
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    registry: Registry,
    integrity: IntegrityReport,
}

impl Engine {
    /// Build an engine and log any integrity findings.
    pub fn new(catalog: Catalog, registry: Registry) -> Self {
        let integrity = IntegrityReport::check(&catalog, &registry);
        integrity.log();
        debug!(
            catalog = %catalog.source,
            formulas = registry.len(),
            clean = integrity.is_clean(),
            "engine ready"
        );
        Self {
            catalog,
            registry,
            integrity,
        }
    }

    /// Engine over the embedded catalog and every built-in formula.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(builtin_catalog()?, builtin_registry()))
    }

    /// Engine over a caller-supplied catalog and every built-in formula.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(catalog, builtin_registry())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn integrity(&self) -> &IntegrityReport {
        &self.integrity
    }

    /// Compute `name` in category `slug` from raw string inputs.
    pub fn invoke(
        &self,
        slug: &str,
        name: &str,
        raw: &HashMap<String, String>,
    ) -> Result<Computation, InvocationError> {
        let category =
            self.catalog
                .category(slug)
                .ok_or_else(|| InvocationError::CategoryNotFound {
                    slug: slug.to_string(),
                })?;

        let calc =
            category
                .calculation(name)
                .ok_or_else(|| InvocationError::CalculationNotFound {
                    slug: slug.to_string(),
                    name: name.to_string(),
                })?;

        let formula =
            self.registry
                .resolve(&calc.name)
                .ok_or_else(|| InvocationError::NotImplemented {
                    name: calc.name.clone(),
                })?;

        let args = validate(&calc.parameters, raw)?;
        debug!(slug, name, args = args.len(), "invoking formula");

        let result = formula
            .evaluate(&args)
            .map_err(|e| InvocationError::Execution {
                message: e.to_string(),
            })?;

        if !result.is_finite() {
            return Err(InvocationError::Execution {
                message: format!("result is not a finite number ({})", result),
            });
        }

        Ok(Computation {
            category_slug: category.slug.clone(),
            calculation: calc.name.clone(),
            result,
            result_unit: calc.result_unit.clone(),
            inputs: args.to_sorted(),
        })
    }
}
