//! Parse catalog documents (JSON, YAML, TOML) and check their structure.
//!
//! Structural checks cover shape only. Registry coverage is checked by the
//! integrity report in `medcalc-formula`, not here.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::types::{Catalog, CatalogError};

/// The catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/calculations.json");

/// Parse a catalog from a JSON string.
pub fn parse_json(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog =
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
    check_structure(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a YAML string.
pub fn parse_yaml(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog =
        serde_yaml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
    check_structure(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a TOML string.
pub fn parse_toml(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog =
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
    check_structure(&catalog)?;
    Ok(catalog)
}

/// Load a catalog from a file path (auto-detect format by extension).
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let mut catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&content)?,
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        Some("toml") => parse_toml(&content)?,
        _ => {
            // Try JSON first, then YAML
            parse_json(&content).or_else(|_| parse_yaml(&content))?
        }
    };
    catalog.source = path.display().to_string();
    info!(
        source = %catalog.source,
        categories = catalog.categories.len(),
        calculations = catalog.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse the embedded catalog.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    let mut catalog = parse_json(BUILTIN_CATALOG)?;
    catalog.source = "builtin".to_string();
    debug!(calculations = catalog.len(), "builtin catalog parsed");
    Ok(catalog)
}

/// Reject documents that are syntactically valid but structurally unusable.
///
/// The same calculation name in two different categories is allowed: those
/// collisions are reported by the integrity check, not refused here.
pub fn check_structure(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut slugs: HashSet<&str> = HashSet::new();

    for (index, category) in catalog.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(CatalogError::EmptyCategoryField {
                index,
                field: "name",
            });
        }
        if category.slug.trim().is_empty() {
            return Err(CatalogError::EmptyCategoryField {
                index,
                field: "slug",
            });
        }
        if !slugs.insert(category.slug.as_str()) {
            return Err(CatalogError::DuplicateSlug(category.slug.clone()));
        }

        let mut names: HashSet<&str> = HashSet::new();
        for (calc_index, calc) in category.calculations.iter().enumerate() {
            if calc.name.trim().is_empty() {
                return Err(CatalogError::UnnamedCalculation {
                    slug: category.slug.clone(),
                    index: calc_index,
                });
            }
            if !names.insert(calc.name.as_str()) {
                return Err(CatalogError::DuplicateCalculation {
                    slug: category.slug.clone(),
                    name: calc.name.clone(),
                });
            }

            let mut params: HashSet<&str> = HashSet::new();
            for param in &calc.parameters {
                if param.name.trim().is_empty() {
                    return Err(CatalogError::UnnamedParameter {
                        calculation: calc.name.clone(),
                    });
                }
                if !params.insert(param.name.as_str()) {
                    return Err(CatalogError::DuplicateParameter {
                        calculation: calc.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}
