//! Cross-checks between a catalog and a registry.
//!
//! None of these findings stop the engine from serving requests; they exist
//! so drift between the catalog document and the code behind it is visible
//! at startup instead of surfacing one request at a time.

use std::collections::{BTreeSet, HashSet};

use medcalc_core::Catalog;
use serde::Serialize;
use tracing::warn;

use crate::registry::{Collision, Registry};

/// A descriptor with no registry entry behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unimplemented {
    pub category_slug: String,
    pub name: String,
}

/// A descriptor whose parameter names differ from what the live
/// implementation reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureMismatch {
    pub category_slug: String,
    pub name: String,
    /// Declared by the descriptor, sorted.
    pub declared: Vec<String>,
    /// Read by the implementation, sorted.
    pub implemented: Vec<String>,
}

/// Result of checking a catalog against a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub collisions: Vec<Collision>,
    pub unimplemented: Vec<Unimplemented>,
    /// Registry names no descriptor refers to.
    pub orphans: Vec<String>,
    pub signature_mismatches: Vec<SignatureMismatch>,
}

impl IntegrityReport {
    pub fn check(catalog: &Catalog, registry: &Registry) -> Self {
        let mut report = Self {
            collisions: registry.collisions().to_vec(),
            ..Self::default()
        };

        let mut described: HashSet<&str> = HashSet::new();
        for (category, calc) in catalog.calculations() {
            described.insert(calc.name.as_str());

            let Some(formula) = registry.resolve(&calc.name) else {
                report.unimplemented.push(Unimplemented {
                    category_slug: category.slug.clone(),
                    name: calc.name.clone(),
                });
                continue;
            };

            let declared: BTreeSet<&str> = calc.parameters.iter().map(|p| p.name.as_str()).collect();
            let implemented: BTreeSet<&str> = formula.params.iter().copied().collect();
            if declared != implemented {
                report.signature_mismatches.push(SignatureMismatch {
                    category_slug: category.slug.clone(),
                    name: calc.name.clone(),
                    declared: declared.into_iter().map(String::from).collect(),
                    implemented: implemented.into_iter().map(String::from).collect(),
                });
            }
        }

        report.orphans = registry
            .names()
            .filter(|name| !described.contains(name))
            .map(String::from)
            .collect();

        report
    }

    pub fn is_clean(&self) -> bool {
        self.collisions.is_empty()
            && self.unimplemented.is_empty()
            && self.orphans.is_empty()
            && self.signature_mismatches.is_empty()
    }

    /// One human-readable line per finding.
    pub fn findings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for c in &self.collisions {
            lines.push(format!(
                "'{}' registered {} times; the last registration is live",
                c.name, c.registrations
            ));
        }
        for u in &self.unimplemented {
            lines.push(format!(
                "'{}' in '{}' has no implementation",
                u.name, u.category_slug
            ));
        }
        for o in &self.orphans {
            lines.push(format!("'{}' is registered but not in the catalog", o));
        }
        for m in &self.signature_mismatches {
            lines.push(format!(
                "'{}' in '{}' declares [{}] but its implementation reads [{}]",
                m.name,
                m.category_slug,
                m.declared.join(", "),
                m.implemented.join(", ")
            ));
        }
        lines
    }

    /// Emit every finding as a warning.
    pub fn log(&self) {
        for line in self.findings() {
            warn!(target: "medcalc::integrity", "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Args, DomainError, Outcome};
    use medcalc_core::parser::parse_json;
    use pretty_assertions::assert_eq;

    fn zero(_: &Args) -> Result<Outcome, DomainError> {
        Ok(Outcome::Integer(0))
    }

    const DOC: &str = r#"{"categories": [
        {"name": "A", "slug": "a", "calculations": [
            {"name": "Shared", "parameters": [{"name": "x", "type": "decimal"}, {"name": "y", "type": "decimal"}]},
            {"name": "Missing", "parameters": []}
        ]},
        {"name": "B", "slug": "b", "calculations": [
            {"name": "Shared", "parameters": [{"name": "x", "type": "decimal"}]}
        ]}
    ]}"#;

    #[test]
    fn reports_every_kind_of_drift() {
        let catalog = parse_json(DOC).unwrap();
        let mut b = Registry::builder();
        b.register("Shared", &["y", "x"], zero)
            .register("Shared", &["x", "y"], zero)
            .register("Unused", &[], zero);
        let report = IntegrityReport::check(&catalog, &b.build());

        assert_eq!(report.collisions.len(), 1);
        assert_eq!(
            report.unimplemented,
            vec![Unimplemented {
                category_slug: "a".into(),
                name: "Missing".into()
            }]
        );
        assert_eq!(report.orphans, vec!["Unused".to_string()]);
        // Order-independent comparison: only category b disagrees.
        assert_eq!(report.signature_mismatches.len(), 1);
        assert_eq!(report.signature_mismatches[0].category_slug, "b");
        assert_eq!(report.signature_mismatches[0].declared, vec!["x"]);
        assert_eq!(report.signature_mismatches[0].implemented, vec!["x", "y"]);
        assert!(!report.is_clean());
        assert_eq!(report.findings().len(), 4);
    }

    #[test]
    fn clean_report() {
        let catalog = parse_json(
            r#"{"categories": [{"name": "A", "slug": "a", "calculations": [{"name": "Z", "parameters": []}]}]}"#,
        )
        .unwrap();
        let mut b = Registry::builder();
        b.register("Z", &[], zero);
        let report = IntegrityReport::check(&catalog, &b.build());
        assert!(report.is_clean());
        assert!(report.findings().is_empty());
    }
}
