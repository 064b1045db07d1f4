//! Deterministic content fingerprint for a catalog.
//!
//! Produces a SHA-256 hex digest over every descriptor field in document
//! order, so two processes serving the same catalog report the same value
//! regardless of where the document was loaded from.

use sha2::{Digest, Sha256};

use crate::types::Catalog;

/// Separator byte written between fields.
const SEP: u8 = 0;

/// Computes the fingerprint of a catalog. The `source` path is excluded.
pub fn compute_fingerprint(catalog: &Catalog) -> String {
    let mut h = Sha256::new();

    for category in &catalog.categories {
        write_str(&mut h, &category.name);
        write_str(&mut h, &category.slug);
        write_str(&mut h, &category.description);
        for calc in &category.calculations {
            write_str(&mut h, &calc.name);
            write_str(&mut h, &calc.description);
            write_str_opt(&mut h, calc.result_unit.as_deref());
            for param in &calc.parameters {
                write_str(&mut h, &param.name);
                write_str(&mut h, param.param_type.as_str());
                write_str_opt(&mut h, param.unit.as_deref());
                write_str_opt(&mut h, param.label.as_deref());
                for option in &param.options {
                    write_str(&mut h, option);
                }
                h.update([SEP]);
            }
            h.update([SEP]);
        }
        h.update([SEP]);
    }

    let digest = h.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

impl Catalog {
    /// Hex SHA-256 fingerprint of this catalog's content.
    pub fn fingerprint(&self) -> String {
        compute_fingerprint(self)
    }
}

fn write_str(h: &mut Sha256, s: &str) {
    h.update(s.as_bytes());
    h.update([SEP]);
}

fn write_str_opt(h: &mut Sha256, s: Option<&str>) {
    match s {
        Some(s) => write_str(h, s),
        None => h.update([SEP]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_json;

    const DOC: &str = r#"{"categories": [{"name": "A", "slug": "a", "calculations": [
        {"name": "X", "result_unit": "mg", "parameters": [{"name": "w", "type": "decimal"}]}
    ]}]}"#;

    #[test]
    fn fingerprint_is_stable_and_hex() {
        let a = parse_json(DOC).unwrap();
        let mut b = parse_json(DOC).unwrap();
        b.source = "/somewhere/else.json".into();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert!(a.fingerprint().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_changes_with_unit() {
        let a = parse_json(DOC).unwrap();
        let b = parse_json(&DOC.replace("\"mg\"", "\"g\"")).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
