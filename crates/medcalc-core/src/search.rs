//! Case-insensitive substring search over calculation names and descriptions.

use serde::Serialize;

use crate::types::Catalog;

/// One calculation matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub description: String,
    pub category_slug: String,
    pub category_name: String,
}

/// Search every calculation whose name or description contains `query`,
/// ignoring case. An empty query matches everything. Hits are returned in
/// catalog order.
pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchHit> {
    let needle = query.to_lowercase();
    catalog
        .calculations()
        .filter(|(_, calc)| {
            calc.name.to_lowercase().contains(&needle)
                || calc.description.to_lowercase().contains(&needle)
        })
        .map(|(cat, calc)| SearchHit {
            name: calc.name.clone(),
            description: calc.description.clone(),
            category_slug: cat.slug.clone(),
            category_name: cat.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_json;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        parse_json(
            r#"{"categories": [
                {"name": "Monitoring", "slug": "monitoring", "calculations": [
                    {"name": "Shock Index", "description": "Hemodynamic stability.", "parameters": []},
                    {"name": "Mean Arterial Pressure (MAP)", "description": "Perfusion.", "parameters": []}
                ]},
                {"name": "Cardio", "slug": "cardio", "calculations": [
                    {"name": "Mean Arterial Pressure (MAP)", "description": "Average pressure.", "parameters": []},
                    {"name": "Cardiac Index", "description": "Output adjusted to BSA.", "parameters": []}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn matches_name_case_insensitively() {
        let hits = search(&catalog(), "mean ARTERIAL");
        let slugs: Vec<&str> = hits.iter().map(|h| h.category_slug.as_str()).collect();
        assert_eq!(slugs, vec!["monitoring", "cardio"]);
    }

    #[test]
    fn matches_description() {
        let hits = search(&catalog(), "bsa");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Cardiac Index");
        assert_eq!(hits[0].category_name, "Cardio");
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(search(&catalog(), "").len(), 4);
    }

    #[test]
    fn no_match() {
        assert!(search(&catalog(), "warfarin").is_empty());
    }
}
