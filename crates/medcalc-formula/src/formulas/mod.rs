//! Built-in formula implementations, one module per catalog category.
//!
//! [`builtin_registry`] is the only place these are registered. Categories are
//! registered in catalog order, so when two categories register the same
//! calculation name the one appearing later in the catalog is live.

use crate::registry::Registry;

mod body;
mod cardiovascular;
mod dosage;
mod electrolytes;
mod epidemiology;
mod lab;
mod monitoring;
mod nutrition;
mod other;
mod pharmacokinetics;
mod statistics;

/// Registry holding every built-in formula.
pub fn builtin_registry() -> Registry {
    let mut b = Registry::builder();
    dosage::register(&mut b);
    monitoring::register(&mut b);
    nutrition::register(&mut b);
    pharmacokinetics::register(&mut b);
    lab::register(&mut b);
    cardiovascular::register(&mut b);
    body::register(&mut b);
    epidemiology::register(&mut b);
    electrolytes::register(&mut b);
    other::register(&mut b);
    statistics::register(&mut b);
    b.build()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::value::{Args, Value};

    /// Args holding only decimal values.
    pub fn decimals(pairs: &[(&str, f64)]) -> Args {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::Decimal(*v)))
            .collect()
    }

    /// Args holding only integer values.
    pub fn integers(pairs: &[(&str, i64)]) -> Args {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::Integer(*v)))
            .collect()
    }

    pub fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::coerce::ValidationError;
    use crate::engine::{Engine, InvocationError};
    use crate::value::Outcome;
    use medcalc_core::ParamType;
    use pretty_assertions::assert_eq;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn decimal(outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Decimal(v) => v,
            other => panic!("expected decimal outcome, got {other:?}"),
        }
    }

    #[test]
    fn bmi() {
        let engine = Engine::builtin().unwrap();
        let c = engine
            .invoke(
                "nutrition-fluid",
                "Body Mass Index (BMI)",
                &raw(&[("weight", "70"), ("height", "1.75")]),
            )
            .unwrap();
        testing::approx(decimal(c.result), 22.857142857);
        assert_eq!(c.result_unit.as_deref(), Some("kg/m²"));
    }

    #[test]
    fn mean_arterial_pressure_in_both_categories() {
        let engine = Engine::builtin().unwrap();
        let inputs = raw(&[("systolic", "120"), ("diastolic", "80")]);
        for slug in ["patient-monitoring", "cardiovascular"] {
            let c = engine
                .invoke(slug, "Mean Arterial Pressure (MAP)", &inputs)
                .unwrap();
            testing::approx(decimal(c.result), 93.333333333);
            assert_eq!(c.category_slug, slug);
        }
    }

    #[test]
    fn malformed_dose_is_rejected_before_execution() {
        let engine = Engine::builtin().unwrap();
        let err = engine
            .invoke(
                "medical-dosage",
                "Dosage by Weight",
                &raw(&[("dosePerKg", "abc"), ("weight", "70")]),
            )
            .unwrap_err();
        assert_eq!(
            err,
            InvocationError::Validation(ValidationError::InvalidType {
                field: "dosePerKg".into(),
                expected_type: ParamType::Decimal,
            })
        );
    }

    #[test]
    fn zero_infusion_time_is_an_execution_error() {
        let engine = Engine::builtin().unwrap();
        let err = engine
            .invoke(
                "medical-dosage",
                "IV Flow Rate",
                &raw(&[("volume", "1000"), ("time", "0")]),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "execution_error");
    }

    #[test]
    fn repeated_invocation_is_deterministic() {
        let engine = Engine::builtin().unwrap();
        let inputs = raw(&[
            ("serumCreatinine", "1.1"),
            ("age", "64"),
            ("sex", "female"),
            ("race", "black"),
        ]);
        let name = "eGFR (Estimated Glomerular Filtration Rate)";
        let first = engine.invoke("blood-lab-values", name, &inputs).unwrap();
        let second = engine.invoke("blood-lab-values", name, &inputs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn anion_gap_includes_potassium() {
        let engine = Engine::builtin().unwrap();
        let inputs = raw(&[
            ("sodium", "140"),
            ("potassium", "4"),
            ("chloride", "104"),
            ("bicarbonate", "24"),
        ]);
        let c = engine
            .invoke("medical-dosage", "Anion Gap", &inputs)
            .unwrap();
        testing::approx(decimal(c.result), 16.0);
    }

    #[test]
    fn lab_anion_gap_without_potassium_fails_at_execution() {
        let engine = Engine::builtin().unwrap();
        let err = engine
            .invoke(
                "blood-lab-values",
                "Anion Gap",
                &raw(&[("sodium", "140"), ("chloride", "104"), ("bicarbonate", "24")]),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "execution_error");
        assert!(err.to_string().contains("potassium"));
    }

    #[test]
    fn scores_are_integers() {
        let engine = Engine::builtin().unwrap();
        let c = engine
            .invoke(
                "medical-dosage",
                "APGAR Score",
                &raw(&[
                    ("appearance", "2"),
                    ("pulse", "2"),
                    ("grimace", "1"),
                    ("activity", "2"),
                    ("respiration", "2"),
                ]),
            )
            .unwrap();
        assert_eq!(c.result, Outcome::Integer(9));
    }

    #[test]
    fn unknown_sex_code_is_an_execution_error() {
        let engine = Engine::builtin().unwrap();
        let err = engine
            .invoke(
                "others",
                "Ideal Body Weight (IBW)",
                &raw(&[("height", "70"), ("sex", "x")]),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "execution_error");
        assert!(err.to_string().contains("sex"));
    }

    #[test]
    fn builtin_integrity_report() {
        let engine = Engine::builtin().unwrap();
        let report = engine.integrity();

        let collided: Vec<&str> = report.collisions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            collided,
            vec![
                "Anion Gap",
                "Pulse Pressure",
                "Mean Arterial Pressure (MAP)",
                "Incidence Rate",
            ]
        );
        assert!(report.unimplemented.is_empty());
        assert!(report.orphans.is_empty());

        assert_eq!(report.signature_mismatches.len(), 1);
        let m = &report.signature_mismatches[0];
        assert_eq!(m.category_slug, "blood-lab-values");
        assert_eq!(m.name, "Anion Gap");
        assert_eq!(m.declared, vec!["bicarbonate", "chloride", "sodium"]);
        assert_eq!(
            m.implemented,
            vec!["bicarbonate", "chloride", "potassium", "sodium"]
        );
    }

    #[test]
    fn every_descriptor_resolves() {
        let engine = Engine::builtin().unwrap();
        for (_, calc) in engine.catalog().calculations() {
            assert!(
                engine.registry().contains(&calc.name),
                "{} has no implementation",
                calc.name
            );
        }
    }
}
