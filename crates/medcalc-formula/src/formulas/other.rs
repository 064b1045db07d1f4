//! Miscellaneous bedside formulas.

use crate::math::{div, percent};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome, Sex};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register("Parkland Formula", &["weight", "tbsa"], parkland)
        .register(
            "Oxygen Delivery",
            &["cardiacOutput", "hemoglobin", "saO2", "paO2"],
            oxygen_delivery,
        )
        .register(
            "Ideal Body Weight (IBW)",
            &["height", "sex"],
            ideal_body_weight,
        )
        .register(
            "Adjusted Body Weight (ABW)",
            &["ibw", "actualWeight"],
            adjusted_body_weight,
        )
        .register(
            "Corrected Sodium",
            &["measuredSodium", "glucose"],
            corrected_sodium,
        )
        .register("A-a Gradient", &["PAO2", "PaO2"], a_a_gradient)
        .register(
            "Fractional Excretion of Sodium (FENa)",
            &[
                "urineSodium",
                "plasmaCreatinine",
                "plasmaSodium",
                "urineCreatinine",
            ],
            fena,
        )
        .register(
            "Serum Osmolality",
            &["sodium", "glucose", "bun"],
            serum_osmolality,
        )
        .register("Winter's Formula", &["hco3"], winters_formula)
        .register(
            "Alveolar Partial Pressure of Oxygen (PAO2)",
            &[
                "fiO2",
                "barometricPressure",
                "waterVaporPressure",
                "paCO2",
                "respiratoryQuotient",
            ],
            alveolar_gas,
        );
}

/// Burn resuscitation volume over 24 h.
fn parkland(a: &Args) -> Result<Outcome, DomainError> {
    Ok((4.0 * a.decimal("weight")? * a.decimal("tbsa")?).into())
}

fn oxygen_delivery(a: &Args) -> Result<Outcome, DomainError> {
    let bound = 1.34 * a.decimal("hemoglobin")? * a.decimal("saO2")?;
    let dissolved = a.decimal("paO2")? * 0.003;
    Ok((a.decimal("cardiacOutput")? * (bound + dissolved)).into())
}

/// Devine, height in inches.
fn ideal_body_weight(a: &Args) -> Result<Outcome, DomainError> {
    let base = match a.sex("sex")? {
        Sex::Male => 50.0,
        Sex::Female => 45.5,
    };
    Ok((base + 2.3 * (a.decimal("height")? - 60.0)).into())
}

fn adjusted_body_weight(a: &Args) -> Result<Outcome, DomainError> {
    let ibw = a.decimal("ibw")?;
    Ok((ibw + 0.4 * (a.decimal("actualWeight")? - ibw)).into())
}

fn corrected_sodium(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("measuredSodium")? + 0.016 * (a.decimal("glucose")? - 100.0)).into())
}

fn a_a_gradient(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("PAO2")? - a.decimal("PaO2")?).into())
}

fn fena(a: &Args) -> Result<Outcome, DomainError> {
    let num = a.decimal("urineSodium")? * a.decimal("plasmaCreatinine")?;
    let den = a.decimal("plasmaSodium")? * a.decimal("urineCreatinine")?;
    Ok(percent(num, den)?.into())
}

fn serum_osmolality(a: &Args) -> Result<Outcome, DomainError> {
    let osm = 2.0 * a.decimal("sodium")? + a.decimal("glucose")? / 18.0 + a.decimal("bun")? / 2.8;
    Ok(osm.into())
}

/// Expected PaCO2 in metabolic acidosis.
fn winters_formula(a: &Args) -> Result<Outcome, DomainError> {
    Ok((1.5 * a.decimal("hco3")? + 8.0).into())
}

fn alveolar_gas(a: &Args) -> Result<Outcome, DomainError> {
    let inspired = a.decimal("fiO2")?
        * (a.decimal("barometricPressure")? - a.decimal("waterVaporPressure")?);
    let co2 = div(a.decimal("paCO2")?, a.decimal("respiratoryQuotient")?)?;
    Ok((inspired - co2).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals};
    use crate::value::Value;

    #[test]
    fn alveolar_gas_at_sea_level() {
        let a = decimals(&[
            ("fiO2", 0.21),
            ("barometricPressure", 760.0),
            ("waterVaporPressure", 47.0),
            ("paCO2", 40.0),
            ("respiratoryQuotient", 0.8),
        ]);
        approx(alveolar_gas(&a).unwrap().as_f64(), 0.21 * 713.0 - 50.0);
    }

    #[test]
    fn ideal_body_weight_by_sex() {
        let mut a = decimals(&[("height", 70.0)]);
        a.insert("sex", Value::Text("male".into()));
        approx(ideal_body_weight(&a).unwrap().as_f64(), 73.0);
        a.insert("sex", Value::Text("F".into()));
        approx(ideal_body_weight(&a).unwrap().as_f64(), 68.5);
    }

    #[test]
    fn case_sensitive_gradient_keys() {
        let a = decimals(&[("PAO2", 100.0), ("PaO2", 90.0)]);
        approx(a_a_gradient(&a).unwrap().as_f64(), 10.0);
    }

    #[test]
    fn fena_zero_denominator() {
        let a = decimals(&[
            ("urineSodium", 20.0),
            ("plasmaCreatinine", 1.0),
            ("plasmaSodium", 140.0),
            ("urineCreatinine", 0.0),
        ]);
        assert_eq!(fena(&a), Err(DomainError::DivisionByZero));
    }
}
