//! Medication dosage and administration.

use crate::math::{div, sum};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome, Sex};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register("Dosage by Weight", &["dosePerKg", "weight"], dosage_by_weight)
        .register("IV Flow Rate", &["volume", "time"], iv_flow_rate)
        .register("Drip Rate", &["volume", "dropFactor", "time"], drip_rate)
        .register(
            "Medication Dose (Volume to Administer)",
            &["desiredDose", "stockStrength"],
            volume_to_administer,
        )
        .register(
            "Medication Dose (Amount of Drug Required)",
            &["desiredConcentration", "finalVolume"],
            amount_of_drug_required,
        )
        .register(
            "Insulin Dose Calculation",
            &["currentGlucose", "targetGlucose", "correctionFactor"],
            insulin_dose,
        )
        .register(
            "Pediatric Dosage (Young's Rule)",
            &["age", "adultDose"],
            youngs_rule,
        )
        .register(
            "Pediatric Dosage (Clark's Rule)",
            &["weight", "adultDose"],
            clarks_rule,
        )
        .register(
            "Creatinine Clearance (Cockcroft-Gault Equation)",
            &["age", "weight", "serumCreatinine", "sex"],
            creatinine_clearance,
        )
        .register(
            "Heparin Infusion Rate",
            &["unitsPerHour", "concentration"],
            heparin_infusion_rate,
        )
        .register(
            "Fluid Maintenance for Pediatrics (4-2-1 Rule)",
            &["weight"],
            pediatric_maintenance_fluid,
        )
        .register(
            "APGAR Score",
            &["appearance", "pulse", "grimace", "activity", "respiration"],
            apgar_score,
        )
        .register(
            "Oxygen Flow Rate",
            &["fiO2", "minuteVentilation"],
            oxygen_flow_rate,
        )
        // Superseded by the three-electrolyte version in `lab`.
        .register(
            "Anion Gap",
            &["sodium", "potassium", "chloride", "bicarbonate"],
            anion_gap,
        );
}

fn dosage_by_weight(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("dosePerKg")? * a.decimal("weight")?).into())
}

/// mL/hr.
fn iv_flow_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("volume")?, a.decimal("time")?)?.into())
}

/// Drops per minute.
fn drip_rate(a: &Args) -> Result<Outcome, DomainError> {
    let drops = a.decimal("volume")? * a.decimal("dropFactor")?;
    Ok(div(drops, a.decimal("time")?)?.into())
}

fn volume_to_administer(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("desiredDose")?, a.decimal("stockStrength")?)?.into())
}

fn amount_of_drug_required(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("desiredConcentration")? * a.decimal("finalVolume")?).into())
}

fn insulin_dose(a: &Args) -> Result<Outcome, DomainError> {
    let excess = a.decimal("currentGlucose")? - a.decimal("targetGlucose")?;
    Ok(div(excess, a.decimal("correctionFactor")?)?.into())
}

fn youngs_rule(a: &Args) -> Result<Outcome, DomainError> {
    let age = a.decimal("age")?;
    Ok((div(age, age + 12.0)? * a.decimal("adultDose")?).into())
}

/// Weight in pounds.
fn clarks_rule(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("weight")? / 150.0 * a.decimal("adultDose")?).into())
}

fn creatinine_clearance(a: &Args) -> Result<Outcome, DomainError> {
    let factor = match a.sex("sex")? {
        Sex::Female => 0.85,
        Sex::Male => 1.0,
    };
    let num = (140.0 - a.decimal("age")?) * a.decimal("weight")? * factor;
    Ok(div(num, 72.0 * a.decimal("serumCreatinine")?)?.into())
}

fn heparin_infusion_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("unitsPerHour")?, a.decimal("concentration")?)?.into())
}

/// 4 mL/kg/hr for the first 10 kg, 2 for the next 10, 1 for the rest.
fn pediatric_maintenance_fluid(a: &Args) -> Result<Outcome, DomainError> {
    let weight = a.decimal("weight")?;
    let rate = if weight <= 10.0 {
        weight * 4.0
    } else if weight <= 20.0 {
        40.0 + (weight - 10.0) * 2.0
    } else {
        60.0 + (weight - 20.0)
    };
    Ok(rate.into())
}

fn apgar_score(a: &Args) -> Result<Outcome, DomainError> {
    let total = sum(&[
        a.integer("appearance")?,
        a.integer("pulse")?,
        a.integer("grimace")?,
        a.integer("activity")?,
        a.integer("respiration")?,
    ])?;
    Ok(total.into())
}

/// Pure oxygen fraction above room air, scaled by minute ventilation.
fn oxygen_flow_rate(a: &Args) -> Result<Outcome, DomainError> {
    let fraction = (a.decimal("fiO2")? - 0.21) / 0.79;
    Ok((fraction * a.decimal("minuteVentilation")?).into())
}

/// (Na + K) - (Cl + HCO3).
pub(super) fn anion_gap(a: &Args) -> Result<Outcome, DomainError> {
    let cations = a.decimal("sodium")? + a.decimal("potassium")?;
    let anions = a.decimal("chloride")? + a.decimal("bicarbonate")?;
    Ok((cations - anions).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals, integers};
    use crate::value::Value;

    #[test]
    fn four_two_one_rule_bands() {
        for (weight, expected) in [(8.0, 32.0), (10.0, 40.0), (15.0, 50.0), (20.0, 60.0), (35.0, 75.0)] {
            let out = pediatric_maintenance_fluid(&decimals(&[("weight", weight)])).unwrap();
            approx(out.as_f64(), expected);
        }
    }

    #[test]
    fn cockcroft_gault_female_factor() {
        let mut a = decimals(&[("age", 60.0), ("weight", 72.0), ("serumCreatinine", 1.0)]);
        a.insert("sex", Value::Text("male".into()));
        approx(creatinine_clearance(&a).unwrap().as_f64(), 80.0);
        a.insert("sex", Value::Text("Female".into()));
        approx(creatinine_clearance(&a).unwrap().as_f64(), 68.0);
    }

    #[test]
    fn drip_rate_and_zero_time() {
        let a = decimals(&[("volume", 1000.0), ("dropFactor", 15.0), ("time", 480.0)]);
        approx(drip_rate(&a).unwrap().as_f64(), 31.25);
        let a = decimals(&[("volume", 1000.0), ("dropFactor", 15.0), ("time", 0.0)]);
        assert_eq!(drip_rate(&a), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn youngs_rule_at_minus_twelve() {
        let a = decimals(&[("age", -12.0), ("adultDose", 500.0)]);
        assert_eq!(youngs_rule(&a), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn apgar_sums_components() {
        let a = integers(&[
            ("appearance", 1),
            ("pulse", 2),
            ("grimace", 2),
            ("activity", 1),
            ("respiration", 2),
        ]);
        assert_eq!(apgar_score(&a), Ok(Outcome::Integer(8)));
    }

    #[test]
    fn oxygen_flow_room_air_is_zero() {
        let a = decimals(&[("fiO2", 0.21), ("minuteVentilation", 8.0)]);
        approx(oxygen_flow_rate(&a).unwrap().as_f64(), 0.0);
    }
}
