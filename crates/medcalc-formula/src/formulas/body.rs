//! Body composition and growth.

use super::nutrition::mifflin_bmr;
use crate::math::{div, sqrt};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome, Sex};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Bone Mineral Density (BMD)",
        &["boneMass", "boneArea"],
        bone_mineral_density,
    )
    .register(
        "Waist-to-Hip Ratio",
        &["waistCircumference", "hipCircumference"],
        waist_to_hip,
    )
    .register(
        "Growth Hormone Dosage",
        &["weight", "bsa", "dosageFactor"],
        growth_hormone_dosage,
    )
    .register(
        "Total Energy Expenditure (TEE)",
        &["bmr", "activityFactor"],
        total_energy_expenditure,
    )
    .register(
        "Body Surface Area (BSA)",
        &["height", "weight"],
        body_surface_area,
    )
    .register(
        "Lean Body Mass (LBM)",
        &["weight", "bodyFatPercentage"],
        lean_body_mass,
    )
    .register(
        "Growth Velocity",
        &["heightAtEnd", "heightAtStart", "timePeriod"],
        growth_velocity,
    )
    .register(
        "Basal Metabolic Rate (BMR)",
        &["weight", "height", "age", "sex"],
        mifflin_rate,
    )
    .register(
        "Body Fat Percentage",
        &["bmi", "age", "sex"],
        body_fat_percentage,
    )
    .register(
        "Resting Energy Expenditure (REE)",
        &["weight", "height", "age", "sex"],
        mifflin_rate,
    );
}

fn bone_mineral_density(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("boneMass")?, a.decimal("boneArea")?)?.into())
}

fn waist_to_hip(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("waistCircumference")?, a.decimal("hipCircumference")?)?.into())
}

/// Dosed by BSA when one is given (non-zero), otherwise by weight.
fn growth_hormone_dosage(a: &Args) -> Result<Outcome, DomainError> {
    let bsa = a.decimal("bsa")?;
    let basis = if bsa != 0.0 { bsa } else { a.decimal("weight")? };
    Ok((basis * a.decimal("dosageFactor")?).into())
}

fn total_energy_expenditure(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("bmr")? * a.decimal("activityFactor")?).into())
}

/// Mosteller, height in cm and weight in kg.
fn body_surface_area(a: &Args) -> Result<Outcome, DomainError> {
    Ok(sqrt(a.decimal("height")? * a.decimal("weight")? / 3600.0)?.into())
}

fn lean_body_mass(a: &Args) -> Result<Outcome, DomainError> {
    let lean_fraction = 1.0 - a.decimal("bodyFatPercentage")? / 100.0;
    Ok((a.decimal("weight")? * lean_fraction).into())
}

fn growth_velocity(a: &Args) -> Result<Outcome, DomainError> {
    let gained = a.decimal("heightAtEnd")? - a.decimal("heightAtStart")?;
    Ok(div(gained, a.decimal("timePeriod")?)?.into())
}

fn mifflin_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(mifflin_bmr(a)?.into())
}

/// Deurenberg adult equation.
fn body_fat_percentage(a: &Args) -> Result<Outcome, DomainError> {
    let sex_term = match a.sex("sex")? {
        Sex::Male => 10.8,
        Sex::Female => 0.0,
    };
    Ok((1.20 * a.decimal("bmi")? + 0.23 * a.decimal("age")? - sex_term - 5.4).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals};
    use crate::value::Value;

    #[test]
    fn growth_hormone_prefers_bsa() {
        let a = decimals(&[("weight", 30.0), ("bsa", 1.1), ("dosageFactor", 2.0)]);
        approx(growth_hormone_dosage(&a).unwrap().as_f64(), 2.2);
        let a = decimals(&[("weight", 30.0), ("bsa", 0.0), ("dosageFactor", 2.0)]);
        approx(growth_hormone_dosage(&a).unwrap().as_f64(), 60.0);
    }

    #[test]
    fn mosteller_bsa() {
        let a = decimals(&[("height", 180.0), ("weight", 80.0)]);
        approx(body_surface_area(&a).unwrap().as_f64(), 2.0);
    }

    #[test]
    fn bsa_rejects_negative_product() {
        let a = decimals(&[("height", 180.0), ("weight", -80.0)]);
        assert!(body_surface_area(&a).is_err());
    }

    #[test]
    fn body_fat_by_sex() {
        let mut a = decimals(&[("bmi", 25.0)]);
        a.insert("age", Value::Integer(40));
        a.insert("sex", Value::Text("female".into()));
        approx(body_fat_percentage(&a).unwrap().as_f64(), 33.8);
        a.insert("sex", Value::Text("male".into()));
        approx(body_fat_percentage(&a).unwrap().as_f64(), 23.0);
    }
}
