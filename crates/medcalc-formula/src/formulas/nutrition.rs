//! Nutrition and fluid management.

use crate::math::div;
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome, Sex};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Caloric Requirements (Harris-Benedict Equation)",
        &["weight", "height", "age", "sex", "activityFactor"],
        harris_benedict,
    )
    .register(
        "Caloric Requirements (Mifflin-St Jeor Equation)",
        &["weight", "height", "age", "sex", "activityFactor"],
        mifflin_st_jeor,
    )
    .register(
        "Fluid Requirement by Body Weight",
        &["weight"],
        fluid_by_weight,
    )
    .register(
        "Enteral Nutrition Formula",
        &["caloricNeeds", "formulaCaloricDensity"],
        enteral_volume,
    )
    .register(
        "Parenteral Nutrition Macronutrient Distribution",
        &["totalCalories", "macronutrientPercentage"],
        macronutrient_distribution,
    )
    .register(
        "Electrolyte Requirements",
        &["weight", "requirementFactor"],
        electrolyte_requirements,
    )
    .register("Body Mass Index (BMI)", &["weight", "height"], body_mass_index)
    .register(
        "Tube Feeding Rate",
        &["totalVolume", "feedingDuration"],
        tube_feeding_rate,
    )
    .register(
        "Fluid Replacement",
        &["deficit", "maintenance"],
        fluid_replacement,
    )
    .register(
        "Protein Requirement",
        &["weight", "proteinFactor"],
        protein_requirement,
    )
    .register("Daily Water Requirement", &["weight"], daily_water);
}

/// Revised Harris-Benedict BMR times activity factor.
fn harris_benedict(a: &Args) -> Result<Outcome, DomainError> {
    let (weight, height, age) = (a.decimal("weight")?, a.decimal("height")?, a.decimal("age")?);
    let bmr = match a.sex("sex")? {
        Sex::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
    };
    Ok((bmr * a.decimal("activityFactor")?).into())
}

fn mifflin_st_jeor(a: &Args) -> Result<Outcome, DomainError> {
    Ok((mifflin_bmr(a)? * a.decimal("activityFactor")?).into())
}

/// Mifflin-St Jeor resting rate, shared with the body-composition formulas.
pub(super) fn mifflin_bmr(a: &Args) -> Result<f64, DomainError> {
    let offset = match a.sex("sex")? {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    Ok(10.0 * a.decimal("weight")? + 6.25 * a.decimal("height")? - 5.0 * a.decimal("age")?
        + offset)
}

/// 30 mL/kg/day.
fn fluid_by_weight(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("weight")? * 30.0).into())
}

fn enteral_volume(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("caloricNeeds")?, a.decimal("formulaCaloricDensity")?)?.into())
}

fn macronutrient_distribution(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("totalCalories")? * a.decimal("macronutrientPercentage")?).into())
}

fn electrolyte_requirements(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("weight")? * a.decimal("requirementFactor")?).into())
}

/// Height in metres.
fn body_mass_index(a: &Args) -> Result<Outcome, DomainError> {
    let height = a.decimal("height")?;
    Ok(div(a.decimal("weight")?, height * height)?.into())
}

fn tube_feeding_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("totalVolume")?, a.decimal("feedingDuration")?)?.into())
}

fn fluid_replacement(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("deficit")? + a.decimal("maintenance")?).into())
}

fn protein_requirement(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("weight")? * a.decimal("proteinFactor")?).into())
}

/// 40 mL/kg/day.
fn daily_water(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("weight")? * 40.0).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals};
    use crate::value::Value;

    fn person(sex: &str) -> Args {
        let mut a = decimals(&[("weight", 70.0), ("height", 175.0), ("activityFactor", 1.2)]);
        a.insert("age", Value::Integer(30));
        a.insert("sex", Value::Text(sex.into()));
        a
    }

    #[test]
    fn mifflin_by_sex() {
        // 700 + 1093.75 - 150
        approx(mifflin_st_jeor(&person("male")).unwrap().as_f64(), 1648.75 * 1.2);
        approx(mifflin_st_jeor(&person("female")).unwrap().as_f64(), 1482.75 * 1.2);
    }

    #[test]
    fn harris_benedict_male() {
        let bmr = 88.362 + 13.397 * 70.0 + 4.799 * 175.0 - 5.677 * 30.0;
        approx(harris_benedict(&person("M")).unwrap().as_f64(), bmr * 1.2);
    }

    #[test]
    fn unknown_sex_is_rejected() {
        assert!(matches!(
            harris_benedict(&person("unknown")),
            Err(DomainError::InvalidCode { .. })
        ));
    }

    #[test]
    fn bmi_zero_height() {
        let a = decimals(&[("weight", 70.0), ("height", 0.0)]);
        assert_eq!(body_mass_index(&a), Err(DomainError::DivisionByZero));
    }
}
