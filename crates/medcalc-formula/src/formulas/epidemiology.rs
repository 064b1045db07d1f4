//! Infection control and epidemiology.

use std::f64::consts::LN_2;

use crate::math::{div, percent};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Basic Reproduction Number (R0)",
        &[
            "contactRate",
            "transmissionProbability",
            "durationOfInfectiousness",
        ],
        basic_reproduction_number,
    )
    .register(
        "Effective Reproduction Number (Rt)",
        &["r0", "susceptiblePopulation", "totalPopulation"],
        effective_reproduction_number,
    )
    .register(
        "Infection Fatality Rate (IFR)",
        &["numberOfDeaths", "totalInfectedIndividuals"],
        infection_fatality_rate,
    )
    .register(
        "Serial Interval",
        &["secondaryCaseOnset", "primaryCaseOnset"],
        serial_interval,
    )
    .register(
        "Quarantine Effectiveness",
        &["transmissionWithQuarantine", "transmissionWithoutQuarantine"],
        quarantine_effectiveness,
    )
    .register(
        "Case Fatality Rate (CFR)",
        &["numberOfDeaths", "numberOfConfirmedCases"],
        case_fatality_rate,
    )
    .register(
        "Attack Rate",
        &["numberOfIllIndividuals", "totalPopulationAtRisk"],
        attack_rate,
    )
    .register(
        "Incidence Rate",
        &["numberOfNewCases", "populationAtRisk", "time"],
        incidence_rate,
    )
    .register(
        "Secondary Attack Rate",
        &["numberOfSecondaryCases", "numberOfExposedContacts"],
        secondary_attack_rate,
    )
    .register("Herd Immunity Threshold", &["r0"], herd_immunity_threshold)
    .register(
        "Prevalence Rate",
        &["numberOfExistingCases", "totalPopulation"],
        prevalence_rate,
    )
    .register("Doubling Time", &["growthRate"], doubling_time);
}

fn basic_reproduction_number(a: &Args) -> Result<Outcome, DomainError> {
    let r0 = a.decimal("contactRate")?
        * a.decimal("transmissionProbability")?
        * a.decimal("durationOfInfectiousness")?;
    Ok(r0.into())
}

fn effective_reproduction_number(a: &Args) -> Result<Outcome, DomainError> {
    let susceptible = div(
        a.decimal("susceptiblePopulation")?,
        a.decimal("totalPopulation")?,
    )?;
    Ok((a.decimal("r0")? * susceptible).into())
}

fn infection_fatality_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(
        a.decimal("numberOfDeaths")?,
        a.decimal("totalInfectedIndividuals")?,
    )?
    .into())
}

fn serial_interval(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("secondaryCaseOnset")? - a.decimal("primaryCaseOnset")?).into())
}

/// Percentage reduction in transmission.
fn quarantine_effectiveness(a: &Args) -> Result<Outcome, DomainError> {
    let ratio = div(
        a.decimal("transmissionWithQuarantine")?,
        a.decimal("transmissionWithoutQuarantine")?,
    )?;
    Ok(((1.0 - ratio) * 100.0).into())
}

fn case_fatality_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(
        a.decimal("numberOfDeaths")?,
        a.decimal("numberOfConfirmedCases")?,
    )?
    .into())
}

fn attack_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(
        a.decimal("numberOfIllIndividuals")?,
        a.decimal("totalPopulationAtRisk")?,
    )?
    .into())
}

/// New cases per person-time.
pub(super) fn incidence_rate(a: &Args) -> Result<Outcome, DomainError> {
    let person_time = a.decimal("populationAtRisk")? * a.decimal("time")?;
    Ok(div(a.decimal("numberOfNewCases")?, person_time)?.into())
}

fn secondary_attack_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(
        a.decimal("numberOfSecondaryCases")?,
        a.decimal("numberOfExposedContacts")?,
    )?
    .into())
}

fn herd_immunity_threshold(a: &Args) -> Result<Outcome, DomainError> {
    Ok(((1.0 - div(1.0, a.decimal("r0")?)?) * 100.0).into())
}

fn prevalence_rate(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(
        a.decimal("numberOfExistingCases")?,
        a.decimal("totalPopulation")?,
    )?
    .into())
}

fn doubling_time(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(LN_2, a.decimal("growthRate")?)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals, integers};
    use crate::value::Value;

    #[test]
    fn herd_immunity() {
        approx(
            herd_immunity_threshold(&decimals(&[("r0", 4.0)])).unwrap().as_f64(),
            75.0,
        );
        assert_eq!(
            herd_immunity_threshold(&decimals(&[("r0", 0.0)])),
            Err(DomainError::DivisionByZero)
        );
    }

    #[test]
    fn incidence_over_person_time() {
        let mut a = integers(&[("numberOfNewCases", 30), ("populationAtRisk", 1000)]);
        a.insert("time", Value::Decimal(2.0));
        approx(incidence_rate(&a).unwrap().as_f64(), 0.015);
        a.insert("time", Value::Decimal(0.0));
        assert_eq!(incidence_rate(&a), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn integer_counts_widen_to_rates() {
        let a = integers(&[("numberOfDeaths", 3), ("numberOfConfirmedCases", 200)]);
        approx(case_fatality_rate(&a).unwrap().as_f64(), 1.5);
    }

    #[test]
    fn doubling_time_from_growth_rate() {
        approx(
            doubling_time(&decimals(&[("growthRate", LN_2 / 3.0)])).unwrap().as_f64(),
            3.0,
        );
    }
}
