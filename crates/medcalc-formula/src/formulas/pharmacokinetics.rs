//! Pharmacokinetics.

use crate::math::div;
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Half-Life",
        &["volumeOfDistribution", "clearance"],
        half_life,
    )
    .register("Clearance", &["dose", "bioavailability", "auc"], clearance)
    .register(
        "Volume of Distribution",
        &["dose", "plasmaConcentration"],
        volume_of_distribution,
    )
    .register(
        "Loading Dose",
        &["targetConcentration", "volumeOfDistribution", "bioavailability"],
        loading_dose,
    )
    .register(
        "Maintenance Dose",
        &["clearance", "targetConcentration", "bioavailability"],
        maintenance_dose,
    )
    .register(
        "Steady-State Concentration",
        &["doseRate", "bioavailability", "clearance"],
        steady_state_concentration,
    )
    .register(
        "Elimination Rate Constant",
        &["clearance", "volumeOfDistribution"],
        elimination_rate_constant,
    )
    .register(
        "Area Under the Curve (AUC)",
        &["dose", "bioavailability", "clearance"],
        area_under_curve,
    )
    .register(
        "Time to Reach Steady State",
        &["halfLife"],
        time_to_steady_state,
    )
    .register("Accumulation Factor", &["k", "tau"], accumulation_factor)
    .register(
        "Peak Plasma Concentration (Cmax)",
        &["dose", "bioavailability", "volumeOfDistribution"],
        peak_concentration,
    )
    .register(
        "Trough Plasma Concentration (Cmin)",
        &["cmax", "k", "tau"],
        trough_concentration,
    )
    .register("Therapeutic Index", &["td50", "ed50"], therapeutic_index)
    .register(
        "Loading Dose Adjustment",
        &["targetConcentration", "adjustedVolumeOfDistribution"],
        loading_dose_adjustment,
    );
}

fn half_life(a: &Args) -> Result<Outcome, DomainError> {
    let num = 0.693 * a.decimal("volumeOfDistribution")?;
    Ok(div(num, a.decimal("clearance")?)?.into())
}

fn clearance(a: &Args) -> Result<Outcome, DomainError> {
    let absorbed = a.decimal("dose")? * a.decimal("bioavailability")?;
    Ok(div(absorbed, a.decimal("auc")?)?.into())
}

fn volume_of_distribution(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("dose")?, a.decimal("plasmaConcentration")?)?.into())
}

fn loading_dose(a: &Args) -> Result<Outcome, DomainError> {
    let amount = a.decimal("targetConcentration")? * a.decimal("volumeOfDistribution")?;
    Ok(div(amount, a.decimal("bioavailability")?)?.into())
}

fn maintenance_dose(a: &Args) -> Result<Outcome, DomainError> {
    let rate = a.decimal("clearance")? * a.decimal("targetConcentration")?;
    Ok(div(rate, a.decimal("bioavailability")?)?.into())
}

fn steady_state_concentration(a: &Args) -> Result<Outcome, DomainError> {
    let absorbed = a.decimal("doseRate")? * a.decimal("bioavailability")?;
    Ok(div(absorbed, a.decimal("clearance")?)?.into())
}

fn elimination_rate_constant(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("clearance")?, a.decimal("volumeOfDistribution")?)?.into())
}

fn area_under_curve(a: &Args) -> Result<Outcome, DomainError> {
    let absorbed = a.decimal("dose")? * a.decimal("bioavailability")?;
    Ok(div(absorbed, a.decimal("clearance")?)?.into())
}

/// Five half-lives.
fn time_to_steady_state(a: &Args) -> Result<Outcome, DomainError> {
    Ok((5.0 * a.decimal("halfLife")?).into())
}

/// `1 / (1 - e^(-k·tau))`
fn accumulation_factor(a: &Args) -> Result<Outcome, DomainError> {
    let retained = (-a.decimal("k")? * a.decimal("tau")?).exp();
    Ok(div(1.0, 1.0 - retained)?.into())
}

fn peak_concentration(a: &Args) -> Result<Outcome, DomainError> {
    let absorbed = a.decimal("dose")? * a.decimal("bioavailability")?;
    Ok(div(absorbed, a.decimal("volumeOfDistribution")?)?.into())
}

fn trough_concentration(a: &Args) -> Result<Outcome, DomainError> {
    let decay = (-a.decimal("k")? * a.decimal("tau")?).exp();
    Ok((a.decimal("cmax")? * decay).into())
}

fn therapeutic_index(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("td50")?, a.decimal("ed50")?)?.into())
}

fn loading_dose_adjustment(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("targetConcentration")? * a.decimal("adjustedVolumeOfDistribution")?).into())
}
