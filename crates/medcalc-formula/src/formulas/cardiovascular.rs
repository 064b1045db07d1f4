//! Cardiovascular.

use super::monitoring::{mean_arterial_pressure, pulse_pressure};
use crate::math::{div, percent, sqrt};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Cardiac Output",
        &["strokeVolume", "heartRate"],
        cardiac_output,
    )
    .register(
        "Stroke Volume",
        &["endDiastolicVolume", "endSystolicVolume"],
        stroke_volume,
    )
    .register(
        "Mean Arterial Pressure (MAP)",
        &["systolic", "diastolic"],
        mean_arterial_pressure,
    )
    .register(
        "Systemic Vascular Resistance (SVR)",
        &["map", "cvp", "cardiacOutput"],
        systemic_vascular_resistance,
    )
    .register(
        "Pulse Pressure",
        &["systolicBP", "diastolicBP"],
        pulse_pressure,
    )
    .register(
        "Ejection Fraction",
        &["strokeVolume", "endDiastolicVolume"],
        ejection_fraction,
    )
    .register(
        "Cardiac Index",
        &["cardiacOutput", "bodySurfaceArea"],
        cardiac_index,
    )
    .register(
        "Left Ventricular Stroke Work Index (LVSWI)",
        &["map", "pcwp", "strokeVolumeIndex"],
        lv_stroke_work_index,
    )
    .register(
        "Rate Pressure Product (RPP)",
        &["heartRate", "systolicBP"],
        rate_pressure_product,
    )
    .register(
        "Fractional Shortening",
        &["lvedd", "lvesd"],
        fractional_shortening,
    )
    .register("QTc Interval", &["qtInterval", "rrInterval"], qtc_bazett);
}

/// L/min from mL stroke volume.
fn cardiac_output(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("strokeVolume")? * a.decimal("heartRate")? / 1000.0).into())
}

fn stroke_volume(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("endDiastolicVolume")? - a.decimal("endSystolicVolume")?).into())
}

/// dyn·s/cm⁵.
fn systemic_vascular_resistance(a: &Args) -> Result<Outcome, DomainError> {
    let gradient = a.decimal("map")? - a.decimal("cvp")?;
    Ok(div(gradient * 80.0, a.decimal("cardiacOutput")?)?.into())
}

fn ejection_fraction(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(a.decimal("strokeVolume")?, a.decimal("endDiastolicVolume")?)?.into())
}

fn cardiac_index(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("cardiacOutput")?, a.decimal("bodySurfaceArea")?)?.into())
}

fn lv_stroke_work_index(a: &Args) -> Result<Outcome, DomainError> {
    let gradient = a.decimal("map")? - a.decimal("pcwp")?;
    Ok((gradient * a.decimal("strokeVolumeIndex")? * 0.0136).into())
}

fn rate_pressure_product(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("heartRate")? * a.decimal("systolicBP")?).into())
}

fn fractional_shortening(a: &Args) -> Result<Outcome, DomainError> {
    let lvedd = a.decimal("lvedd")?;
    Ok(percent(lvedd - a.decimal("lvesd")?, lvedd)?.into())
}

/// Bazett: QT / sqrt(RR).
fn qtc_bazett(a: &Args) -> Result<Outcome, DomainError> {
    let rr = sqrt(a.decimal("rrInterval")?)?;
    Ok(div(a.decimal("qtInterval")?, rr)?.into())
}
