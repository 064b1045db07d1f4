//! Patient monitoring: vital-sign scores and haemodynamic indices.

use crate::math::{div, sum};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Early Warning Score (EWS)",
        &[
            "respiratoryRate",
            "oxygenSaturation",
            "temperature",
            "systolicBP",
            "heartRate",
        ],
        early_warning_score,
    )
    .register(
        "Respiratory Rate to Tidal Volume Ratio",
        &["respiratoryRate", "tidalVolume"],
        rr_to_tidal_volume,
    )
    .register("Shock Index", &["heartRate", "systolicBP"], shock_index)
    .register(
        "Glasgow Coma Scale (GCS)",
        &["eyeResponse", "verbalResponse", "motorResponse"],
        glasgow_coma_scale,
    )
    .register(
        "Pulse Pressure",
        &["systolicBP", "diastolicBP"],
        pulse_pressure,
    )
    .register(
        "Mean Arterial Pressure (MAP)",
        &["systolic", "diastolic"],
        mean_arterial_pressure,
    )
    .register(
        "Oxygenation Index (OI)",
        &["fiO2", "meanAirwayPressure", "paO2"],
        oxygenation_index,
    );
}

// ---------------------------------------------------------------------------
// Early warning score bands
// ---------------------------------------------------------------------------

fn score_respiratory_rate(rr: f64) -> i64 {
    match rr {
        r if r <= 8.0 => 3,
        r if r <= 11.0 => 1,
        r if r <= 20.0 => 0,
        r if r <= 24.0 => 2,
        _ => 3,
    }
}

fn score_oxygen_saturation(spo2: f64) -> i64 {
    match spo2 {
        s if s <= 91.0 => 3,
        s if s <= 93.0 => 2,
        s if s <= 95.0 => 1,
        _ => 0,
    }
}

fn score_temperature(temp: f64) -> i64 {
    match temp {
        t if t <= 35.0 => 3,
        t if t <= 36.0 => 1,
        t if t <= 38.0 => 0,
        t if t <= 39.0 => 1,
        _ => 2,
    }
}

fn score_systolic_bp(sbp: f64) -> i64 {
    match sbp {
        s if s <= 90.0 => 3,
        s if s <= 100.0 => 2,
        s if s <= 110.0 => 1,
        s if s <= 219.0 => 0,
        _ => 3,
    }
}

fn score_heart_rate(hr: f64) -> i64 {
    match hr {
        h if h <= 40.0 => 3,
        h if h <= 50.0 => 1,
        h if h <= 90.0 => 0,
        h if h <= 110.0 => 1,
        h if h <= 130.0 => 2,
        _ => 3,
    }
}

fn early_warning_score(a: &Args) -> Result<Outcome, DomainError> {
    let total = sum(&[
        score_respiratory_rate(a.decimal("respiratoryRate")?),
        score_oxygen_saturation(a.decimal("oxygenSaturation")?),
        score_temperature(a.decimal("temperature")?),
        score_systolic_bp(a.decimal("systolicBP")?),
        score_heart_rate(a.decimal("heartRate")?),
    ])?;
    Ok(total.into())
}

// ---------------------------------------------------------------------------
// Indices
// ---------------------------------------------------------------------------

fn rr_to_tidal_volume(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("respiratoryRate")?, a.decimal("tidalVolume")?)?.into())
}

fn shock_index(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("heartRate")?, a.decimal("systolicBP")?)?.into())
}

fn glasgow_coma_scale(a: &Args) -> Result<Outcome, DomainError> {
    let total = sum(&[
        a.integer("eyeResponse")?,
        a.integer("verbalResponse")?,
        a.integer("motorResponse")?,
    ])?;
    Ok(total.into())
}

pub(super) fn pulse_pressure(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("systolicBP")? - a.decimal("diastolicBP")?).into())
}

pub(super) fn mean_arterial_pressure(a: &Args) -> Result<Outcome, DomainError> {
    Ok(((2.0 * a.decimal("diastolic")? + a.decimal("systolic")?) / 3.0).into())
}

fn oxygenation_index(a: &Args) -> Result<Outcome, DomainError> {
    let num = a.decimal("fiO2")? * a.decimal("meanAirwayPressure")? * 100.0;
    Ok(div(num, a.decimal("paO2")?)?.into())
}
