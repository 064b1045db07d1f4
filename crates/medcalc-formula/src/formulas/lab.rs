//! Blood and laboratory values.

use super::dosage::anion_gap;
use crate::math::{div, percent, pow};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome, Race, Sex};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Hemoglobin to Hematocrit Conversion",
        &["hemoglobin"],
        hemoglobin_to_hematocrit,
    )
    .register(
        "Red Cell Distribution Width (RDW)",
        &["stdDevRBCVolume", "meanCorpuscularVolume"],
        red_cell_distribution_width,
    )
    .register(
        "Reticulocyte Production Index (RPI)",
        &[
            "reticulocyteCount",
            "hematocrit",
            "normalHematocrit",
            "maturationFactor",
        ],
        reticulocyte_production_index,
    )
    .register(
        "Mean Platelet Volume (MPV)",
        &["plateletVolume", "plateletCount"],
        mean_platelet_volume,
    )
    .register(
        "Neutrophil-to-Lymphocyte Ratio (NLR)",
        &["neutrophilCount", "lymphocyteCount"],
        neutrophil_lymphocyte_ratio,
    )
    .register(
        "Corrected Reticulocyte Count",
        &["reticulocyteCount", "patientsHematocrit", "normalHematocrit"],
        corrected_reticulocyte_count,
    )
    .register(
        "Corrected Calcium",
        &["measuredCalcium", "albumin"],
        corrected_calcium,
    )
    .register(
        "Anion Gap",
        &["sodium", "potassium", "chloride", "bicarbonate"],
        anion_gap,
    )
    .register(
        "eGFR (Estimated Glomerular Filtration Rate)",
        &["serumCreatinine", "age", "sex", "race"],
        egfr,
    )
    .register(
        "Mean Corpuscular Volume (MCV)",
        &["hematocrit", "rbcCount"],
        mean_corpuscular_volume,
    )
    .register(
        "Transferrin Saturation",
        &["serumIron", "tibc"],
        transferrin_saturation,
    );
}

/// Rule of three.
fn hemoglobin_to_hematocrit(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("hemoglobin")? * 3.0).into())
}

fn red_cell_distribution_width(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(a.decimal("stdDevRBCVolume")?, a.decimal("meanCorpuscularVolume")?)?.into())
}

fn reticulocyte_production_index(a: &Args) -> Result<Outcome, DomainError> {
    let num = a.decimal("reticulocyteCount")? * a.decimal("hematocrit")?;
    let den = a.decimal("normalHematocrit")? * a.decimal("maturationFactor")?;
    Ok(div(num, den)?.into())
}

fn mean_platelet_volume(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("plateletVolume")?, a.decimal("plateletCount")?)?.into())
}

fn neutrophil_lymphocyte_ratio(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("neutrophilCount")?, a.decimal("lymphocyteCount")?)?.into())
}

fn corrected_reticulocyte_count(a: &Args) -> Result<Outcome, DomainError> {
    let ratio = div(a.decimal("patientsHematocrit")?, a.decimal("normalHematocrit")?)?;
    Ok((a.decimal("reticulocyteCount")? * ratio).into())
}

/// Adds 0.8 mg/dL per g/dL of albumin below 4.
pub(super) fn corrected_calcium(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("measuredCalcium")? + 0.8 * (4.0 - a.decimal("albumin")?)).into())
}

/// Four-variable MDRD study equation.
fn egfr(a: &Args) -> Result<Outcome, DomainError> {
    let sex_factor = match a.sex("sex")? {
        Sex::Female => 0.742,
        Sex::Male => 1.0,
    };
    let race_factor = match a.race("race")? {
        Race::Black => 1.212,
        Race::NonBlack => 1.0,
    };
    let creatinine = pow(a.decimal("serumCreatinine")?, -1.154)?;
    let age = pow(a.decimal("age")?, -0.203)?;
    Ok((186.0 * creatinine * age * sex_factor * race_factor).into())
}

fn mean_corpuscular_volume(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("hematocrit")? * 10.0, a.decimal("rbcCount")?)?.into())
}

fn transferrin_saturation(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(a.decimal("serumIron")?, a.decimal("tibc")?)?.into())
}
