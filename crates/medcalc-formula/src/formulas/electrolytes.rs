//! Electrolyte replacement.

use super::lab::corrected_calcium;
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Sodium Deficit",
        &["desiredSodium", "currentSodium", "totalBodyWater"],
        sodium_deficit,
    )
    .register(
        "Chloride Replacement",
        &["desiredChloride", "currentChloride", "totalBodyWater"],
        chloride_replacement,
    )
    .register(
        "Bicarbonate Replacement",
        &["baseDeficit", "totalBodyWater"],
        bicarbonate_replacement,
    )
    .register(
        "Phosphate Correction for Calcium",
        &["phosphateReplacement", "correctionFactor"],
        phosphate_correction_for_calcium,
    )
    .register(
        "Hyperkalemia Correction",
        &["currentPotassium", "targetPotassium"],
        hyperkalemia_correction,
    )
    .register(
        "Potassium Replacement",
        &["desiredPotassium", "currentPotassium", "totalBodyPotassium"],
        potassium_replacement,
    )
    .register(
        "Calcium Correction for Albumin",
        &["measuredCalcium", "albumin"],
        corrected_calcium,
    )
    .register(
        "Magnesium Replacement",
        &["desiredMagnesium", "currentMagnesium", "totalBodyMagnesium"],
        magnesium_replacement,
    )
    .register(
        "Phosphate Replacement",
        &["desiredPhosphate", "currentPhosphate", "totalBodyPhosphate"],
        phosphate_replacement,
    );
}

/// `(desired - current) * pool`
fn deficit(a: &Args, desired: &str, current: &str, pool: &str) -> Result<Outcome, DomainError> {
    Ok(((a.decimal(desired)? - a.decimal(current)?) * a.decimal(pool)?).into())
}

fn sodium_deficit(a: &Args) -> Result<Outcome, DomainError> {
    deficit(a, "desiredSodium", "currentSodium", "totalBodyWater")
}

fn chloride_replacement(a: &Args) -> Result<Outcome, DomainError> {
    deficit(a, "desiredChloride", "currentChloride", "totalBodyWater")
}

fn bicarbonate_replacement(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("baseDeficit")? * a.decimal("totalBodyWater")?).into())
}

fn phosphate_correction_for_calcium(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("phosphateReplacement")? * a.decimal("correctionFactor")?).into())
}

fn hyperkalemia_correction(a: &Args) -> Result<Outcome, DomainError> {
    Ok((a.decimal("currentPotassium")? - a.decimal("targetPotassium")?).into())
}

fn potassium_replacement(a: &Args) -> Result<Outcome, DomainError> {
    deficit(a, "desiredPotassium", "currentPotassium", "totalBodyPotassium")
}

fn magnesium_replacement(a: &Args) -> Result<Outcome, DomainError> {
    deficit(a, "desiredMagnesium", "currentMagnesium", "totalBodyMagnesium")
}

fn phosphate_replacement(a: &Args) -> Result<Outcome, DomainError> {
    deficit(a, "desiredPhosphate", "currentPhosphate", "totalBodyPhosphate")
}
