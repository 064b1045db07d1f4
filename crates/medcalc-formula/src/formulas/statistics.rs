//! Diagnostic test statistics.

use super::epidemiology::incidence_rate;
use crate::math::{div, percent, sum};
use crate::registry::RegistryBuilder;
use crate::value::{Args, DomainError, Outcome};

pub(super) fn register(b: &mut RegistryBuilder) {
    b.register(
        "Sensitivity",
        &["truePositives", "falseNegatives"],
        sensitivity,
    )
    .register(
        "Specificity",
        &["trueNegatives", "falsePositives"],
        specificity,
    )
    .register(
        "Positive Predictive Value (PPV)",
        &["truePositives", "falsePositives"],
        positive_predictive_value,
    )
    .register(
        "Negative Predictive Value (NPV)",
        &["trueNegatives", "falseNegatives"],
        negative_predictive_value,
    )
    .register(
        "Accuracy",
        &[
            "truePositives",
            "trueNegatives",
            "falsePositives",
            "falseNegatives",
        ],
        accuracy,
    )
    .register(
        "Prevalence",
        &["numberOfCases", "totalPopulation"],
        prevalence,
    )
    .register(
        "Positive Likelihood Ratio (LR+)",
        &["sensitivity", "specificity"],
        positive_likelihood_ratio,
    )
    .register(
        "Negative Likelihood Ratio (LR-)",
        &["sensitivity", "specificity"],
        negative_likelihood_ratio,
    )
    .register(
        "Incidence Rate",
        &["numberOfNewCases", "populationAtRisk", "time"],
        incidence_rate,
    )
    .register(
        "Odds Ratio (OR)",
        &["oddsExposureCases", "oddsExposureControls"],
        odds_ratio,
    )
    .register(
        "Relative Risk (RR)",
        &["riskExposedGroup", "riskUnexposedGroup"],
        relative_risk,
    )
    .register(
        "Number Needed to Treat (NNT)",
        &["absoluteRiskReduction"],
        number_needed_to_treat,
    );
}

/// `hits / (hits + misses) * 100` over integer counts.
fn share(a: &Args, hits: &str, misses: &str) -> Result<Outcome, DomainError> {
    let hits = a.integer(hits)?;
    let total = sum(&[hits, a.integer(misses)?])?;
    Ok(percent(hits as f64, total as f64)?.into())
}

fn sensitivity(a: &Args) -> Result<Outcome, DomainError> {
    share(a, "truePositives", "falseNegatives")
}

fn specificity(a: &Args) -> Result<Outcome, DomainError> {
    share(a, "trueNegatives", "falsePositives")
}

fn positive_predictive_value(a: &Args) -> Result<Outcome, DomainError> {
    share(a, "truePositives", "falsePositives")
}

fn negative_predictive_value(a: &Args) -> Result<Outcome, DomainError> {
    share(a, "trueNegatives", "falseNegatives")
}

fn accuracy(a: &Args) -> Result<Outcome, DomainError> {
    let (tp, tn) = (a.integer("truePositives")?, a.integer("trueNegatives")?);
    let correct = sum(&[tp, tn])?;
    let total = sum(&[
        correct,
        a.integer("falsePositives")?,
        a.integer("falseNegatives")?,
    ])?;
    Ok(percent(correct as f64, total as f64)?.into())
}

fn prevalence(a: &Args) -> Result<Outcome, DomainError> {
    Ok(percent(a.decimal("numberOfCases")?, a.decimal("totalPopulation")?)?.into())
}

/// Sensitivity and specificity as fractions.
fn positive_likelihood_ratio(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("sensitivity")?, 1.0 - a.decimal("specificity")?)?.into())
}

fn negative_likelihood_ratio(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(1.0 - a.decimal("sensitivity")?, a.decimal("specificity")?)?.into())
}

fn odds_ratio(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("oddsExposureCases")?, a.decimal("oddsExposureControls")?)?.into())
}

fn relative_risk(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(a.decimal("riskExposedGroup")?, a.decimal("riskUnexposedGroup")?)?.into())
}

fn number_needed_to_treat(a: &Args) -> Result<Outcome, DomainError> {
    Ok(div(1.0, a.decimal("absoluteRiskReduction")?)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::testing::{approx, decimals, integers};

    #[test]
    fn sensitivity_from_counts() {
        let a = integers(&[("truePositives", 90), ("falseNegatives", 10)]);
        approx(sensitivity(&a).unwrap().as_f64(), 90.0);
    }

    #[test]
    fn empty_counts_divide_by_zero() {
        let a = integers(&[("trueNegatives", 0), ("falsePositives", 0)]);
        assert_eq!(specificity(&a), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn count_overflow() {
        let a = integers(&[("truePositives", i64::MAX), ("falseNegatives", 1)]);
        assert_eq!(sensitivity(&a), Err(DomainError::Overflow));
    }

    #[test]
    fn accuracy_over_all_cells() {
        let a = integers(&[
            ("truePositives", 40),
            ("trueNegatives", 45),
            ("falsePositives", 5),
            ("falseNegatives", 10),
        ]);
        approx(accuracy(&a).unwrap().as_f64(), 85.0);
    }

    #[test]
    fn likelihood_ratios() {
        let a = decimals(&[("sensitivity", 0.9), ("specificity", 0.8)]);
        approx(positive_likelihood_ratio(&a).unwrap().as_f64(), 4.5);
        approx(negative_likelihood_ratio(&a).unwrap().as_f64(), 0.125);
        let a = decimals(&[("sensitivity", 0.9), ("specificity", 1.0)]);
        assert_eq!(positive_likelihood_ratio(&a), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn nnt() {
        approx(
            number_needed_to_treat(&decimals(&[("absoluteRiskReduction", 0.25)]))
                .unwrap()
                .as_f64(),
            4.0,
        );
    }
}
