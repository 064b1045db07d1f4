//! Checked arithmetic for formulas.
//!
//! Each helper turns a degenerate input into a [`DomainError`] instead of
//! letting it become an infinity or NaN that would read like a real answer.

use crate::value::DomainError;

/// `num / den`, failing when `den` is zero.
pub fn div(num: f64, den: f64) -> Result<f64, DomainError> {
    if den == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    Ok(num / den)
}

/// `num / den * 100`.
pub fn percent(num: f64, den: f64) -> Result<f64, DomainError> {
    Ok(div(num, den)? * 100.0)
}

pub fn sqrt(x: f64) -> Result<f64, DomainError> {
    if x < 0.0 {
        return Err(DomainError::NegativeSquareRoot(x));
    }
    Ok(x.sqrt())
}

/// Natural logarithm.
pub fn ln(x: f64) -> Result<f64, DomainError> {
    if x <= 0.0 {
        return Err(DomainError::NonPositiveLogarithm(x));
    }
    Ok(x.ln())
}

/// `base ^ exponent` over the reals.
pub fn pow(base: f64, exponent: f64) -> Result<f64, DomainError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(DomainError::InvalidPower { base, exponent });
    }
    Ok(base.powf(exponent))
}

/// Sum of integer scores with overflow detection.
pub fn sum(scores: &[i64]) -> Result<i64, DomainError> {
    scores
        .iter()
        .try_fold(0i64, |acc, s| acc.checked_add(*s))
        .ok_or(DomainError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero() {
        assert_eq!(div(1.0, 0.0), Err(DomainError::DivisionByZero));
        assert_eq!(div(1.0, -0.0), Err(DomainError::DivisionByZero));
        assert_eq!(div(3.0, 2.0), Ok(1.5));
    }

    #[test]
    fn percent_of() {
        assert_eq!(percent(1.0, 4.0), Ok(25.0));
    }

    #[test]
    fn roots_and_logs() {
        assert_eq!(sqrt(9.0), Ok(3.0));
        assert!(matches!(sqrt(-1.0), Err(DomainError::NegativeSquareRoot(_))));
        assert!(matches!(ln(0.0), Err(DomainError::NonPositiveLogarithm(_))));
        assert!((ln(2.0).unwrap() - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn powers() {
        assert_eq!(pow(4.0, 0.5), Ok(2.0));
        assert_eq!(pow(0.0, -1.0), Err(DomainError::DivisionByZero));
        assert!(matches!(pow(-8.0, 0.5), Err(DomainError::InvalidPower { .. })));
        assert_eq!(pow(-2.0, 2.0), Ok(4.0));
    }

    #[test]
    fn sums() {
        assert_eq!(sum(&[2, 2, 1, 2, 2]), Ok(9));
        assert_eq!(sum(&[i64::MAX, 1]), Err(DomainError::Overflow));
    }
}
