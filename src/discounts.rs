//! Discounts
//!
//! Shared arithmetic for discount calculations. All money maths in this
//! crate happens in minor units; this module holds the percentage kernel
//! both rule kinds lean on.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely represented.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Bundle arithmetic left the minor-unit range.
    #[error("discount arithmetic overflowed the minor unit range")]
    Overflow,
}

/// Calculate a percentage of an amount in minor units, rounding midpoint
/// away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the product cannot be
/// represented as a `Decimal` or converted back to minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // the percentage crate keeps its Decimal private
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_takes_exact_fraction() -> TestResult {
        assert_eq!(percent_of_minor(&Percentage::from(0.10), 210)?, 21);

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_midpoint_away_from_zero() -> TestResult {
        // 10% of 105 is 10.5 minor units.
        assert_eq!(percent_of_minor(&Percentage::from(0.10), 105)?, 11);

        Ok(())
    }

    #[test]
    fn percent_of_minor_zero_percent_is_zero() -> TestResult {
        assert_eq!(percent_of_minor(&Percentage::from(0.0), 500)?, 0);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }
}
