//! Basket Rules

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{DiscountError, percent_of_minor},
    rules::RuleError,
};

/// A whole-basket percentage discount that unlocks once the basket
/// subtotal reaches a threshold.
///
/// The percentage is fractional: `0.10` takes 10% off. The subtotal a
/// basket rule sees is the one left by the item-rule pass.
#[derive(Debug, Clone)]
pub struct BasketRule<'a> {
    min_basket_price: Money<'a, Currency>,
    discount_percent: Percentage,
}

impl<'a> BasketRule<'a> {
    /// Create a new basket threshold rule.
    ///
    /// # Errors
    ///
    /// - [`RuleError::NegativeThreshold`] if the minimum basket price is
    ///   negative.
    /// - [`RuleError::PercentOutOfRange`] if the discount fraction falls
    ///   outside `[0, 1]`.
    pub fn new(
        min_basket_price: Money<'a, Currency>,
        discount_percent: Percentage,
    ) -> Result<Self, RuleError> {
        if min_basket_price.to_minor_units() < 0 {
            return Err(RuleError::NegativeThreshold(
                min_basket_price.to_minor_units(),
            ));
        }

        let fraction = discount_percent * Decimal::ONE;

        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(RuleError::PercentOutOfRange(fraction));
        }

        Ok(Self {
            min_basket_price,
            discount_percent,
        })
    }

    /// Return the subtotal threshold at which the discount unlocks.
    pub fn min_basket_price(&self) -> &Money<'a, Currency> {
        &self.min_basket_price
    }

    /// Return the discount fraction.
    pub fn discount_percent(&self) -> Percentage {
        self.discount_percent
    }

    /// Calculate the discount for a basket subtotal.
    ///
    /// Returns zero below the threshold; at or above it, the discount is
    /// proportional to the whole subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage arithmetic cannot be
    /// represented in minor units.
    pub fn discount(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let currency = self.min_basket_price.currency();

        if subtotal.to_minor_units() < self.min_basket_price.to_minor_units() {
            return Ok(Money::from_minor(0, currency));
        }

        let discount = percent_of_minor(&self.discount_percent, subtotal.to_minor_units())?;

        Ok(Money::from_minor(discount, currency))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn ten_percent_over_200() -> Result<BasketRule<'static>, RuleError> {
        BasketRule::new(Money::from_minor(200, GBP), Percentage::from(0.10))
    }

    #[test]
    fn new_rejects_negative_threshold() {
        let result = BasketRule::new(Money::from_minor(-1, GBP), Percentage::from(0.10));

        assert!(matches!(result, Err(RuleError::NegativeThreshold(-1))));
    }

    #[test]
    fn new_rejects_percent_above_one() {
        let result = BasketRule::new(Money::from_minor(200, GBP), Percentage::from(1.5));

        assert!(matches!(result, Err(RuleError::PercentOutOfRange(_))));
    }

    #[test]
    fn new_rejects_negative_percent() {
        let result = BasketRule::new(Money::from_minor(200, GBP), Percentage::from(-0.1));

        assert!(matches!(result, Err(RuleError::PercentOutOfRange(_))));
    }

    #[test]
    fn new_accepts_full_range_bounds() -> TestResult {
        BasketRule::new(Money::from_minor(200, GBP), Percentage::from(0.0))?;
        BasketRule::new(Money::from_minor(200, GBP), Percentage::from(1.0))?;

        Ok(())
    }

    #[test]
    fn accessors_return_constructor_values() -> TestResult {
        let rule = ten_percent_over_200()?;

        assert_eq!(rule.min_basket_price(), &Money::from_minor(200, GBP));
        assert_eq!(rule.discount_percent(), Percentage::from(0.10));

        Ok(())
    }

    #[test]
    fn discount_zero_below_threshold() -> TestResult {
        let rule = ten_percent_over_200()?;

        assert_eq!(
            rule.discount(&Money::from_minor(199, GBP))?,
            Money::from_minor(0, GBP)
        );

        Ok(())
    }

    #[test]
    fn discount_applies_exactly_at_threshold() -> TestResult {
        let rule = ten_percent_over_200()?;

        assert_eq!(
            rule.discount(&Money::from_minor(200, GBP))?,
            Money::from_minor(20, GBP)
        );

        Ok(())
    }

    #[test]
    fn discount_is_proportional_above_threshold() -> TestResult {
        let rule = ten_percent_over_200()?;

        assert_eq!(
            rule.discount(&Money::from_minor(210, GBP))?,
            Money::from_minor(21, GBP)
        );

        Ok(())
    }
}
