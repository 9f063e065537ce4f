//! Pricing Rules
//!
//! The two rule kinds share a discount capability but nothing else, so the
//! rule set is a tagged union; the pricing pass branches on the variant
//! rather than inspecting rule fields.

use rust_decimal::Decimal;
use thiserror::Error;

pub mod basket_rule;
pub mod item_rule;

pub use basket_rule::BasketRule;
pub use item_rule::ItemRule;

/// Errors raised when constructing a pricing rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A bundle rule needs at least one unit per bundle.
    #[error("bundle quantity must be at least 1")]
    InvalidBundleQuantity,

    /// The discount fraction is outside `[0, 1]`.
    #[error("discount percent {0} is outside the range 0 to 1")]
    PercentOutOfRange(Decimal),

    /// The basket threshold is negative (minor units).
    #[error("minimum basket price {0} is negative")]
    NegativeThreshold(i64),

    /// A rule's money values disagree on currency (left, right).
    #[error("rule mixes currencies {0} and {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// A pricing rule attached to a checkout.
#[derive(Debug, Clone)]
pub enum PricingRule<'a> {
    /// Per-item bulk discount: N units of one item for a fixed bundle price.
    Item(ItemRule<'a>),

    /// Whole-basket percentage discount above a subtotal threshold.
    Basket(BasketRule<'a>),
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use crate::items::Item;

    use super::*;

    #[test]
    fn variants_wrap_their_rule_kind() -> TestResult {
        let target = Item::new("A", Money::from_minor(50, GBP))?;

        let item_rule =
            PricingRule::Item(ItemRule::new(target, 2, Money::from_minor(90, GBP))?);

        let basket_rule = PricingRule::Basket(BasketRule::new(
            Money::from_minor(200, GBP),
            Percentage::from(0.10),
        )?);

        assert!(matches!(item_rule, PricingRule::Item(_)));
        assert!(matches!(basket_rule, PricingRule::Basket(_)));

        Ok(())
    }
}
