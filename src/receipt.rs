//! Receipt

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    checkout::Checkout,
    pricing::{BasketPricing, GroupPricing, PricingError},
};

/// Errors that can occur when building or reading a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Errors bubbled up from pricing the basket.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Numeric receipt for a priced basket.
///
/// A thin reading layer over [`BasketPricing`]: per-name lines plus the
/// basket-level figures, with savings helpers. It carries no formatting —
/// rendering money for humans is the caller's concern.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    pricing: BasketPricing<'a>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt by pricing the checkout's current basket.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the basket cannot be priced.
    pub fn for_checkout(checkout: &Checkout<'a>) -> Result<Self, ReceiptError> {
        Ok(Self {
            pricing: checkout.pricing()?,
        })
    }

    /// Return the priced lines, one per distinct item name.
    pub fn lines(&self) -> &[GroupPricing<'a>] {
        self.pricing.groups()
    }

    /// Shelf price of the basket before any rules.
    pub fn gross(&self) -> Money<'a, Currency> {
        self.pricing.gross()
    }

    /// Subtotal after the item-rule pass.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.pricing.subtotal()
    }

    /// Summed basket-rule discount.
    pub fn basket_discount(&self) -> Money<'a, Currency> {
        self.pricing.basket_discount()
    }

    /// Amount payable for the basket.
    pub fn total(&self) -> Money<'a, Currency> {
        self.pricing.total()
    }

    /// Calculate the savings the rules earned against the shelf price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.gross().sub(self.total())
    }

    /// Calculate the savings as a fraction of the shelf price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings = self.savings()?;

        // Ratio is relative to the pre-rule shelf price; decimal space
        // avoids integer division truncation.
        let savings_minor = savings.to_minor_units();
        let gross_minor = self.gross().to_minor_units();

        if gross_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let gross_dec = Decimal::from_i64(gross_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / gross_dec))
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{
        items::Item,
        rules::{BasketRule, ItemRule, PricingRule},
    };

    use super::*;

    fn classic_rules() -> TestResult<Vec<PricingRule<'static>>> {
        let a = Item::new("A", Money::from_minor(50, GBP))?;
        let b = Item::new("B", Money::from_minor(30, GBP))?;

        Ok(vec![
            PricingRule::Item(ItemRule::new(a, 2, Money::from_minor(90, GBP))?),
            PricingRule::Item(ItemRule::new(b, 3, Money::from_minor(75, GBP))?),
            PricingRule::Basket(BasketRule::new(
                Money::from_minor(200, GBP),
                Percentage::from(0.10),
            )?),
        ])
    }

    fn scan_all(checkout: &mut Checkout<'_>, names: &[&str]) -> TestResult {
        for name in names {
            let unit_minor = match *name {
                "A" => 50,
                "B" => 30,
                _ => 20,
            };

            checkout.scan(Item::new(*name, Money::from_minor(unit_minor, GBP))?);
        }

        Ok(())
    }

    #[test]
    fn receipt_carries_the_basket_figures() -> TestResult {
        let rules = classic_rules()?;
        let mut checkout = Checkout::new(&rules, GBP);

        scan_all(&mut checkout, &["C", "B", "A", "A", "C", "B", "C"])?;

        let receipt = Receipt::for_checkout(&checkout)?;

        assert_eq!(receipt.gross(), Money::from_minor(220, GBP));
        assert_eq!(receipt.subtotal(), Money::from_minor(210, GBP));
        assert_eq!(receipt.basket_discount(), Money::from_minor(21, GBP));
        assert_eq!(receipt.total(), Money::from_minor(189, GBP));
        assert_eq!(receipt.lines().len(), 3);

        Ok(())
    }

    #[test]
    fn savings_compare_total_to_shelf_price() -> TestResult {
        let rules = classic_rules()?;
        let mut checkout = Checkout::new(&rules, GBP);

        scan_all(&mut checkout, &["C", "B", "A", "A", "C", "B", "C"])?;

        let receipt = Receipt::for_checkout(&checkout)?;

        assert_eq!(receipt.savings()?, Money::from_minor(31, GBP));

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_shelf_price() -> TestResult {
        let rules = classic_rules()?;
        let mut checkout = Checkout::new(&rules, GBP);

        scan_all(&mut checkout, &["C", "B", "A", "A", "C", "B", "C"])?;

        let receipt = Receipt::for_checkout(&checkout)?;
        let expected = Percentage::from(Decimal::from(31) / Decimal::from(220));

        assert_eq!(receipt.savings_percent()?, expected);

        Ok(())
    }

    #[test]
    fn empty_basket_receipt_saves_nothing() -> TestResult {
        let checkout = Checkout::new(&[], GBP);
        let receipt = Receipt::for_checkout(&checkout)?;

        assert_eq!(receipt.total(), Money::from_minor(0, GBP));
        assert_eq!(receipt.savings()?, Money::from_minor(0, GBP));
        assert_eq!(receipt.savings_percent()?, Percentage::from(0.0));

        Ok(())
    }
}
