//! Item Rules

use rusty_money::{Money, iso::Currency};

use crate::{discounts::DiscountError, items::Item, rules::RuleError};

/// A per-item bulk discount: `quantity` units of the target item for a
/// fixed `bundle_price`.
///
/// A bundle price below `quantity x` the target's shelf price is what makes
/// the rule a real discount; that relationship is expected but not
/// enforced, matching how rule sets are authored upstream.
#[derive(Debug, Clone)]
pub struct ItemRule<'a> {
    item: Item<'a>,
    quantity: usize,
    bundle_price: Money<'a, Currency>,
}

impl<'a> ItemRule<'a> {
    /// Create a new bundle rule targeting `item`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidBundleQuantity`] if `quantity` is zero.
    /// - [`RuleError::CurrencyMismatch`] if the bundle price and the target
    ///   item's price use different currencies.
    pub fn new(
        item: Item<'a>,
        quantity: usize,
        bundle_price: Money<'a, Currency>,
    ) -> Result<Self, RuleError> {
        if quantity == 0 {
            return Err(RuleError::InvalidBundleQuantity);
        }

        if item.price().currency() != bundle_price.currency() {
            return Err(RuleError::CurrencyMismatch(
                item.price().currency().iso_alpha_code,
                bundle_price.currency().iso_alpha_code,
            ));
        }

        Ok(Self {
            item,
            quantity,
            bundle_price,
        })
    }

    /// Return the target item of the rule.
    pub fn item(&self) -> &Item<'a> {
        &self.item
    }

    /// Return the number of units per bundle.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Return the price charged for one full bundle.
    pub fn bundle_price(&self) -> &Money<'a, Currency> {
        &self.bundle_price
    }

    /// Calculate the discount this rule grants a group of `count` scanned
    /// units represented by `item`.
    ///
    /// Matching is by name only. Non-matching groups earn a zero discount.
    /// Only whole bundles count: `count / quantity` uses integer division,
    /// so a partial bundle earns nothing. The per-bundle saving is priced
    /// off the rule's own target item, not the scanned representative.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the minor-unit arithmetic
    /// overflows.
    pub fn discount(
        &self,
        item: &Item<'_>,
        count: usize,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let currency = self.bundle_price.currency();

        if item.name() != self.item.name() {
            return Ok(Money::from_minor(0, currency));
        }

        let quantity = i64::try_from(self.quantity).map_err(|_| DiscountError::Overflow)?;
        let bundles = i64::try_from(count / self.quantity).map_err(|_| DiscountError::Overflow)?;

        let per_bundle = self
            .item
            .price()
            .to_minor_units()
            .checked_mul(quantity)
            .ok_or(DiscountError::Overflow)?
            .checked_sub(self.bundle_price.to_minor_units())
            .ok_or(DiscountError::Overflow)?;

        let discount = bundles.checked_mul(per_bundle).ok_or(DiscountError::Overflow)?;

        Ok(Money::from_minor(discount, currency))
    }
}
