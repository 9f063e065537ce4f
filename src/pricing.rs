//! Pricing
//!
//! The two-pass pricing algorithm: an item-rule pass over the distinct
//! item groups, then a basket-rule pass over the resulting subtotal. The
//! whole run is a pure function of the groups and the rule set; nothing is
//! cached between runs.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{discounts::DiscountError, groups::ItemGroup, rules::PricingRule};

/// Errors that can occur while pricing a basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Basket arithmetic left the minor-unit range.
    #[error("basket arithmetic overflowed the minor unit range")]
    Overflow,

    /// Errors bubbled up from individual rule evaluations.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// One priced line: a distinct item group with its gross price, the item
/// rule discounts it earned, and the resulting net contribution.
#[derive(Debug, Clone)]
pub struct GroupPricing<'a> {
    name: String,
    count: usize,
    unit_price: Money<'a, Currency>,
    gross: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    net: Money<'a, Currency>,
}

impl<'a> GroupPricing<'a> {
    /// Return the item name of the line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the number of units on the line.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Return the unit price of the line.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Return the shelf price of the line before any rules.
    pub fn gross(&self) -> &Money<'a, Currency> {
        &self.gross
    }

    /// Return the summed item-rule discount for the line.
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// Return the line's contribution to the basket subtotal.
    pub fn net(&self) -> &Money<'a, Currency> {
        &self.net
    }
}

/// A fully priced basket.
#[derive(Debug, Clone)]
pub struct BasketPricing<'a> {
    groups: Vec<GroupPricing<'a>>,
    gross: Money<'a, Currency>,
    subtotal: Money<'a, Currency>,
    basket_discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> BasketPricing<'a> {
    /// Return the priced lines, one per distinct item name.
    pub fn groups(&self) -> &[GroupPricing<'a>] {
        &self.groups
    }

    /// Return the shelf price of the whole basket before any rules.
    pub fn gross(&self) -> Money<'a, Currency> {
        self.gross
    }

    /// Return the subtotal after the item-rule pass.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Return the summed basket-rule discount.
    pub fn basket_discount(&self) -> Money<'a, Currency> {
        self.basket_discount
    }

    /// Return the final basket total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Price a basket of item groups against a rule set.
///
/// The item-rule pass prices each group at `unit price x count` minus the
/// sum of every matching [`ItemRule`](crate::rules::ItemRule) discount;
/// overlapping rules stack. The basket-rule pass then hands the resulting
/// subtotal to every [`BasketRule`](crate::rules::BasketRule) — each sees
/// the same pre-discount subtotal, so basket discounts never compound on
/// one another. Groups never matched by a rule simply contribute their
/// gross price, and rules targeting absent items contribute nothing.
///
/// An empty `groups` slice prices to zero in `currency`.
///
/// # Errors
///
/// Returns a [`PricingError`] if minor-unit arithmetic overflows or a rule
/// evaluation fails.
pub fn price_basket<'a>(
    groups: &[ItemGroup<'a>],
    rules: &[PricingRule<'a>],
    currency: &'a Currency,
) -> Result<BasketPricing<'a>, PricingError> {
    let mut priced_groups = Vec::with_capacity(groups.len());
    let mut gross_minor = 0i64;
    let mut subtotal_minor = 0i64;

    for group in groups {
        let count = i64::try_from(group.count()).map_err(|_| PricingError::Overflow)?;

        let group_gross = group
            .unit_price()
            .to_minor_units()
            .checked_mul(count)
            .ok_or(PricingError::Overflow)?;

        let mut group_discount = 0i64;

        for rule in rules {
            if let PricingRule::Item(item_rule) = rule {
                let discount = item_rule.discount(group.representative(), group.count())?;

                group_discount = group_discount
                    .checked_add(discount.to_minor_units())
                    .ok_or(PricingError::Overflow)?;
            }
        }

        let group_net = group_gross
            .checked_sub(group_discount)
            .ok_or(PricingError::Overflow)?;

        gross_minor = gross_minor
            .checked_add(group_gross)
            .ok_or(PricingError::Overflow)?;

        subtotal_minor = subtotal_minor
            .checked_add(group_net)
            .ok_or(PricingError::Overflow)?;

        priced_groups.push(GroupPricing {
            name: group.name().to_string(),
            count: group.count(),
            unit_price: *group.unit_price(),
            gross: Money::from_minor(group_gross, currency),
            discount: Money::from_minor(group_discount, currency),
            net: Money::from_minor(group_net, currency),
        });
    }

    let subtotal = Money::from_minor(subtotal_minor, currency);
    let mut basket_discount_minor = 0i64;

    for rule in rules {
        if let PricingRule::Basket(basket_rule) = rule {
            let discount = basket_rule.discount(&subtotal)?;

            basket_discount_minor = basket_discount_minor
                .checked_add(discount.to_minor_units())
                .ok_or(PricingError::Overflow)?;
        }
    }

    let total_minor = subtotal_minor
        .checked_sub(basket_discount_minor)
        .ok_or(PricingError::Overflow)?;

    Ok(BasketPricing {
        groups: priced_groups,
        gross: Money::from_minor(gross_minor, currency),
        subtotal,
        basket_discount: Money::from_minor(basket_discount_minor, currency),
        total: Money::from_minor(total_minor, currency),
    })
}
