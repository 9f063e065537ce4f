//! Checkout

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    groups::ItemGroup,
    items::Item,
    pricing::{BasketPricing, PricingError, price_basket},
    rules::PricingRule,
};

/// A single checkout session: items scanned one at a time against a fixed,
/// externally owned rule set.
///
/// Scan order never affects the result; only the per-name counts and the
/// shared unit prices matter. Each checkout owns its accumulation
/// exclusively — wrap it in a lock if several callers must share one.
#[derive(Debug)]
pub struct Checkout<'a> {
    rules: &'a [PricingRule<'a>],
    scanned: FxHashMap<String, SmallVec<[Item<'a>; 8]>>,
    currency: &'a Currency,
}

impl<'a> Checkout<'a> {
    /// Create a new checkout session for the given rule set and currency.
    ///
    /// The currency only decides what an empty basket totals to; scanned
    /// items are expected to already agree with it.
    pub fn new(rules: &'a [PricingRule<'a>], currency: &'a Currency) -> Self {
        Self {
            rules,
            scanned: FxHashMap::default(),
            currency,
        }
    }

    /// Scan one item into the basket.
    ///
    /// Appends to the list for the item's name, creating it if absent. The
    /// first item scanned under a name sets the unit price for the whole
    /// group; callers must keep same-named prices consistent.
    pub fn scan(&mut self, item: Item<'a>) {
        self.scanned
            .entry(item.name().to_string())
            .or_default()
            .push(item);
    }

    /// Return the number of items scanned so far.
    pub fn len(&self) -> usize {
        self.scanned.values().map(SmallVec::len).sum()
    }

    /// Check whether anything has been scanned.
    pub fn is_empty(&self) -> bool {
        self.scanned.is_empty()
    }

    /// Return the rule set attached to this checkout.
    pub fn rules(&self) -> &'a [PricingRule<'a>] {
        self.rules
    }

    /// Return the checkout currency.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Collapse the scanned items into one group per distinct name.
    ///
    /// Groups are sorted by name so downstream breakdowns are stable
    /// regardless of scan order.
    pub fn groups(&self) -> Vec<ItemGroup<'a>> {
        let mut groups: Vec<ItemGroup<'a>> = self
            .scanned
            .values()
            .filter_map(|scans| ItemGroup::from_scans(scans))
            .collect();

        groups.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        groups
    }

    /// Price the basket and return the full breakdown.
    ///
    /// Recomputed from scratch on every call; nothing is cached, so the
    /// result always reflects the current basket.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if minor-unit arithmetic overflows or a
    /// rule evaluation fails.
    pub fn pricing(&self) -> Result<BasketPricing<'a>, PricingError> {
        price_basket(&self.groups(), self.rules, self.currency)
    }

    /// Price the basket and return the final total.
    ///
    /// Idempotent: two calls with no intervening [`scan`](Checkout::scan)
    /// return the same value.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if minor-unit arithmetic overflows or a
    /// rule evaluation fails.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        Ok(self.pricing()?.total())
    }
}
