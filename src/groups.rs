//! Item Groups

use rusty_money::{Money, iso::Currency};

use crate::items::Item;

/// All scanned units of one distinct item name, collapsed to a
/// representative item and a count.
///
/// The representative is the first item scanned under the name, and its
/// price is the unit price for the whole group. Callers must ensure that
/// items sharing a name share a price; mismatches are not reconciled.
#[derive(Debug, Clone)]
pub struct ItemGroup<'a> {
    representative: Item<'a>,
    count: usize,
}

impl<'a> ItemGroup<'a> {
    /// Create a group from a representative item and a unit count.
    pub fn new(representative: Item<'a>, count: usize) -> Self {
        Self {
            representative,
            count,
        }
    }

    /// Collapse a run of same-named scans into a group.
    ///
    /// Returns `None` when no items have been scanned under the name. The
    /// first scan becomes the representative, so its price wins.
    pub fn from_scans(scans: &[Item<'a>]) -> Option<Self> {
        let representative = scans.first()?.clone();

        Some(Self {
            representative,
            count: scans.len(),
        })
    }

    /// Return the item name shared by the group.
    pub fn name(&self) -> &str {
        self.representative.name()
    }

    /// Return the representative item of the group.
    pub fn representative(&self) -> &Item<'a> {
        &self.representative
    }

    /// Return the unit price of the group.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        self.representative.price()
    }

    /// Return the number of units in the group.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_scans_empty_returns_none() {
        let scans: [Item<'static>; 0] = [];

        assert!(ItemGroup::from_scans(&scans).is_none());
    }

    #[test]
    fn from_scans_counts_units() -> TestResult {
        let scans = [
            Item::new("B", Money::from_minor(30, GBP))?,
            Item::new("B", Money::from_minor(30, GBP))?,
            Item::new("B", Money::from_minor(30, GBP))?,
        ];

        let Some(group) = ItemGroup::from_scans(&scans) else {
            panic!("expected a group");
        };

        assert_eq!(group.name(), "B");
        assert_eq!(group.count(), 3);
        assert_eq!(group.unit_price(), &Money::from_minor(30, GBP));

        Ok(())
    }

    #[test]
    fn first_scanned_price_wins() -> TestResult {
        let scans = [
            Item::new("B", Money::from_minor(30, GBP))?,
            Item::new("B", Money::from_minor(99, GBP))?,
        ];

        let Some(group) = ItemGroup::from_scans(&scans) else {
            panic!("expected a group");
        };

        assert_eq!(group.unit_price(), &Money::from_minor(30, GBP));

        Ok(())
    }
}
