//! Items

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to item construction.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The item's unit price is negative (name, price in minor units).
    #[error("Item {0} has negative unit price {1}")]
    NegativePrice(String, i64),
}

/// A single scannable unit of a product.
///
/// Two items with the same name are interchangeable for rule matching; the
/// price carried here is the shelf price of one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<'a> {
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> Item<'a> {
    /// Create a new item with the given name and unit price.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativePrice`] if the price is negative.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Result<Self, ItemError> {
        let name = name.into();

        if price.to_minor_units() < 0 {
            return Err(ItemError::NegativePrice(name, price.to_minor_units()));
        }

        Ok(Self { name, price })
    }

    /// Return the name of the item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the unit price of the item.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}
