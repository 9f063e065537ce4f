//! Fixtures
//!
//! Named YAML fixture sets for tests and demos: a catalog of items, a
//! scan order, and a rule set, loaded from `fixtures/<name>.yml`.

use std::{fs, path::PathBuf, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    checkout::Checkout,
    items::{Item, ItemError},
    rules::{BasketRule, ItemRule, PricingRule, RuleError},
};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files.
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between fixture prices.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// An item key referenced by the basket or a rule does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// No items loaded yet.
    #[error("No items loaded; currency unknown")]
    NoCurrency,

    /// Item construction error.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Rule construction error.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Wrapper for a fixture set in YAML.
#[derive(Debug, Deserialize)]
struct FixtureFile {
    /// Map of item key -> item fixture.
    items: FxHashMap<String, ItemFixture>,

    /// Item keys in scan order.
    #[serde(default)]
    basket: Vec<String>,

    /// Map of rule key -> rule fixture.
    #[serde(default)]
    rules: FxHashMap<String, RuleFixture>,
}

/// Item fixture from YAML.
#[derive(Debug, Deserialize)]
struct ItemFixture {
    /// Item name, the identity rules match against.
    name: String,

    /// Unit price string, e.g. `0.50 GBP`.
    price: String,
}

/// Rule fixture from YAML.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RuleFixture {
    /// Per-item bundle rule.
    Bundle {
        /// Key of the target item.
        item: String,

        /// Units per bundle.
        quantity: usize,

        /// Price string for one full bundle.
        bundle_price: String,
    },

    /// Basket threshold rule.
    BasketThreshold {
        /// Price string for the subtotal threshold.
        min_basket_price: String,

        /// Fractional discount, e.g. `0.10` for 10% off.
        discount_percent: f64,
    },
}

/// A loaded fixture set.
#[derive(Debug)]
pub struct Fixture {
    base_path: PathBuf,
    items: FxHashMap<String, Item<'static>>,
    basket: Vec<String>,
    rules: Vec<PricingRule<'static>>,
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create an empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create an empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            items: FxHashMap::default(),
            basket: Vec::new(),
            rules: Vec::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set from `<base path>/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();
        let file_path = fixture.base_path.join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        fixture.load_yaml(&contents)?;

        Ok(fixture)
    }

    /// Load a fixture set from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or describes invalid
    /// items or rules.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_yaml(contents)?;

        Ok(fixture)
    }

    fn load_yaml(&mut self, contents: &str) -> Result<(), FixtureError> {
        let file: FixtureFile = serde_norway::from_str(contents)?;

        for (key, item_fixture) in file.items {
            let (minor, currency) = self.parse_price(&item_fixture.price)?;
            let item = Item::new(item_fixture.name, Money::from_minor(minor, currency))?;

            self.items.insert(key, item);
        }

        for key in &file.basket {
            if !self.items.contains_key(key) {
                return Err(FixtureError::ItemNotFound(key.clone()));
            }
        }

        self.basket = file.basket;

        for rule_fixture in file.rules.into_values() {
            let rule = match rule_fixture {
                RuleFixture::Bundle {
                    item,
                    quantity,
                    bundle_price,
                } => {
                    let target = self.item(&item)?.clone();
                    let (minor, currency) = self.parse_price(&bundle_price)?;

                    PricingRule::Item(ItemRule::new(
                        target,
                        quantity,
                        Money::from_minor(minor, currency),
                    )?)
                }
                RuleFixture::BasketThreshold {
                    min_basket_price,
                    discount_percent,
                } => {
                    let (minor, currency) = self.parse_price(&min_basket_price)?;

                    PricingRule::Basket(BasketRule::new(
                        Money::from_minor(minor, currency),
                        Percentage::from(discount_percent),
                    )?)
                }
            };

            self.rules.push(rule);
        }

        Ok(())
    }

    /// Parse a price string like `0.50 GBP` into minor units, enforcing
    /// one currency per fixture set.
    fn parse_price(&mut self, input: &str) -> Result<(i64, &'static Currency), FixtureError> {
        let mut parts = input.split_whitespace();

        let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FixtureError::InvalidPrice(input.to_string()));
        };

        let currency =
            iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        let amount =
            Decimal::from_str(amount).map_err(|_| FixtureError::InvalidPrice(input.to_string()))?;

        let scaled = amount
            .checked_mul(Decimal::from(10i64.pow(currency.exponent)))
            .ok_or_else(|| FixtureError::InvalidPrice(input.to_string()))?;

        if !scaled.fract().is_zero() {
            return Err(FixtureError::InvalidPrice(input.to_string()));
        }

        let minor = scaled
            .to_i64()
            .ok_or_else(|| FixtureError::InvalidPrice(input.to_string()))?;

        Ok((minor, currency))
    }

    /// Get an item by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ItemNotFound`] if the key is unknown.
    pub fn item(&self, key: &str) -> Result<&Item<'static>, FixtureError> {
        self.items
            .get(key)
            .ok_or_else(|| FixtureError::ItemNotFound(key.to_string()))
    }

    /// Return the loaded rules.
    pub fn rules(&self) -> &[PricingRule<'static>] {
        &self.rules
    }

    /// Return the item keys in scan order.
    pub fn basket(&self) -> &[String] {
        &self.basket
    }

    /// Return the fixture set's currency.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if no prices have been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a checkout over the fixture's rules and scan the basket.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture has no currency or the basket
    /// references an unknown item key.
    pub fn checkout(&self) -> Result<Checkout<'_>, FixtureError> {
        let mut checkout = Checkout::new(&self.rules, self.currency()?);

        for key in &self.basket {
            checkout.scan(self.item(key)?.clone());
        }

        Ok(checkout)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
