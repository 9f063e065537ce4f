//! Till
//!
//! Till is a small supermarket checkout pricing engine: scan items into a
//! checkout, attach bundle and basket-threshold pricing rules, and price the
//! basket.

pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod groups;
pub mod items;
pub mod pricing;
pub mod receipt;
pub mod rules;
