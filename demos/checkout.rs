//! Classic Checkout Example
//!
//! Loads the classic fixture set, scans its basket, and prints the receipt
//! figures in minor units.

use anyhow::Result;

use till::{fixtures::Fixture, receipt::Receipt};

/// Classic checkout example
pub fn main() -> Result<()> {
    let fixture = Fixture::from_set("classic")?;
    let checkout = fixture.checkout()?;
    let receipt = Receipt::for_checkout(&checkout)?;

    for line in receipt.lines() {
        println!(
            "{:<4} x{:<3} gross {:>6}  discount {:>6}  net {:>6}",
            line.name(),
            line.count(),
            line.gross().to_minor_units(),
            line.discount().to_minor_units(),
            line.net().to_minor_units(),
        );
    }

    println!("subtotal        {:>6}", receipt.subtotal().to_minor_units());
    println!(
        "basket discount {:>6}",
        receipt.basket_discount().to_minor_units()
    );
    println!("total           {:>6}", receipt.total().to_minor_units());
    println!("saved           {:>6}", receipt.savings()?.to_minor_units());

    Ok(())
}
