//! Money calculation utilities using rust_decimal for precision

use rust_decimal::prelude::*;

/// Monetary values are kept to 2 decimal places
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to 2 decimal places, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price × quantity`, unrounded
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
