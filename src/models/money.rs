//! Monetary rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every monetary output carries.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to cents, half away from zero, and fixes the scale at two
/// places so serialized figures always read like `"1200.00"`.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()).to_string(), "10.01");
/// assert_eq!(round_money(Decimal::from_str("20000").unwrap()).to_string(), "20000.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
