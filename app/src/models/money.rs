// catalog_server/src/models/money.rs

//! Prices are two-decimal currency amounts, stored as integer cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept for every price.
pub const PRICE_SCALE: u32 = 2;

/// Largest price a product may carry (`NUMERIC(10,2)`).
pub const MAX_PRICE_CENTS: i64 = 9_999_999_999;

pub fn max_price() -> Decimal {
  cents_to_decimal(MAX_PRICE_CENTS)
}

/// Rounds to cents, half away from zero.
pub fn round_price(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

pub fn cents_to_decimal(cents: i64) -> Decimal {
  Decimal::new(cents, PRICE_SCALE)
}

/// `None` when the rounded amount does not fit in an `i64` of cents.
pub fn decimal_to_cents(value: Decimal) -> Option<i64> {
  (round_price(value) * Decimal::ONE_HUNDRED).to_i64()
}

/// Fixed two-decimal text, as written to CSV (`"10.00"`).
pub fn format_price(value: Decimal) -> String {
  let mut rounded = round_price(value);
  rounded.rescale(PRICE_SCALE);
  rounded.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn cents_round_trip_keeps_two_decimals() {
    assert_eq!(cents_to_decimal(1000).to_string(), "10.00");
    assert_eq!(decimal_to_cents(Decimal::from_str("29.99").unwrap()), Some(2999));
  }

  #[test]
  fn rounding_is_half_away_from_zero() {
    assert_eq!(decimal_to_cents(Decimal::from_str("0.005").unwrap()), Some(1));
    assert_eq!(decimal_to_cents(Decimal::from_str("0.004").unwrap()), Some(0));
    assert_eq!(decimal_to_cents(Decimal::from_str("2.675").unwrap()), Some(268));
  }

  #[test]
  fn format_pads_to_two_decimals() {
    assert_eq!(format_price(Decimal::from(10)), "10.00");
    assert_eq!(format_price(Decimal::from_str("4.5").unwrap()), "4.50");
    assert_eq!(max_price().to_string(), "99999999.99");
  }
}
