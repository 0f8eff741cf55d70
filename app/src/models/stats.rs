// catalog_server/src/models/stats.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::money::PRICE_SCALE;

/// Aggregates for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
  pub category: String,
  pub count: i64,
  #[serde(with = "rust_decimal::serde::float")]
  pub average_price: Decimal,
  #[serde(with = "rust_decimal::serde::float")]
  pub total_value: Decimal,
}

impl CategoryStats {
  /// `count` must be positive; groups never come back empty from storage.
  pub fn new(category: String, count: i64, total_value: Decimal) -> Self {
    let average_price = if count > 0 {
      (total_value / Decimal::from(count)).round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
    } else {
      Decimal::ZERO
    };
    Self {
      category,
      count,
      average_price,
      total_value,
    }
  }
}

/// Whole-catalog breakdown served by `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
  pub total_products: i64,
  #[serde(with = "rust_decimal::serde::float")]
  pub total_value: Decimal,
  pub categories: Vec<CategoryStats>,
}

impl CatalogStats {
  pub fn from_categories(categories: Vec<CategoryStats>) -> Self {
    let total_products = categories.iter().map(|c| c.count).sum();
    let total_value = categories.iter().map(|c| c.total_value).sum();
    Self {
      total_products,
      total_value,
      categories,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn average_rounds_half_away_from_zero() {
    let stats = CategoryStats::new("Lamps".to_string(), 3, Decimal::from_str("10.00").unwrap());
    assert_eq!(stats.average_price, Decimal::from_str("3.33").unwrap());

    let stats = CategoryStats::new("Lamps".to_string(), 2, Decimal::from_str("0.05").unwrap());
    assert_eq!(stats.average_price, Decimal::from_str("0.03").unwrap());
  }

  #[test]
  fn totals_sum_every_category() {
    let stats = CatalogStats::from_categories(vec![
      CategoryStats::new("A".to_string(), 2, Decimal::from(30)),
      CategoryStats::new("B".to_string(), 1, Decimal::from(5)),
    ]);
    assert_eq!(stats.total_products, 3);
    assert_eq!(stats.total_value, Decimal::from(35));
    assert_eq!(stats.categories[0].average_price, Decimal::from(15));
  }
}
