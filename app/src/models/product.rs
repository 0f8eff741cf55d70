// catalog_server/src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::money::cents_to_decimal;

/// A catalog entry as exposed over the API and in exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: i64,
  pub name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub category: String,
  pub created_at: DateTime<Utc>,
}

/// Row shape of the `products` table.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ProductRow {
  pub id: i64,
  pub name: String,
  pub price_cents: i64,
  pub category: String,
  pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      price: cents_to_decimal(row.price_cents),
      category: row.category,
      created_at: row.created_at,
    }
  }
}

/// Field values that passed validation: trimmed text, price in whole cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub name: String,
  pub price_cents: i64,
  pub category: String,
}

/// Ordering for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
  PriceAsc,
  PriceDesc,
  /// Newest first.
  #[default]
  CreatedAtDesc,
}

impl ProductSort {
  /// Unknown or empty values fall back to newest first.
  pub fn parse_lenient(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      Some("price_asc") => ProductSort::PriceAsc,
      Some("price_desc") => ProductSort::PriceDesc,
      _ => ProductSort::CreatedAtDesc,
    }
  }

  /// `ORDER BY` clause; `id` breaks ties so both price orders mirror each other exactly.
  pub(crate) fn order_by_clause(self) -> &'static str {
    match self {
      ProductSort::PriceAsc => "price_cents ASC, id ASC",
      ProductSort::PriceDesc => "price_cents DESC, id DESC",
      ProductSort::CreatedAtDesc => "created_at DESC, id DESC",
    }
  }
}

/// Filter and ordering shared by listing and export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub category: Option<String>,
  pub sort: ProductSort,
}

impl ProductFilter {
  /// Builds a filter from raw query parameters; a blank category means "all".
  pub fn from_params(category: Option<&str>, sort: Option<&str>) -> Self {
    let category = category.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);
    Self {
      category,
      sort: ProductSort::parse_lenient(sort),
    }
  }
}
