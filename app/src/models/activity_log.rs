// catalog_server/src/models/activity_log.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::money::cents_to_decimal;

/// What happened to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
  Created,
  Updated,
  Deleted,
}

impl ActivityAction {
  pub fn as_str(self) -> &'static str {
    match self {
      ActivityAction::Created => "created",
      ActivityAction::Updated => "updated",
      ActivityAction::Deleted => "deleted",
    }
  }
}

impl std::fmt::Display for ActivityAction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Append-only audit entry. The product fields are a snapshot, not a reference,
/// so entries outlive the product they describe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLog {
  pub id: i64,
  pub action: String,
  pub product_name: String,
  #[serde(with = "rust_decimal::serde::float_option")]
  pub product_price: Option<Decimal>,
  pub product_category: Option<String>,
  pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct ActivityLogRow {
  pub id: i64,
  pub action: String,
  pub product_name: String,
  pub product_price_cents: Option<i64>,
  pub product_category: Option<String>,
  pub timestamp: DateTime<Utc>,
}

impl From<ActivityLogRow> for ActivityLog {
  fn from(row: ActivityLogRow) -> Self {
    ActivityLog {
      id: row.id,
      action: row.action,
      product_name: row.product_name,
      product_price: row.product_price_cents.map(cents_to_decimal),
      product_category: row.product_category,
      timestamp: row.timestamp,
    }
  }
}
