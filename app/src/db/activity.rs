// catalog_server/src/db/activity.rs

use chrono::Utc;
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use tracing::instrument;

use crate::errors::Result;
use crate::models::activity_log::ActivityLogRow;
use crate::models::product::ProductRow;
use crate::models::{ActivityAction, ActivityLog};

/// Records `action` with a snapshot of `product`. Runs on the caller's
/// connection so it shares the caller's transaction.
pub(crate) async fn append_log(conn: &mut SqliteConnection, action: ActivityAction, product: &ProductRow) -> Result<()> {
  sqlx::query(
    "INSERT INTO activity_logs (action, product_name, product_price_cents, product_category, timestamp) \
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )
  .bind(action.as_str())
  .bind(&product.name)
  .bind(product.price_cents)
  .bind(&product.category)
  .bind(Utc::now())
  .execute(conn)
  .await?;
  Ok(())
}

/// Newest entries first; `limit` of `None` returns the whole log.
#[instrument(name = "db::list_activity", skip(pool))]
pub async fn list_activity(pool: &SqlitePool, limit: Option<u32>) -> Result<Vec<ActivityLog>> {
  // SQLite reads a negative LIMIT as "no limit".
  let limit = limit.map(i64::from).unwrap_or(-1);
  let rows: Vec<ActivityLogRow> = sqlx::query_as(
    "SELECT id, action, product_name, product_price_cents, product_category, timestamp \
     FROM activity_logs ORDER BY timestamp DESC, id DESC LIMIT ?1",
  )
  .bind(limit)
  .fetch_all(pool)
  .await?;
  Ok(rows.into_iter().map(ActivityLog::from).collect())
}
