// catalog_server/src/db/products.rs

use chrono::Utc;
use sqlx::sqlite::{SqliteConnection, SqlitePool};
use tracing::{debug, instrument};

use super::activity::append_log;
use crate::errors::Result;
use crate::models::money::cents_to_decimal;
use crate::models::product::ProductRow;
use crate::models::{ActivityAction, CategoryStats, NewProduct, Product, ProductFilter};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, category, created_at";

/// Products matching `filter`, in its order. Both the filter and the ordering
/// are evaluated by the database.
#[instrument(name = "db::list_products", skip(pool))]
pub async fn list_products(pool: &SqlitePool, filter: &ProductFilter) -> Result<Vec<Product>> {
  let sql = format!(
    "SELECT {} FROM products WHERE (?1 IS NULL OR category = ?1) ORDER BY {}",
    PRODUCT_COLUMNS,
    filter.sort.order_by_clause()
  );
  let rows: Vec<ProductRow> = sqlx::query_as(&sql)
    .bind(filter.category.as_deref())
    .fetch_all(pool)
    .await?;
  debug!(count = rows.len(), "Fetched products.");
  Ok(rows.into_iter().map(Product::from).collect())
}

#[instrument(name = "db::find_product", skip(pool))]
pub async fn find_product(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
  let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);
  let row: Option<ProductRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
  Ok(row.map(Product::from))
}

pub(crate) async fn insert_product(conn: &mut SqliteConnection, new: &NewProduct) -> Result<Product> {
  let sql = format!(
    "INSERT INTO products (name, price_cents, category, created_at) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
    PRODUCT_COLUMNS
  );
  let row: ProductRow = sqlx::query_as(&sql)
    .bind(&new.name)
    .bind(new.price_cents)
    .bind(&new.category)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
  append_log(&mut *conn, ActivityAction::Created, &row).await?;
  Ok(row.into())
}

/// Inserts the product and its `created` log entry in one transaction.
#[instrument(name = "db::create_product", skip(pool, new), fields(name = %new.name))]
pub async fn create_product(pool: &SqlitePool, new: &NewProduct) -> Result<Product> {
  let mut tx = pool.begin().await?;
  let product = insert_product(&mut tx, new).await?;
  tx.commit().await?;
  debug!(product_id = product.id, "Product created.");
  Ok(product)
}

/// Replaces name, price and category; `created_at` is left alone.
/// `None` when no product has this id, in which case nothing is logged.
#[instrument(name = "db::update_product", skip(pool, changes))]
pub async fn update_product(pool: &SqlitePool, id: i64, changes: &NewProduct) -> Result<Option<Product>> {
  let sql = format!(
    "UPDATE products SET name = ?1, price_cents = ?2, category = ?3 WHERE id = ?4 RETURNING {}",
    PRODUCT_COLUMNS
  );
  let mut tx = pool.begin().await?;
  let row: Option<ProductRow> = sqlx::query_as(&sql)
    .bind(&changes.name)
    .bind(changes.price_cents)
    .bind(&changes.category)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
  let Some(row) = row else {
    return Ok(None);
  };
  append_log(&mut tx, ActivityAction::Updated, &row).await?;
  tx.commit().await?;
  Ok(Some(row.into()))
}

/// Removes the product and logs its last state. `None` when absent.
#[instrument(name = "db::delete_product", skip(pool))]
pub async fn delete_product(pool: &SqlitePool, id: i64) -> Result<Option<Product>> {
  let sql = format!("DELETE FROM products WHERE id = ?1 RETURNING {}", PRODUCT_COLUMNS);
  let mut tx = pool.begin().await?;
  let row: Option<ProductRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut *tx).await?;
  let Some(row) = row else {
    return Ok(None);
  };
  append_log(&mut tx, ActivityAction::Deleted, &row).await?;
  tx.commit().await?;
  Ok(Some(row.into()))
}

/// Count and total per category, ordered by category name.
#[instrument(name = "db::category_stats", skip(pool))]
pub async fn category_stats(pool: &SqlitePool) -> Result<Vec<CategoryStats>> {
  let rows: Vec<(String, i64, i64)> = sqlx::query_as(
    "SELECT category, COUNT(*), COALESCE(SUM(price_cents), 0) FROM products GROUP BY category ORDER BY category ASC",
  )
  .fetch_all(pool)
  .await?;
  Ok(
    rows
      .into_iter()
      .map(|(category, count, total_cents)| CategoryStats::new(category, count, cents_to_decimal(total_cents)))
      .collect(),
  )
}

#[instrument(name = "db::categories_in_use", skip(pool))]
pub async fn categories_in_use(pool: &SqlitePool) -> Result<Vec<String>> {
  let categories: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM products ORDER BY category ASC")
    .fetch_all(pool)
    .await?;
  Ok(categories)
}

pub(crate) async fn count_products(conn: &mut SqliteConnection) -> Result<i64> {
  let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(conn).await?;
  Ok(count)
}
