// catalog_server/src/db/seed.rs

//! Demo catalog for local runs (`SEED_DB=true`).

use sqlx::sqlite::SqlitePool;
use tracing::{info, instrument};

use super::products::{count_products, insert_product};
use crate::errors::Result;
use crate::models::NewProduct;

const DEMO_PRODUCTS: &[(&str, i64, &str)] = &[
  ("Crystal Cascade Chandelier", 189_900, "Chandeliers"),
  ("Brass Globe Pendant", 24_950, "Pendants"),
  ("Smoked Glass Pendant", 17_500, "Pendants"),
  ("Arc Wall Sconce", 8_999, "Wall Sconces"),
  ("Frosted Dome Flush Mount", 6_450, "Flush Mounts"),
  ("Linen Shade Table Lamp", 7_900, "Lamps"),
  ("Lantern Post Light", 15_900, "Outdoor"),
];

/// Fills an empty catalog with demo products, each with its `created` log
/// entry. A catalog that already has products is left untouched.
///
/// Returns how many products were inserted.
#[instrument(name = "db::seed_demo_products", skip(pool))]
pub async fn seed_demo_products(pool: &SqlitePool) -> Result<usize> {
  let mut tx = pool.begin().await?;
  if count_products(&mut tx).await? > 0 {
    info!("Catalog already has products; skipping demo seed.");
    return Ok(0);
  }

  for (name, price_cents, category) in DEMO_PRODUCTS {
    let product = NewProduct {
      name: name.to_string(),
      price_cents: *price_cents,
      category: category.to_string(),
    };
    insert_product(&mut tx, &product).await?;
  }
  tx.commit().await?;

  info!(count = DEMO_PRODUCTS.len(), "Seeded demo products.");
  Ok(DEMO_PRODUCTS.len())
}
