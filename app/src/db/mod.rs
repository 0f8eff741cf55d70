// catalog_server/src/db/mod.rs

//! Connection pool, migrations and every SQL statement the service issues.

pub mod activity;
pub mod products;
pub mod seed;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::errors::Result;

fn is_in_memory(url: &str) -> bool {
  url.contains(":memory:") || url.contains("mode=memory")
}

/// Opens the pool described by `config` and brings the schema up to date.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled.
#[instrument(name = "db::connect", skip_all, fields(database_url = %config.database_url))]
pub async fn connect(config: &AppConfig) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

  let pool_options = if is_in_memory(&config.database_url) {
    SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
  } else {
    SqlitePoolOptions::new().max_connections(config.database_max_connections.max(1))
  };

  let pool = pool_options.connect_with(options).await?;
  info!("Connected to the database.");

  sqlx::migrate!("./migrations").run(&pool).await?;
  info!("Database migrations applied.");
  Ok(pool)
}

/// Round-trips a trivial query.
pub async fn ping(pool: &SqlitePool) -> Result<()> {
  sqlx::query("SELECT 1").execute(pool).await?;
  Ok(())
}
