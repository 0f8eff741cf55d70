// catalog_server/src/state.rs

use catalog_pipeline::PipelineRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db;
use crate::errors::{AppError, Result};
use crate::pipelines;
use crate::services::rate_limiter::RateLimiter;

/// Everything a request needs, cloned cheaply into each pipeline context.
#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub pipelines: Arc<PipelineRegistry<AppError>>,
  pub config: Arc<AppConfig>,
  pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
  /// Connects and migrates the database, registers the request pipelines and,
  /// when enabled, seeds demo data.
  pub async fn initialize(config: AppConfig) -> Result<Self> {
    let db_pool = db::connect(&config).await?;

    if config.api_key.is_none() {
      warn!("API_KEY is not set: write endpoints accept requests without a key.");
    }

    let registry = PipelineRegistry::<AppError>::new();
    pipelines::register_all_pipelines(&registry);

    if config.seed_db {
      let inserted = db::seed::seed_demo_products(&db_pool).await?;
      info!(inserted, "Demo seeding finished.");
    }

    Ok(Self {
      db_pool,
      pipelines: Arc::new(registry),
      rate_limiter: Arc::new(RateLimiter::new(config.rate_limit)),
      config: Arc::new(config),
    })
  }
}
