// catalog_server/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::db;
use crate::errors::Result;
use crate::state::AppState;

/// Liveness plus a database round trip. Not rate limited.
#[instrument(name = "handler::health", skip_all)]
pub async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse> {
  db::ping(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "status": "ok",
  })))
}
