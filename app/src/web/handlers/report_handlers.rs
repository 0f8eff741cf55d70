// catalog_server/src/web/handlers/report_handlers.rs

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use catalog_pipeline::ContextData;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, Result};
use crate::export::ExportFormat;
use crate::pipelines::contexts::{
  ActivityLogCtxData, CategoriesCtxData, ExportProductsCtxData, RequestMeta, StatsCtxData,
};
use crate::pipelines::run_pipeline;
use crate::state::AppState;

/// Always offered by `GET /api/categories`, whether or not any product uses them.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
  "Chandeliers",
  "Pendants",
  "Wall Sconces",
  "Flush Mounts",
  "Lamps",
  "Outdoor",
  "Lighting",
  "Furniture",
];

#[derive(Deserialize, Debug)]
pub struct ExportQuery {
  pub format: Option<String>,
  pub category: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ActivityLogQuery {
  pub limit: Option<u32>,
}

#[instrument(name = "handler::export_products", skip(app_state, request))]
pub async fn export_products_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  query: web::Query<ExportQuery>,
) -> Result<HttpResponse> {
  let query = query.into_inner();
  let ctx_data = ContextData::new(ExportProductsCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    category: query.category,
    format_param: query.format,
    format: ExportFormat::default(),
    products: Vec::new(),
    file: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let file = ctx_data
    .write()
    .file
    .take()
    .ok_or_else(|| AppError::Internal("export pipeline completed without a file".to_string()))?;
  Ok(
    HttpResponse::Ok()
      .insert_header((header::CONTENT_TYPE, file.content_type))
      .insert_header(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file.filename)],
      })
      .body(file.body),
  )
}

#[instrument(name = "handler::stats", skip_all)]
pub async fn stats_handler(app_state: web::Data<AppState>, request: RequestMeta) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(StatsCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    stats: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let stats = ctx_data
    .write()
    .stats
    .take()
    .ok_or_else(|| AppError::Internal("stats pipeline completed without results".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": stats,
  })))
}

#[instrument(name = "handler::activity_log", skip(app_state, request))]
pub async fn activity_log_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  query: web::Query<ActivityLogQuery>,
) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(ActivityLogCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    limit: query.limit,
    entries: Vec::new(),
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let entries = std::mem::take(&mut ctx_data.write().entries);
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": entries,
    "count": entries.len(),
  })))
}

#[instrument(name = "handler::categories", skip_all)]
pub async fn categories_handler(app_state: web::Data<AppState>, request: RequestMeta) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(CategoriesCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    in_use: Vec::new(),
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let in_use = std::mem::take(&mut ctx_data.write().in_use);
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": {
      "in_use": in_use,
      "suggested": SUGGESTED_CATEGORIES,
    },
  })))
}
