// catalog_server/src/pipelines/report_pipelines.rs

//! Read-only pipelines: export, stats, activity log and categories.

use catalog_pipeline::{ContextData, Pipeline, PipelineControl, PipelineRegistry};
use chrono::Utc;
use tracing::{debug, instrument};

use crate::db;
use crate::errors::AppError;
use crate::export::{self, ExportFormat};
use crate::models::{CatalogStats, ProductFilter};
use crate::pipelines::common_steps::throttle;
use crate::pipelines::contexts::{ActivityLogCtxData, CategoriesCtxData, ExportProductsCtxData, StatsCtxData};
use crate::services::rate_limiter::AccessKind;

pub fn register_report_pipelines(registry: &PipelineRegistry<AppError>) {
  registry.register_pipeline(export_products_pipeline());
  registry.register_pipeline(stats_pipeline());
  registry.register_pipeline(activity_log_pipeline());
  registry.register_pipeline(categories_pipeline());
}

// --- Export ---

pub fn export_products_pipeline() -> Pipeline<ExportProductsCtxData, AppError> {
  let mut p = Pipeline::<ExportProductsCtxData, AppError>::new(&[
    ("throttle", false, None),
    ("validate", false, None),
    ("query", false, None),
    ("render", false, None),
  ]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("validate", resolve_export_format);
  p.on_root("query", load_export_rows);
  p.on_root("render", render_export);
  p
}

#[instrument(name = "step::resolve_export_format", skip_all, err(level = "debug", Display))]
async fn resolve_export_format(ctx_data: ContextData<ExportProductsCtxData>) -> Result<PipelineControl, AppError> {
  let mut guard = ctx_data.write();
  guard.format = ExportFormat::parse_param(guard.format_param.as_deref())?;
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::load_export_rows", skip_all, err(level = "debug", Display))]
async fn load_export_rows(ctx_data: ContextData<ExportProductsCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, filter) = {
    let guard = ctx_data.read();
    (
      guard.app_state.db_pool.clone(),
      ProductFilter::from_params(guard.category.as_deref(), None),
    )
  };
  let products = db::products::list_products(&pool, &filter).await?;
  ctx_data.write().products = products;
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::render_export", skip_all, err(level = "debug", Display))]
async fn render_export(ctx_data: ContextData<ExportProductsCtxData>) -> Result<PipelineControl, AppError> {
  let mut guard = ctx_data.write();
  let file = export::render(&guard.products, guard.format, Utc::now())?;
  debug!(rows = guard.products.len(), bytes = file.body.len(), filename = %file.filename, "Export rendered.");
  guard.file = Some(file);
  Ok(PipelineControl::Continue)
}

// --- Stats ---

pub fn stats_pipeline() -> Pipeline<StatsCtxData, AppError> {
  let mut p = Pipeline::<StatsCtxData, AppError>::new(&[("throttle", false, None), ("aggregate", false, None)]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("aggregate", aggregate_stats);
  p
}

#[instrument(name = "step::aggregate_stats", skip_all, err(level = "debug", Display))]
async fn aggregate_stats(ctx_data: ContextData<StatsCtxData>) -> Result<PipelineControl, AppError> {
  let pool = ctx_data.read().app_state.db_pool.clone();
  let categories = db::products::category_stats(&pool).await?;
  ctx_data.write().stats = Some(CatalogStats::from_categories(categories));
  Ok(PipelineControl::Continue)
}

// --- Activity log ---

pub fn activity_log_pipeline() -> Pipeline<ActivityLogCtxData, AppError> {
  let mut p = Pipeline::<ActivityLogCtxData, AppError>::new(&[("throttle", false, None), ("query", false, None)]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("query", load_activity);
  p
}

#[instrument(name = "step::load_activity", skip_all, err(level = "debug", Display))]
async fn load_activity(ctx_data: ContextData<ActivityLogCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, limit) = {
    let guard = ctx_data.read();
    (guard.app_state.db_pool.clone(), guard.limit)
  };
  let entries = db::activity::list_activity(&pool, limit).await?;
  ctx_data.write().entries = entries;
  Ok(PipelineControl::Continue)
}

// --- Categories ---

pub fn categories_pipeline() -> Pipeline<CategoriesCtxData, AppError> {
  let mut p = Pipeline::<CategoriesCtxData, AppError>::new(&[("throttle", false, None), ("query", false, None)]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("query", load_categories);
  p
}

#[instrument(name = "step::load_categories", skip_all, err(level = "debug", Display))]
async fn load_categories(ctx_data: ContextData<CategoriesCtxData>) -> Result<PipelineControl, AppError> {
  let pool = ctx_data.read().app_state.db_pool.clone();
  let in_use = db::products::categories_in_use(&pool).await?;
  ctx_data.write().in_use = in_use;
  Ok(PipelineControl::Continue)
}
