// catalog_server/src/pipelines/product_pipelines.rs

//! Pipelines behind the `/api/products` routes.
//!
//! Write pipelines run `throttle` then `authorize` before any validation or
//! storage work, so an unauthorized request is rejected whatever its body.

use catalog_pipeline::{ContextData, Pipeline, PipelineControl, PipelineRegistry};
use tracing::{debug, info, instrument};

use crate::db;
use crate::errors::AppError;
use crate::pipelines::common_steps::{authorize, throttle};
use crate::pipelines::contexts::{
  CreateProductCtxData, DeleteProductCtxData, GetProductCtxData, ListProductsCtxData, UpdateProductCtxData,
};
use crate::services::rate_limiter::AccessKind;
use crate::validation;

fn not_found(product_id: i64) -> AppError {
  AppError::NotFound(format!("Product with id {} not found", product_id))
}

pub fn register_product_pipelines(registry: &PipelineRegistry<AppError>) {
  registry.register_pipeline(list_products_pipeline());
  registry.register_pipeline(get_product_pipeline());
  registry.register_pipeline(create_product_pipeline());
  registry.register_pipeline(update_product_pipeline());
  registry.register_pipeline(delete_product_pipeline());
}

// --- List ---

pub fn list_products_pipeline() -> Pipeline<ListProductsCtxData, AppError> {
  let mut p = Pipeline::<ListProductsCtxData, AppError>::new(&[("throttle", false, None), ("query", false, None)]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("query", query_products);
  p
}

#[instrument(name = "step::query_products", skip_all, err(level = "debug", Display))]
async fn query_products(ctx_data: ContextData<ListProductsCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, filter) = {
    let guard = ctx_data.read();
    (guard.app_state.db_pool.clone(), guard.filter.clone())
  };
  let products = db::products::list_products(&pool, &filter).await?;
  ctx_data.write().products = products;
  Ok(PipelineControl::Continue)
}

// --- Get ---

pub fn get_product_pipeline() -> Pipeline<GetProductCtxData, AppError> {
  let mut p = Pipeline::<GetProductCtxData, AppError>::new(&[("throttle", false, None), ("fetch", false, None)]);
  p.on_root("throttle", throttle(AccessKind::Read));
  p.on_root("fetch", fetch_product);
  p
}

#[instrument(name = "step::fetch_product", skip_all, err(level = "debug", Display))]
async fn fetch_product(ctx_data: ContextData<GetProductCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, product_id) = {
    let guard = ctx_data.read();
    (guard.app_state.db_pool.clone(), guard.product_id)
  };
  let product = db::products::find_product(&pool, product_id)
    .await?
    .ok_or_else(|| not_found(product_id))?;
  ctx_data.write().product = Some(product);
  Ok(PipelineControl::Continue)
}

// --- Create ---

pub fn create_product_pipeline() -> Pipeline<CreateProductCtxData, AppError> {
  let mut p = Pipeline::<CreateProductCtxData, AppError>::new(&[
    ("throttle", false, None),
    ("authorize", false, None),
    ("validate", false, None),
    ("persist", false, None),
  ]);
  p.on_root("throttle", throttle(AccessKind::Write));
  p.on_root("authorize", authorize());
  p.on_root("validate", validate_create);
  p.on_root("persist", persist_new_product);
  p
}

#[instrument(name = "step::validate_create", skip_all, err(level = "debug", Display))]
async fn validate_create(ctx_data: ContextData<CreateProductCtxData>) -> Result<PipelineControl, AppError> {
  let mut guard = ctx_data.write();
  let new_product = validation::into_new_product(&validation::parse_payload(&guard.body)?)?;
  guard.new_product = Some(new_product);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::persist_new_product", skip_all, err(level = "debug", Display))]
async fn persist_new_product(ctx_data: ContextData<CreateProductCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, new_product) = {
    let guard = ctx_data.read();
    let new_product = guard
      .new_product
      .clone()
      .ok_or_else(|| AppError::Internal("create pipeline reached persist without a validated product".to_string()))?;
    (guard.app_state.db_pool.clone(), new_product)
  };
  let created = db::products::create_product(&pool, &new_product).await?;
  info!(product_id = created.id, category = %created.category, "Product created.");
  ctx_data.write().created = Some(created);
  Ok(PipelineControl::Continue)
}

// --- Update ---

pub fn update_product_pipeline() -> Pipeline<UpdateProductCtxData, AppError> {
  let mut p = Pipeline::<UpdateProductCtxData, AppError>::new(&[
    ("throttle", false, None),
    ("authorize", false, None),
    ("validate", false, None),
    ("persist", false, None),
  ]);
  p.on_root("throttle", throttle(AccessKind::Write));
  p.on_root("authorize", authorize());
  p.on_root("validate", validate_update);
  p.on_root("persist", persist_product_changes);
  p
}

#[instrument(name = "step::validate_update", skip_all, err(level = "debug", Display))]
async fn validate_update(ctx_data: ContextData<UpdateProductCtxData>) -> Result<PipelineControl, AppError> {
  let mut guard = ctx_data.write();
  let changes = validation::into_new_product(&validation::parse_payload(&guard.body)?)?;
  guard.changes = Some(changes);
  Ok(PipelineControl::Continue)
}

#[instrument(name = "step::persist_product_changes", skip_all, err(level = "debug", Display))]
async fn persist_product_changes(ctx_data: ContextData<UpdateProductCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, product_id, changes) = {
    let guard = ctx_data.read();
    let changes = guard
      .changes
      .clone()
      .ok_or_else(|| AppError::Internal("update pipeline reached persist without validated changes".to_string()))?;
    (guard.app_state.db_pool.clone(), guard.product_id, changes)
  };
  let updated = db::products::update_product(&pool, product_id, &changes)
    .await?
    .ok_or_else(|| not_found(product_id))?;
  info!(product_id, "Product updated.");
  ctx_data.write().updated = Some(updated);
  Ok(PipelineControl::Continue)
}

// --- Delete ---

pub fn delete_product_pipeline() -> Pipeline<DeleteProductCtxData, AppError> {
  let mut p = Pipeline::<DeleteProductCtxData, AppError>::new(&[
    ("throttle", false, None),
    ("authorize", false, None),
    ("persist", false, None),
  ]);
  p.on_root("throttle", throttle(AccessKind::Write));
  p.on_root("authorize", authorize());
  p.on_root("persist", remove_product);
  p
}

#[instrument(name = "step::remove_product", skip_all, err(level = "debug", Display))]
async fn remove_product(ctx_data: ContextData<DeleteProductCtxData>) -> Result<PipelineControl, AppError> {
  let (pool, product_id) = {
    let guard = ctx_data.read();
    (guard.app_state.db_pool.clone(), guard.product_id)
  };
  let Some(deleted) = db::products::delete_product(&pool, product_id).await? else {
    debug!(product_id, "Delete requested for a missing product.");
    return Err(not_found(product_id));
  };
  info!(product_id, name = %deleted.name, "Product deleted.");
  ctx_data.write().deleted = Some(deleted);
  Ok(PipelineControl::Continue)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn write_pipelines_check_access_before_the_body() {
    assert_eq!(create_product_pipeline().step_names(), ["throttle", "authorize", "validate", "persist"]);
    assert_eq!(update_product_pipeline().step_names(), ["throttle", "authorize", "validate", "persist"]);
    assert_eq!(delete_product_pipeline().step_names(), ["throttle", "authorize", "persist"]);
  }

  #[test]
  fn read_pipelines_are_throttled_but_not_authorized() {
    for names in [list_products_pipeline().step_names(), get_product_pipeline().step_names()] {
      assert_eq!(names[0], "throttle");
      assert!(!names.contains(&"authorize"));
    }
  }
}
