// catalog_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog_pipeline::ContextData;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, Result};
use crate::models::ProductFilter;
use crate::pipelines::contexts::{
  CreateProductCtxData, DeleteProductCtxData, GetProductCtxData, ListProductsCtxData, RequestMeta,
  UpdateProductCtxData,
};
use crate::pipelines::run_pipeline;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  pub sort: Option<String>,
}

fn missing_output(what: &str) -> AppError {
  AppError::Internal(format!("pipeline completed without {}", what))
}

#[instrument(name = "handler::list_products", skip(app_state, request))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse> {
  let filter = ProductFilter::from_params(query.category.as_deref(), query.sort.as_deref());
  let ctx_data = ContextData::new(ListProductsCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    filter,
    products: Vec::new(),
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let products = std::mem::take(&mut ctx_data.write().products);
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": products,
    "count": products.len(),
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, request, path), fields(product_id = *path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  path: web::Path<i64>,
) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(GetProductCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    product_id: path.into_inner(),
    product: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let product = ctx_data.write().product.take().ok_or_else(|| missing_output("a product"))?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "data": product,
  })))
}

#[instrument(name = "handler::create_product", skip_all)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  body: web::Bytes,
) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(CreateProductCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    body,
    new_product: None,
    created: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let created = ctx_data.write().created.take().ok_or_else(|| missing_output("a created product"))?;
  info!(product_id = created.id, "Responding with created product.");
  Ok(HttpResponse::Created().json(json!({
    "success": true,
    "message": "Product created",
    "data": created,
  })))
}

#[instrument(name = "handler::update_product", skip(app_state, request, path, body), fields(product_id = *path))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  path: web::Path<i64>,
  body: web::Bytes,
) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(UpdateProductCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    product_id: path.into_inner(),
    body,
    changes: None,
    updated: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let updated = ctx_data.write().updated.take().ok_or_else(|| missing_output("an updated product"))?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "message": "Product updated",
    "data": updated,
  })))
}

#[instrument(name = "handler::delete_product", skip(app_state, request, path), fields(product_id = *path))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  request: RequestMeta,
  path: web::Path<i64>,
) -> Result<HttpResponse> {
  let ctx_data = ContextData::new(DeleteProductCtxData {
    app_state: app_state.get_ref().clone(),
    request,
    product_id: path.into_inner(),
    deleted: None,
  });
  run_pipeline(&app_state, ctx_data.clone()).await?;

  let deleted = ctx_data.write().deleted.take().ok_or_else(|| missing_output("a deleted product"))?;
  Ok(HttpResponse::Ok().json(json!({
    "success": true,
    "message": format!("Product '{}' deleted", deleted.name),
    "data": deleted,
  })))
}
