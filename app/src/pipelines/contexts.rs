// catalog_server/src/pipelines/contexts.rs

//! Per-operation context data. Handlers wrap these in `ContextData` and read
//! the outputs back once the pipeline has run.

use actix_web::web::Bytes;

use crate::export::{ExportFile, ExportFormat};
use crate::models::{ActivityLog, CatalogStats, NewProduct, Product, ProductFilter};
use crate::state::AppState;

/// Who is calling, as far as throttling and authorization care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
  /// Client address, or `"unknown"`.
  pub client_id: String,
  pub api_key: Option<String>,
}

impl RequestMeta {
  pub const UNKNOWN_CLIENT: &'static str = "unknown";
}

/// Access to the pieces every request-scoped step needs.
pub trait RequestScoped {
  fn app_state(&self) -> &AppState;
  fn request(&self) -> &RequestMeta;
}

macro_rules! request_scoped {
  ($($ctx:ty),+ $(,)?) => {
    $(
      impl RequestScoped for $ctx {
        fn app_state(&self) -> &AppState {
          &self.app_state
        }
        fn request(&self) -> &RequestMeta {
          &self.request
        }
      }
    )+
  };
}

request_scoped!(
  ListProductsCtxData,
  GetProductCtxData,
  CreateProductCtxData,
  UpdateProductCtxData,
  DeleteProductCtxData,
  ExportProductsCtxData,
  StatsCtxData,
  ActivityLogCtxData,
  CategoriesCtxData,
);

// --- Products ---

#[derive(Clone)]
pub struct ListProductsCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub filter: ProductFilter,
  pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct GetProductCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub product_id: i64,
  pub product: Option<Product>,
}

#[derive(Clone)]
pub struct CreateProductCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  /// Raw request body; parsed by `validate` so that authorization runs first.
  pub body: Bytes,
  /// Set by `validate`.
  pub new_product: Option<NewProduct>,
  pub created: Option<Product>,
}

#[derive(Clone)]
pub struct UpdateProductCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub product_id: i64,
  pub body: Bytes,
  pub changes: Option<NewProduct>,
  pub updated: Option<Product>,
}

#[derive(Clone)]
pub struct DeleteProductCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub product_id: i64,
  pub deleted: Option<Product>,
}

// --- Reports ---

#[derive(Clone)]
pub struct ExportProductsCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub category: Option<String>,
  /// Raw `format` query parameter.
  pub format_param: Option<String>,
  pub format: ExportFormat,
  pub products: Vec<Product>,
  pub file: Option<ExportFile>,
}

#[derive(Clone)]
pub struct StatsCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub stats: Option<CatalogStats>,
}

#[derive(Clone)]
pub struct ActivityLogCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub limit: Option<u32>,
  pub entries: Vec<ActivityLog>,
}

#[derive(Clone)]
pub struct CategoriesCtxData {
  pub app_state: AppState,
  pub request: RequestMeta,
  pub in_use: Vec<String>,
}
