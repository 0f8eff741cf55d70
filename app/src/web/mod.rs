// catalog_server/src/web/mod.rs

pub mod extractors;
pub mod handlers;
pub mod routes;

use actix_web::web;

use crate::errors::AppError;
use crate::state::AppState;

pub use routes::configure_app_routes;

/// Shared state, extractor settings and routes, for `App::configure`.
pub fn configure_app(app_state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg: &mut web::ServiceConfig| {
    cfg
      .app_data(web::Data::new(app_state))
      .app_data(
        web::QueryConfig::default()
          .error_handler(|err, _req| AppError::validation(format!("invalid query string: {}", err)).into()),
      )
      .app_data(
        web::PathConfig::default()
          .error_handler(|err, _req| AppError::NotFound(format!("no such resource: {}", err)).into()),
      )
      .configure(configure_app_routes);
  }
}
