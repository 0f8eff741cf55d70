// catalog_server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{health_handlers, product_handlers, report_handlers};

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_handlers::health_check_handler))
      .service(
        web::resource("/products")
          .route(web::get().to(product_handlers::list_products_handler))
          .route(web::post().to(product_handlers::create_product_handler)),
      )
      .service(
        web::resource("/products/{product_id}")
          .route(web::get().to(product_handlers::get_product_handler))
          .route(web::put().to(product_handlers::update_product_handler))
          .route(web::delete().to(product_handlers::delete_product_handler)),
      )
      .route("/export/products", web::get().to(report_handlers::export_products_handler))
      .route("/stats", web::get().to(report_handlers::stats_handler))
      .route("/logs", web::get().to(report_handlers::activity_log_handler))
      .route("/categories", web::get().to(report_handlers::categories_handler)),
  );
}
