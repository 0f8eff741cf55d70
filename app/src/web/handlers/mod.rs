// catalog_server/src/web/handlers/mod.rs

pub mod health_handlers;
pub mod product_handlers;
pub mod report_handlers;
