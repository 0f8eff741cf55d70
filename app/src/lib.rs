// catalog_server/src/lib.rs

//! Product catalog HTTP service: products with create, update, delete, filtered
//! listing, stats and CSV/JSON export, behind an API key and per-client quotas.

pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod validation;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
