// catalog_server/src/models/mod.rs

//! Records stored in, and read back from, the catalog database.

pub mod activity_log;
pub mod money;
pub mod product;
pub mod stats;

pub use activity_log::{ActivityAction, ActivityLog};
pub use product::{NewProduct, Product, ProductFilter, ProductSort};
pub use stats::{CatalogStats, CategoryStats};
