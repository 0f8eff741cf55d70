// tests/common/mod.rs
#![allow(dead_code)]

use actix_web::dev::ServiceResponse;
use actix_web::test;
use catalog_server::config::{AppConfig, RateLimitConfig};
use catalog_server::state::AppState;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";

static TRACING: Lazy<()> = Lazy::new(|| {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("catalog_server=debug,catalog_pipeline=debug,warn"));
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// Fresh in-memory catalog guarded by `TEST_API_KEY`.
pub async fn test_state() -> AppState {
  test_state_with(AppConfig::in_memory(Some(TEST_API_KEY))).await
}

pub async fn test_state_with(config: AppConfig) -> AppState {
  setup_tracing();
  AppState::initialize(config).await.expect("state should initialize")
}

pub fn config_with_write_quota(writes: u32) -> AppConfig {
  let mut config = AppConfig::in_memory(Some(TEST_API_KEY));
  config.rate_limit = RateLimitConfig {
    reads_per_window: 100,
    writes_per_window: writes,
    window: Duration::from_secs(60),
  };
  config
}

/// Builds the service under test from an `AppState`.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new().configure(catalog_server::web::configure_app($state)),
    )
    .await
  };
}

pub fn product_json(name: &str, price: f64, category: &str) -> Value {
  json!({ "name": name, "price": price, "category": category })
}

pub fn authed_post(uri: &str, body: &Value) -> test::TestRequest {
  test::TestRequest::post()
    .uri(uri)
    .insert_header(("X-API-Key", TEST_API_KEY))
    .set_json(body)
}

pub fn authed_put(uri: &str, body: &Value) -> test::TestRequest {
  test::TestRequest::put()
    .uri(uri)
    .insert_header(("X-API-Key", TEST_API_KEY))
    .set_json(body)
}

pub fn authed_delete(uri: &str) -> test::TestRequest {
  test::TestRequest::delete().uri(uri).insert_header(("X-API-Key", TEST_API_KEY))
}

pub async fn json_body(resp: ServiceResponse) -> Value {
  test::read_body_json(resp).await
}

/// Ids of `data` in response order.
pub fn ids(body: &Value) -> Vec<i64> {
  body["data"]
    .as_array()
    .expect("data should be an array")
    .iter()
    .map(|p| p["id"].as_i64().expect("id should be an integer"))
    .collect()
}
