// tests/logging_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Targets of ERROR events emitted by the catalog crates.
#[derive(Clone, Default)]
struct ErrorEvents(Arc<Mutex<Vec<String>>>);

impl ErrorEvents {
  fn targets(&self) -> Vec<String> {
    self.0.lock().clone()
  }
}

impl<S: Subscriber> Layer<S> for ErrorEvents {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    let meta = event.metadata();
    if *meta.level() == Level::ERROR && meta.target().starts_with("catalog_") {
      self.0.lock().push(meta.target().to_string());
    }
  }
}

fn capture_errors() -> (ErrorEvents, tracing::subscriber::DefaultGuard) {
  let events = ErrorEvents::default();
  let subscriber = tracing_subscriber::registry().with(events.clone());
  let guard = tracing::subscriber::set_default(subscriber);
  (events, guard)
}

#[actix_web::test]
async fn test_client_errors_are_not_logged_as_errors() {
  let (events, _guard) = capture_errors();
  let app = init_app!(test_state().await);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/42").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let body = json!({"name": "", "price": -5});
  let resp = test::call_service(&app, authed_post("/api/products", &body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::post()
    .uri("/api/products")
    .set_json(product_json("Lamp", 10.0, "Lighting"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/products")
    .insert_header(("X-API-Key", "wrong-key"))
    .set_json(product_json("Lamp", 10.0, "Lighting"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let resp = test::call_service(&app, authed_delete("/api/products/42").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  assert!(events.targets().is_empty(), "client errors logged at ERROR: {:?}", events.targets());
}

#[actix_web::test]
async fn test_storage_failure_is_logged_once_as_error() {
  let (events, _guard) = capture_errors();
  let state = test_state().await;
  let pool = state.db_pool.clone();
  let app = init_app!(state);

  sqlx::query("DROP TABLE products").execute(&pool).await.unwrap();

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(events.targets(), ["catalog_server::errors"]);
}
