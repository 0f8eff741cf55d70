// tests/product_api_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use catalog_server::config::AppConfig;
use common::*;
use serde_json::json;

#[actix_web::test]
async fn test_create_then_get_returns_stored_product() {
  let app = init_app!(test_state().await);

  let resp = test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = json_body(resp).await;
  assert_eq!(created["success"], true);
  assert_eq!(created["data"]["id"], 1);
  assert_eq!(created["data"]["name"], "Lamp");
  assert_eq!(created["data"]["price"], 10.0);
  assert_eq!(created["data"]["category"], "Lighting");
  assert!(created["data"]["created_at"].is_string());

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/1").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let fetched = json_body(resp).await;
  assert_eq!(fetched["data"], created["data"]);
}

#[actix_web::test]
async fn test_create_trims_text_and_accepts_numeric_string_price() {
  let app = init_app!(test_state().await);

  let body = json!({"name": "  Arc Sconce ", "price": "89.999", "category": " Wall Sconces "});
  let resp = test::call_service(&app, authed_post("/api/products", &body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = json_body(resp).await;
  assert_eq!(created["data"]["name"], "Arc Sconce");
  assert_eq!(created["data"]["category"], "Wall Sconces");
  assert_eq!(created["data"]["price"], 90.0);
}

#[actix_web::test]
async fn test_invalid_payload_reports_every_problem() {
  let app = init_app!(test_state().await);

  let body = json!({"name": "", "price": -5, "category": "Lighting"});
  let resp = test::call_service(&app, authed_post("/api/products", &body).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let err = json_body(resp).await;
  assert_eq!(err["success"], false);
  let errors = err["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 2);
  assert!(errors.iter().any(|e| e.as_str().unwrap().contains("name")));
  assert!(errors.iter().any(|e| e.as_str().unwrap().contains("negative")));
}

#[actix_web::test]
async fn test_missing_fields_are_each_named() {
  let app = init_app!(test_state().await);

  let resp = test::call_service(&app, authed_post("/api/products", &json!({})).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let err = json_body(resp).await;
  let errors: Vec<&str> = err["errors"].as_array().unwrap().iter().map(|e| e.as_str().unwrap()).collect();
  for field in ["name", "price", "category"] {
    assert!(errors.iter().any(|e| e.starts_with(field)), "no message for {field}: {errors:?}");
  }

  // Nothing was stored or logged.
  let list = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await).await;
  assert_eq!(list["count"], 0);
}

#[actix_web::test]
async fn test_malformed_json_is_a_validation_error() {
  let app = init_app!(test_state().await);

  let req = test::TestRequest::post()
    .uri("/api/products")
    .insert_header(("X-API-Key", TEST_API_KEY))
    .insert_header(("Content-Type", "application/json"))
    .set_payload("{\"name\": \"Lamp\",")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_get_missing_product_is_not_found() {
  let app = init_app!(test_state().await);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/42").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(resp).await["success"], false);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/abc").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_removes_product_and_logs_snapshot() {
  let app = init_app!(test_state().await);

  test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;
  let resp = test::call_service(&app, authed_delete("/api/products/1").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["data"]["name"], "Lamp");

  let list = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/products").to_request()).await).await;
  assert_eq!(list["count"], 0);

  let logs = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/logs").to_request()).await).await;
  assert_eq!(logs["count"], 2);
  let newest = &logs["data"][0];
  assert_eq!(newest["action"], "deleted");
  assert_eq!(newest["product_name"], "Lamp");
  assert_eq!(newest["product_price"], 10.0);
  assert_eq!(newest["product_category"], "Lighting");
  assert_eq!(logs["data"][1]["action"], "created");
}

#[actix_web::test]
async fn test_delete_missing_product_is_not_found_and_not_logged() {
  let app = init_app!(test_state().await);

  let resp = test::call_service(&app, authed_delete("/api/products/99").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let logs = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/logs").to_request()).await).await;
  assert_eq!(logs["count"], 0);
}

#[actix_web::test]
async fn test_update_replaces_fields_and_keeps_created_at() {
  let app = init_app!(test_state().await);

  let created =
    json_body(test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await)
      .await;

  let resp = test::call_service(
    &app,
    authed_put("/api/products/1", &product_json("Floor Lamp", 24.5, "Lamps")).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated = json_body(resp).await;
  assert_eq!(updated["data"]["id"], 1);
  assert_eq!(updated["data"]["name"], "Floor Lamp");
  assert_eq!(updated["data"]["price"], 24.5);
  assert_eq!(updated["data"]["category"], "Lamps");
  assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);

  let logs = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/logs?limit=1").to_request()).await).await;
  assert_eq!(logs["count"], 1);
  assert_eq!(logs["data"][0]["action"], "updated");
  assert_eq!(logs["data"][0]["product_name"], "Floor Lamp");
}

#[actix_web::test]
async fn test_update_missing_or_invalid() {
  let app = init_app!(test_state().await);

  let resp =
    test::call_service(&app, authed_put("/api/products/7", &product_json("Lamp", 1.0, "Lighting")).to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;
  let resp = test::call_service(&app, authed_put("/api/products/1", &json!({"name": "Lamp"})).to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let fetched = json_body(test::call_service(&app, test::TestRequest::get().uri("/api/products/1").to_request()).await).await;
  assert_eq!(fetched["data"]["price"], 10.0);
}

#[actix_web::test]
async fn test_filter_by_unused_category_is_empty() {
  let app = init_app!(test_state().await);

  test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;

  let body = json_body(
    test::call_service(&app, test::TestRequest::get().uri("/api/products?category=Outdoor").to_request()).await,
  )
  .await;
  assert_eq!(body["success"], true);
  assert_eq!(body["count"], 0);
  assert_eq!(body["data"], json!([]));

  // Blank category means no filter.
  let body =
    json_body(test::call_service(&app, test::TestRequest::get().uri("/api/products?category=").to_request()).await).await;
  assert_eq!(body["count"], 1);
}

#[actix_web::test]
async fn test_price_sorts_are_exact_reverses() {
  let app = init_app!(test_state().await);

  for (name, price) in [("A", 30.0), ("B", 10.0), ("C", 20.0), ("D", 10.0)] {
    let resp =
      test::call_service(&app, authed_post("/api/products", &product_json(name, price, "Lighting")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
  }

  let asc = json_body(
    test::call_service(&app, test::TestRequest::get().uri("/api/products?sort=price_asc").to_request()).await,
  )
  .await;
  let desc = json_body(
    test::call_service(&app, test::TestRequest::get().uri("/api/products?sort=price_desc").to_request()).await,
  )
  .await;

  let asc_ids = ids(&asc);
  let mut desc_ids = ids(&desc);
  assert_eq!(asc_ids, vec![2, 4, 3, 1]);
  desc_ids.reverse();
  assert_eq!(asc_ids, desc_ids);

  // Default and unknown sorts are newest first.
  let newest = json_body(
    test::call_service(&app, test::TestRequest::get().uri("/api/products?sort=bogus").to_request()).await,
  )
  .await;
  assert_eq!(ids(&newest), vec![4, 3, 2, 1]);
}

#[actix_web::test]
async fn test_write_gate_disabled_without_configured_key() {
  let app = init_app!(test_state_with(AppConfig::in_memory(None)).await);

  let req = test::TestRequest::post()
    .uri("/api/products")
    .set_json(product_json("Lamp", 10.0, "Lighting"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
}

async fn product_count(pool: &sqlx::SqlitePool) -> i64 {
  sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(pool).await.unwrap()
}

#[actix_web::test]
async fn test_create_rolls_back_when_log_append_fails() {
  let state = test_state().await;
  let pool = state.db_pool.clone();
  let app = init_app!(state);

  sqlx::query("DROP TABLE activity_logs").execute(&pool).await.unwrap();

  let resp = test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err = json_body(resp).await;
  assert_eq!(err["success"], false);
  assert_eq!(err["error"], "Database operation failed");

  assert_eq!(product_count(&pool).await, 0);
}

#[actix_web::test]
async fn test_delete_rolls_back_when_log_append_fails() {
  let state = test_state().await;
  let pool = state.db_pool.clone();
  let app = init_app!(state);

  let resp = test::call_service(&app, authed_post("/api/products", &product_json("Lamp", 10.0, "Lighting")).to_request()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  sqlx::query("DROP TABLE activity_logs").execute(&pool).await.unwrap();

  let resp = test::call_service(&app, authed_delete("/api/products/1").to_request()).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json_body(resp).await["error"], "Database operation failed");

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/products/1").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["data"]["name"], "Lamp");
  assert_eq!(product_count(&pool).await, 1);
}
