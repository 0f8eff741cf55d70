// catalog_server/src/validation.rs

//! Checks incoming product payloads. Every rule runs, so a client sees all of
//! its mistakes in one response.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use crate::errors::{AppError, Result};
use crate::models::money::{decimal_to_cents, max_price, round_price};
use crate::models::NewProduct;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_CATEGORY_CHARS: usize = 100;

/// Body of create and update requests, as sent by the client.
///
/// `price` stays a raw JSON value so that numeric strings (`"12.50"`) are
/// accepted alongside numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
  pub name: Option<String>,
  pub price: Option<Value>,
  pub category: Option<String>,
}

/// Decodes a request body. Anything but a JSON object is a validation error.
pub fn parse_payload(body: &[u8]) -> Result<ProductPayload> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Err(AppError::validation("request body is required"));
  }
  serde_json::from_slice(body).map_err(|e| AppError::validation(format!("request body must be a JSON object: {}", e)))
}

/// Returns every problem found in `payload`; empty means acceptable.
pub fn validate(payload: &ProductPayload) -> Vec<String> {
  let mut errors = Vec::new();

  if let Err(message) = check_text("name", payload.name.as_deref(), MAX_NAME_CHARS) {
    errors.push(message);
  }
  if let Err(message) = check_price(payload.price.as_ref()) {
    errors.push(message);
  }
  if let Err(message) = check_text("category", payload.category.as_deref(), MAX_CATEGORY_CHARS) {
    errors.push(message);
  }

  errors
}

/// Validates, then normalizes: trimmed text, price rounded to whole cents.
pub fn into_new_product(payload: &ProductPayload) -> Result<NewProduct> {
  let errors = validate(payload);
  if !errors.is_empty() {
    return Err(AppError::Validation(errors));
  }

  let name = check_text("name", payload.name.as_deref(), MAX_NAME_CHARS).map_err(AppError::validation)?;
  let price = check_price(payload.price.as_ref()).map_err(AppError::validation)?;
  let category = check_text("category", payload.category.as_deref(), MAX_CATEGORY_CHARS).map_err(AppError::validation)?;
  let price_cents =
    decimal_to_cents(price).ok_or_else(|| AppError::validation(format!("price must not exceed {}", max_price())))?;

  Ok(NewProduct {
    name,
    price_cents,
    category,
  })
}

fn check_text(field: &str, value: Option<&str>, max_chars: usize) -> std::result::Result<String, String> {
  let trimmed = value.map(str::trim).unwrap_or_default();
  if trimmed.is_empty() {
    return Err(format!("{} is required", field));
  }
  if trimmed.chars().count() > max_chars {
    return Err(format!("{} must be at most {} characters", field, max_chars));
  }
  Ok(trimmed.to_string())
}

fn check_price(value: Option<&Value>) -> std::result::Result<Decimal, String> {
  let raw = match value {
    None | Some(Value::Null) => return Err("price is required".to_string()),
    Some(Value::Number(n)) => n.to_string(),
    Some(Value::String(s)) if s.trim().is_empty() => return Err("price is required".to_string()),
    Some(Value::String(s)) => s.trim().to_string(),
    Some(_) => return Err("price must be a valid number".to_string()),
  };

  let parsed = parse_decimal(&raw).ok_or_else(|| "price must be a valid number".to_string())?;
  if parsed.is_sign_negative() && !parsed.is_zero() {
    return Err("price must not be negative".to_string());
  }
  let rounded = round_price(parsed);
  if rounded > max_price() {
    return Err(format!("price must not exceed {}", max_price()));
  }
  Ok(rounded)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
  Decimal::from_str(raw)
    .ok()
    .or_else(|| Decimal::from_scientific(raw).ok())
    .or_else(|| out_of_range(raw))
}

// Exponents beyond `Decimal`'s 28-digit scale: tiny values round to zero cents,
// huge ones saturate so the upper-bound check rejects them.
fn out_of_range(raw: &str) -> Option<Decimal> {
  let value: f64 = raw.parse().ok()?;
  if !value.is_finite() {
    return None;
  }
  if value.abs() < 0.005 {
    Some(Decimal::ZERO)
  } else if value.abs() > 1e20 {
    Some(if value.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
  } else {
    None
  }
}
