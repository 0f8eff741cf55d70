// catalog_server/src/export.rs

//! Renders a product list as a CSV or JSON download.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::errors::{AppError, Result};
use crate::models::money::format_price;
use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
  #[default]
  Csv,
  Json,
}

impl FromStr for ExportFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "csv" => Ok(ExportFormat::Csv),
      "json" => Ok(ExportFormat::Json),
      other => Err(AppError::validation(format!(
        "unsupported export format '{}': expected csv or json",
        other
      ))),
    }
  }
}

impl ExportFormat {
  /// A missing or blank value means CSV.
  pub fn parse_param(raw: Option<&str>) -> Result<Self> {
    match raw.map(str::trim) {
      None | Some("") => Ok(ExportFormat::default()),
      Some(value) => value.parse(),
    }
  }

  pub fn content_type(self) -> &'static str {
    match self {
      ExportFormat::Csv => "text/csv; charset=utf-8",
      ExportFormat::Json => "application/json",
    }
  }

  pub fn extension(self) -> &'static str {
    match self {
      ExportFormat::Csv => "csv",
      ExportFormat::Json => "json",
    }
  }
}

/// A rendered export, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportFile {
  pub filename: String,
  pub content_type: &'static str,
  pub body: Vec<u8>,
}

#[derive(Serialize)]
struct CsvRecord<'a> {
  id: i64,
  name: &'a str,
  price: String,
  category: &'a str,
  created_at: String,
}

impl<'a> From<&'a Product> for CsvRecord<'a> {
  fn from(p: &'a Product) -> Self {
    CsvRecord {
      id: p.id,
      name: &p.name,
      price: format_price(p.price),
      category: &p.category,
      created_at: p.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    }
  }
}

/// CSV with an `id,name,price,category,created_at` header, even when empty.
pub fn products_to_csv(products: &[Product]) -> Result<Vec<u8>> {
  let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
  writer.write_record(["id", "name", "price", "category", "created_at"])?;
  for product in products {
    writer.serialize(CsvRecord::from(product))?;
  }
  writer
    .into_inner()
    .map_err(|e| AppError::Internal(format!("CSV buffer flush failed: {}", e.error())))
}

/// JSON array of the public product fields.
pub fn products_to_json(products: &[Product]) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec_pretty(products)?)
}

pub fn export_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
  format!("products_{}.{}", at.format("%Y%m%d_%H%M%S"), format.extension())
}

pub fn render(products: &[Product], format: ExportFormat, at: DateTime<Utc>) -> Result<ExportFile> {
  let body = match format {
    ExportFormat::Csv => products_to_csv(products)?,
    ExportFormat::Json => products_to_json(products)?,
  };
  Ok(ExportFile {
    filename: export_filename(format, at),
    content_type: format.content_type(),
    body,
  })
}
