// catalog_server/src/errors.rs

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use catalog_pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum AppError {
  /// One or more field-level problems the client can correct.
  #[error("Validation failed: {}", .0.join("; "))]
  Validation(Vec<String>),

  #[error("Resource not found: {0}")]
  NotFound(String),

  /// No credential supplied.
  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  /// A credential was supplied but does not match.
  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
  RateLimited { retry_after_secs: u64 },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Database error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Pipeline error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },

  #[error("Internal server error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn validation(message: impl Into<String>) -> Self {
    AppError::Validation(vec![message.into()])
  }

  /// Server-side failures: logged as errors and reported without detail.
  pub fn is_server_error(&self) -> bool {
    self.status_code().is_server_error()
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl From<csv::Error> for AppError {
  fn from(err: csv::Error) -> Self {
    AppError::Internal(format!("CSV serialization failed: {}", err))
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
    AppError::Internal(format!("JSON serialization failed: {}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Migrate(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if self.is_server_error() {
      tracing::error!(application_error = %self, "Responding with server error");
    } else {
      tracing::debug!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    let mut builder = HttpResponse::build(status);
    let body = match self {
      AppError::Validation(errors) => json!({
        "success": false,
        "error": "Validation failed",
        "errors": errors,
      }),
      AppError::NotFound(m) | AppError::Unauthorized(m) | AppError::Forbidden(m) => json!({
        "success": false,
        "error": m,
      }),
      AppError::RateLimited { retry_after_secs } => {
        builder.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        json!({
          "success": false,
          "error": "Rate limit exceeded",
          "retry_after": retry_after_secs,
        })
      }
      AppError::Sqlx(_) | AppError::Migrate(_) => json!({
        "success": false,
        "error": "Database operation failed",
      }),
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => json!({
        "success": false,
        "error": "An internal error occurred",
      }),
    };
    builder.json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
