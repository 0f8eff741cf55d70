// catalog_server/src/services/auth_service.rs

//! Shared-secret authorization for write operations.

use crate::errors::AppError;
use tracing::{debug, info, instrument};

/// Header carrying the client's key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Checks a presented key against the configured one.
///
/// With no key configured every request passes. A missing key is
/// `Unauthorized`; a present but wrong key is `Forbidden`.
#[instrument(name = "auth_service::check_api_key", skip_all, err(level = "debug", Display))]
pub fn check_api_key(configured: Option<&str>, presented: Option<&str>) -> Result<(), AppError> {
  let Some(expected) = configured else {
    debug!("No API key configured; write gate is open.");
    return Ok(());
  };

  match presented {
    None => Err(AppError::Unauthorized("API key required".to_string())),
    Some(key) if keys_match(expected.as_bytes(), key.as_bytes()) => Ok(()),
    Some(_) => {
      info!("Rejected request with an invalid API key.");
      Err(AppError::Forbidden("Invalid API key".to_string()))
    }
  }
}

// Compares every byte so timing does not reveal the matching prefix length.
fn keys_match(expected: &[u8], presented: &[u8]) -> bool {
  if expected.len() != presented.len() {
    return false;
  }
  expected.iter().zip(presented).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn open_when_no_key_configured() {
    assert!(check_api_key(None, None).is_ok());
    assert!(check_api_key(None, Some("anything")).is_ok());
  }

  #[test]
  fn missing_key_is_unauthorized() {
    assert!(matches!(check_api_key(Some("secret"), None), Err(AppError::Unauthorized(_))));
  }

  #[test]
  fn wrong_key_is_forbidden() {
    assert!(matches!(check_api_key(Some("secret"), Some("secreT")), Err(AppError::Forbidden(_))));
    assert!(matches!(check_api_key(Some("secret"), Some("secret2")), Err(AppError::Forbidden(_))));
    assert!(matches!(check_api_key(Some("secret"), Some("")), Err(AppError::Forbidden(_))));
  }

  #[test]
  fn matching_key_passes() {
    assert!(check_api_key(Some("secret"), Some("secret")).is_ok());
  }
}
