// catalog_server/src/web/extractors.rs

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;
use crate::pipelines::contexts::RequestMeta;
use crate::services::auth_service::API_KEY_HEADER;

/// Caller identity for throttling plus the presented API key, if any.
///
/// Never fails: a request without a peer address is counted as `"unknown"`.
impl FromRequest for RequestMeta {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let client_id = req
      .peer_addr()
      .map(|addr| addr.ip().to_string())
      .unwrap_or_else(|| RequestMeta::UNKNOWN_CLIENT.to_string());

    // A header that is not valid text still counts as a presented (wrong) key.
    let api_key = req
      .headers()
      .get(API_KEY_HEADER)
      .map(|value| value.to_str().unwrap_or_default().to_string());

    ready(Ok(RequestMeta { client_id, api_key }))
  }
}
