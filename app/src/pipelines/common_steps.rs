// catalog_server/src/pipelines/common_steps.rs

//! Steps shared by every request pipeline. Each factory returns a handler
//! usable with `Pipeline::on_root` for any context implementing `RequestScoped`.

use std::future::Future;
use std::pin::Pin;

use catalog_pipeline::{ContextData, PipelineControl};
use tracing::{debug, Instrument};

use crate::errors::AppError;
use crate::pipelines::contexts::RequestScoped;
use crate::services::auth_service;
use crate::services::rate_limiter::AccessKind;

pub type StepFuture = Pin<Box<dyn Future<Output = Result<PipelineControl, AppError>> + Send>>;

/// Counts the request against the caller's quota for `kind`.
pub fn throttle<T>(kind: AccessKind) -> impl Fn(ContextData<T>) -> StepFuture + Send + Sync + 'static
where
  T: RequestScoped + Send + Sync + 'static,
{
  move |ctx_data: ContextData<T>| -> StepFuture {
    let span = tracing::debug_span!("common_step::throttle", kind = kind.as_str());
    Box::pin(
      async move {
        let (limiter, client_id) = {
          let guard = ctx_data.read();
          (guard.app_state().rate_limiter.clone(), guard.request().client_id.clone())
        };
        limiter.check(&client_id, kind)?;
        debug!(client_id = %client_id, "Request within quota.");
        Ok::<_, AppError>(PipelineControl::Continue)
      }
      .instrument(span),
    )
  }
}

/// Rejects the request unless it carries the configured API key.
pub fn authorize<T>() -> impl Fn(ContextData<T>) -> StepFuture + Send + Sync + 'static
where
  T: RequestScoped + Send + Sync + 'static,
{
  |ctx_data: ContextData<T>| -> StepFuture {
    let span = tracing::debug_span!("common_step::authorize");
    Box::pin(
      async move {
        {
          let guard = ctx_data.read();
          auth_service::check_api_key(
            guard.app_state().config.api_key.as_deref(),
            guard.request().api_key.as_deref(),
          )?;
        }
        Ok::<_, AppError>(PipelineControl::Continue)
      }
      .instrument(span),
    )
  }
}
