// catalog_server/src/pipelines/mod.rs

//! Request pipelines: one per API operation, registered once at startup.

use catalog_pipeline::{ContextData, PipelineRegistry, PipelineResult};

use crate::errors::AppError;
use crate::state::AppState;

pub mod common_steps;
pub mod contexts;
pub mod product_pipelines;
pub mod report_pipelines;

pub fn register_all_pipelines(registry: &PipelineRegistry<AppError>) {
  tracing::info!("Registering request pipelines...");
  product_pipelines::register_product_pipelines(registry);
  report_pipelines::register_report_pipelines(registry);
  tracing::info!("All request pipelines registered.");
}

/// Runs the pipeline for `T`. None of the service's steps stop early, so a
/// stopped run means a step misbehaved.
pub async fn run_pipeline<T>(app_state: &AppState, ctx_data: ContextData<T>) -> Result<(), AppError>
where
  T: Send + Sync + 'static,
{
  match app_state.pipelines.run(ctx_data).await? {
    PipelineResult::Completed => Ok(()),
    PipelineResult::Stopped { step } => Err(AppError::Internal(format!(
      "pipeline for {} stopped at step '{}'",
      std::any::type_name::<T>(),
      step
    ))),
  }
}
