// catalog-pipeline/src/pipeline/execution.rs

//! `Pipeline::run()`: executes steps and their handlers in order.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::StepDef;
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use crate::pipeline::hooks::Phase;
use tracing::{event, instrument, span, Instrument, Level};

const PHASES: [Phase; 3] = [Phase::Before, Phase::On, Phase::After];

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Executes the pipeline against `ctx_data`.
  ///
  /// Steps run in order. For each step: a matching `skip_if` bypasses it; a
  /// step with no handlers is bypassed when optional and fails with
  /// `PipelineError::HandlerMissing` otherwise; then `before`, `on` and
  /// `after` handlers run in registration order. The first `Stop` ends the run
  /// with `PipelineResult::Stopped`, the first error ends it with that error.
  ///
  /// Errors are recorded at debug level only: whether a failure is expected
  /// (bad input) or not (storage outage) is the caller's call.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(level = "debug", Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );
      let control = self.run_step(step_def, &ctx_data).instrument(step_span).await?;
      if control == PipelineControl::Stop {
        return Ok(PipelineResult::Stopped {
          step: step_def.name.clone(),
        });
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Result<PipelineControl, Err> {
    let step_name = step_def.name.as_str();

    if step_def.should_skip(ctx_data) {
      event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
      return Ok(PipelineControl::Continue);
    }

    if self.handler_count(step_name) == 0 {
      if step_def.optional {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(PipelineControl::Continue);
      }
      event!(Level::ERROR, "Non-optional step has no handlers.");
      return Err(Err::from(PipelineError::HandlerMissing {
        step_name: step_def.name.clone(),
      }));
    }

    for phase in PHASES {
      let Some(handlers) = self.phase_handlers(phase).get(step_name) else {
        continue;
      };
      for (handler_idx, handler_fn) in handlers.iter().enumerate() {
        let handler_span = span!(
          Level::DEBUG,
          "step_handler",
          phase = phase.as_str(),
          handler_index = handler_idx
        );
        match handler_fn(ctx_data.clone()).instrument(handler_span).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(Level::INFO, phase = phase.as_str(), "Pipeline stopped by a handler.");
            return Ok(PipelineControl::Stop);
          }
          Err(e) => {
            event!(Level::DEBUG, phase = phase.as_str(), error = %e, "Handler failed.");
            return Err(e);
          }
        }
      }
    }

    event!(Level::TRACE, "Step finished.");
    Ok(PipelineControl::Continue)
  }
}
