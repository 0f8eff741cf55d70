// catalog-pipeline/src/core/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the next handler and the following steps.
  Continue,
  /// Halt the pipeline. No further handlers of this or later steps run.
  Stop,
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran (or was skipped) without a handler asking to stop.
  Completed,
  /// A handler of `step` returned `PipelineControl::Stop`.
  Stopped { step: String },
}

impl PipelineResult {
  pub fn is_completed(&self) -> bool {
    matches!(self, PipelineResult::Completed)
  }
}
