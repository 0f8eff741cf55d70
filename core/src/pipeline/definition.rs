// catalog-pipeline/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its construction and structural modification.

use crate::core::handler::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;

/// Handlers registered for one phase of each step, keyed by step name.
pub(crate) type PhaseHandlers<TData, Err> = HashMap<String, Vec<Handler<TData, Err>>>;

/// An ordered list of named steps over a root context `TData`.
///
/// `Err` is the error type handlers resolve to. It must be constructible from
/// `PipelineError` so that engine-level failures (a required step without
/// handlers) surface through the same type.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: PhaseHandlers<TData, Err>,
  pub(crate) on: PhaseHandlers<TData, Err>,
  pub(crate) after: PhaseHandlers<TData, Err>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from a `(name, optional, skip_if)` step table.
  ///
  /// Panics on duplicate step names.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let mut pipeline = Self {
      steps: Vec::with_capacity(step_defs.len()),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    };
    for (name, optional, skip_if) in step_defs {
      pipeline.ensure_step_not_exists(name);
      pipeline.steps.push(StepDef::new(*name, *optional, skip_if.clone()));
    }
    pipeline
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_step(&self, step_name: &str) -> bool {
    self.steps.iter().any(|s| s.name == step_name)
  }

  /// Index of an existing step. Panics if the step is unknown: a typo in a
  /// step name is a setup error, not something to recover from at runtime.
  pub(crate) fn step_index(&self, step_name: &str) -> usize {
    self.steps.iter().position(|s| s.name == step_name).unwrap_or_else(|| {
      panic!(
        "Pipeline setup error: {}",
        PipelineError::StepNotFound {
          step_name: step_name.to_string()
        }
      )
    })
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.has_step(step_name) {
      panic!(
        "Pipeline setup error: {}",
        PipelineError::DuplicateStep {
          step_name: step_name.to_string()
        }
      );
    }
  }

  pub fn insert_before_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.step_index(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx, StepDef::new(name, optional, skip_if));
  }

  pub fn insert_after_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.step_index(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(idx + 1, StepDef::new(name, optional, skip_if));
  }

  /// Removes a step together with all its handlers. Returns `false` if there was no such step.
  pub fn remove_step(&mut self, step_name: &str) -> bool {
    let Some(idx) = self.steps.iter().position(|s| s.name == step_name) else {
      return false;
    };
    self.steps.remove(idx);
    self.before.remove(step_name);
    self.on.remove(step_name);
    self.after.remove(step_name);
    true
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.step_index(step_name);
    self.steps[idx].optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    let idx = self.step_index(step_name);
    self.steps[idx].skip_if = skip_if;
  }
}

impl<TData, Err> std::fmt::Debug for Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("context_type", &std::any::type_name::<TData>())
      .field("steps", &self.steps)
      .finish()
  }
}
