// tests/common/mod.rs
#![allow(dead_code)]

use catalog_pipeline::{ContextData, PipelineControl, PipelineError};
use tracing::Level;

/// Mimics a request context: a few guard flags plus a trail of executed handlers.
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
  pub authorized: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline engine error: {0}")]
  Engine(String),

  #[error("Test handler failed: {0}")]
  Handler(String),

  #[error("Rejected: {0}")]
  Rejected(String),
}

impl From<PipelineError> for TestError {
  fn from(err: PipelineError) -> Self {
    TestError::Engine(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> catalog_pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> catalog_pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

/// A guard that rejects the run unless `authorized` is set.
pub fn create_guard_handler() -> catalog_pipeline::Handler<TestContext, TestError> {
  Box::new(|ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let authorized = {
        let mut guard = ctx.write();
        guard.steps_executed.push("guard".to_string());
        guard.authorized
      };
      if authorized {
        Ok(PipelineControl::Continue)
      } else {
        Err(TestError::Rejected("not authorized".to_string()))
      }
    })
  })
}

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
