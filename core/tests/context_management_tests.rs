// tests/context_management_tests.rs
mod common;

use catalog_pipeline::{ContextData, Pipeline, PipelineControl, PipelineError};
use common::*;

#[tokio::test]
async fn test_context_data_is_shared_and_modified() {
  setup_tracing();
  let mut pipeline =
    Pipeline::<TestContext, TestError>::new(&[("step1_modify", false, None), ("step2_read_modify", false, None)]);

  pipeline.on_root("step1_modify", |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      {
        let mut guard = ctx.write();
        guard.counter = 10;
        guard.message = "SetByStep1".to_string();
      }
      Ok::<PipelineControl, PipelineError>(PipelineControl::Continue)
    })
  });

  pipeline.on_root("step2_read_modify", |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      assert_eq!(guard.counter, 10);
      guard.counter += 5;
      guard.message.push_str("_ThenStep2");
      Ok::<PipelineControl, PipelineError>(PipelineControl::Continue)
    })
  });

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.counter, 15);
  assert_eq!(guard.message, "SetByStep1_ThenStep2");
}

#[tokio::test]
async fn test_context_data_clone_shares_data() {
  let original = ContextData::new(TestContext {
    counter: 1,
    ..Default::default()
  });
  let cloned = original.clone();

  original.write().counter = 5;
  assert_eq!(cloned.read().counter, 5);

  drop(original);
  assert_eq!(cloned.read().counter, 5);
}

#[tokio::test]
async fn test_context_data_locks_with_await() {
  let ctx = ContextData::new(TestContext::default());

  let initial_count = ctx.read().counter;
  tokio::time::sleep(std::time::Duration::from_millis(1)).await;
  ctx.write().counter = initial_count + 1;

  assert_eq!(ctx.read().counter, 1);
}
