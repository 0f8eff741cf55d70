// catalog-pipeline/src/lib.rs

//! A small async request pipeline engine.
//!
//! A pipeline is an ordered list of named steps. Each step can carry `before`,
//! `on` and `after` handlers that operate on a shared, lockable context
//! (`ContextData<T>`). The catalog server builds one pipeline per API
//! operation so that the checks every request must pass (rate limit,
//! authorization, validation) run as explicit steps ahead of the operation body.
//!
//! Features:
//!  - Named steps with before/on/after handler phases.
//!  - Asynchronous handlers for I/O-bound operations.
//!  - Early stopping, reported with the name of the step that stopped.
//!  - Step mutation (inserting, removing, skip conditions, optionality).
//!  - A type-keyed registry that dispatches a context to its pipeline.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::handler::Handler;
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::PipelineError;

pub use crate::registry::PipelineRegistry;

/*
    Typical use:
    1. Define a context struct `MyCtx` holding the request inputs and slots for outputs.
    2. Build a `Pipeline<MyCtx, MyError>` from a step table.
    3. Attach handlers with `.on_root()`, `.before_root()`, `.after_root()`.
    4. Register the pipeline on a `PipelineRegistry<MyError>`.
    5. Per request, wrap a fresh `MyCtx` in `ContextData::new` and call `registry.run(ctx.clone()).await`,
       then read the outputs back from `ctx`.
*/
