// catalog-pipeline/src/core/handler.rs

//! The boxed handler type stored for each step phase.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a stored handler.
pub type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>;

/// A pipeline step handler.
///
/// A handler receives its own clone of the run's `ContextData<TData>` and
/// resolves to `Continue` or `Stop`, or to the pipeline's error type.
///
/// Handlers are responsible for:
/// 1. Taking `.read()` / `.write()` guards only for as long as they copy data in or out.
/// 2. **Dropping every guard BEFORE the next `.await`.**
/// 3. Returning `PipelineControl::Stop` only when the remaining steps must not run.
pub type Handler<TData, Err> = Box<dyn Fn(ContextData<TData>) -> HandlerFuture<Err> + Send + Sync>;
