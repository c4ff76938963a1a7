//! # Completion Handles
//!
//! The bridge an execution engine uses to report a job's outcome. A handle
//! resolves to the ordered exceptions captured while the task ran (empty
//! means success), or fails when the engine could not produce any result.

use crate::models::CapturedException;
use std::any::Any;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinError;

/// Outcome reported by an execution engine: captured exceptions, empty on success
pub type ExecutionOutcome = Vec<CapturedException>;

/// The engine could not produce an outcome at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Worker panicked before reporting a result: {0}")]
    WorkerPanicked(String),

    #[error("Completion sender dropped without reporting a result")]
    Dropped,

    #[error("Execution was aborted before reporting a result")]
    Aborted,

    #[error("Execution could not produce a result: {0}")]
    Failed(String),
}

/// Blocking access to an execution outcome
pub trait CompletionHandle {
    /// Block until the outcome is available
    fn result(self) -> Result<ExecutionOutcome, CompletionError>;
}

/// An outcome that is already known
impl CompletionHandle for Result<ExecutionOutcome, CompletionError> {
    fn result(self) -> Result<ExecutionOutcome, CompletionError> {
        self
    }
}

/// An outcome that is already known to have been produced
impl CompletionHandle for ExecutionOutcome {
    fn result(self) -> Result<ExecutionOutcome, CompletionError> {
        Ok(self)
    }
}

/// A worker thread returning its captured exceptions
impl CompletionHandle for std::thread::JoinHandle<ExecutionOutcome> {
    fn result(self) -> Result<ExecutionOutcome, CompletionError> {
        self.join()
            .map_err(|payload| CompletionError::WorkerPanicked(panic_message(payload.as_ref())))
    }
}

/// A channel the engine reports through.
///
/// Blocks the calling thread, so inside an async runtime it fails with
/// [`CompletionError::Failed`] without waiting; use
/// [`crate::models::Job::update_status_async`] there instead.
impl CompletionHandle for oneshot::Receiver<ExecutionOutcome> {
    fn result(self) -> Result<ExecutionOutcome, CompletionError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(CompletionError::Failed(
                "cannot block on a completion channel from inside an async runtime".to_string(),
            ));
        }
        self.blocking_recv().map_err(|_| CompletionError::Dropped)
    }
}

/// Await a tokio task producing an outcome
pub async fn resolve_task(
    handle: tokio::task::JoinHandle<ExecutionOutcome>,
) -> Result<ExecutionOutcome, CompletionError> {
    handle.await.map_err(join_error)
}

fn join_error(err: JoinError) -> CompletionError {
    if err.is_cancelled() {
        return CompletionError::Aborted;
    }
    match err.try_into_panic() {
        Ok(payload) => CompletionError::WorkerPanicked(panic_message(payload.as_ref())),
        Err(err) => CompletionError::Failed(err.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
