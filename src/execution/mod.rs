pub mod completion;

pub use completion::{resolve_task, CompletionError, CompletionHandle, ExecutionOutcome};
