pub mod exception;
pub mod identifiers;
pub mod job;
pub mod record;
pub mod task;

// Re-export core models for easy access
pub use exception::CapturedException;
pub use identifiers::{JobId, TaskId};
pub use job::{Job, JobBuilder};
pub use record::{JobRecord, JobSnapshot};
pub use task::Task;
