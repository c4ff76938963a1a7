//! # System Constants
//!
//! Lifecycle event names and status groupings shared by jobs, their
//! subscribers and the event publisher.

pub use crate::state_machine::JobStatus;

/// Names of the lifecycle events published for job status changes
pub mod events {
    pub const JOB_SUBMITTED: &str = "job.submitted";
    pub const JOB_BLOCKED: &str = "job.blocked";
    pub const JOB_PENDING: &str = "job.pending";
    pub const JOB_RUNNING: &str = "job.running";
    pub const JOB_CANCELLED: &str = "job.cancelled";
    pub const JOB_FAILED: &str = "job.failed";
    pub const JOB_COMPLETED: &str = "job.completed";
    pub const JOB_SKIPPED: &str = "job.skipped";
}

/// Status groupings behind the status predicates
pub mod status_groups {
    use super::JobStatus;

    /// Statuses in which a job is finished
    pub const JOB_FINAL_STATES: &[JobStatus] = &[
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Cancelled,
        JobStatus::Skipped,
    ];
}

/// Lifecycle event name published when a job enters `status`
pub fn event_name_for(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Submitted => events::JOB_SUBMITTED,
        JobStatus::Blocked => events::JOB_BLOCKED,
        JobStatus::Pending => events::JOB_PENDING,
        JobStatus::Running => events::JOB_RUNNING,
        JobStatus::Cancelled => events::JOB_CANCELLED,
        JobStatus::Failed => events::JOB_FAILED,
        JobStatus::Completed => events::JOB_COMPLETED,
        JobStatus::Skipped => events::JOB_SKIPPED,
    }
}
