use super::states::JobStatus;
use serde::{Deserialize, Serialize};

/// Events that trigger job status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEvent {
    /// Job waits on upstream inputs
    Block,
    /// Job is queued for execution
    Pend,
    /// A worker started executing the job
    Run,
    /// Cancel the job
    Cancel,
    /// Execution raised exceptions
    Fail,
    /// Execution finished cleanly
    Complete,
    /// Execution was not needed
    Skip,
}

impl JobEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Pend => "pend",
            Self::Run => "run",
            Self::Cancel => "cancel",
            Self::Fail => "fail",
            Self::Complete => "complete",
            Self::Skip => "skip",
        }
    }

    /// The status a job holds after this event is applied
    pub fn target_status(&self) -> JobStatus {
        match self {
            Self::Block => JobStatus::Blocked,
            Self::Pend => JobStatus::Pending,
            Self::Run => JobStatus::Running,
            Self::Cancel => JobStatus::Cancelled,
            Self::Fail => JobStatus::Failed,
            Self::Complete => JobStatus::Completed,
            Self::Skip => JobStatus::Skipped,
        }
    }
}
