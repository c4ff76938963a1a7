use crate::constants::status_groups;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Initial state when the job is created by the scheduler
    Submitted,
    /// Job is waiting on upstream inputs before it can be queued
    Blocked,
    /// Job is queued and waiting for an execution slot
    Pending,
    /// Job is being executed by a worker
    Running,
    /// Job was cancelled before it finished
    Cancelled,
    /// Job execution raised at least one exception
    Failed,
    /// Job execution finished without exceptions
    Completed,
    /// Job did not need to run, its outputs were already valid
    Skipped,
}

impl JobStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [JobStatus; 8] = [
        Self::Submitted,
        Self::Blocked,
        Self::Pending,
        Self::Running,
        Self::Cancelled,
        Self::Failed,
        Self::Completed,
        Self::Skipped,
    ];

    /// Check if this is a terminal state (the job is finished)
    pub fn is_terminal(&self) -> bool {
        status_groups::JOB_FINAL_STATES.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Blocked => "BLOCKED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Completed => "COMPLETED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(Self::Submitted),
            "BLOCKED" => Ok(Self::Blocked),
            "PENDING" => Ok(Self::Pending),
            "RUNNING" => Ok(Self::Running),
            "CANCELLED" => Ok(Self::Cancelled),
            "FAILED" => Ok(Self::Failed),
            "COMPLETED" => Ok(Self::Completed),
            "SKIPPED" => Ok(Self::Skipped),
            _ => Err(format!("Invalid job status: {s}")),
        }
    }
}

/// Default status for new jobs
impl Default for JobStatus {
    fn default() -> Self {
        Self::Submitted
    }
}
