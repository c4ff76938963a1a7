use super::exception::CapturedException;
use super::identifiers::JobId;
use super::task::Task;
use crate::state_machine::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted fields of a job, as exchanged with a [`JobSync`](crate::persistence::JobSync) store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub task: Arc<Task>,
    pub force: bool,
    pub status: JobStatus,
    pub creation_date: DateTime<Utc>,
}

impl JobRecord {
    /// Take every field from `fresh` except the id
    pub(crate) fn refresh_from(&mut self, fresh: JobRecord) {
        self.task = fresh.task;
        self.force = fresh.force;
        self.status = fresh.status;
        self.creation_date = fresh.creation_date;
    }
}

/// Point-in-time view of a job, detached from its lock and subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: JobId,
    pub task: Arc<Task>,
    pub force: bool,
    pub status: JobStatus,
    pub creation_date: DateTime<Utc>,
    pub exceptions: Vec<CapturedException>,
}
