//! # Task Reference
//!
//! The unit of work a job executes. Tasks are defined and resolved outside
//! this crate; a job only holds a shared reference to one and reads its
//! identity.

use super::identifiers::TaskId;
use serde::{Deserialize, Serialize};

/// A task as seen by the jobs executing it.
///
/// Jobs hold tasks behind an `Arc` and never mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Name of the task configuration this task was instantiated from
    pub config_id: String,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, config_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config_id: config_id.into(),
        }
    }

    /// Instantiate a task from its configuration name with a generated id
    pub fn from_config(config_id: impl Into<String>) -> Self {
        let config_id = config_id.into();
        Self {
            id: TaskId::generate(&config_id),
            config_id,
        }
    }
}
