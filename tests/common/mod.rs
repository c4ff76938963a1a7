//! Shared helpers for job integration tests
#![allow(dead_code)]

pub mod strategies;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tasker_job::logging::JobLogSink;
use tasker_job::models::{Job, JobId, Task};
use tasker_job::state_machine::JobStatus;

pub fn test_task() -> Arc<Task> {
    Arc::new(Task::new("task_1", "train_model"))
}

pub fn test_job(id: &str) -> Job {
    Job::new(JobId::new(id), test_task(), false)
}

pub fn job_created_at(id: &str, creation_date: DateTime<Utc>) -> Job {
    Job::builder(JobId::new(id), test_task())
        .creation_date(creation_date)
        .build()
}

/// Records every notification a subscriber receives as `(label, status)`
#[derive(Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<(String, JobStatus)>>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriber callback recording under `label`
    pub fn callback(&self, label: &str) -> impl Fn(&Job) + Send + Sync + 'static {
        let calls = self.calls.clone();
        let label = label.to_string();
        move |job: &Job| calls.lock().push((label.clone(), job.status()))
    }

    pub fn calls(&self) -> Vec<(String, JobStatus)> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error(String),
}

/// Log sink keeping every message in memory
#[derive(Default)]
pub struct RecordingLogSink {
    lines: Mutex<Vec<LogLine>>,
}

impl RecordingLogSink {
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }
}

impl JobLogSink for RecordingLogSink {
    fn info(&self, _job_id: &JobId, message: &str) {
        self.lines.lock().push(LogLine::Info(message.to_string()));
    }

    fn error(&self, _job_id: &JobId, message: &str) {
        self.lines.lock().push(LogLine::Error(message.to_string()));
    }
}
