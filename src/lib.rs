#![allow(clippy::doc_markdown)] // Allow technical terms in docs without backticks
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Tasker Job Core
//!
//! Runtime record of a single execution attempt ("job") of a task inside a
//! workflow orchestration system.
//!
//! ## Overview
//!
//! A [`Job`] tracks its lifecycle status, keeps the exceptions an execution
//! engine captured while running its task, and notifies subscribers on every
//! status change. It neither schedules nor executes work: a scheduler drives
//! its direct transitions and an execution engine settles it through a
//! completion handle.
//!
//! ## Module Organization
//!
//! - [`models`] - Job entity, task references, captured exceptions, records
//! - [`state_machine`] - Job statuses, transition events and guard policies
//! - [`events`] - Subscriber registry, queued subscribers, event publisher
//! - [`execution`] - Completion handles bridging execution engines to jobs
//! - [`persistence`] - Reload/save hooks and an in-memory job store
//! - [`config`] - Layered configuration loading
//! - [`logging`] - Structured logging setup and per-job log sinks
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tasker_job::models::{CapturedException, Job, JobId, Task};
//! use tasker_job::state_machine::JobStatus;
//!
//! # fn main() -> tasker_job::Result<()> {
//! let task = Arc::new(Task::new("task_1", "train_model"));
//! let job = Job::new(JobId::generate(), task, false);
//!
//! job.on_status_change(|job| println!("{} is now {}", job.id(), job.status()));
//! job.pending()?;
//! job.running()?;
//!
//! // Reported by the execution engine once the task ran
//! let worker = std::thread::spawn(|| vec![CapturedException::new("ValueError", "boom")]);
//! job.update_status(worker)?;
//!
//! assert_eq!(job.status(), JobStatus::Failed);
//! assert_eq!(job.exceptions().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod execution;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod state_machine;

pub use crate::config::{ConfigManager, DispatchConfig, JobCoreConfig, LoggingConfig, TransitionConfig};
pub use error::{JobError, Result};
pub use events::{EventPublisher, QueuedSubscriber, StatusSubscriber};
pub use execution::{CompletionError, CompletionHandle, ExecutionOutcome};
pub use models::{CapturedException, Job, JobBuilder, JobId, JobRecord, JobSnapshot, Task, TaskId};
pub use persistence::{InMemoryJobStore, JobSync, NoSync};
pub use state_machine::{JobEvent, JobStatus, StateMachineError, TransitionPolicy};
