//! # Job Model
//!
//! Runtime record of a single execution attempt of a [`Task`].
//!
//! ## Overview
//!
//! A job is created by a scheduler in [`JobStatus::Submitted`], moved through
//! its lifecycle by direct transitions (`blocked`, `pending`, `running`,
//! `cancelled`, `skipped`) and finally settled by the execution engine through
//! [`Job::update_status`], which records the captured exceptions and lands the
//! job in `Completed` or `Failed`.
//!
//! ## Subscribers
//!
//! Every transition synchronously invokes all subscribers, in registration
//! order, on the thread that performed the transition. A subscriber registered
//! after the job left `Submitted` is called once right away with the current
//! job, so late observers never miss the state the job is already in.
//!
//! ## Concurrency
//!
//! All state sits behind one re-entrant lock per job. A transition holds it
//! for the status change and the whole subscriber dispatch, so transitions
//! from different threads are delivered to subscribers one complete dispatch
//! at a time. Re-entrancy lets subscribers read the job, or transition it
//! again, from inside their callback.
//!
//! ## Identity and ordering
//!
//! `==` compares ids only. `<`, `<=`, `>`, `>=` compare creation dates only.
//! The two are independent on purpose: two jobs created at the same instant
//! are neither `<` nor `>` each other (both `<=` and `>=` hold) yet are unequal
//! when their ids differ, and equal ids say nothing about creation dates.

use super::exception::CapturedException;
use super::identifiers::JobId;
use super::record::{JobRecord, JobSnapshot};
use super::task::Task;
use crate::config::JobCoreConfig;
use crate::error::Result;
use crate::events::subscriber::{StatusSubscriber, SubscriberRegistry};
use crate::execution::{resolve_task, CompletionHandle, ExecutionOutcome};
use crate::logging::{JobLogSink, TracingLogSink};
use crate::persistence::{JobSync, NoSync};
use crate::state_machine::{
    JobEvent, JobStatus, StateGuard, StateMachineError, StateMachineResult, TransitionPolicy,
};
use chrono::{DateTime, Utc};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, warn};

/// Mutable part of a job
struct JobState {
    record: JobRecord,
    exceptions: Vec<CapturedException>,
    subscribers: SubscriberRegistry,
}

/// One execution attempt of a task
pub struct Job {
    id: JobId,
    state: ReentrantMutex<RefCell<JobState>>,
    sync: Arc<dyn JobSync>,
    log_sink: Arc<dyn JobLogSink>,
    guard: Arc<dyn StateGuard>,
}

impl Job {
    /// Create a submitted job with default hooks: no backing store, `tracing`
    /// logging and permissive transitions
    pub fn new(id: JobId, task: Arc<Task>, force: bool) -> Self {
        JobBuilder::new(id, task).force(force).build()
    }

    pub fn builder(id: JobId, task: Arc<Task>) -> JobBuilder {
        JobBuilder::new(id, task)
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn task(&self) -> Arc<Task> {
        self.read(|record| record.task.clone())
    }

    pub fn set_task(&self, task: Arc<Task>) {
        self.write(|record| record.task = task);
    }

    /// Whether the execution must ignore cached outputs
    pub fn force(&self) -> bool {
        self.read(|record| record.force)
    }

    pub fn set_force(&self, force: bool) {
        self.write(|record| record.force = force);
    }

    pub fn status(&self) -> JobStatus {
        self.read(|record| record.status)
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.read(|record| record.creation_date)
    }

    /// Administrative override of the creation date. Changes where the job
    /// sorts relative to other jobs.
    pub fn set_creation_date(&self, creation_date: DateTime<Utc>) {
        self.write(|record| record.creation_date = creation_date);
    }

    /// Exceptions captured during execution, empty unless the job failed
    pub fn exceptions(&self) -> Vec<CapturedException> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.exceptions.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.subscribers.len()
    }

    /// Persisted fields as currently seen through the store
    pub fn record(&self) -> JobRecord {
        self.read(JobRecord::clone)
    }

    /// Record and exceptions taken under one lock, so no transition from
    /// another thread lands between them
    pub fn snapshot(&self) -> JobSnapshot {
        let _guard = self.state.lock();
        let record = self.record();
        JobSnapshot {
            id: record.id,
            task: record.task,
            force: record.force,
            status: record.status,
            creation_date: record.creation_date,
            exceptions: self.exceptions(),
        }
    }

    /// True iff `task` is the task this job executes, compared by task id
    pub fn contains(&self, task: &Task) -> bool {
        self.task().id == task.id
    }

    // Transitions

    /// Sets the status to blocked and notifies subscribers
    pub fn blocked(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Block)
    }

    /// Sets the status to pending and notifies subscribers
    pub fn pending(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Pend)
    }

    /// Sets the status to running and notifies subscribers
    pub fn running(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Run)
    }

    /// Sets the status to cancelled and notifies subscribers
    pub fn cancelled(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Cancel)
    }

    /// Sets the status to failed and notifies subscribers
    pub fn failed(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Fail)
    }

    /// Sets the status to completed and notifies subscribers
    pub fn completed(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Complete)
    }

    /// Sets the status to skipped and notifies subscribers
    pub fn skipped(&self) -> StateMachineResult<()> {
        self.transition(JobEvent::Skip)
    }

    /// Apply `event` and notify every subscriber.
    ///
    /// The status is set even when it already equals the target, and
    /// subscribers are notified again each time. Fails only when the job's
    /// guard rejects the transition, in which case nothing changes and no
    /// subscriber runs.
    pub fn transition(&self, event: JobEvent) -> StateMachineResult<()> {
        self.apply(event, |_| {})
    }

    // Predicates

    pub fn is_submitted(&self) -> bool {
        self.status() == JobStatus::Submitted
    }

    pub fn is_blocked(&self) -> bool {
        self.status() == JobStatus::Blocked
    }

    pub fn is_pending(&self) -> bool {
        self.status() == JobStatus::Pending
    }

    pub fn is_running(&self) -> bool {
        self.status() == JobStatus::Running
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == JobStatus::Cancelled
    }

    pub fn is_failed(&self) -> bool {
        self.status() == JobStatus::Failed
    }

    pub fn is_completed(&self) -> bool {
        self.status() == JobStatus::Completed
    }

    pub fn is_skipped(&self) -> bool {
        self.status() == JobStatus::Skipped
    }

    /// True once the job is completed, failed, cancelled or skipped
    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    // Subscribers

    /// Register a callback for every future status change.
    ///
    /// If the job has already left `Submitted`, the callback is also invoked
    /// once immediately with the job.
    pub fn on_status_change<F>(&self, callback: F)
    where
        F: Fn(&Job) + Send + Sync + 'static,
    {
        self.on_status_change_all([Arc::new(callback) as StatusSubscriber]);
    }

    /// Register several callbacks, in order. The immediate catch-up call is
    /// made per callback, right after that callback is registered. An empty
    /// iterator registers nothing.
    pub fn on_status_change_all<I>(&self, callbacks: I)
    where
        I: IntoIterator<Item = StatusSubscriber>,
    {
        let guard = self.state.lock();
        for callback in callbacks {
            guard.borrow_mut().subscribers.register(callback.clone());

            if self.status() != JobStatus::Submitted {
                callback(self);
            }
        }
    }

    // Completion

    /// Settle the job from its execution outcome.
    ///
    /// Blocks on `handle`. A handle that cannot produce an outcome returns its
    /// error and leaves the job untouched. An empty outcome completes the job;
    /// otherwise the exceptions are recorded (before subscribers run) and the
    /// job fails.
    pub fn update_status<H: CompletionHandle>(&self, handle: H) -> Result<()> {
        let outcome = handle.result()?;
        self.settle(outcome)
    }

    /// Async counterpart of [`Job::update_status`] for outcomes produced by a
    /// tokio task. A panicked or aborted task is a handle failure.
    pub async fn update_status_async(
        &self,
        handle: tokio::task::JoinHandle<ExecutionOutcome>,
    ) -> Result<()> {
        let outcome = resolve_task(handle).await?;
        self.settle(outcome)
    }

    fn settle(&self, outcome: ExecutionOutcome) -> Result<()> {
        if outcome.is_empty() {
            self.apply(JobEvent::Complete, |state| state.exceptions.clear())?;
            self.log_sink
                .info(&self.id, &format!("job {} is completed.", self.id));
            return Ok(());
        }

        let count = outcome.len();
        let traces: Vec<String> = outcome.iter().map(CapturedException::format_trace).collect();
        self.apply(JobEvent::Fail, |state| state.exceptions = outcome)?;

        self.log_sink.error(
            &self.id,
            &format!("{count} errors occurred during execution of job {}", self.id),
        );
        for trace in &traces {
            self.log_sink.error(&self.id, trace);
        }
        Ok(())
    }

    // Ordering

    /// Order two jobs by creation date, for `sort_by`
    pub fn cmp_by_creation(a: &Job, b: &Job) -> Ordering {
        a.creation_date().cmp(&b.creation_date())
    }

    // Internals

    // Store hooks are called with no `RefCell` borrow outstanding, so a hook
    // may read the job back through the re-entrant lock.

    fn read<R>(&self, f: impl FnOnce(&JobRecord) -> R) -> R {
        let guard = self.state.lock();
        self.refresh(&guard);
        let state = guard.borrow();
        f(&state.record)
    }

    fn write(&self, f: impl FnOnce(&mut JobRecord)) {
        let guard = self.state.lock();
        let record = {
            let mut state = guard.borrow_mut();
            f(&mut state.record);
            state.record.clone()
        };
        self.sync.save(&record);
    }

    fn refresh(&self, state: &RefCell<JobState>) {
        if let Some(fresh) = self.sync.reload(&self.id) {
            state.borrow_mut().record.refresh_from(fresh);
        }
    }

    /// Check the guard, mutate, persist, then dispatch to a snapshot of the
    /// subscribers while still holding the lock
    fn apply(
        &self,
        event: JobEvent,
        before_status: impl FnOnce(&mut JobState),
    ) -> StateMachineResult<()> {
        let guard = self.state.lock();
        let target = event.target_status();
        self.refresh(&guard);

        let (current, record) = {
            let mut state = guard.borrow_mut();
            let current = state.record.status;

            if let Err(err) = self.guard.check(current, target) {
                warn!(
                    job_id = %self.id,
                    from = %current,
                    to = %target,
                    event = event.event_type(),
                    guard = self.guard.description(),
                    "Job transition rejected"
                );
                return Err(StateMachineError::from(err));
            }

            before_status(&mut state);
            state.record.status = target;
            (current, state.record.clone())
        };
        self.sync.save(&record);

        let subscribers = guard.borrow().subscribers.snapshot();
        debug!(
            job_id = %self.id,
            from = %current,
            to = %target,
            event = event.event_type(),
            subscribers = subscribers.len(),
            "Job status transition"
        );

        for subscriber in &subscribers {
            subscriber(self);
        }

        drop(guard);
        Ok(())
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Compares creation dates only, independently of `==`; see the module docs
impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Self::cmp_by_creation(self, other))
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.state.lock();
        let mut debug = f.debug_struct("Job");
        debug.field("id", &self.id);
        match guard.try_borrow() {
            Ok(state) => debug
                .field("task", &state.record.task.id)
                .field("force", &state.record.force)
                .field("status", &state.record.status)
                .field("creation_date", &state.record.creation_date)
                .field("exceptions", &state.exceptions.len())
                .field("subscribers", &state.subscribers.len()),
            Err(_) => debug.field("state", &"<borrowed>"),
        };
        debug.finish()
    }
}

/// Builder for jobs that need non-default hooks
pub struct JobBuilder {
    id: JobId,
    task: Arc<Task>,
    force: bool,
    creation_date: Option<DateTime<Utc>>,
    sync: Arc<dyn JobSync>,
    log_sink: Arc<dyn JobLogSink>,
    guard: Arc<dyn StateGuard>,
}

impl JobBuilder {
    pub fn new(id: JobId, task: Arc<Task>) -> Self {
        Self {
            id,
            task,
            force: false,
            creation_date: None,
            sync: Arc::new(NoSync),
            log_sink: Arc::new(TracingLogSink),
            guard: Arc::new(TransitionPolicy::default()),
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Creation date to use instead of now
    pub fn creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    /// Store hooks consulted on every field read and write
    pub fn sync(mut self, sync: Arc<dyn JobSync>) -> Self {
        self.sync = sync;
        self
    }

    pub fn log_sink(mut self, log_sink: Arc<dyn JobLogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    pub fn policy(mut self, policy: TransitionPolicy) -> Self {
        self.guard = Arc::new(policy);
        self
    }

    /// Custom transition guard, replacing the policy
    pub fn guard(mut self, guard: Arc<dyn StateGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_config(self, config: &JobCoreConfig) -> Self {
        self.policy(config.transitions.policy)
    }

    pub fn build(self) -> Job {
        let record = JobRecord {
            id: self.id.clone(),
            task: self.task,
            force: self.force,
            status: JobStatus::Submitted,
            creation_date: self.creation_date.unwrap_or_else(Utc::now),
        };

        debug!(
            job_id = %record.id,
            task_id = %record.task.id,
            force = record.force,
            "Job submitted"
        );

        Job {
            id: self.id,
            state: ReentrantMutex::new(RefCell::new(JobState {
                record,
                exceptions: Vec::new(),
                subscribers: SubscriberRegistry::new(),
            })),
            sync: self.sync,
            log_sink: self.log_sink,
            guard: self.guard,
        }
    }
}
