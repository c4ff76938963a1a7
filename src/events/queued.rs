//! # Queued Subscribers
//!
//! A slow subscriber called inline would stall whichever thread transitions
//! the job. A queued subscriber instead snapshots the job on every
//! notification and hands the snapshot to a dedicated worker thread through a
//! bounded channel. The worker calls the wrapped callback in arrival order, so
//! delivery order matches transition order, including the catch-up call made
//! at registration.
//!
//! When the queue is full the transitioning thread blocks until the worker
//! catches up. The worker stops once every job holding the subscriber has been
//! dropped and the queue is drained.

use super::subscriber::{subscriber, StatusSubscriber};
use crate::config::DispatchConfig;
use crate::models::{Job, JobSnapshot};
use crossbeam::channel::{self, Receiver};
use std::io;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Handle to the worker thread behind a queued subscriber
#[derive(Debug)]
pub struct QueuedSubscriber {
    worker: JoinHandle<()>,
    queue: Receiver<JobSnapshot>,
}

impl QueuedSubscriber {
    /// Start a worker for `callback` with room for `capacity` undelivered
    /// snapshots. Register the returned subscriber on one or more jobs.
    pub fn spawn<F>(capacity: usize, mut callback: F) -> io::Result<(StatusSubscriber, Self)>
    where
        F: FnMut(&JobSnapshot) + Send + 'static,
    {
        let (sender, receiver) = channel::bounded::<JobSnapshot>(capacity);
        let queue = receiver.clone();

        let worker = thread::Builder::new()
            .name("job-status-subscriber".to_string())
            .spawn(move || {
                for snapshot in receiver.iter() {
                    callback(&snapshot);
                }
                debug!("Queued subscriber drained, stopping worker");
            })?;

        let notify = subscriber(move |job: &Job| {
            let snapshot = job.snapshot();
            if sender.send(snapshot).is_err() {
                warn!(job_id = %job.id(), "Queued subscriber worker is gone, dropping notification");
            }
        });

        Ok((notify, Self { worker, queue }))
    }

    /// Same as [`QueuedSubscriber::spawn`] with the configured capacity
    pub fn from_config<F>(config: &DispatchConfig, callback: F) -> io::Result<(StatusSubscriber, Self)>
    where
        F: FnMut(&JobSnapshot) + Send + 'static,
    {
        Self::spawn(config.queue_capacity, callback)
    }

    /// Notifications waiting for the worker
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Wait for the worker to deliver everything and stop. Only returns once
    /// every job holding the subscriber has been dropped.
    pub fn join(self) -> thread::Result<()> {
        drop(self.queue);
        self.worker.join()
    }
}
