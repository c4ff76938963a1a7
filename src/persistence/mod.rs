//! # Field Synchronization
//!
//! A job's persisted fields can be kept in step with a backing store owned by
//! a job manager. Every read of `task`, `force`, `status` or `creation_date`
//! first asks the store for a fresher record, and every write (including
//! status transitions) hands the updated record back to it.
//!
//! The hooks are infallible from the job's point of view: a store decides for
//! itself how to report its own failures. Hooks run on the calling thread
//! while it holds the job's lock, so a store may read the job back (for
//! example its exceptions, which a [`JobRecord`] does not carry). `reload`
//! must not read the persisted fields, since each of those reads reloads.

pub mod memory;

pub use memory::InMemoryJobStore;

use crate::models::{JobId, JobRecord};

/// Reload-before-read and save-after-write hooks for a job's fields
pub trait JobSync: Send + Sync {
    /// Latest stored record for `job_id`, or `None` to keep the in-memory fields
    fn reload(&self, job_id: &JobId) -> Option<JobRecord>;

    /// Persist `record` after one of its fields changed
    fn save(&self, record: &JobRecord);
}

/// Hooks for jobs that are not backed by any store
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSync;

impl JobSync for NoSync {
    fn reload(&self, _job_id: &JobId) -> Option<JobRecord> {
        None
    }

    fn save(&self, _record: &JobRecord) {}
}
