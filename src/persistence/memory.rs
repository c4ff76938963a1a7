use super::JobSync;
use crate::models::{JobId, JobRecord};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Process-local job store keyed by job id.
///
/// Stands in for a job manager's repository: jobs built with this store read
/// back whatever was last saved under their id, so two `Job` handles for the
/// same id observe each other's writes.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    records: DashMap<JobId, JobRecord>,
    reloads: AtomicU64,
    saves: AtomicU64,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, job_id: &JobId) -> Option<JobRecord> {
        self.records.get(job_id).map(|entry| entry.value().clone())
    }

    /// Insert or replace a record directly, as an administrator would
    pub fn put(&self, record: JobRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn remove(&self, job_id: &JobId) -> Option<JobRecord> {
        self.records.remove(job_id).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&self) {
        self.records.clear();
    }

    /// Number of reload hooks served so far
    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::Relaxed)
    }

    /// Number of save hooks served so far
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }
}

impl JobSync for InMemoryJobStore {
    fn reload(&self, job_id: &JobId) -> Option<JobRecord> {
        self.reloads.fetch_add(1, Ordering::Relaxed);
        self.get(job_id)
    }

    fn save(&self, record: &JobRecord) {
        self.saves.fetch_add(1, Ordering::Relaxed);
        trace!(job_id = %record.id, status = %record.status, "Saving job record");
        self.records.insert(record.id.clone(), record.clone());
    }
}
