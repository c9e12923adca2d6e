//! Lock-guarded map of job records.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use vburn_models::{JobId, JobRecord};

use crate::error::{StoreError, StoreResult};

/// Thread-safe in-memory table mapping job id to job state.
///
/// Shared by handle between the HTTP layer and background tasks; cloning is
/// cheap and all clones see the same map. `update` has whole-record
/// overwrite semantics, so callers supply the full record on each write.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record.
    ///
    /// Fails if the id is already present. With UUID v4 generation this
    /// should never happen in practice.
    pub async fn create(&self, record: JobRecord) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&record.job_id) {
            return Err(StoreError::DuplicateId(record.job_id.clone()));
        }
        debug!(job_id = %record.job_id, "Job record created");
        jobs.insert(record.job_id.clone(), record);
        Ok(())
    }

    /// Get a snapshot of the current record.
    pub async fn get(&self, id: &JobId) -> Option<JobRecord> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Replace the record for an existing job.
    pub async fn update(&self, record: JobRecord) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        if !jobs.contains_key(&record.job_id) {
            return Err(StoreError::NotFound(record.job_id.clone()));
        }
        debug!(
            job_id = %record.job_id,
            status = %record.status,
            progress = record.progress,
            "Job record updated"
        );
        jobs.insert(record.job_id.clone(), record);
        Ok(())
    }

    /// Number of jobs held.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Whether the store holds no jobs.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}
