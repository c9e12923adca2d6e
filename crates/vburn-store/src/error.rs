//! Store error types.

use thiserror::Error;

use vburn_models::JobId;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Job already exists: {0}")]
    DuplicateId(JobId),

    #[error("Job not found: {0}")]
    NotFound(JobId),
}
