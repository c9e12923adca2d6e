//! Worker error types.

use thiserror::Error;

use vburn_media::MediaError;
use vburn_store::StoreError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid overlays payload: {0}")]
    InvalidOverlays(#[from] serde_json::Error),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
