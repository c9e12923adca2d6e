//! Application state.

use vburn_store::JobStore;
use vburn_worker::{TaskPool, WorkerConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: JobStore,
    pub pool: TaskPool,
    pub worker_config: WorkerConfig,
}

impl AppState {
    /// Create new application state, creating the upload and output
    /// directories if needed.
    pub fn new(config: ApiConfig, worker_config: WorkerConfig) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.upload_dir)?;
        std::fs::create_dir_all(&config.output_dir)?;

        let pool = TaskPool::new(worker_config.max_concurrent_jobs);

        Ok(Self {
            config,
            store: JobStore::new(),
            pool,
            worker_config,
        })
    }
}
