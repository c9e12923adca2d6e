//! Bounded task pool.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Spawner for background tasks with bounded concurrency.
///
/// Each spawned task holds a semaphore permit for its whole run; excess
/// tasks queue on the semaphore. Callers return immediately regardless.
#[derive(Debug, Clone)]
pub struct TaskPool {
    semaphore: Arc<Semaphore>,
}

impl TaskPool {
    /// Create a pool allowing at most `max_concurrent` tasks to run at once.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Schedule a task on the pool.
    ///
    /// The task starts once a permit is available.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        tokio::spawn(async move {
            // Closed only at shutdown; nothing left to do then.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            fut.await;
        })
    }

    /// Number of tasks that could start immediately.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}
