//! Background video processing.
//!
//! This crate provides:
//! - The processing task that burns a text overlay onto an uploaded video
//! - A semaphore-bounded task pool so uploads cannot spawn an unbounded
//!   number of concurrent FFmpeg invocations

pub mod config;
pub mod error;
pub mod pool;
pub mod task;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use pool::TaskPool;
pub use task::{process_upload, ProcessRequest};
