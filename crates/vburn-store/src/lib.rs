//! In-memory job store.
//!
//! Holds the authoritative state of every job created since process start.
//! Entries are never evicted; state is lost on restart by design.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::JobStore;
