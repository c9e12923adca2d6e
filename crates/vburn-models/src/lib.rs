//! Shared data models for the VBurn backend.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their lifecycle states
//! - Overlay descriptors submitted with uploads

pub mod job;
pub mod overlay;

pub use job::{JobId, JobRecord, JobStatus};
pub use overlay::{parse_overlays, Overlay, OverlayKind};
