//! FFmpeg CLI wrapper for overlay burn-in.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - A runner with hard timeout and kill-on-timeout
//! - drawtext filter construction with text escaping

pub mod command;
pub mod error;
pub mod filters;

pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filters::{build_text_overlay_filter, escape_drawtext_content};
