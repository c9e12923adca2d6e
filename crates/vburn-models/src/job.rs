//! Job record and lifecycle states.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is queued waiting for a worker slot
    #[default]
    Queued,
    /// Job is actively being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed with an error
    Failed,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authoritative state of one upload-to-result processing unit.
///
/// Created at upload time with [`JobStatus::Queued`] and mutated only by the
/// processing task thereafter. Creation metadata (filename, overlay count,
/// image flag) survives every transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Unique job identifier, assigned once
    pub job_id: JobId,
    /// Current status
    pub status: JobStatus,
    /// Progress percentage (0-100), advisory checkpoint values
    pub progress: u8,
    /// Original upload filename
    pub video: String,
    /// Number of overlays submitted with the upload
    pub overlays_count: usize,
    /// Whether an image was attached (stored, not used for processing)
    pub has_image: bool,
    /// Path to the produced artifact, set only when completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Human-readable status line, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error message, set only when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the job was created
    pub created_at: DateTime<Utc>,
    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new queued job record.
    pub fn new(job_id: JobId, video: impl Into<String>, overlays_count: usize, has_image: bool) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            status: JobStatus::Queued,
            progress: 0,
            video: video.into(),
            overlays_count,
            has_image,
            output_path: None,
            message: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to processing at the given progress checkpoint.
    ///
    /// Progress never goes backwards while processing.
    pub fn set_processing(&mut self, progress: u8) {
        self.status = JobStatus::Processing;
        self.progress = self.progress.max(progress.min(100));
        self.updated_at = Utc::now();
    }

    /// Mark job as completed with the produced artifact.
    pub fn complete(&mut self, output_path: impl Into<PathBuf>, message: impl Into<String>) {
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.output_path = Some(output_path.into());
        self.message = Some(message.into());
        self.updated_at = Utc::now();
    }

    /// Mark job as failed with an error message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error = Some(error.into());
        self.updated_at = Utc::now();
    }
}
