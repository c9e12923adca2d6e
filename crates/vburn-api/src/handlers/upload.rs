//! Upload handler: accept files, create the job, schedule processing.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use vburn_models::{parse_overlays, JobId, JobRecord};
use vburn_worker::{process_upload, ProcessRequest};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Allowed video file extensions (lowercase).
const ALLOWED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Response for an accepted upload.
#[derive(Serialize)]
pub struct UploadResponse {
    pub job_id: JobId,
    pub status: String,
    pub message: String,
    pub video: String,
    pub overlays: usize,
    pub estimated_time: String,
    pub status_url: String,
    pub result_url: String,
}

/// One uploaded file pulled out of the multipart body.
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

/// POST /upload
///
/// Multipart fields: `video` (required), `image` (optional, stored but
/// unused), `overlays` (JSON array, defaults to empty). Returns immediately
/// with the job id and polling URLs; processing continues in the background.
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let (video, image, overlays_raw) = read_upload_fields(multipart).await?;

    let video = video.ok_or_else(|| ApiError::bad_request("Missing video file"))?;
    validate_filename(&video.filename)?;
    if !has_allowed_extension(&video.filename) {
        return Err(ApiError::bad_request("Invalid video format"));
    }

    // Reject malformed payloads before any job exists
    let overlays = parse_overlays(&overlays_raw)
        .map_err(|_| ApiError::bad_request("Invalid JSON in overlays"))?;

    let job_id = JobId::new();
    let upload_bytes = video.bytes.len() as u64;

    let video_path = state
        .config
        .upload_dir
        .join(format!("{}_{}", job_id, video.filename));
    tokio::fs::write(&video_path, &video.bytes)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to save uploaded video");
            ApiError::internal(format!("Upload failed: {}", e))
        })?;

    info!(
        job_id = %job_id,
        video = %video.filename,
        size_mb = format!("{:.1}", upload_bytes as f64 / (1024.0 * 1024.0)),
        "Video uploaded"
    );

    let image_path = match &image {
        Some(file) => {
            validate_filename(&file.filename)?;
            let path = state
                .config
                .upload_dir
                .join(format!("{}_{}", job_id, file.filename));
            tokio::fs::write(&path, &file.bytes)
                .await
                .map_err(|e| ApiError::internal(format!("Upload failed: {}", e)))?;
            info!(job_id = %job_id, image = %file.filename, "Image overlay uploaded");
            Some(path)
        }
        None => None,
    };

    let record = JobRecord::new(
        job_id.clone(),
        video.filename.clone(),
        overlays.len(),
        image.is_some(),
    );
    state.store.create(record).await?;
    metrics::record_job_enqueued(upload_bytes);

    let request = ProcessRequest {
        job_id: job_id.clone(),
        video_path,
        image_path,
        overlays_raw,
        output_dir: state.config.output_dir.clone(),
    };
    let store = state.store.clone();
    let worker_config = state.worker_config.clone();
    state
        .pool
        .spawn(async move { process_upload(store, worker_config, request).await });

    Ok(Json(UploadResponse {
        status_url: format!("/status/{}", job_id),
        result_url: format!("/result/{}", job_id),
        job_id,
        status: "queued".to_string(),
        message: "Video processing started successfully!".to_string(),
        video: video.filename,
        overlays: overlays.len(),
        estimated_time: "10-20 seconds".to_string(),
    }))
}

/// Pull the known fields out of the multipart body.
async fn read_upload_fields(
    mut multipart: Multipart,
) -> ApiResult<(Option<UploadedFile>, Option<UploadedFile>, String)> {
    let mut video = None;
    let mut image = None;
    let mut overlays_raw = "[]".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("video") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| ApiError::bad_request("Missing video filename"))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read video: {}", e)))?;
                video = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("image") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| ApiError::bad_request("Missing image filename"))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {}", e)))?;
                image = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("overlays") => {
                overlays_raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read overlays: {}", e)))?;
            }
            _ => {}
        }
    }

    Ok((video, image, overlays_raw))
}

/// Check that the filename carries an allowed video extension.
fn has_allowed_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ALLOWED_VIDEO_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Uploaded filenames become path suffixes on disk; refuse traversal.
fn validate_filename(filename: &str) -> ApiResult<()> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(ApiError::bad_request("Invalid filename"));
    }
    Ok(())
}
