//! Job status and result handlers.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;

use vburn_models::{JobId, JobRecord, JobStatus};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /status/{job_id}
///
/// Returns the full current job record.
pub async fn get_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobRecord>> {
    let id = JobId::from_string(job_id);
    let record = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(record))
}

/// GET /result/{job_id}
///
/// Returns the produced video as a download once the job is completed.
pub async fn get_result(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    let id = JobId::from_string(job_id);
    let record = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    if record.status != JobStatus::Completed {
        return Err(ApiError::bad_request("Video processing not completed"));
    }

    let output_path = record
        .output_path
        .filter(|p| p.exists())
        .ok_or_else(|| ApiError::not_found("Result file not found"))?;

    let bytes = tokio::fs::read(&output_path)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read result: {}", e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"edited_video.mp4\"",
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}
