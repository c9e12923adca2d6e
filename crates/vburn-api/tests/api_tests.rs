//! API integration tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use vburn_api::{create_router, ApiConfig, AppState};
use vburn_models::{JobId, JobRecord, JobStatus};
use vburn_worker::WorkerConfig;

const BOUNDARY: &str = "vburn-test-boundary";

/// Build a router backed by scratch directories.
///
/// Returns the state handle separately so tests can inspect the store.
fn test_app() -> (Router, AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        upload_dir: dir.path().join("uploads"),
        output_dir: dir.path().join("outputs"),
        ..ApiConfig::default()
    };
    let state = AppState::new(config, WorkerConfig::default()).unwrap();
    let app = create_router(state.clone(), None);
    (app, state, dir)
}

/// Build a multipart upload body with a video part and optional overlays part.
fn multipart_body(filename: &str, video_bytes: &[u8], overlays: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"{filename}\"\r\nContent-Type: video/mp4\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(video_bytes);
    body.extend_from_slice(b"\r\n");
    if let Some(overlays) = overlays {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"overlays\"\r\n\r\n{overlays}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, overlays: Option<&str>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(filename, b"fake video bytes", overlays)))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_liveness() {
    let (app, _state, _dir) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _state, _dir) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_status_unknown_job_is_404() {
    let (app, _state, _dir) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/status/no-such-job")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Job not found"));
}

#[tokio::test]
async fn test_result_unknown_job_is_404() {
    let (app, _state, _dir) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/result/no-such-job")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejects_bad_extension_before_creating_job() {
    let (app, state, _dir) = test_app();

    let response = app.oneshot(upload_request("notes.txt", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Invalid video format"));
    assert!(state.store.is_empty().await);
}

#[tokio::test]
async fn test_upload_rejects_malformed_overlays_before_creating_job() {
    let (app, state, _dir) = test_app();

    let response = app
        .oneshot(upload_request("clip.mp4", Some("not json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Invalid JSON in overlays"));
    assert!(state.store.is_empty().await);
}

#[tokio::test]
async fn test_upload_creates_resolvable_job() {
    let (app, state, _dir) = test_app();

    let response = app
        .clone()
        .oneshot(upload_request(
            "clip.mp4",
            Some(r#"[{"type":"text","content":"Hello"}]"#),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let job_id = json["job_id"].as_str().unwrap().to_string();
    assert_eq!(json["status"], "queued");
    assert_eq!(json["overlays"], 1);
    assert_eq!(json["status_url"], format!("/status/{job_id}"));
    assert_eq!(json["result_url"], format!("/result/{job_id}"));

    // The id resolves immediately via the status endpoint
    let status_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/status/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status_response.status(), StatusCode::OK);
    let status_json = response_json(status_response).await;
    assert_eq!(status_json["job_id"], job_id.as_str());
    // Metadata captured at creation survives whatever state the
    // background task has reached by now
    assert_eq!(status_json["video"], "clip.mp4");
    assert_eq!(status_json["overlays_count"], 1);

    assert_eq!(state.store.len().await, 1);
}

#[tokio::test]
async fn test_upload_job_ids_are_unique() {
    let (app, _state, _dir) = test_app();

    let first = response_json(
        app.clone()
            .oneshot(upload_request("clip.mp4", None))
            .await
            .unwrap(),
    )
    .await;
    let second = response_json(app.oneshot(upload_request("clip.mp4", None)).await.unwrap()).await;

    assert_ne!(first["job_id"], second["job_id"]);
}

#[tokio::test]
async fn test_result_before_completion_is_400() {
    let (app, state, _dir) = test_app();

    let job_id = JobId::from_string("queued-job");
    state
        .store
        .create(JobRecord::new(job_id.clone(), "clip.mp4", 0, false))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/result/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("not completed"));
}

#[tokio::test]
async fn test_result_serves_completed_file() {
    let (app, state, dir) = test_app();

    let output_path = dir.path().join("outputs").join("done-job_final.mp4");
    tokio::fs::write(&output_path, b"final video bytes").await.unwrap();

    let job_id = JobId::from_string("done-job");
    let mut record = JobRecord::new(job_id.clone(), "clip.mp4", 1, false);
    record.set_processing(70);
    record.complete(output_path.clone(), "Video processed successfully!");
    state.store.create(record).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/result/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/mp4"
    );
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("edited_video.mp4"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"final video bytes");
}

#[tokio::test]
async fn test_result_completed_but_missing_file_is_404() {
    let (app, state, dir) = test_app();

    let job_id = JobId::from_string("gone-job");
    let mut record = JobRecord::new(job_id.clone(), "clip.mp4", 0, false);
    record.complete(dir.path().join("outputs").join("never-written.mp4"), "done");
    state.store.create(record).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/result/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("Result file not found"));
}

#[tokio::test]
async fn test_failed_job_status_carries_error() {
    let (app, state, _dir) = test_app();

    let job_id = JobId::from_string("failed-job");
    let mut record = JobRecord::new(job_id.clone(), "clip.mp4", 0, false);
    record.set_processing(20);
    record.fail("Processing timeout - try smaller video");
    state.store.create(record).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/status/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], JobStatus::Failed.as_str());
    assert!(json["error"].as_str().unwrap().contains("timeout"));
}
