//! Integration tests for the video upload endpoint against the
//! in-memory storage provider.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use inflio_storage::{MemoryProvider, StorageError, StorageProvider, StoredObject};

const BOUNDARY: &str = "test-boundary";

/// Build a multipart body with a single field.
fn multipart_body(field_name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    storage: Arc<MemoryProvider>,
    field_name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> (StatusCode, Value) {
    let app = common::build_test_app(storage);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/uploads/video")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("x-user-id", "user-1")
        .body(Body::from(multipart_body(
            field_name,
            filename,
            content_type,
            bytes,
        )))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: accepted video lands in the videos bucket with a derived title
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_stores_video_and_derives_title() {
    let storage = Arc::new(MemoryProvider::new());
    let (status, json) = upload(
        Arc::clone(&storage),
        "file",
        "My Launch Video.mp4",
        "video/mp4",
        b"fake mp4 bytes",
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["title"], "My Launch Video");
    assert_eq!(storage.len(), 1);

    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("memory://videos/"));
    assert!(url.ends_with("-my-launch-video.mp4"));

    // Small file: one size block over the 5 minute base.
    assert_eq!(json["data"]["timeout_budget_ms"], 360_000);
}

// ---------------------------------------------------------------------------
// Test: non-video content type is rejected before touching storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_rejects_unsupported_content_type() {
    let storage = Arc::new(MemoryProvider::new());
    let (status, json) = upload(
        Arc::clone(&storage),
        "file",
        "notes.txt",
        "text/plain",
        b"not a video",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(storage.is_empty());
}

// ---------------------------------------------------------------------------
// Test: request without a `file` field is a 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let storage = Arc::new(MemoryProvider::new());
    let (status, json) = upload(
        Arc::clone(&storage),
        "attachment",
        "clip.mp4",
        "video/mp4",
        b"bytes",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Missing 'file' field");
}

// ---------------------------------------------------------------------------
// Test: storage failure surfaces as 502, not a hang or a 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_storage_failure_returns_502() {
    let storage = Arc::new(MemoryProvider::new());
    // The object path is `{timestamp}-clip.webm`; fail it by suffix.
    storage.fail_path("-clip.webm");

    let (status, json) = upload(
        Arc::clone(&storage),
        "file",
        "clip.webm",
        "video/webm",
        b"webm bytes",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert!(storage.is_empty());
}

// ---------------------------------------------------------------------------
// Test: uploads answer to their own deadline, not the flat request timeout
// ---------------------------------------------------------------------------

/// Storage whose writes stall before landing in the in-memory store.
struct StallingStorage {
    inner: MemoryProvider,
    delay: Duration,
}

#[async_trait]
impl StorageProvider for StallingStorage {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(bucket, path, bytes, content_type).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.inner.public_url(bucket, path)
    }
}

#[tokio::test]
async fn upload_outlasting_flat_request_timeout_still_succeeds() {
    let mut config = common::test_config();
    config.request_timeout_secs = 1;

    // Transfer takes 2s; the upload's own budget (6 minutes for a tiny
    // file) is the only deadline that may apply.
    let storage = Arc::new(StallingStorage {
        inner: MemoryProvider::new(),
        delay: Duration::from_secs(2),
    });
    let app = common::build_app_with(
        common::lazy_pool(),
        config,
        Arc::clone(&storage) as Arc<dyn StorageProvider>,
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/uploads/video")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("x-user-id", "user-1")
        .body(Body::from(multipart_body(
            "file",
            "slow-clip.mp4",
            "video/mp4",
            b"fake mp4 bytes",
        )))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(storage.inner.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: missing identity header is rejected before reading the body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_requires_user_identity() {
    let app = common::test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/uploads/video")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(
            "file",
            "clip.mp4",
            "video/mp4",
            b"bytes",
        )))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
