//! Handler for source-video uploads.
//!
//! The global request timeout does not apply here; each upload gets a
//! budget scaled to the file size, and blowing the budget cancels the
//! storage write by dropping its future.

use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use inflio_core::upload::{
    default_title_from_filename, upload_timeout_budget_ms, validate_video, video_object_path,
};
use inflio_storage::VIDEOS_BUCKET;

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned by a successful video upload.
#[derive(Debug, Serialize)]
pub struct UploadedVideo {
    /// Public URL of the stored object.
    pub url: String,
    /// Object path within the videos bucket.
    pub path: String,
    /// Title derived from the original filename, as a starting point
    /// for the project form.
    pub title: String,
    /// The timeout budget this upload was granted, in milliseconds.
    pub timeout_budget_ms: u64,
}

/// POST /api/v1/uploads/video
///
/// Multipart upload with a single `file` field. Validates type and size
/// before touching storage, then writes under a size-scaled deadline.
pub async fn upload_video(
    State(state): State<AppState>,
    _user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadedVideo>>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("video").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        file = Some((filename, content_type, bytes.to_vec()));
        break;
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    validate_video(&content_type, bytes.len() as u64)?;

    let budget_ms = upload_timeout_budget_ms(bytes.len() as u64);
    let timestamp_ms = chrono::Utc::now().timestamp_millis();
    let path = video_object_path(&filename, timestamp_ms);
    let title = default_title_from_filename(&filename);

    tracing::info!(
        path = %path,
        size_bytes = bytes.len(),
        budget_ms,
        "Starting video upload"
    );

    let put = state
        .storage
        .put(VIDEOS_BUCKET, &path, bytes, &content_type);

    let object = match tokio::time::timeout(Duration::from_millis(budget_ms), put).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(AppError::Timeout(format!(
                "Upload did not finish within its {} minute budget",
                budget_ms / 60_000
            )));
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedVideo {
                url: object.public_url,
                path: object.path,
                title,
                timeout_budget_ms: budget_ms,
            },
        }),
    ))
}
