//! Route definitions for uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use inflio_core::upload::MAX_VIDEO_BYTES;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// The default 2 MB multipart body limit is raised here to the video
/// size cap (plus framing slack); size policy itself is enforced in the
/// handler with a proper error body.
///
/// ```text
/// POST /video -> upload_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/video", post(uploads::upload_video))
        .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES as usize + 64 * 1024))
}
