//! Handlers for AI generation: captions, social graphics, thumbnails.
//!
//! Captions and thumbnails are best-effort: provider failures degrade
//! to a deterministic fallback with the response `source` saying so.
//! Explicit graphics requests surface provider failures as 502.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::json;

use inflio_core::error::CoreError;
use inflio_core::platform::Platform;
use inflio_core::upload::simulated_progress;

use crate::auth::CurrentUser;
use crate::clients::generation::{fallback_caption, GenerationError};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Budget for streamed thumbnail generation; drives the progress curve.
const THUMBNAIL_BUDGET_MS: u64 = 60_000;

/// Interval between streamed progress events.
const PROGRESS_TICK: Duration = Duration::from_millis(400);

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

/// Request body for caption generation.
#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    pub platform: String,
    pub content_summary: String,
    pub tone: Option<String>,
}

/// A generated (or fallback) caption.
#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    pub caption: String,
    pub hashtags: Vec<String>,
    /// `generated` or `fallback`.
    pub source: &'static str,
}

/// POST /api/v1/generate/caption
pub async fn caption(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<CaptionRequest>,
) -> AppResult<Json<DataResponse<CaptionResponse>>> {
    let platform = Platform::from_str_value(&input.platform).map_err(CoreError::Validation)?;
    if input.content_summary.trim().is_empty() {
        return Err(CoreError::Validation("content_summary must not be empty".into()).into());
    }

    let response = match state
        .generation
        .generate_caption(platform, &input.content_summary, input.tone.as_deref())
        .await
    {
        Ok(generated) => CaptionResponse {
            caption: generated.caption,
            hashtags: generated.hashtags,
            source: "generated",
        },
        Err(err) => {
            tracing::warn!(error = %err, "Caption generation failed, using fallback");
            let fallback = fallback_caption(platform, &input.content_summary);
            CaptionResponse {
                caption: fallback.caption,
                hashtags: fallback.hashtags,
                source: "fallback",
            }
        }
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// Social graphics
// ---------------------------------------------------------------------------

/// Request body for social graphics generation.
#[derive(Debug, Deserialize)]
pub struct GraphicsRequest {
    pub prompt: String,
    pub count: Option<u8>,
}

/// Generated graphic URLs from the provider.
#[derive(Debug, Serialize)]
pub struct GraphicsResponse {
    pub images: Vec<String>,
}

/// POST /api/v1/generate/social-graphics
pub async fn social_graphics(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<GraphicsRequest>,
) -> AppResult<Json<DataResponse<GraphicsResponse>>> {
    if input.prompt.trim().is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".into()).into());
    }
    let count = input.count.unwrap_or(1).clamp(1, 4);

    let images = state
        .generation
        .generate_images(&input.prompt, count)
        .await
        .map_err(|err| match err {
            GenerationError::MissingKey => {
                AppError::Upstream("Generation provider is not configured".into())
            }
            other => AppError::Upstream(other.to_string()),
        })?;

    Ok(Json(DataResponse {
        data: GraphicsResponse { images },
    }))
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

/// Request body for thumbnail generation.
#[derive(Debug, Deserialize)]
pub struct ThumbnailRequest {
    pub prompt: String,
}

/// A thumbnail result; `thumbnail_url` is null when the provider failed
/// and the client should fall back to a frame grab.
#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub thumbnail_url: Option<String>,
    pub source: &'static str,
}

fn thumbnail_outcome(result: Result<Vec<String>, GenerationError>) -> ThumbnailResponse {
    match result {
        Ok(urls) if !urls.is_empty() => ThumbnailResponse {
            thumbnail_url: urls.into_iter().next(),
            source: "generated",
        },
        Ok(_) => ThumbnailResponse {
            thumbnail_url: None,
            source: "fallback",
        },
        Err(err) => {
            tracing::warn!(error = %err, "Thumbnail generation failed, using fallback");
            ThumbnailResponse {
                thumbnail_url: None,
                source: "fallback",
            }
        }
    }
}

/// POST /api/v1/generate/thumbnail
pub async fn thumbnail(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<ThumbnailRequest>,
) -> AppResult<Json<DataResponse<ThumbnailResponse>>> {
    if input.prompt.trim().is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".into()).into());
    }
    let outcome = thumbnail_outcome(state.generation.generate_images(&input.prompt, 1).await);
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/generate/thumbnail/stream
///
/// SSE variant: emits `progress` events on a fixed tick while the
/// provider call runs, then one `complete` event. Progress is simulated
/// (the provider reports nothing mid-flight) and plateaus below 100
/// until completion.
pub async fn thumbnail_stream(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(input): Json<ThumbnailRequest>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    if input.prompt.trim().is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".into()).into());
    }

    let (tx, rx) = futures::channel::mpsc::unbounded();
    let generation = Arc::clone(&state.generation);

    tokio::spawn(async move {
        let started = Instant::now();
        let mut work = Box::pin(async move { generation.generate_images(&input.prompt, 1).await });

        loop {
            tokio::select! {
                result = &mut work => {
                    let outcome = thumbnail_outcome(result);
                    let payload = json!({
                        "type": "complete",
                        "thumbnail_url": outcome.thumbnail_url,
                        "source": outcome.source,
                    });
                    let event = Event::default().event("complete").data(payload.to_string());
                    let _ = tx.unbounded_send(Ok(event));
                    break;
                }
                _ = tokio::time::sleep(PROGRESS_TICK) => {
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    let progress = simulated_progress(elapsed_ms, THUMBNAIL_BUDGET_MS);
                    let payload = json!({ "type": "progress", "progress": progress });
                    let event = Event::default().event("progress").data(payload.to_string());
                    if tx.unbounded_send(Ok(event)).is_err() {
                        // Client went away; stop generating events.
                        break;
                    }
                }
            }
        }
    });

    Ok(Sse::new(rx).keep_alive(KeepAlive::default()))
}
