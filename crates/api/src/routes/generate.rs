//! Route definitions for AI generation.

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST /caption           -> caption
/// POST /social-graphics   -> social_graphics
/// POST /thumbnail         -> thumbnail
/// POST /thumbnail/stream  -> thumbnail_stream (SSE)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/caption", post(generate::caption))
        .route("/social-graphics", post(generate::social_graphics))
        .route("/thumbnail", post(generate::thumbnail))
        .route("/thumbnail/stream", post(generate::thumbnail_stream))
}
