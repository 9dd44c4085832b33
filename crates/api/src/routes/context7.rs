//! Route definitions for documentation search.

use axum::routing::post;
use axum::Router;

use crate::handlers::context7;
use crate::state::AppState;

/// Routes mounted at `/context7`.
///
/// ```text
/// POST /search -> search
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(context7::search))
}
