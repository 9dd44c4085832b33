//! Route definitions for the `/personas` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::personas;
use crate::state::AppState;

/// Routes mounted at `/personas`.
///
/// ```text
/// GET    /              -> list
/// GET    /check         -> check
/// POST   /from-photos   -> create_from_photos
/// PATCH  /{id}/status   -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(personas::list))
        .route("/check", get(personas::check))
        .route("/from-photos", post(personas::create_from_photos))
        .route("/{id}/status", patch(personas::set_status))
}
