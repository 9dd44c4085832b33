//! Route definitions for session-level staging validation.
//!
//! Persistence routes live under `/projects/{project_id}/staged-items`;
//! these are the stateless validation and proceed-gate endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::staging;
use crate::state::AppState;

/// Routes mounted at `/staging`.
///
/// ```text
/// POST /validate -> validate
/// POST /proceed  -> proceed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(staging::validate))
        .route("/proceed", post(staging::proceed))
}
