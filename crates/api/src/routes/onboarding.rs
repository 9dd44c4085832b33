//! Route definitions for onboarding.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET  /steps               -> get_steps
/// POST /mark-reviewed       -> mark_reviewed
/// POST /steps/{step}/enter  -> enter_step
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/steps", get(onboarding::get_steps))
        .route("/mark-reviewed", post(onboarding::mark_reviewed))
        .route("/steps/{step}/enter", post(onboarding::enter_step))
}
