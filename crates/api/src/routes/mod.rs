//! Route definitions, one module per resource.

use axum::Router;

use crate::state::AppState;

pub mod context7;
pub mod generate;
pub mod health;
pub mod onboarding;
pub mod personas;
pub mod projects;
pub mod staging;
pub mod uploads;

/// Routes mounted under `/api/v1` that share the flat request timeout.
///
/// The uploads router is not included here: it is mounted separately by
/// `build_app_router` so the size-scaled upload deadline is the only
/// one in effect on that path.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects::router())
        .nest("/personas", personas::router())
        .nest("/onboarding", onboarding::router())
        .nest("/staging", staging::router())
        .nest("/generate", generate::router())
        .nest("/context7", context7::router())
}
