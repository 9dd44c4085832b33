//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped staging session routes under
//! `/projects/{project_id}/staged-items`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{projects, staging};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                       -> list
/// POST   /                                       -> create
/// GET    /{id}                                   -> get_by_id
/// DELETE /{id}                                   -> delete
///
/// GET    /{project_id}/staged-items              -> list_items
/// PUT    /{project_id}/staged-items              -> save_items
/// DELETE /{project_id}/staged-items              -> clear_items
/// GET    /{project_id}/staged-items/readiness    -> project_readiness
/// PATCH  /{project_id}/staged-items/{item_id}/selected -> set_selected
/// ```
pub fn router() -> Router<AppState> {
    let staged_item_routes = Router::new()
        .route(
            "/",
            get(staging::list_items)
                .put(staging::save_items)
                .delete(staging::clear_items),
        )
        .route("/readiness", get(staging::project_readiness))
        .route("/{item_id}/selected", patch(staging::set_selected));

    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/{id}", get(projects::get_by_id).delete(projects::delete))
        .nest("/{project_id}/staged-items", staged_item_routes)
}
