//! Handlers for content staging: validation, readiness, persistence.
//!
//! Derived state submitted by clients is never trusted: every item is
//! recomputed server-side before validation or persistence, so a stale
//! or tampered `is_valid` can never unlock the proceed action.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use inflio_core::error::CoreError;
use inflio_core::staging::{self, Readiness, StagedContentItem};
use inflio_core::types::DbId;
use inflio_db::models::staged_item::UpsertStagedItem;
use inflio_db::repositories::{ProjectRepo, StagedItemRepo};

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Recompute the derived fields of every platform entry in place.
fn recompute_items(items: &mut [StagedContentItem]) {
    for item in items.iter_mut() {
        for (platform, fields) in item.platform_content.iter_mut() {
            fields.recompute(*platform);
        }
    }
}

/// Request body for session-level validation.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub items: Vec<StagedContentItem>,
}

/// Full validation report for a staging session.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Blocking errors, keyed by item id. Items without errors are absent.
    pub errors: BTreeMap<String, Vec<String>>,
    /// Non-blocking advisories, keyed by item id.
    pub advisories: BTreeMap<String, Vec<String>>,
    pub readiness: Readiness,
    /// The recomputed items, so the client can replace its local copies.
    pub items: Vec<StagedContentItem>,
}

/// POST /api/v1/staging/validate
pub async fn validate(
    Json(mut input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    recompute_items(&mut input.items);

    let errors = staging::validate_all_content(&input.items);
    let mut advisories = BTreeMap::new();
    for item in &input.items {
        let notes = staging::item_advisories(item);
        if !notes.is_empty() {
            advisories.insert(item.id.clone(), notes);
        }
    }
    let readiness = staging::compute_readiness(&input.items);

    Ok(Json(DataResponse {
        data: ValidationReport {
            errors,
            advisories,
            readiness,
            items: input.items,
        },
    }))
}

/// POST /api/v1/staging/proceed
///
/// The publish gate: rejects unless every item is ready, naming the
/// first blocking error so the user knows where to look.
pub async fn proceed(
    Json(mut input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<Readiness>>> {
    recompute_items(&mut input.items);

    let readiness = staging::compute_readiness(&input.items);
    if !readiness.can_proceed() {
        if let Some((item_id, error)) = staging::first_blocking_error(&input.items) {
            return Err(CoreError::Validation(format!("{item_id}: {error}")).into());
        }
        return Err(CoreError::Validation("No content staged for publishing".into()).into());
    }

    Ok(Json(DataResponse { data: readiness }))
}

/// GET /api/v1/projects/{project_id}/staged-items/readiness
///
/// Stored-rows variant of `validate`: reports on what is persisted
/// rather than on a posted payload.
pub async fn project_readiness(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    require_project(&state, user.id(), project_id).await?;

    let rows = StagedItemRepo::list_for_project(&state.pool, project_id).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        items.push(
            row.to_domain()
                .map_err(|e| AppError::InternalError(format!("Corrupt staged item row: {e}")))?,
        );
    }
    recompute_items(&mut items);

    let errors = staging::validate_all_content(&items);
    let mut advisories = BTreeMap::new();
    for item in &items {
        let notes = staging::item_advisories(item);
        if !notes.is_empty() {
            advisories.insert(item.id.clone(), notes);
        }
    }
    let readiness = staging::compute_readiness(&items);

    Ok(Json(DataResponse {
        data: ValidationReport {
            errors,
            advisories,
            readiness,
            items,
        },
    }))
}

/// One persisted staged item in API shape.
#[derive(Debug, Serialize)]
pub struct StagedItemView {
    pub item: StagedContentItem,
    pub selected: bool,
}

/// Verify project ownership before touching its staged items.
async fn require_project(state: &AppState, user_id: &str, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, user_id, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;
    Ok(())
}

/// GET /api/v1/projects/{project_id}/staged-items
pub async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StagedItemView>>>> {
    require_project(&state, user.id(), project_id).await?;

    let rows = StagedItemRepo::list_for_project(&state.pool, project_id).await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in &rows {
        let item = row
            .to_domain()
            .map_err(|e| AppError::InternalError(format!("Corrupt staged item row: {e}")))?;
        views.push(StagedItemView {
            item,
            selected: row.selected,
        });
    }
    Ok(Json(DataResponse { data: views }))
}

/// Request body for saving a staging session.
#[derive(Debug, Deserialize)]
pub struct SaveItemsRequest {
    pub items: Vec<UpsertStagedItem>,
}

/// PUT /api/v1/projects/{project_id}/staged-items
///
/// Replaces field values item by item (upsert on the session item id).
pub async fn save_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<SaveItemsRequest>,
) -> AppResult<Json<DataResponse<Vec<StagedItemView>>>> {
    require_project(&state, user.id(), project_id).await?;

    let mut views = Vec::with_capacity(input.items.len());
    for entry in input.items {
        let mut item = entry.item;
        for (platform, fields) in item.platform_content.iter_mut() {
            fields.recompute(*platform);
        }
        let row = StagedItemRepo::upsert(&state.pool, project_id, &item, entry.selected).await?;
        views.push(StagedItemView {
            item,
            selected: row.selected,
        });
    }
    Ok(Json(DataResponse { data: views }))
}

/// Request body for toggling item selection.
#[derive(Debug, Deserialize)]
pub struct SetSelected {
    pub selected: bool,
}

/// PATCH /api/v1/projects/{project_id}/staged-items/{item_id}/selected
pub async fn set_selected(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((project_id, item_id)): Path<(DbId, String)>,
    Json(input): Json<SetSelected>,
) -> AppResult<StatusCode> {
    require_project(&state, user.id(), project_id).await?;

    let updated =
        StagedItemRepo::set_selected(&state.pool, project_id, &item_id, input.selected).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(sqlx::Error::RowNotFound.into())
    }
}

/// DELETE /api/v1/projects/{project_id}/staged-items
pub async fn clear_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_project(&state, user.id(), project_id).await?;

    let removed = StagedItemRepo::delete_for_project(&state.pool, project_id).await?;
    tracing::debug!(project_id, removed, "Cleared staging session");
    Ok(StatusCode::NO_CONTENT)
}
