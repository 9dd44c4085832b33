//! Handlers for the `/projects` resource.
//!
//! Project creation is the one place plan usage is enforced: the check
//! and the increment happen here, server-side, so a stale client can
//! never mint a project past its plan limit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use inflio_core::error::CoreError;
use inflio_core::types::DbId;
use inflio_db::models::profile::Usage;
use inflio_db::models::project::{CreateProject, Project};
use inflio_db::repositories::{ProfileRepo, ProjectRepo};

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned by project creation: the row plus updated usage.
#[derive(Debug, Serialize)]
pub struct CreatedProject {
    pub project: Project,
    pub usage: Usage,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedProject>>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("Project title must not be empty".into()).into());
    }
    if input.video_url.trim().is_empty() {
        return Err(CoreError::Validation("Project video_url must not be empty".into()).into());
    }

    let profile = ProfileRepo::find_or_create(&state.pool, user.id()).await?;
    if !profile.has_usage_remaining() {
        return Err(CoreError::Forbidden(format!(
            "Plan limit reached ({}/{} videos used)",
            profile.usage_used, profile.usage_limit
        ))
        .into());
    }

    // The real gate: consume a usage unit and create the row in one
    // transaction. The conditional update holds under concurrent
    // creates, where the check above is only a fast path.
    let mut tx = state.pool.begin().await?;
    let Some(profile) = ProfileRepo::try_consume_usage(&mut *tx, user.id()).await? else {
        return Err(CoreError::Forbidden(format!(
            "Plan limit reached ({}/{} videos used)",
            profile.usage_used, profile.usage_limit
        ))
        .into());
    };
    let project = ProjectRepo::create(&mut *tx, user.id(), &input).await?;
    tx.commit().await?;

    tracing::info!(
        project_id = project.id,
        usage_used = profile.usage_used,
        "Project created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedProject {
                project,
                usage: Usage::from(&profile),
            },
        }),
    ))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_for_user(&state.pool, user.id()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, user.id(), id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id,
        })?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::soft_delete(&state.pool, user.id(), id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Project",
            id,
        }
        .into())
    }
}
