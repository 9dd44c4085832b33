//! Handlers for onboarding step derivation.
//!
//! Step statuses are derived from the profile flags on every request;
//! nothing derived is ever written back to the database.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use inflio_core::error::CoreError;
use inflio_core::onboarding::{self, DerivedStep, OnboardingStepId};
use inflio_db::repositories::{ProfileRepo, ProjectRepo};

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Derive the full step list for the caller.
async fn derive_for_user(state: &AppState, user_id: &str) -> AppResult<Vec<DerivedStep>> {
    let profile = ProfileRepo::find_or_create(&state.pool, user_id).await?;
    let has_project = ProjectRepo::exists_for_user(&state.pool, user_id).await?;
    Ok(onboarding::derive_steps(&profile.flags(), has_project))
}

/// GET /api/v1/onboarding/steps
pub async fn get_steps(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<Vec<DerivedStep>>>> {
    let steps = derive_for_user(&state, user.id()).await?;
    Ok(Json(DataResponse { data: steps }))
}

/// Request body for marking an onboarding flag.
#[derive(Debug, Deserialize)]
pub struct MarkReviewed {
    pub field: String,
}

/// POST /api/v1/onboarding/mark-reviewed
///
/// Sets one profile flag, then answers with the freshly derived step
/// list so the client never has to compute statuses itself.
pub async fn mark_reviewed(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<MarkReviewed>,
) -> AppResult<Json<DataResponse<Vec<DerivedStep>>>> {
    onboarding::validate_reviewed_field(&input.field)?;

    // Ensure the row exists before the targeted update.
    ProfileRepo::find_or_create(&state.pool, user.id()).await?;
    ProfileRepo::mark_flag(&state.pool, user.id(), &input.field)
        .await?
        .ok_or_else(|| AppError::InternalError("Profile row missing after creation".into()))?;

    let steps = derive_for_user(&state, user.id()).await?;
    Ok(Json(DataResponse { data: steps }))
}

/// POST /api/v1/onboarding/steps/{step}/enter
///
/// Gate for wizard navigation: entering an `upcoming` step is rejected
/// with a message naming the current step.
pub async fn enter_step(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(step): Path<String>,
) -> AppResult<StatusCode> {
    let target = OnboardingStepId::from_str_value(&step).map_err(CoreError::Validation)?;
    let steps = derive_for_user(&state, user.id()).await?;
    onboarding::check_step_entry(&steps, target)?;
    Ok(StatusCode::NO_CONTENT)
}
