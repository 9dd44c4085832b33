//! Handlers for the `/personas` resource.
//!
//! Persona creation fetches the supplied photo URLs, scores and stores
//! each one, and only then inserts the row. Individual photo failures
//! are logged and skipped; the row is created only when enough photos
//! survive for training.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use inflio_core::avatar::{self, MAX_PHOTOS, MIN_PHOTOS};
use inflio_core::error::CoreError;
use inflio_core::photo_quality::{self, PhotoQuality, QualityWeights};
use inflio_core::types::DbId;
use inflio_core::upload::persona_photo_path;
use inflio_db::models::persona::{
    CreatePersona, Persona, PERSONA_STATUS_ANALYZING, PERSONA_STATUS_FAILED, PERSONA_STATUS_READY,
};
use inflio_db::repositories::PersonaRepo;
use inflio_storage::PERSONA_PHOTOS_BUCKET;

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/personas
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<Vec<Persona>>>> {
    let personas = PersonaRepo::list_for_user(&state.pool, user.id()).await?;
    Ok(Json(DataResponse { data: personas }))
}

/// Answer for the ready-persona check.
#[derive(Debug, Serialize)]
pub struct PersonaCheck {
    pub has_ready_persona: bool,
    pub persona: Option<Persona>,
}

/// GET /api/v1/personas/check
pub async fn check(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<PersonaCheck>>> {
    let persona = PersonaRepo::find_ready_for_user(&state.pool, user.id()).await?;
    Ok(Json(DataResponse {
        data: PersonaCheck {
            has_ready_persona: persona.is_some(),
            persona,
        },
    }))
}

/// Request body for creating a persona from captured/uploaded photos.
#[derive(Debug, Deserialize)]
pub struct CreateFromPhotos {
    pub name: String,
    pub description: Option<String>,
    pub photo_urls: Vec<String>,
}

/// One stored training photo with its quality score.
#[derive(Debug, Serialize)]
pub struct StoredPhoto {
    pub url: String,
    pub quality: PhotoQuality,
}

/// Payload returned by persona creation.
#[derive(Debug, Serialize)]
pub struct CreatedPersona {
    pub persona: Persona,
    pub photos: Vec<StoredPhoto>,
    pub skipped: usize,
}

/// POST /api/v1/personas/from-photos
///
/// Fetches each photo URL, validates and scores it, and stores it under
/// the persona-photos bucket. A photo that cannot be fetched, is not an
/// image, or is oversized is skipped (logged, not fatal). The persona
/// row is only created when at least the training floor of photos
/// survived; otherwise the whole request fails with 400 and no row.
pub async fn create_from_photos(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateFromPhotos>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedPersona>>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Persona name must not be empty".into()).into());
    }
    if input.photo_urls.len() < MIN_PHOTOS {
        return Err(CoreError::Validation(format!(
            "At least {MIN_PHOTOS} photos are required, got {}",
            input.photo_urls.len()
        ))
        .into());
    }
    if input.photo_urls.len() > MAX_PHOTOS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_PHOTOS} photos are allowed, got {}",
            input.photo_urls.len()
        ))
        .into());
    }

    let attempted = input.photo_urls.len();
    let timestamp_ms = chrono::Utc::now().timestamp_millis();
    let weights = QualityWeights::default();
    let mut stored = Vec::new();

    for (index, url) in input.photo_urls.iter().enumerate() {
        match fetch_and_store_photo(&state, user.id(), url, timestamp_ms, index, &weights).await {
            Ok(photo) => stored.push(photo),
            Err(reason) => {
                tracing::warn!(url = %url, reason = %reason, "Skipping persona photo");
            }
        }
    }

    avatar::check_training_floor(stored.len(), attempted)?;

    let persona = PersonaRepo::create(
        &state.pool,
        user.id(),
        &CreatePersona {
            name: input.name,
            description: input.description,
            photo_urls: stored.iter().map(|p| p.url.clone()).collect(),
        },
    )
    .await?;

    tracing::info!(
        persona_id = persona.id,
        stored = stored.len(),
        skipped = attempted - stored.len(),
        "Persona created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedPersona {
                persona,
                skipped: attempted - stored.len(),
                photos: stored,
            },
        }),
    ))
}

/// Fetch one photo, validate it, score it, and store it.
///
/// Returns a human-readable reason on failure; callers log and skip.
async fn fetch_and_store_photo(
    state: &AppState,
    user_id: &str,
    url: &str,
    timestamp_ms: i64,
    index: usize,
    weights: &QualityWeights,
) -> Result<StoredPhoto, String> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| format!("fetch failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("fetch returned {}", response.status()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("read failed: {e}"))?;

    avatar::validate_photo_file(&content_type, bytes.len() as u64).map_err(|e| e.to_string())?;

    let quality = photo_quality::score_image(&bytes, weights);

    let path = persona_photo_path(user_id, timestamp_ms, index);
    let object = state
        .storage
        .put(PERSONA_PHOTOS_BUCKET, &path, bytes.to_vec(), &content_type)
        .await
        .map_err(|e| format!("store failed: {e}"))?;

    Ok(StoredPhoto {
        url: object.public_url,
        quality,
    })
}

/// Request body for updating persona status (training pipeline webhook).
#[derive(Debug, Deserialize)]
pub struct SetStatus {
    pub status: String,
}

/// PATCH /api/v1/personas/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatus>,
) -> AppResult<Json<DataResponse<Persona>>> {
    let allowed = [
        PERSONA_STATUS_ANALYZING,
        PERSONA_STATUS_READY,
        PERSONA_STATUS_FAILED,
    ];
    if !allowed.contains(&input.status.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid status '{}'. Must be one of: {allowed:?}",
            input.status
        ))
        .into());
    }

    let persona = PersonaRepo::set_status(&state.pool, user.id(), id, &input.status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Persona",
            id,
        })?;
    Ok(Json(DataResponse { data: persona }))
}
