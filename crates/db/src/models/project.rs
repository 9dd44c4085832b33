//! Project entity model and DTOs.

use inflio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: String,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    /// Video metadata extracted at upload time (duration, width, height,
    /// format).
    pub metadata: serde_json::Value,
    /// Which derivative content types to generate for this project.
    pub workflow_options: serde_json::Value,
    pub persona_id: Option<DbId>,
    pub brand_settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub workflow_options: serde_json::Value,
    pub persona_id: Option<DbId>,
    #[serde(default)]
    pub brand_settings: serde_json::Value,
}
