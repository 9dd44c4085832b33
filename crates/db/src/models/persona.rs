//! Persona entity model and DTOs.

use inflio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persona training/availability status values.
pub const PERSONA_STATUS_ANALYZING: &str = "analyzing";
pub const PERSONA_STATUS_READY: &str = "ready";
pub const PERSONA_STATUS_FAILED: &str = "failed";

/// A persona row from the `personas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Persona {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// `analyzing`, `ready`, or `failed`.
    pub status: String,
    /// Storage URLs of the training photos that were uploaded
    /// successfully.
    pub photo_urls: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a persona after its photos have been stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersona {
    pub name: String,
    pub description: Option<String>,
    pub photo_urls: Vec<String>,
}
