//! Repository for the `personas` table.

use inflio_core::types::DbId;
use sqlx::PgPool;

use crate::models::persona::{CreatePersona, Persona, PERSONA_STATUS_READY};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, description, status, photo_urls, created_at, updated_at";

/// Provides CRUD operations for personas.
pub struct PersonaRepo;

impl PersonaRepo {
    /// Insert a new persona in `analyzing` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: &CreatePersona,
    ) -> Result<Persona, sqlx::Error> {
        let query = format!(
            "INSERT INTO personas (user_id, name, description, photo_urls)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(serde_json::json!(input.photo_urls))
            .fetch_one(pool)
            .await
    }

    /// List a user's personas, most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Persona>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personas WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's most recent `ready` persona, if any.
    pub async fn find_ready_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personas
             WHERE user_id = $1 AND status = $2
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(user_id)
            .bind(PERSONA_STATUS_READY)
            .fetch_optional(pool)
            .await
    }

    /// Update a persona's status. Returns the updated row if the user
    /// owns a persona with that id.
    pub async fn set_status(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
        status: &str,
    ) -> Result<Option<Persona>, sqlx::Error> {
        let query = format!(
            "UPDATE personas SET status = $3, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Persona>(&query)
            .bind(id)
            .bind(user_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
