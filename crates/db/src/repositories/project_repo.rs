//! Repository for the `projects` table.

use inflio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, video_url, thumbnail_url, metadata, \
     workflow_options, persona_id, brand_settings, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Takes an executor so callers can run it inside a transaction
    /// alongside the plan-usage update.
    pub async fn create<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        user_id: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (user_id, title, video_url, thumbnail_url, metadata,
                 workflow_options, persona_id, brand_settings)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.metadata)
            .bind(&input.workflow_options)
            .bind(input.persona_id)
            .bind(&input.brand_settings)
            .fetch_one(executor)
            .await
    }

    /// Find a project by ID for a user. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: &str,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recent first. Excludes soft-deleted
    /// rows.
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user has at least one project (drives the final
    /// onboarding step).
    pub async fn exists_for_user(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE user_id = $1 AND deleted_at IS NULL)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Soft-delete a project. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, user_id: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
