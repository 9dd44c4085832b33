//! Repository for the `staged_items` table.

use inflio_core::staging::StagedContentItem;
use inflio_core::types::DbId;
use sqlx::PgPool;

use crate::models::staged_item::StagedItemRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, item_id, content_type, title, description, platforms, \
     platform_content, original_data, selected, created_at, updated_at";

/// Provides persistence for staging sessions.
pub struct StagedItemRepo;

impl StagedItemRepo {
    /// Insert or replace one staged item within a project.
    ///
    /// Upserts on `(project_id, item_id)` so repeated saves of the same
    /// session item overwrite the previous field values.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        item: &StagedContentItem,
        selected: bool,
    ) -> Result<StagedItemRow, sqlx::Error> {
        let platforms = serde_json::to_value(&item.platforms)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let platform_content = serde_json::to_value(&item.platform_content)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let query = format!(
            "INSERT INTO staged_items
                (project_id, item_id, content_type, title, description,
                 platforms, platform_content, original_data, selected)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT ON CONSTRAINT uq_staged_items_project_item
             DO UPDATE SET
                content_type = EXCLUDED.content_type,
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                platforms = EXCLUDED.platforms,
                platform_content = EXCLUDED.platform_content,
                original_data = EXCLUDED.original_data,
                selected = EXCLUDED.selected,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StagedItemRow>(&query)
            .bind(project_id)
            .bind(&item.id)
            .bind(item.content_type.as_str())
            .bind(&item.title)
            .bind(&item.description)
            .bind(platforms)
            .bind(platform_content)
            .bind(&item.original_data)
            .bind(selected)
            .fetch_one(pool)
            .await
    }

    /// List every staged item for a project in insertion order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<StagedItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM staged_items WHERE project_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, StagedItemRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update the selection flag for one item. Returns `true` if a row
    /// was updated.
    pub async fn set_selected(
        pool: &PgPool,
        project_id: DbId,
        item_id: &str,
        selected: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE staged_items SET selected = $3, updated_at = NOW()
             WHERE project_id = $1 AND item_id = $2",
        )
        .bind(project_id)
        .bind(item_id)
        .bind(selected)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every staged item for a project (session discard).
    pub async fn delete_for_project(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM staged_items WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
