//! Staged content item persistence model.
//!
//! Staging sessions survive reloads: each [`StagedContentItem`] an item
//! targets is stored per project, with the per-platform field values as
//! JSONB. The domain representation in `inflio_core::staging` is the
//! working form; these rows are its durable shape.

use inflio_core::staging::StagedContentItem;
use inflio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A staged item row from the `staged_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StagedItemRow {
    pub id: DbId,
    pub project_id: DbId,
    /// Session-scoped item identifier (unique per project).
    pub item_id: String,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub platforms: serde_json::Value,
    pub platform_content: serde_json::Value,
    pub original_data: serde_json::Value,
    /// Whether the item is selected for publishing.
    pub selected: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StagedItemRow {
    /// Rehydrate the domain item from this row.
    pub fn to_domain(&self) -> Result<StagedContentItem, serde_json::Error> {
        Ok(StagedContentItem {
            id: self.item_id.clone(),
            content_type: serde_json::from_value(serde_json::Value::String(
                self.content_type.clone(),
            ))?,
            title: self.title.clone(),
            description: self.description.clone(),
            platforms: serde_json::from_value(self.platforms.clone())?,
            platform_content: serde_json::from_value(self.platform_content.clone())?,
            original_data: self.original_data.clone(),
        })
    }
}

/// DTO for upserting a staged item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertStagedItem {
    pub item: StagedContentItem,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}
