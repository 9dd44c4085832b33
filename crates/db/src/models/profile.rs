//! User profile model: onboarding flags and plan usage.

use inflio_core::onboarding::ProfileFlags;
use inflio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A profile row from the `profiles` table.
///
/// One row per user; created lazily on first access. The boolean flags
/// are the source of truth that onboarding step statuses are derived
/// from -- derived statuses are never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: String,
    pub onboarding_completed: bool,
    pub brand_reviewed: bool,
    pub brand_analysis_skipped: bool,
    pub persona_reviewed: bool,
    pub persona_skipped: bool,
    pub socials_connected: bool,
    pub socials_skipped: bool,
    pub usage_used: i32,
    pub usage_limit: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// The flag subset the onboarding deriver consumes.
    pub fn flags(&self) -> ProfileFlags {
        ProfileFlags {
            onboarding_completed: self.onboarding_completed,
            brand_reviewed: self.brand_reviewed,
            brand_analysis_skipped: self.brand_analysis_skipped,
            persona_reviewed: self.persona_reviewed,
            persona_skipped: self.persona_skipped,
            socials_connected: self.socials_connected,
            socials_skipped: self.socials_skipped,
        }
    }

    /// Whether another project can be created under the current plan.
    pub fn has_usage_remaining(&self) -> bool {
        self.usage_used < self.usage_limit
    }
}

/// Plan usage summary returned alongside project creation.
#[derive(Debug, Clone, Serialize)]
pub struct Usage {
    pub used: i32,
    pub limit: i32,
}

impl From<&Profile> for Usage {
    fn from(profile: &Profile) -> Self {
        Self {
            used: profile.usage_used,
            limit: profile.usage_limit,
        }
    }
}
