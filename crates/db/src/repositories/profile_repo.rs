//! Repository for the `profiles` table.

use sqlx::PgPool;

use crate::models::profile::Profile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, onboarding_completed, brand_reviewed, brand_analysis_skipped, \
     persona_reviewed, persona_skipped, socials_connected, socials_skipped, \
     usage_used, usage_limit, created_at, updated_at";

/// Provides read/update operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Fetch the profile for a user, creating a default row on first
    /// access.
    pub async fn find_or_create(pool: &PgPool, user_id: &str) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_profiles_user_id
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Set one onboarding flag to true.
    ///
    /// The column is resolved through a closed match, never interpolated
    /// from caller input; unknown names must be rejected upstream via
    /// `inflio_core::onboarding::validate_reviewed_field`.
    pub async fn mark_flag(
        pool: &PgPool,
        user_id: &str,
        field: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let column = match field {
            "onboarding_completed" => "onboarding_completed",
            "brand_reviewed" => "brand_reviewed",
            "brand_analysis_skipped" => "brand_analysis_skipped",
            "persona_reviewed" => "persona_reviewed",
            "persona_skipped" => "persona_skipped",
            "socials_connected" => "socials_connected",
            "socials_skipped" => "socials_skipped",
            _ => return Ok(None),
        };
        let query = format!(
            "UPDATE profiles SET {column} = TRUE, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Consume one unit of plan usage if any remains.
    ///
    /// Returns `None` when the profile is missing or the plan is
    /// exhausted. The guard and the increment are a single conditional
    /// statement, so concurrent callers cannot both pass the check.
    pub async fn try_consume_usage<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        user_id: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET usage_used = usage_used + 1, updated_at = NOW()
             WHERE user_id = $1 AND usage_used < usage_limit
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }
}
